use clap::Parser;

use crate::i18n::Locale;
use crate::theme::ThemeMode;

/// Command-line overrides. Anything set here applies to this run only; the
/// saved preferences are not touched until the reader switches in-session.
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(about = "Terminal portfolio of Andrés Vega", version)]
pub struct Cli {
    /// Start in a specific language (es, en, pt)
    #[arg(short, long, value_parser = parse_locale)]
    pub locale: Option<Locale>,

    /// Start with a specific theme (light, dark, system)
    #[arg(short, long, value_parser = parse_theme)]
    pub theme: Option<ThemeMode>,

    /// Log file path (truncated on each run)
    #[arg(long, default_value = "termfolio.log")]
    pub log_file: String,
}

fn parse_locale(value: &str) -> Result<Locale, String> {
    Locale::from_code(value)
        .ok_or_else(|| format!("unknown language '{}', expected es, en or pt", value))
}

fn parse_theme(value: &str) -> Result<ThemeMode, String> {
    ThemeMode::from_code(value)
        .ok_or_else(|| format!("unknown theme '{}', expected light, dark or system", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_and_theme_overrides() {
        let cli = Cli::parse_from(["termfolio", "--locale", "pt", "--theme", "light"]);
        assert_eq!(cli.locale, Some(Locale::Pt));
        assert_eq!(cli.theme, Some(ThemeMode::Light));
    }

    #[test]
    fn rejects_unknown_locale() {
        assert!(Cli::try_parse_from(["termfolio", "--locale", "fr"]).is_err());
    }

    #[test]
    fn defaults_leave_overrides_unset() {
        let cli = Cli::parse_from(["termfolio"]);
        assert!(cli.locale.is_none());
        assert!(cli.theme.is_none());
        assert_eq!(cli.log_file, "termfolio.log");
    }
}
