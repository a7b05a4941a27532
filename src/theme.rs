use std::sync::Arc;

use arc_swap::ArcSwap;
use ratatui::style::{Color, Style};
use serde_json::json;

use crate::bus::{EventBus, THEME_CHANGED};
use crate::prefs::Preferences;

/// User-facing theme preference. `System` defers to the terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

impl ThemeMode {
    /// Toggle order: light -> dark -> system -> light.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ThemeMode::Light => "☀",
            ThemeMode::Dark => "☾",
            ThemeMode::System => "◐",
        }
    }

    /// Catalog key for the mode's display name.
    pub fn label_key(self) -> &'static str {
        match self {
            ThemeMode::Light => "themes.light",
            ThemeMode::Dark => "themes.dark",
            ThemeMode::System => "themes.system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Mocha, // dark
    Latte, // light
}

impl Default for ThemeVariant {
    fn default() -> Self {
        Self::Mocha
    }
}

/// Resolve the effective palette for a mode. `System` consults the terminal.
pub fn resolve_variant(mode: ThemeMode) -> ThemeVariant {
    match mode {
        ThemeMode::Light => ThemeVariant::Latte,
        ThemeMode::Dark => ThemeVariant::Mocha,
        ThemeMode::System => detect_system_variant(),
    }
}

/// Best-effort terminal background detection via the COLORFGBG convention
/// ("fg;bg", bg 0-6 and 8 are dark). Unknown or unset defaults to dark.
pub fn detect_system_variant() -> ThemeVariant {
    match std::env::var("COLORFGBG") {
        Ok(value) => {
            let bg = value.rsplit(';').next().and_then(|s| s.parse::<u8>().ok());
            match bg {
                Some(n) if n <= 6 || n == 8 => ThemeVariant::Mocha,
                Some(_) => ThemeVariant::Latte,
                None => ThemeVariant::Mocha,
            }
        }
        Err(_) => ThemeVariant::Mocha,
    }
}

/// Semantic palette. Catppuccin Mocha (dark) and Latte (light).
#[derive(Debug, Clone)]
pub struct Theme {
    // Accents
    pub accent_primary: Color,   // brand, focus, active nav
    pub accent_secondary: Color, // links, secondary actions
    pub accent_tertiary: Color,  // section headings, modal headers
    pub accent_error: Color,
    pub accent_warning: Color,
    pub accent_success: Color,
    pub accent_info: Color,
    pub accent_muted: Color, // badges, labels

    // Text hierarchy
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,

    // Structure
    pub border_primary: Color,
    pub border_secondary: Color,
    pub bg_base: Color,
    pub bg_surface: Color,
    pub bg_elevated: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            accent_primary: Color::Rgb(0xb4, 0xbe, 0xfe),   // lavender
            accent_secondary: Color::Rgb(0x89, 0xb4, 0xfa), // blue
            accent_tertiary: Color::Rgb(0xcb, 0xa6, 0xf7),  // mauve
            accent_error: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
            accent_warning: Color::Rgb(0xf9, 0xe2, 0xaf),   // yellow
            accent_success: Color::Rgb(0xa6, 0xe3, 0xa1),   // green
            accent_info: Color::Rgb(0x94, 0xe2, 0xd5),      // teal
            accent_muted: Color::Rgb(0xfa, 0xb3, 0x87),     // peach

            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),   // text
            text_secondary: Color::Rgb(0xba, 0xc2, 0xde), // subtext1
            text_tertiary: Color::Rgb(0xa6, 0xad, 0xc8),  // subtext0

            border_primary: Color::Rgb(0x7f, 0x84, 0x9c),   // overlay1
            border_secondary: Color::Rgb(0x6c, 0x70, 0x86), // overlay0
            bg_base: Color::Rgb(0x1e, 0x1e, 0x2e),          // base
            bg_surface: Color::Rgb(0x31, 0x32, 0x44),       // surface0
            bg_elevated: Color::Rgb(0x45, 0x47, 0x5a),      // surface1
        }
    }

    fn latte() -> Self {
        Self {
            accent_primary: Color::Rgb(0x72, 0x87, 0xfd),   // lavender
            accent_secondary: Color::Rgb(0x1e, 0x66, 0xf5), // blue
            accent_tertiary: Color::Rgb(0x88, 0x39, 0xef),  // mauve
            accent_error: Color::Rgb(0xd2, 0x0f, 0x39),     // red
            accent_warning: Color::Rgb(0xdf, 0x8e, 0x1d),   // yellow
            accent_success: Color::Rgb(0x40, 0xa0, 0x2b),   // green
            accent_info: Color::Rgb(0x17, 0x92, 0x99),      // teal
            accent_muted: Color::Rgb(0xfe, 0x64, 0x0b),     // peach

            text_primary: Color::Rgb(0x4c, 0x4f, 0x69),   // text
            text_secondary: Color::Rgb(0x5c, 0x5f, 0x77), // subtext1
            text_tertiary: Color::Rgb(0x6c, 0x6f, 0x85),  // subtext0

            border_primary: Color::Rgb(0x8c, 0x8f, 0xa1),   // overlay1
            border_secondary: Color::Rgb(0x9c, 0xa0, 0xb0), // overlay0
            bg_base: Color::Rgb(0xef, 0xf1, 0xf5),          // base
            bg_surface: Color::Rgb(0xcc, 0xd0, 0xda),       // surface0
            bg_elevated: Color::Rgb(0xbc, 0xc0, 0xcc),      // surface1
        }
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.accent_error)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.accent_success)
    }
}

/// The currently applied theme: preference mode plus resolved palette.
#[derive(Debug, Clone)]
pub struct ActiveTheme {
    pub mode: ThemeMode,
    pub variant: ThemeVariant,
    pub palette: Theme,
}

impl ActiveTheme {
    fn new(mode: ThemeMode) -> Self {
        let variant = resolve_variant(mode);
        Self {
            mode,
            variant,
            palette: Theme::new(variant),
        }
    }
}

/// Hot-swappable theme handle. The draw pass loads it every frame, so a swap
/// takes effect without touching the composed page.
pub struct ThemeHandle {
    active: ArcSwap<ActiveTheme>,
}

impl ThemeHandle {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            active: ArcSwap::from_pointee(ActiveTheme::new(mode)),
        }
    }

    pub fn current(&self) -> Arc<ActiveTheme> {
        self.active.load_full()
    }

    pub fn mode(&self) -> ThemeMode {
        self.active.load().mode
    }

    /// Re-resolve `System` against the terminal. Called on resize.
    pub fn refresh(&self) {
        let mode = self.mode();
        if mode == ThemeMode::System {
            self.active.store(Arc::new(ActiveTheme::new(mode)));
        }
    }

    /// Apply a mode without persisting or publishing (startup, CLI override).
    pub fn set_mode(&self, mode: ThemeMode) {
        self.active.store(Arc::new(ActiveTheme::new(mode)));
    }

    /// Cycle to the next mode, persist it, and announce it. The page is not
    /// recomposed: styling resolves against the swapped palette at draw time
    /// and the header icon is derived from the mode each frame.
    pub fn cycle(&self, prefs: &Preferences, bus: &EventBus) -> ThemeMode {
        let next = self.mode().next();
        self.active.store(Arc::new(ActiveTheme::new(next)));
        prefs.set_theme(next);
        bus.publish(THEME_CHANGED, json!({ "mode": next.code() }));
        log::debug!("theme: mode -> {}", next.code());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_through_all_modes() {
        let mode = ThemeMode::Light;
        let mode = mode.next();
        assert_eq!(mode, ThemeMode::Dark);
        let mode = mode.next();
        assert_eq!(mode, ThemeMode::System);
        let mode = mode.next();
        assert_eq!(mode, ThemeMode::Light);
    }

    #[test]
    fn mode_codes_round_trip() {
        for mode in [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System] {
            assert_eq!(ThemeMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(ThemeMode::from_code("sepia"), None);
    }

    #[test]
    fn explicit_modes_resolve_without_detection() {
        assert_eq!(resolve_variant(ThemeMode::Light), ThemeVariant::Latte);
        assert_eq!(resolve_variant(ThemeMode::Dark), ThemeVariant::Mocha);
    }

    #[test]
    fn cycle_swaps_palette_and_publishes() {
        let handle = ThemeHandle::new(ThemeMode::Light);
        let prefs = Preferences::in_memory();
        let bus = EventBus::new();

        let next = handle.cycle(&prefs, &bus);
        assert_eq!(next, ThemeMode::Dark);
        assert_eq!(handle.current().variant, ThemeVariant::Mocha);
        assert_eq!(prefs.theme(), ThemeMode::Dark);
    }
}
