use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use termfolio::bus::EventBus;
use termfolio::cli::Cli;
use termfolio::contact::Controller;
use termfolio::i18n::Translator;
use termfolio::prefs::Preferences;
use termfolio::services::mailer::{EmailDelivery, EmailJsMailer, MailerConfig};
use termfolio::services::verify::{BotVerifier, RecaptchaGate};
use termfolio::session::Session;
use termfolio::theme::ThemeHandle;

#[tokio::main]
async fn main() -> Result<()> {
    // .env before anything reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Log to file (truncate on each run); the terminal itself is the UI.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&cli.log_file)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    info!("Starting termfolio");

    let prefs = Arc::new(Preferences::load());
    let initial_locale = cli.locale.unwrap_or_else(|| prefs.language());
    let initial_theme = cli.theme.unwrap_or_else(|| prefs.theme());

    let t = Arc::new(Translator::embedded(initial_locale)?);
    let theme = Arc::new(ThemeHandle::new(initial_theme));
    let bus = Arc::new(EventBus::new());

    let mailer = MailerConfig::from_env()
        .map(|config| Arc::new(EmailJsMailer::new(config)) as Arc<dyn EmailDelivery>);
    if mailer.is_none() {
        info!("contact delivery not configured; the form will say so");
    }
    let verifier =
        RecaptchaGate::from_env().map(|gate| Arc::new(gate) as Arc<dyn BotVerifier>);
    let contact = Controller::new(mailer, verifier.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);
    let mut session = Session::new(t, prefs, bus, theme, contact, verifier, area);
    let result = session.run(&mut terminal).await;

    // Restore terminal even when the loop errored
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
