//! `ticketsum` - TUI questionnaire that turns answers into tickets
//!
//! Entry point for the application.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use ticketsum::app::App;
use ticketsum::cli::Args;
use ticketsum::fs::ConfigPaths;
use ticketsum::logging;
use ticketsum::tui::TerminalEventGuard;

/// How long to wait for terminal input before redrawing.
const TICK: Duration = Duration::from_millis(50);

/// Configuration directory used when no home directory can be found.
const FALLBACK_CONFIG_DIR: &str = ".ticketsum";

#[tokio::main]
async fn main() -> ExitCode {
    let _args = Args::parse();
    let paths = ConfigPaths::from_env().unwrap_or_else(|e| {
        eprintln!("Warning: {e:#}, using {FALLBACK_CONFIG_DIR} in the current directory");
        ConfigPaths::new(Path::new(FALLBACK_CONFIG_DIR))
    });

    let _log_guard = match logging::init(&paths) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    let mut terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize terminal");
            eprintln!("Error: failed to initialize terminal: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = run_app(&mut terminal, App::new(paths)).await;

    ratatui::restore();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "terminal session failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_app(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> std::io::Result<()> {
    // Must come after terminal init, which resets these modes.
    let _event_guard = TerminalEventGuard::new();

    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    loop {
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })?;

        if app.is_busy() {
            // Input stays queued in the terminal until the outcome is merged.
            tokio::time::sleep(TICK).await;
        } else if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(&text),
                Event::Resize(width, height) => app.handle_resize(width, height),
                _ => {}
            }
        }

        app.process_events();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
