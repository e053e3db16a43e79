//! Shared test utilities for the app module.
//!
//! - Key event helpers (`char_key`, `ctrl_key`, `key`)
//! - `test_app` / `test_app_with_config` - `App` instances on a `TempDir`
//! - `RecordingClipboard` - clipboard that keeps what was written
//! - `render_app_to_terminal` / `buffer_text` - `TestBackend` rendering

use std::sync::{Arc, Mutex};

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend, layout::Rect};
use tempfile::TempDir;

use crate::app::App;
use crate::clipboard::Clipboard;
use crate::core::ProviderFamily;
use crate::fs::{BackendConfiguration, BackendEntry, ConfigPaths};

/// Terminal size used by most tests.
pub const WIDTH: u16 = 100;
pub const HEIGHT: u16 = 30;

/// Creates a [`KeyEvent`] for `code` with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Creates a [`KeyEvent`] for `Ctrl` + `c`.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Sends every character of `text` as a key press.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(char_key(c));
    }
}

/// Clipboard that records writes, or fails every write.
#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub writes: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl Clipboard for RecordingClipboard {
    fn write_all(&mut self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("no clipboard available");
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Creates an `App` whose configuration lives in `dir`.
///
/// Nothing is written to `dir` until the app persists something.
pub fn test_app(dir: &TempDir) -> App {
    let mut app = App::new(ConfigPaths::new(dir.path()))
        .with_clipboard(Box::new(RecordingClipboard::default()));
    app.handle_resize(WIDTH, HEIGHT);
    app
}

/// Creates an `App` with `config` already saved in `dir`.
pub fn test_app_with_config(dir: &TempDir, config: &BackendConfiguration) -> App {
    ConfigPaths::new(dir.path()).save_config(config).unwrap();
    test_app(dir)
}

/// Default configuration with `id` active and its entry replaced by `entry`.
pub fn config_with_active(id: &str, entry: BackendEntry) -> BackendConfiguration {
    let mut config = BackendConfiguration::default();
    config.backends.insert(id.to_string(), entry);
    config.active_backend = id.to_string();
    config
}

/// OpenAI entry pointing at `base_url` with a test key.
pub fn openai_entry(base_url: &str) -> BackendEntry {
    let mut entry = BackendEntry::new(ProviderFamily::OpenAi);
    entry.api_key = Some("sk-test".to_string());
    entry.api_base_url = Some(base_url.to_string());
    entry.model_name = "gpt-4o".to_string();
    entry
}

/// Loads what the app saved to `dir`.
pub fn saved_config(dir: &TempDir) -> BackendConfiguration {
    ConfigPaths::new(dir.path()).load_config().unwrap()
}

/// Renders the app to a [`TestBackend`] of the given size.
///
/// # Errors
///
/// Returns an error if drawing fails.
pub fn render_app_to_terminal(
    app: &mut App,
    width: u16,
    height: u16,
) -> Result<Terminal<TestBackend>> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    // Mimics the main loop: layout first, then render.
    app.update_layout(Rect::new(0, 0, width, height));
    terminal.draw(|f| app.render(f))?;

    Ok(terminal)
}

/// All buffer symbols joined row by row with newlines.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
