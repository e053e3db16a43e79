//! Clipboard access.

use once_cell::sync::Lazy;
use regex::Regex;

/// CSI and OSC terminal escape sequences.
#[allow(clippy::expect_used)] // Constant pattern.
static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("Invalid ANSI escape regex pattern")
});

/// Removes terminal color and style escape sequences from `text`.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Destination for copied text.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable.
    fn write_all(&mut self, text: &str) -> anyhow::Result<()>;
}

/// System clipboard backed by `arboard`. Opens a new handle for every write.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_all(&mut self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }
}
