//! Terminal event configuration.
//!
//! Bracketed paste delivers a pasted API key or answer as one event. The
//! keyboard enhancement protocol keeps `Esc` and `Ctrl` chords unambiguous.

use std::io::stdout;

use ratatui::crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use ratatui::crossterm::execute;

/// Enables terminal event modes and disables them again on drop.
pub struct TerminalEventGuard {
    bracketed_paste: bool,
    keyboard_enhancement: bool,
}

impl TerminalEventGuard {
    /// Enables what the terminal supports; failures are logged, not fatal.
    #[must_use]
    pub fn new() -> Self {
        let bracketed_paste = match execute!(stdout(), EnableBracketedPaste) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "bracketed paste unavailable");
                false
            }
        };

        let keyboard_enhancement = match execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        ) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "keyboard enhancement unavailable");
                false
            }
        };

        tracing::debug!(bracketed_paste, keyboard_enhancement, "terminal event modes");
        Self {
            bracketed_paste,
            keyboard_enhancement,
        }
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.keyboard_enhancement {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        if self.bracketed_paste {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}
