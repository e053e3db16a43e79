//! TUI presentation layer.

pub mod markdown;
pub mod setup;
pub mod theme;
pub mod widgets;

pub use setup::TerminalEventGuard;
pub use theme::Theme;
