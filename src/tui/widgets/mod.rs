//! Custom TUI widgets.

pub mod status_bar;

pub use status_bar::StatusBarWidget;
