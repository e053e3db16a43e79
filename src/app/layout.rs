//! Layout calculation helpers for the TUI.
//!
//! Every screen shares one frame: a header, a bordered body, a notice line,
//! the status bar and a key-hint footer. The body's inner size is the
//! viewport that Markdown is wrapped to, so [`Viewport::from_terminal`] and
//! [`calculate_app_layout`] must agree.

use ratatui::layout::{Constraint, Layout, Rect};

/// Columns taken by the horizontal margin and body borders.
const HORIZONTAL_CHROME: u16 = 4;

/// Rows taken by the header, notice, status, footer and body borders.
const VERTICAL_CHROME: u16 = 8;

/// Smallest viewport the result screen is laid out for.
pub const MIN_VIEWPORT_WIDTH: u16 = 40;
pub const MIN_VIEWPORT_HEIGHT: u16 = 10;

/// Frame layout shared by all screens.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppLayout {
    /// Title and subtitle (3 lines).
    pub header: Rect,
    /// Bordered main content.
    pub body: Rect,
    /// Transient notice (1 line).
    pub notice: Rect,
    /// Status bar (1 line).
    pub status: Rect,
    /// Key hints (1 line).
    pub footer: Rect,
}

const APP_LAYOUT_CONSTRAINTS: [Constraint; 5] = [
    Constraint::Length(3), // Header
    Constraint::Min(0),    // Body (grows)
    Constraint::Length(1), // Notice
    Constraint::Length(1), // Status bar
    Constraint::Length(1), // Footer
];

/// Calculates the frame layout for `area`.
#[must_use]
pub fn calculate_app_layout(area: Rect) -> AppLayout {
    let chunks = Layout::vertical(APP_LAYOUT_CONSTRAINTS)
        .horizontal_margin(1)
        .split(area);

    AppLayout {
        header: chunks[0],
        body: chunks[1],
        notice: chunks[2],
        status: chunks[3],
        footer: chunks[4],
    }
}

/// Size of the text area inside the body border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: MIN_VIEWPORT_WIDTH,
            height: MIN_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    /// Viewport for a terminal of `width` x `height` cells, clamped to the minimums.
    #[must_use]
    pub fn from_terminal(width: u16, height: u16) -> Self {
        Self {
            width: width
                .saturating_sub(HORIZONTAL_CHROME)
                .max(MIN_VIEWPORT_WIDTH),
            height: height
                .saturating_sub(VERTICAL_CHROME)
                .max(MIN_VIEWPORT_HEIGHT),
        }
    }

    /// Rows visible at once.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.height as usize
    }

    /// Columns available for wrapped text.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.width as usize
    }
}
