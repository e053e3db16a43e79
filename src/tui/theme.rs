//! Centralized theme and styling.

use ratatui::style::{Color, Modifier, Style};

/// Application theme with consistent colors and styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Name shown in the theme picker.
    pub name: &'static str,
    /// Primary brand color (titles, headings).
    pub base: Color,
    /// Accent/highlight color.
    pub accent: Color,
    /// Success color.
    pub success: Color,
    /// Error color.
    pub error: Color,
    /// Primary foreground color.
    pub fg: Color,
    /// Muted/secondary text color.
    pub muted: Color,
    /// Border color.
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// Green and violet.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            name: "Default",
            base: Color::Rgb(0x02, 0xBF, 0x87),
            accent: Color::Rgb(0x7D, 0x56, 0xF4),
            success: Color::Rgb(0x02, 0xBF, 0x87),
            error: Color::Rgb(0xFF, 0x5F, 0x87),
            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
        }
    }

    /// Blues and teal.
    #[must_use]
    pub const fn ocean() -> Self {
        Self {
            name: "Ocean",
            base: Color::Rgb(0x75, 0x71, 0xF9),
            accent: Color::Rgb(0x00, 0xB4, 0xD8),
            success: Color::Rgb(0x4E, 0xCD, 0xC4),
            error: Color::Rgb(0xFF, 0x6B, 0x6B),
            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::Rgb(0x00, 0xB4, 0xD8),
        }
    }

    /// Warm reds and yellow.
    #[must_use]
    pub const fn sunset() -> Self {
        Self {
            name: "Sunset",
            base: Color::Rgb(0xFF, 0x6B, 0x6B),
            accent: Color::Rgb(0xFF, 0xD1, 0x66),
            success: Color::Rgb(0x06, 0xD6, 0xA0),
            error: Color::Rgb(0xEF, 0x47, 0x6F),
            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::Rgb(0xFF, 0xD1, 0x66),
        }
    }

    /// Returns every theme in picker order.
    #[must_use]
    pub fn all() -> Vec<Theme> {
        vec![Self::classic(), Self::ocean(), Self::sunset()]
    }

    /// Style for the header/title.
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.base).add_modifier(Modifier::BOLD)
    }

    /// Style for normal text.
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Style for muted/secondary text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for success messages.
    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for error messages.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for borders.
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for highlighted/selected items.
    #[must_use]
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the status bar.
    #[must_use]
    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(Color::Black).bg(self.base)
    }

    /// Style for scrollbar thumb.
    #[must_use]
    pub fn scrollbar_thumb_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for scrollbar track.
    #[must_use]
    pub fn scrollbar_track_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for placeholder text.
    #[must_use]
    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
    }

    /// Style for Markdown headings; level 1 is the most prominent.
    #[must_use]
    pub fn heading_style(&self, level: u8) -> Style {
        match level {
            1 => self.header_style().add_modifier(Modifier::UNDERLINED),
            2 => Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(self.fg).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for inline code and code blocks.
    #[must_use]
    pub fn code_style(&self) -> Style {
        Style::default().fg(self.success)
    }
}
