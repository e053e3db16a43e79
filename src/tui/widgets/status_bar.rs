//! Single-line status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::Theme;

/// Status bar showing the screen label and the active model.
///
/// While a request is in flight the spinner glyph is shown in front of the
/// label.
pub struct StatusBarWidget<'a> {
    /// Label of the current screen.
    label: &'a str,
    /// Model of the active backend, if one is active.
    model: Option<&'a str>,
    /// Current spinner frame while busy.
    spinner: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    /// Creates a new status bar widget.
    #[must_use]
    pub const fn new(label: &'a str, model: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            label,
            model,
            spinner: None,
            theme,
        }
    }

    /// Shows `frame` in front of the label.
    #[must_use]
    pub fn spinner(mut self, frame: Option<&'a str>) -> Self {
        self.spinner = frame;
        self
    }

    /// Text of the bar, without styling.
    fn text(&self) -> String {
        let mut text = match self.spinner {
            Some(frame) => format!(" {frame} {}", self.label),
            None => format!(" {}", self.label),
        };
        if let Some(model) = self.model.filter(|m| !m.is_empty()) {
            text.push_str(" │ Model: ");
            text.push_str(model);
        }
        text
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.theme.status_bar_style();
        let line = Line::from(Span::styled(self.text(), style));
        Paragraph::new(line).style(style).render(area, buf);
    }
}
