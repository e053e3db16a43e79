//! Result screen rendering.

use ratatui::{
    Frame,
    layout::{Margin, Rect},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::app::App;

impl App {
    /// Renders the visible window of the result document.
    ///
    /// Lines are pre-wrapped to the viewport, so no wrapping happens here.
    pub(crate) fn render_result(&self, frame: &mut Frame, area: Rect) {
        let total = self.result.lines.len();
        let rows = self.viewport.rows();

        let title = match &self.in_flight {
            Some(request) => format!("{} {}", request.spinner_frame(), request.backend_name()),
            None if total > rows => format!(
                "Result ({}-{}/{total})",
                self.result.offset + 1,
                (self.result.offset + rows).min(total)
            ),
            None => "Result".to_string(),
        };

        let visible: Vec<_> = self
            .result
            .lines
            .iter()
            .skip(self.result.offset)
            .take(rows)
            .cloned()
            .collect();

        frame.render_widget(
            Paragraph::new(visible).block(self.body_block(&title)),
            area,
        );

        if total > rows && area.height > 2 {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .track_style(self.theme.scrollbar_track_style())
                .thumb_style(self.theme.scrollbar_thumb_style());

            let mut state = ScrollbarState::new(self.result.max_offset(rows))
                .position(self.result.offset)
                .viewport_content_length(rows);

            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }
    }
}
