//! List screens: backend picker, document types and themes.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, ListCursor};
use crate::core::catalog;
use crate::tui::Theme;

impl App {
    pub(crate) fn render_backend_list(&self, frame: &mut Frame, area: Rect) {
        let rows = self.config.backends.iter().map(|(id, entry)| {
            let marker = if *id == self.config.active_backend {
                " (active)"
            } else {
                ""
            };
            let status = if entry.is_complete() {
                ""
            } else {
                " - needs setup"
            };
            (
                id.clone(),
                format!(
                    "{} · {}{marker}{status}",
                    entry.provider.name(),
                    entry.model_name
                ),
            )
        });

        let lines = self.list_lines(rows, self.backend_cursor);
        frame.render_widget(
            Paragraph::new(lines).block(self.body_block("Pick a backend")),
            area,
        );
    }

    pub(crate) fn render_document_types(&self, frame: &mut Frame, area: Rect) {
        let rows = catalog::all().iter().map(|doc_type| {
            (
                doc_type.name.to_string(),
                format!("{} questions", doc_type.question_count()),
            )
        });

        let lines = self.list_lines(rows, self.doc_type_cursor);
        frame.render_widget(
            Paragraph::new(lines).block(self.body_block("What are you writing?")),
            area,
        );
    }

    pub(crate) fn render_theme_list(&self, frame: &mut Frame, area: Rect) {
        let rows = Theme::all().into_iter().map(|theme| {
            let detail = if theme.name == self.theme.name {
                "current"
            } else {
                ""
            };
            (theme.name.to_string(), detail.to_string())
        });

        let lines = self.list_lines(rows, self.theme_cursor);
        frame.render_widget(
            Paragraph::new(lines).block(self.body_block("Pick a theme")),
            area,
        );
    }

    /// One line per `(label, detail)` row, with the cursor row highlighted.
    fn list_lines(
        &self,
        rows: impl Iterator<Item = (String, String)>,
        cursor: ListCursor,
    ) -> Vec<Line<'static>> {
        rows.enumerate()
            .map(|(i, (label, detail))| {
                if i == cursor.index() {
                    Line::from(vec![
                        Span::styled("› ", self.theme.highlight_style()),
                        Span::styled(format!("{label:<32}"), self.theme.highlight_style()),
                        Span::styled(detail, self.theme.highlight_style()),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(format!("{label:<32}"), self.theme.normal_style()),
                        Span::styled(detail, self.theme.muted_style()),
                    ])
                }
            })
            .collect()
    }
}
