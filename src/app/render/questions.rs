//! Questionnaire screen rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::App;

impl App {
    pub(crate) fn render_questions(&self, frame: &mut Frame, area: Rect) {
        let title = self.answers.doc_type.map_or("Questions", |t| t.name);
        let total = self.answers.answers.len();

        let mut lines = vec![
            Line::from(Span::styled(
                format!("Question {} of {total}", self.answers.index + 1),
                self.theme.muted_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.answers.current_question().unwrap_or_default(),
                self.theme.highlight_style(),
            )),
            Line::from(""),
        ];

        let input = if self.answers.buffer.is_empty() {
            Line::from(vec![
                Span::styled("> ", self.theme.highlight_style()),
                Span::styled("Type your answer...", self.theme.placeholder_style()),
            ])
        } else {
            Line::from(vec![
                Span::styled("> ", self.theme.highlight_style()),
                Span::styled(self.answers.buffer.clone(), self.theme.normal_style()),
                Span::styled("█", self.theme.muted_style()),
            ])
        };
        lines.push(input);

        let paragraph = Paragraph::new(lines)
            .block(self.body_block(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
