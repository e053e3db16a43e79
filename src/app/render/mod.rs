//! Rendering methods for the App.
//!
//! Every screen shares the frame from [`crate::app::AppLayout`]; only the
//! body and the footer hints differ per screen.

mod configure;
mod lists;
mod questions;
mod result;

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::{App, NoticeKind, Screen};
use crate::tui::widgets::StatusBarWidget;

impl App {
    /// Renders the application UI.
    ///
    /// Uses the layout cached by [`App::update_layout`].
    pub fn render(&self, frame: &mut Frame) {
        let layout = self.layout;

        self.render_header(frame, layout.header);

        match self.screen {
            Screen::PickBackend => self.render_backend_list(frame, layout.body),
            Screen::ConfigureBackend => self.render_configure(frame, layout.body),
            Screen::SelectDocumentType => self.render_document_types(frame, layout.body),
            Screen::AnswerQuestions => self.render_questions(frame, layout.body),
            Screen::ShowResult => self.render_result(frame, layout.body),
            Screen::PickTheme => self.render_theme_list(frame, layout.body),
        }

        self.render_notice(frame, layout.notice);
        self.render_status_bar(frame, layout.status);
        self.render_footer(frame, layout.footer);
    }

    /// Bordered block shared by all screen bodies.
    pub(crate) fn body_block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::bordered()
            .title(Span::styled(format!(" {title} "), self.theme.header_style()))
            .border_style(self.theme.border_style())
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("ticketsum", self.theme.header_style())),
            Line::from(Span::styled(
                "Answer a few questions, get a ticket written for you.",
                self.theme.muted_style(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect) {
        let Some(notice) = &self.notice else {
            return;
        };
        let style = match notice.kind {
            NoticeKind::Info => self.theme.success_style(),
            NoticeKind::Error => self.theme.error_style(),
        };
        frame.render_widget(Paragraph::new(Span::styled(&notice.text, style)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let model = self
            .config
            .active_entry()
            .map(|entry| entry.model_name.as_str());
        let spinner = self
            .in_flight
            .as_ref()
            .filter(|request| request.is_spinning())
            .map(crate::core::InFlightRequest::spinner_frame);

        let widget = StatusBarWidget::new(self.screen.label(), model, &self.theme).spinner(spinner);
        frame.render_widget(widget, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = if self.is_busy() {
            &[("", "Waiting for the backend...")]
        } else {
            match self.screen {
                Screen::PickBackend => &[
                    ("[↑/↓] ", "Navigate  "),
                    ("[Enter] ", "Select  "),
                    ("[c] ", "Configure  "),
                    ("[q] ", "Quit"),
                ],
                Screen::ConfigureBackend => &[
                    ("[↑/↓/Tab] ", "Field  "),
                    ("[Space] ", "Toggle  "),
                    ("[Enter] ", "Save  "),
                    ("[Esc] ", "Menu"),
                ],
                Screen::SelectDocumentType => &[
                    ("[↑/↓] ", "Navigate  "),
                    ("[Enter] ", "Start  "),
                    ("[Ctrl+B] ", "Backend  "),
                    ("[Ctrl+T] ", "Theme  "),
                    ("[q] ", "Quit"),
                ],
                Screen::AnswerQuestions => &[
                    ("[Enter] ", "Next  "),
                    ("[Ctrl+S] ", "Skip  "),
                    ("[Esc] ", "Menu"),
                ],
                Screen::ShowResult => &[
                    ("[↑/↓] ", "Scroll  "),
                    ("[gg/G] ", "Top/Bottom  "),
                    ("[Ctrl+Y] ", "Copy  "),
                    ("[Esc] ", "Menu"),
                ],
                Screen::PickTheme => &[
                    ("[↑/↓] ", "Navigate  "),
                    ("[Enter] ", "Apply  "),
                    ("[Esc] ", "Menu"),
                ],
            }
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(*key, self.theme.highlight_style()));
            spans.push(Span::styled(*label, self.theme.muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
