//! Backend configuration form rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_textarea::TextArea;

use crate::app::{App, ConfigField, ConfigureState};

impl App {
    pub(crate) fn render_configure(&self, frame: &mut Frame, area: Rect) {
        let title = format!("Configure {}", self.config.active_backend);
        let block = self.body_block(&title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(form) = self.configure.as_ref() else {
            return;
        };

        let [credential, model, dialect, save] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_field(
            frame,
            credential,
            &form.credential,
            form.family.credential_label(),
            form.focused() == ConfigField::Credential,
        );
        self.render_field(
            frame,
            model,
            &form.model,
            "Model",
            form.focused() == ConfigField::Model,
        );

        if form.fields().contains(&ConfigField::Dialect) {
            self.render_dialect(frame, dialect, form);
        }
        self.render_save_toggle(frame, save, form);
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        input: &TextArea<'static>,
        label: &str,
        focused: bool,
    ) {
        let (border, title) = if focused {
            (self.theme.highlight_style(), self.theme.highlight_style())
        } else {
            (self.theme.border_style(), self.theme.muted_style())
        };

        let mut textarea = input.clone();
        textarea.set_block(
            Block::bordered()
                .title(Span::styled(format!(" {label} "), title))
                .border_style(border),
        );
        textarea.set_style(self.theme.normal_style());
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_style(self.theme.placeholder_style());
        if !focused {
            textarea.set_cursor_style(Style::default());
        }
        frame.render_widget(&textarea, area);
    }

    fn render_dialect(&self, frame: &mut Frame, area: Rect, form: &ConfigureState) {
        let focused = form.focused() == ConfigField::Dialect;
        let style = if focused {
            self.theme.highlight_style()
        } else {
            self.theme.normal_style()
        };
        let prefix = if focused { "› " } else { "  " };

        let line = Line::from(vec![
            Span::styled(prefix, style),
            Span::styled("Dialect: ", style),
            Span::styled(format!("[{}]", form.dialect.name()), style),
            Span::styled("  ←/→ to change", self.theme.muted_style()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_save_toggle(&self, frame: &mut Frame, area: Rect, form: &ConfigureState) {
        let focused = form.focused() == ConfigField::Save;
        let style = if focused {
            self.theme.highlight_style()
        } else {
            self.theme.normal_style()
        };
        let prefix = if focused { "› " } else { "  " };
        let check = if form.save { "[x]" } else { "[ ]" };

        let line = Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{check} Save configuration"), style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
