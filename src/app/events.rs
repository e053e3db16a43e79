//! Event handling logic for the App.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::app::state::{ConfigField, Screen};
use crate::core::catalog;
use crate::tui::Theme;

impl App {
    /// Handles a key event.
    ///
    /// Global shortcuts are checked first, then the key goes to the handler
    /// of the current screen. Keys are ignored while a request is in flight.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.is_busy() {
            tracing::trace!(code = ?key.code, "key ignored while busy");
            return;
        }

        if self.handle_global_key(key) {
            return;
        }

        match self.screen {
            Screen::PickBackend => self.handle_pick_backend_key(key),
            Screen::ConfigureBackend => self.handle_configure_key(key),
            Screen::SelectDocumentType => self.handle_select_document_key(key),
            Screen::AnswerQuestions => self.handle_answer_key(key),
            Screen::ShowResult => self.handle_result_key(key),
            Screen::PickTheme => self.handle_pick_theme_key(key),
        }
    }

    /// Handles pasted text on the text-entry screens.
    ///
    /// Line breaks are folded into spaces since every input is one line.
    pub fn handle_paste(&mut self, text: &str) {
        if self.is_busy() || text.is_empty() {
            return;
        }

        let single_line: String = text
            .replace("\r\n", " ")
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();

        match self.screen {
            Screen::AnswerQuestions => self.answers.buffer.push_str(&single_line),
            Screen::ConfigureBackend => {
                if let Some(input) = self
                    .configure
                    .as_mut()
                    .and_then(super::ConfigureState::focused_input)
                {
                    input.insert_str(single_line.trim());
                }
            }
            _ => {}
        }
    }

    /// Returns true if the key was a global shortcut.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let text_screen = self.screen.accepts_text();

        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Char('b') if ctrl => self.open_backend_picker(),
            KeyCode::Char('t') if ctrl => self.open_theme_picker(),
            KeyCode::Char('q') if !ctrl && !text_screen => self.quit(),
            KeyCode::Char('~') if !text_screen => self.open_backend_picker(),
            KeyCode::Esc => {
                if self.screen != Screen::SelectDocumentType {
                    self.escape_to_menu();
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_pick_backend_key(&mut self, key: KeyEvent) {
        let len = self.config.backends.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.backend_cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.backend_cursor.down(len),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_backend(false),
            KeyCode::Char('c') => self.select_backend(true),
            _ => {}
        }
    }

    fn handle_select_document_key(&mut self, key: KeyEvent) {
        let len = catalog::all().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.doc_type_cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.doc_type_cursor.down(len),
            KeyCode::Enter | KeyCode::Char(' ') => self.start_questionnaire(),
            _ => {}
        }
    }

    fn handle_pick_theme_key(&mut self, key: KeyEvent) {
        let len = Theme::all().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.theme_cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.theme_cursor.down(len),
            KeyCode::Enter | KeyCode::Char(' ') => self.apply_theme(),
            _ => {}
        }
    }

    fn handle_answer_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.answer_current(""),
            KeyCode::Char(c) if !ctrl => self.answers.buffer.push(c),
            KeyCode::Backspace => {
                self.answers.buffer.pop();
            }
            KeyCode::Enter => {
                let answer = std::mem::take(&mut self.answers.buffer);
                self.answer_current(&answer);
            }
            _ => {}
        }
    }

    fn handle_configure_key(&mut self, key: KeyEvent) {
        let Some(form) = self.configure.as_mut() else {
            self.open_configure();
            return;
        };

        match key.code {
            KeyCode::Enter => self.commit_configuration(),
            KeyCode::Up | KeyCode::BackTab => form.focus_prev(),
            KeyCode::Down | KeyCode::Tab => form.focus_next(),
            _ => match form.focused() {
                ConfigField::Save => {
                    if key.code == KeyCode::Char(' ') {
                        form.save = !form.save;
                    }
                }
                ConfigField::Dialect => {
                    if matches!(
                        key.code,
                        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                    ) {
                        form.dialect = form.dialect.next();
                    }
                }
                ConfigField::Credential | ConfigField::Model => {
                    if let Some(input) = form.focused_input() {
                        input.input(key);
                    }
                }
            },
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        let rows = self.viewport.rows();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if key.code == KeyCode::Char('g') && !ctrl {
            self.result.press_top();
            return;
        }
        self.result.disarm();

        match key.code {
            KeyCode::Char('y') if ctrl => self.copy_response(),
            KeyCode::Up | KeyCode::Char('k') => self.result.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.result.scroll_down(rows),
            KeyCode::PageUp => self.result.page_up(rows),
            KeyCode::PageDown => self.result.page_down(rows),
            KeyCode::Char('G') => self.result.scroll_to_bottom(rows),
            _ => {}
        }
    }
}
