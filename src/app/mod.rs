//! Main application state and logic.
//!
//! This module contains the core `App` struct (the session) and its
//! implementation, organized into submodules:
//! - `state` - Screen enum and per-screen state structures
//! - `events` - Key and resize handling
//! - `layout` - Frame layout and viewport size
//! - `render` - UI rendering
//!
//! ## Screens
//!
//! - **`PickBackend`**: choose the active backend (`Ctrl+B` or `~`)
//! - **`ConfigureBackend`**: credential or address, model, save toggle
//! - **`SelectDocumentType`**: the main menu (`Esc` from anywhere)
//! - **`AnswerQuestions`**: one question at a time
//! - **`ShowResult`**: scrollable document with the backend's response
//! - **`PickTheme`**: color theme (`Ctrl+T`)
//!
//! ## Requests
//!
//! Answering the last question builds the document and dispatches it to the
//! active backend. While the request is in flight the result screen shows a
//! placeholder, key input is not processed, and [`App::process_events`]
//! merges the outcome once it arrives.

pub mod events;
mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use layout::{AppLayout, Viewport, calculate_app_layout};

use ratatui::layout::Rect;

use crate::clipboard::{Clipboard, SystemClipboard, strip_ansi};
use crate::core::document::{
    ERROR_HEADING, SUMMARY_HEADING, failure_body, processing_placeholder,
};
use crate::core::{self, InFlightRequest, RequestOutcome, catalog};
use crate::fs::{BackendConfiguration, ConfigPaths};
use crate::tui::{Theme, markdown};

pub use self::state::{
    AnswerState, ConfigField, ConfigureState, ListCursor, Notice, NoticeKind, ResultView, Screen,
    TopGesture,
};

/// Main application state.
///
/// Owned and mutated only by the event loop. The in-flight request writes
/// its outcome to a private channel that [`App::process_events`] drains.
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// Configuration directory paths.
    pub(crate) paths: ConfigPaths,
    /// Backend configuration (persisted on change).
    pub(crate) config: BackendConfiguration,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Current screen.
    pub(crate) screen: Screen,
    /// Should quit flag.
    should_quit: bool,

    // =========================================================================
    // Component States
    // =========================================================================
    pub(crate) backend_cursor: ListCursor,
    pub(crate) doc_type_cursor: ListCursor,
    pub(crate) theme_cursor: ListCursor,
    /// Questionnaire progress.
    pub(crate) answers: AnswerState,
    /// Configuration form (present while configuring).
    pub(crate) configure: Option<ConfigureState>,
    /// Result screen content and scroll position.
    pub(crate) result: ResultView,
    /// Last document built from the answers.
    pub(crate) document: String,
    /// Last raw backend response, kept apart from the composed document.
    pub(crate) raw_response: String,
    /// Request currently awaiting its outcome.
    pub(crate) in_flight: Option<InFlightRequest>,
    /// Transient message above the status bar.
    pub(crate) notice: Option<Notice>,

    // =========================================================================
    // Layout
    // =========================================================================
    /// Text area of the body, updated on resize.
    pub(crate) viewport: Viewport,
    /// Frame layout, calculated once per frame.
    pub(crate) layout: AppLayout,

    clipboard: Box<dyn Clipboard>,
}

impl App {
    /// Creates the session, loading the configuration from `paths`.
    ///
    /// A configuration that cannot be read is replaced by the defaults and
    /// reported as a notice.
    #[must_use]
    pub fn new(paths: ConfigPaths) -> Self {
        let (config, notice) = match paths.load_config() {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to load configuration, using defaults");
                (
                    BackendConfiguration::default(),
                    Some(Notice::error(format!("Failed to load configuration: {e}"))),
                )
            }
        };

        let mut app = Self::with_config(paths, config);
        app.notice = notice;
        app
    }

    /// Creates the session with an already loaded configuration.
    #[must_use]
    pub fn with_config(paths: ConfigPaths, config: BackendConfiguration) -> Self {
        let screen = if config.has_active() {
            Screen::SelectDocumentType
        } else {
            Screen::PickBackend
        };

        tracing::info!(
            active_backend = %config.active_backend,
            screen = screen.label(),
            "session created"
        );

        Self {
            paths,
            config,
            theme: Theme::default(),
            screen,
            should_quit: false,
            backend_cursor: ListCursor::default(),
            doc_type_cursor: ListCursor::default(),
            theme_cursor: ListCursor::default(),
            answers: AnswerState::default(),
            configure: None,
            result: ResultView::default(),
            document: String::new(),
            raw_response: String::new(),
            in_flight: None,
            notice: None,
            viewport: Viewport::default(),
            layout: AppLayout::default(),
            clipboard: Box::new(SystemClipboard),
        }
    }

    /// Replaces the clipboard collaborator.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns true while a backend request is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Current screen.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    pub(crate) fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Calculates and caches the frame layout.
    ///
    /// Should be called once per frame before rendering.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout = calculate_app_layout(terminal_area);
    }

    /// Merges the outcome of the in-flight request, if it has arrived.
    pub fn process_events(&mut self) {
        let Some(request) = self.in_flight.as_mut() else {
            return;
        };
        if let Some(outcome) = request.poll() {
            self.in_flight = None;
            self.apply_outcome(outcome);
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Moves to `screen`, clearing any notice from the previous one.
    pub(crate) fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            tracing::debug!(from = self.screen.label(), to = screen.label(), "screen change");
            self.notice = None;
        }
        self.screen = screen;
    }

    /// Returns to the main menu without side effects.
    pub(crate) fn escape_to_menu(&mut self) {
        self.configure = None;
        self.set_screen(Screen::SelectDocumentType);
    }

    pub(crate) fn open_backend_picker(&mut self) {
        let ids = self.config.backend_ids();
        let active = ids
            .iter()
            .position(|id| *id == self.config.active_backend)
            .unwrap_or(0);
        let len = ids.len();
        self.backend_cursor.set(active, len);
        self.configure = None;
        self.set_screen(Screen::PickBackend);
    }

    pub(crate) fn open_theme_picker(&mut self) {
        let current = Theme::all()
            .iter()
            .position(|t| t.name == self.theme.name)
            .unwrap_or(0);
        self.theme_cursor.set(current, Theme::all().len());
        self.configure = None;
        self.set_screen(Screen::PickTheme);
    }

    /// Activates the backend under the cursor.
    ///
    /// The choice is persisted unless `force_configure` is set, in which
    /// case the form's save toggle decides.
    ///
    /// Goes on to the configuration form when the entry is incomplete or
    /// `force_configure` is set.
    pub(crate) fn select_backend(&mut self, force_configure: bool) {
        let Some(id) = self
            .config
            .backend_ids()
            .get(self.backend_cursor.index())
            .map(|id| (*id).to_string())
        else {
            return;
        };

        tracing::info!(backend = %id, "backend selected");
        self.config.active_backend = id;
        // A forced form persists only when it is committed with save on.
        let persisted = if force_configure {
            Ok(())
        } else {
            self.persist_config()
        };

        let complete = self
            .config
            .active_entry()
            .is_some_and(crate::fs::BackendEntry::is_complete);
        if force_configure || !complete {
            self.open_configure();
        } else {
            self.set_screen(Screen::SelectDocumentType);
        }
        if let Err(notice) = persisted {
            self.notice = Some(notice);
        }
    }

    /// Opens the configuration form for the active backend.
    pub(crate) fn open_configure(&mut self) {
        match self.config.active_entry() {
            Some(entry) => {
                self.configure = Some(ConfigureState::from_entry(entry));
                self.set_screen(Screen::ConfigureBackend);
            }
            None => self.open_backend_picker(),
        }
    }

    /// Validates the form and writes it into the active entry.
    ///
    /// Blank fields fall back to family defaults; a hosted backend without an
    /// API key keeps the form open.
    pub(crate) fn commit_configuration(&mut self) {
        let Some(form) = self.configure.as_ref() else {
            return;
        };
        let family = form.family;
        let credential = form.credential_value();
        let model = form.model_value();
        let dialect = form.dialect;
        let save = form.save;

        if credential.is_empty() && family.uses_api_key() {
            self.notice = Some(Notice::error("An API key is required for this backend"));
            return;
        }

        let Some(entry) = self.config.active_entry_mut() else {
            self.open_backend_picker();
            return;
        };

        entry.model_name = if model.is_empty() {
            family.default_model().to_string()
        } else {
            model
        };
        if family.uses_api_key() {
            entry.api_key = Some(credential);
        } else {
            entry.api_base_url = Some(if credential.is_empty() {
                core::self_hosted::DEFAULT_BASE_URL.to_string()
            } else {
                credential
            });
            entry.dialect = dialect;
        }
        tracing::info!(backend = %self.config.active_backend, save, "backend configured");

        self.configure = None;
        self.set_screen(Screen::SelectDocumentType);
        if save {
            self.notice = Some(match self.persist_config() {
                Ok(()) => Notice::info("Configuration saved"),
                Err(notice) => notice,
            });
        }
    }

    /// Starts the questionnaire for the document type under the cursor.
    pub(crate) fn start_questionnaire(&mut self) {
        if let Some(doc_type) = catalog::all().get(self.doc_type_cursor.index()) {
            self.answers = AnswerState::new(doc_type);
            self.set_screen(Screen::AnswerQuestions);
        }
    }

    /// Commits `answer` for the current question; submits after the last.
    pub(crate) fn answer_current(&mut self, answer: &str) {
        if self.answers.commit(answer) {
            self.submit();
        }
    }

    /// Builds the document and dispatches it to the active backend.
    ///
    /// An incomplete configuration routes to the form instead of sending.
    pub(crate) fn submit(&mut self) {
        let Some(doc_type) = self.answers.doc_type else {
            return;
        };
        self.document = core::build(doc_type, &self.answers.answers);

        let Some(entry) = self.config.active_entry() else {
            self.open_backend_picker();
            return;
        };
        let backend = match core::create_backend(&self.config.active_backend, entry) {
            Ok(backend) => backend,
            Err(e) if e.is_config() => {
                tracing::warn!(error = %e, "backend not ready, opening configuration");
                self.open_configure();
                self.notice = Some(Notice::error(e.to_string()));
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create backend client");
                self.apply_outcome(RequestOutcome {
                    backend_name: self.config.active_backend.clone(),
                    result: Err(e.to_string()),
                });
                return;
            }
        };

        let prompt = doc_type.prompt_for(&self.document);
        self.show_document(processing_placeholder(backend.name()));
        self.set_screen(Screen::ShowResult);
        self.in_flight = Some(core::dispatch(backend, prompt));
    }

    /// Composes the result document from a finished request.
    pub(crate) fn apply_outcome(&mut self, outcome: RequestOutcome) {
        let text = match outcome.result {
            Ok(response) => {
                let text = core::append_result(&self.document, SUMMARY_HEADING, &response);
                self.raw_response = response;
                text
            }
            Err(error) => {
                self.raw_response.clear();
                core::append_result(
                    &self.document,
                    ERROR_HEADING,
                    &failure_body(&outcome.backend_name, &error),
                )
            }
        };
        self.show_document(text);
        self.set_screen(Screen::ShowResult);
    }

    /// Replaces the result text and renders it at the current width.
    fn show_document(&mut self, text: String) {
        self.result.text = text;
        self.result.offset = 0;
        self.result.disarm();
        self.render_result_lines();
    }

    /// Re-renders the stored result text for the current viewport.
    pub(crate) fn render_result_lines(&mut self) {
        self.result.lines =
            markdown::render(&self.result.text, self.viewport.columns(), &self.theme);
        self.result.clamp(self.viewport.rows());
    }

    /// Recomputes the viewport; re-wraps the document on the result screen.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::from_terminal(width, height);
        if self.screen == Screen::ShowResult {
            self.render_result_lines();
        }
    }

    /// Applies the theme under the cursor.
    pub(crate) fn apply_theme(&mut self) {
        if let Some(theme) = Theme::all().into_iter().nth(self.theme_cursor.index()) {
            tracing::info!(theme = theme.name, "theme applied");
            self.theme = theme;
        }
        self.set_screen(Screen::SelectDocumentType);
    }

    /// Copies the raw response, without escape sequences, to the clipboard.
    pub(crate) fn copy_response(&mut self) {
        if self.raw_response.is_empty() {
            self.notice = Some(Notice::error("Nothing to copy"));
            return;
        }
        let text = strip_ansi(&self.raw_response);
        self.notice = Some(match self.clipboard.write_all(&text) {
            Ok(()) => Notice::info("Copied response to clipboard"),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard write failed");
                Notice::error(format!("Failed to copy: {e}"))
            }
        });
    }

    /// Saves the configuration, logging and returning a notice on failure.
    fn persist_config(&self) -> Result<(), Notice> {
        self.paths.save_config(&self.config).map_err(|e| {
            tracing::warn!(error = %format!("{e:#}"), "failed to save configuration");
            Notice::error(format!("Failed to save configuration: {e}"))
        })
    }
}
