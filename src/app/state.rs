//! Application state structures.
//!
//! - **`Screen`**: which screen is active
//! - **`ListCursor`**: bounded cursor shared by the list screens
//! - **`AnswerState`**: answers and the edit buffer of the questionnaire
//! - **`ConfigureState`**: input fields of the backend configuration form
//! - **`ResultView`**: rendered document, scroll offset and the `g g` gesture
//! - **`Notice`**: transient message shown above the status bar

use ratatui::text::Line;
use tui_textarea::TextArea;

use crate::core::{DocumentType, ProviderFamily, WireDialect};
use crate::fs::BackendEntry;

/// Active screen of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Choose which configured backend is active.
    PickBackend,
    /// Edit credential, model and save toggle of the active backend.
    ConfigureBackend,
    /// Choose a document type.
    SelectDocumentType,
    /// Answer the questions of the chosen document type.
    AnswerQuestions,
    /// Read the composed document.
    ShowResult,
    /// Choose a color theme.
    PickTheme,
}

impl Screen {
    /// Label shown in the status bar.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PickBackend => "Pick Backend",
            Self::ConfigureBackend => "Configure Backend",
            Self::SelectDocumentType => "Select Document",
            Self::AnswerQuestions => "Questions",
            Self::ShowResult => "Result",
            Self::PickTheme => "Pick Theme",
        }
    }

    /// Returns true when printable keys are text input on this screen.
    #[must_use]
    pub const fn accepts_text(&self) -> bool {
        matches!(self, Self::AnswerQuestions | Self::ConfigureBackend)
    }
}

/// Cursor over a list of known length.
///
/// The index stays within `[0, len - 1]`. Moves on an empty list leave it
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
}

impl ListCursor {
    /// Current position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Moves up one item, stopping at the first.
    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Moves down one item, stopping at the last.
    pub fn down(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1).min(len - 1);
        }
    }

    /// Jumps to `index`, clamped to the list.
    pub fn set(&mut self, index: usize, len: usize) {
        if len > 0 {
            self.index = index.min(len - 1);
        }
    }
}

/// Questionnaire progress.
#[derive(Debug, Clone, Default)]
pub struct AnswerState {
    /// Document type being answered.
    pub doc_type: Option<&'static DocumentType>,
    /// One slot per question; skipped questions hold an empty string.
    pub answers: Vec<String>,
    /// Index of the question being answered.
    pub index: usize,
    /// Text typed for the current question.
    pub buffer: String,
}

impl AnswerState {
    /// Starts a fresh answer set sized to `doc_type`'s questions.
    #[must_use]
    pub fn new(doc_type: &'static DocumentType) -> Self {
        Self {
            doc_type: Some(doc_type),
            answers: vec![String::new(); doc_type.question_count()],
            index: 0,
            buffer: String::new(),
        }
    }

    /// Prompt of the current question.
    #[must_use]
    pub fn current_question(&self) -> Option<&'static str> {
        self.doc_type
            .and_then(|t| t.questions.get(self.index))
            .copied()
    }

    /// Stores `answer` (trimmed) for the current question and advances.
    ///
    /// Returns true when that was the last question.
    pub fn commit(&mut self, answer: &str) -> bool {
        if let Some(slot) = self.answers.get_mut(self.index) {
            *slot = answer.trim().to_string();
        }
        self.buffer.clear();
        if self.index + 1 >= self.answers.len() {
            true
        } else {
            self.index += 1;
            false
        }
    }
}

/// Fields of the configuration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    /// API key or base URL, depending on the family.
    Credential,
    /// Model identifier.
    Model,
    /// Wire dialect (self-hosted only).
    Dialect,
    /// Whether to persist the configuration on confirm.
    Save,
}

impl ConfigField {
    /// Fields shown for `family`, in focus order.
    #[must_use]
    pub const fn for_family(family: ProviderFamily) -> &'static [ConfigField] {
        match family {
            ProviderFamily::SelfHosted => &[Self::Credential, Self::Model, Self::Dialect, Self::Save],
            ProviderFamily::OpenAi | ProviderFamily::Anthropic => {
                &[Self::Credential, Self::Model, Self::Save]
            }
        }
    }
}

/// State of the configuration form.
pub struct ConfigureState {
    /// Family of the entry being edited.
    pub family: ProviderFamily,
    pub credential: TextArea<'static>,
    pub model: TextArea<'static>,
    pub dialect: WireDialect,
    /// Persist on confirm.
    pub save: bool,
    /// Index into [`ConfigField::for_family`].
    pub focus: usize,
}

impl ConfigureState {
    /// Builds the form prefilled from `entry`.
    #[must_use]
    pub fn from_entry(entry: &BackendEntry) -> Self {
        let family = entry.provider;

        let mut credential = single_line(entry.credential().unwrap_or_default());
        if family.uses_api_key() {
            credential.set_mask_char('•');
            credential.set_placeholder_text("paste your API key");
        } else {
            credential.set_placeholder_text(crate::core::self_hosted::DEFAULT_BASE_URL);
        }

        let mut model = single_line(&entry.model_name);
        model.set_placeholder_text(family.default_model());

        Self {
            family,
            credential,
            model,
            dialect: entry.dialect,
            save: true,
            focus: 0,
        }
    }

    /// Fields in focus order.
    #[must_use]
    pub const fn fields(&self) -> &'static [ConfigField] {
        ConfigField::for_family(self.family)
    }

    /// Field that currently has focus.
    #[must_use]
    pub fn focused(&self) -> ConfigField {
        self.fields()
            .get(self.focus)
            .copied()
            .unwrap_or(ConfigField::Credential)
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Text area with focus, if the focused field is a text field.
    pub fn focused_input(&mut self) -> Option<&mut TextArea<'static>> {
        match self.focused() {
            ConfigField::Credential => Some(&mut self.credential),
            ConfigField::Model => Some(&mut self.model),
            ConfigField::Dialect | ConfigField::Save => None,
        }
    }

    /// Trimmed credential-or-address value.
    #[must_use]
    pub fn credential_value(&self) -> String {
        field_value(&self.credential)
    }

    /// Trimmed model value.
    #[must_use]
    pub fn model_value(&self) -> String {
        field_value(&self.model)
    }
}

fn single_line(text: &str) -> TextArea<'static> {
    let mut area = TextArea::new(vec![text.to_string()]);
    area.move_cursor(tui_textarea::CursorMove::End);
    area
}

fn field_value(area: &TextArea<'_>) -> String {
    area.lines().concat().trim().to_string()
}

/// Armed state of the two-press "go to top" gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TopGesture {
    #[default]
    Disarmed,
    /// One `g` seen; a second one jumps to the top.
    Armed,
}

/// Rendered document and scroll position of the result screen.
#[derive(Debug, Clone, Default)]
pub struct ResultView {
    /// Markdown currently displayed.
    pub text: String,
    /// `text` rendered at the current viewport width.
    pub lines: Vec<Line<'static>>,
    /// First visible row.
    pub offset: usize,
    pub gesture: TopGesture,
}

impl ResultView {
    /// Largest valid offset for a viewport of `height` rows.
    #[must_use]
    pub fn max_offset(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }

    /// Keeps the offset in bounds after the content or viewport changed.
    pub fn clamp(&mut self, height: usize) {
        self.offset = self.offset.min(self.max_offset(height));
    }

    /// Scrolls up by one line.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scrolls down by one line.
    pub fn scroll_down(&mut self, height: usize) {
        self.offset = (self.offset + 1).min(self.max_offset(height));
    }

    /// Scrolls up by a page.
    pub fn page_up(&mut self, height: usize) {
        self.offset = self.offset.saturating_sub(height);
    }

    /// Scrolls down by a page.
    pub fn page_down(&mut self, height: usize) {
        self.offset = (self.offset + height).min(self.max_offset(height));
    }

    /// Handles `g`: the first press arms, the second jumps to the top.
    pub fn press_top(&mut self) {
        match self.gesture {
            TopGesture::Disarmed => self.gesture = TopGesture::Armed,
            TopGesture::Armed => {
                self.offset = 0;
                self.gesture = TopGesture::Disarmed;
            }
        }
    }

    /// Jumps to the last page.
    pub fn scroll_to_bottom(&mut self, height: usize) {
        self.offset = self.max_offset(height);
        self.gesture = TopGesture::Disarmed;
    }

    /// Clears a pending `g`.
    pub fn disarm(&mut self) {
        self.gesture = TopGesture::Disarmed;
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown until the next screen change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}
