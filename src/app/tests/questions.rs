//! Questionnaire entry and document building.

use ratatui::crossterm::event::KeyCode;
use tempfile::TempDir;

use super::helpers::*;
use crate::app::{App, NoticeKind, Screen};
use crate::core::{ProviderFamily, catalog};
use crate::fs::BackendEntry;

/// App on the menu with an OpenAI backend that has no API key.
fn app_without_key(dir: &TempDir) -> App {
    let entry = BackendEntry::new(ProviderFamily::OpenAi);
    test_app_with_config(dir, &config_with_active("openai", entry))
}

fn start_pull_request(app: &mut App) {
    app.handle_key(char_key('j'));
    app.handle_key(key(KeyCode::Enter));
}

#[test]
fn confirming_document_type_starts_fresh_answers() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);

    assert_eq!(app.screen(), Screen::AnswerQuestions);
    assert_eq!(app.answers.doc_type.unwrap().name, "Pull Request/Commit Message");
    assert_eq!(app.answers.answers, vec![String::new(); 3]);
    assert_eq!(app.answers.index, 0);
}

#[test]
fn restarting_discards_previous_answers() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);
    type_text(&mut app, "first");
    app.handle_key(key(KeyCode::Enter));

    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.answers.index, 0);
    assert!(app.answers.answers.iter().all(String::is_empty));
}

#[test]
fn typing_and_backspace_edit_buffer() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);

    type_text(&mut app, "fixd");
    app.handle_key(key(KeyCode::Backspace));
    app.handle_key(key(KeyCode::Backspace));
    type_text(&mut app, "ed j/k");

    assert_eq!(app.answers.buffer, "fixed j/k");
}

#[test]
fn backspace_on_empty_buffer_is_harmless() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);

    app.handle_key(key(KeyCode::Backspace));
    assert!(app.answers.buffer.is_empty());
    assert_eq!(app.answers.index, 0);
}

#[test]
fn enter_commits_trimmed_answer() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);

    type_text(&mut app, "  added retries  ");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.answers.answers[0], "added retries");
    assert_eq!(app.answers.index, 1);
    assert!(app.answers.buffer.is_empty());
}

#[test]
fn ctrl_s_skips_with_empty_answer() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);

    type_text(&mut app, "discarded");
    app.handle_key(ctrl_key('s'));

    assert_eq!(app.answers.answers[0], "");
    assert_eq!(app.answers.index, 1);
    assert!(app.answers.buffer.is_empty());
}

#[test]
fn paste_appends_single_line() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);

    type_text(&mut app, "a");
    app.handle_paste("b\r\nc\nd");

    assert_eq!(app.answers.buffer, "ab c d");
}

#[test]
fn last_answer_without_credential_routes_to_configuration() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);

    for answer in ["Added retries", "Flaky network", "Backoff matters"] {
        type_text(&mut app, answer);
        app.handle_key(key(KeyCode::Enter));
    }

    assert_eq!(app.screen(), Screen::ConfigureBackend);
    assert!(!app.is_busy());
    assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Error);
    assert!(app.configure.is_some());
}

#[test]
fn document_has_one_section_per_question_in_order() {
    let dir = TempDir::new().unwrap();
    let mut app = app_without_key(&dir);
    start_pull_request(&mut app);

    type_text(&mut app, "Added retries");
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(ctrl_key('s'));
    type_text(&mut app, "Backoff matters");
    app.handle_key(key(KeyCode::Enter));

    let pr = catalog::find("Pull Request/Commit Message").unwrap();
    let expected = format!(
        "# Pull Request/Commit Message\n\n\
         ## 1. {}\n\nAdded retries\n\n\
         ## 2. {}\n\n\
         ## 3. {}\n\nBackoff matters\n\n",
        pr.questions[0], pr.questions[1], pr.questions[2]
    );
    assert_eq!(app.document, expected);
    assert_eq!(app.document.matches("## ").count(), pr.question_count());
}
