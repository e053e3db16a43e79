//! Initial screen, global shortcuts and list cursors.

use ratatui::crossterm::event::KeyCode;
use tempfile::TempDir;

use super::helpers::*;
use crate::app::{NoticeKind, Screen};
use crate::core::{ProviderFamily, catalog};
use crate::fs::{BackendEntry, CONFIG_FILE};
use crate::tui::Theme;

fn app_on_menu(dir: &TempDir) -> crate::app::App {
    let mut entry = BackendEntry::new(ProviderFamily::SelfHosted);
    entry.api_base_url = Some("http://localhost:11434".to_string());
    test_app_with_config(dir, &config_with_active("ollama", entry))
}

// =============================================================================
// Initial Screen
// =============================================================================

#[test]
fn starts_on_pick_backend_without_active_backend() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    assert_eq!(app.screen(), Screen::PickBackend);
    assert!(app.notice.is_none());
}

#[test]
fn starts_on_menu_with_active_backend() {
    let dir = TempDir::new().unwrap();
    let app = app_on_menu(&dir);
    assert_eq!(app.screen(), Screen::SelectDocumentType);
}

#[test]
fn unreadable_config_falls_back_to_defaults_with_notice() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

    let app = test_app(&dir);

    assert_eq!(app.screen(), Screen::PickBackend);
    assert_eq!(app.config.backends.len(), 3);
    let notice = app.notice.as_ref().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
}

// =============================================================================
// Global Shortcuts
// =============================================================================

#[test]
fn ctrl_c_quits_from_text_screen() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.screen(), Screen::AnswerQuestions);

    app.handle_key(ctrl_key('c'));
    assert!(app.should_quit());
}

#[test]
fn q_quits_on_list_screens_only() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(char_key('q'));
    assert!(!app.should_quit());
    assert_eq!(app.answers.buffer, "q");

    app.handle_key(key(KeyCode::Esc));
    app.handle_key(char_key('q'));
    assert!(app.should_quit());
}

#[test]
fn esc_returns_to_menu_from_every_screen() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);

    for open in [ctrl_key('b'), ctrl_key('t'), key(KeyCode::Enter)] {
        app.handle_key(open);
        assert_ne!(app.screen(), Screen::SelectDocumentType);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::SelectDocumentType);
    }
}

#[test]
fn esc_on_menu_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    app.handle_key(char_key('j'));
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.screen(), Screen::SelectDocumentType);
    assert_eq!(app.doc_type_cursor.index(), 1);
}

#[test]
fn esc_leaves_configuration_untouched() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    let before = app.config.clone();

    app.handle_key(ctrl_key('b'));
    app.handle_key(char_key('c'));
    assert_eq!(app.screen(), Screen::ConfigureBackend);
    type_text(&mut app, "mistral");
    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.screen(), Screen::SelectDocumentType);
    assert_eq!(app.config, before);
    assert!(app.configure.is_none());
}

#[test]
fn ctrl_b_places_cursor_on_active_backend() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    app.handle_key(ctrl_key('b'));

    assert_eq!(app.screen(), Screen::PickBackend);
    let ids = app.config.backend_ids();
    assert_eq!(ids[app.backend_cursor.index()], "ollama");
}

#[test]
fn tilde_opens_backend_picker_outside_text_screens() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    app.handle_key(char_key('~'));
    assert_eq!(app.screen(), Screen::PickBackend);

    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(char_key('~'));
    assert_eq!(app.screen(), Screen::AnswerQuestions);
    assert_eq!(app.answers.buffer, "~");
}

#[test]
fn ctrl_t_then_confirm_applies_theme() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);

    app.handle_key(ctrl_key('t'));
    assert_eq!(app.screen(), Screen::PickTheme);
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.theme, Theme::ocean());
    assert_eq!(app.screen(), Screen::SelectDocumentType);
}

#[test]
fn theme_picker_starts_on_current_theme() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    app.theme = Theme::sunset();

    app.handle_key(ctrl_key('t'));
    assert_eq!(app.theme_cursor.index(), 2);
}

// =============================================================================
// List Cursors
// =============================================================================

#[test]
fn document_cursor_stays_in_bounds() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    let len = catalog::all().len();

    for _ in 0..10 {
        app.handle_key(char_key('j'));
        assert!(app.doc_type_cursor.index() < len);
    }
    assert_eq!(app.doc_type_cursor.index(), len - 1);

    for _ in 0..10 {
        app.handle_key(key(KeyCode::Up));
    }
    assert_eq!(app.doc_type_cursor.index(), 0);
}

#[test]
fn backend_cursor_stays_in_bounds() {
    let dir = TempDir::new().unwrap();
    let mut app = test_app(&dir);
    let len = app.config.backends.len();

    for _ in 0..10 {
        app.handle_key(key(KeyCode::Down));
    }
    assert_eq!(app.backend_cursor.index(), len - 1);
    app.handle_key(char_key('k'));
    assert_eq!(app.backend_cursor.index(), len - 2);
}

#[test]
fn theme_cursor_stays_in_bounds() {
    let dir = TempDir::new().unwrap();
    let mut app = app_on_menu(&dir);
    app.handle_key(ctrl_key('t'));

    for _ in 0..10 {
        app.handle_key(char_key('j'));
    }
    assert_eq!(app.theme_cursor.index(), Theme::all().len() - 1);
}
