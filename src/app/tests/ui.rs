//! Rendering tests using `TestBackend`.

use anyhow::Result;
use ratatui::crossterm::event::KeyCode;
use tempfile::TempDir;

use super::helpers::*;
use crate::app::{App, Notice};
use crate::core::{ProviderFamily, RequestOutcome};
use crate::fs::BackendEntry;

fn app_on_menu(dir: &TempDir) -> App {
    let mut entry = BackendEntry::new(ProviderFamily::SelfHosted);
    entry.api_base_url = Some("http://localhost:11434".to_string());
    entry.model_name = "llama3".to_string();
    test_app_with_config(dir, &config_with_active("ollama", entry))
}

#[test]
fn backend_picker_lists_every_backend() -> Result<()> {
    let dir = TempDir::new()?;
    let mut app = test_app(&dir);
    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);

    assert!(text.contains("Pick a backend"));
    assert!(text.contains("› anthropic"));
    assert!(text.contains("ollama"));
    assert!(text.contains("openai"));
    assert!(text.contains("needs setup"));
    assert!(text.contains(" Pick Backend"));
    Ok(())
}

#[test]
fn menu_shows_catalog_and_active_model() -> Result<()> {
    let dir = TempDir::new()?;
    let mut app = app_on_menu(&dir);
    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);

    assert!(text.contains("› Incident Response"));
    assert!(text.contains("Pull Request/Commit Message"));
    assert!(text.contains("Service Request"));
    assert!(text.contains("Development ticket"));
    assert!(text.contains("Select Document │ Model: llama3"));
    assert!(text.contains("[Ctrl+T] Theme"));
    Ok(())
}

#[test]
fn question_screen_shows_progress_and_buffer() -> Result<()> {
    let dir = TempDir::new()?;
    let mut app = app_on_menu(&dir);
    app.handle_key(char_key('j'));
    app.handle_key(key(KeyCode::Enter));

    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);
    assert!(text.contains("Question 1 of 3"));
    assert!(text.contains("What did you do?"));
    assert!(text.contains("Type your answer..."));

    type_text(&mut app, "Added retries");
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "Flaky");
    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);
    assert!(text.contains("Question 2 of 3"));
    assert!(text.contains("> Flaky"));
    Ok(())
}

#[test]
fn configure_form_masks_api_key() -> Result<()> {
    let dir = TempDir::new()?;
    let mut app = test_app(&dir);
    app.backend_cursor.set(2, 3);
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "sk-secret");

    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);
    assert!(text.contains("Configure openai"));
    assert!(text.contains("API Key"));
    assert!(text.contains("•••••••••"));
    assert!(!text.contains("sk-secret"));
    assert!(text.contains("[x] Save configuration"));
    Ok(())
}

#[test]
fn self_hosted_form_shows_dialect() -> Result<()> {
    let dir = TempDir::new()?;
    let mut app = app_on_menu(&dir);
    app.handle_key(ctrl_key('b'));
    app.handle_key(char_key('c'));

    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);
    assert!(text.contains("Base URL"));
    assert!(text.contains("http://localhost:11434"));
    assert!(text.contains("Dialect: [Auto]"));
    Ok(())
}

#[test]
fn result_screen_shows_rendered_document() -> Result<()> {
    let dir = TempDir::new()?;
    let mut app = app_on_menu(&dir);
    app.document = "# Service Request\n\n## 1. What is needed?\n\nA new VM\n\n".to_string();
    app.apply_outcome(RequestOutcome {
        backend_name: "ollama".to_string(),
        result: Ok("Provision **one** VM.".to_string()),
    });

    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);
    assert!(text.contains("Service Request"));
    assert!(text.contains("A new VM"));
    assert!(text.contains("Ticket Summary"));
    assert!(text.contains("Provision one VM."));
    assert!(!text.contains("**"));
    assert!(text.contains("[Ctrl+Y] Copy"));
    Ok(())
}

#[test]
fn notice_is_rendered_and_cleared_on_screen_change() -> Result<()> {
    let dir = TempDir::new()?;
    let mut app = app_on_menu(&dir);
    app.notice = Some(Notice::info("Configuration saved"));

    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);
    assert!(text.contains("Configuration saved"));

    app.handle_key(ctrl_key('t'));
    let text = buffer_text(&render_app_to_terminal(&mut app, WIDTH, HEIGHT)?);
    assert!(!text.contains("Configuration saved"));
    assert!(text.contains("Pick a theme"));
    Ok(())
}

#[test]
fn renders_at_minimum_size_without_panicking() -> Result<()> {
    let dir = TempDir::new()?;
    let mut app = app_on_menu(&dir);
    app.handle_resize(20, 8);
    render_app_to_terminal(&mut app, 20, 8)?;

    app.apply_outcome(RequestOutcome {
        backend_name: "ollama".to_string(),
        result: Ok("word ".repeat(100)),
    });
    render_app_to_terminal(&mut app, 20, 8)?;
    Ok(())
}
