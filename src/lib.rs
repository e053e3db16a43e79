//! `ticketsum` - TUI questionnaire that turns answers into tickets
//!
//! Builds a Markdown document from the answers to a document type's
//! questions and sends it to an OpenAI, Anthropic or self-hosted backend.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod core;
pub mod fs;
pub mod logging;
pub mod tui;
