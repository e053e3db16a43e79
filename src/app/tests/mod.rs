//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `helpers` - Shared test utilities
//! - `navigation` - Initial screen, global shortcuts and list cursors
//! - `configure` - Backend selection and the configuration form
//! - `questions` - Questionnaire entry and document building
//! - `result_view` - Scrolling, the `g g` gesture, copy and resize
//! - `request` - Submitting to a mock backend and merging the outcome
//! - `ui` - Rendering to a `TestBackend`

#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod navigation;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod questions;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod ui;
