//! Request orchestration.
//!
//! [`dispatch`] runs one backend call on its own task alongside a spinner
//! task. The spinner is bound to a cancel signal that the network task sets
//! the instant `generate` returns, whatever the outcome. The outcome is
//! delivered exactly once through a oneshot channel that the event loop
//! polls.

use std::time::Duration;

use tokio::sync::{oneshot, watch};

use super::backend::Backend;

/// Braille spinner frames.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between spinner frames.
const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Result of one backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    /// Identifier of the backend that handled the request.
    pub backend_name: String,
    /// Generated text, or the error rendered for display.
    pub result: Result<String, String>,
}

/// Handle to a request that has been dispatched but not yet merged.
pub struct InFlightRequest {
    backend_name: String,
    outcome_rx: oneshot::Receiver<RequestOutcome>,
    frame_rx: watch::Receiver<usize>,
    cancel_rx: watch::Receiver<bool>,
}

impl InFlightRequest {
    /// Name of the backend handling the request.
    #[must_use]
    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Returns the outcome if the request has finished.
    ///
    /// A request task that ended without reporting (for example because it
    /// panicked) yields an error outcome rather than hanging forever.
    pub fn poll(&mut self) -> Option<RequestOutcome> {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(self.lost_outcome()),
        }
    }

    /// Waits for the outcome.
    pub async fn wait(mut self) -> RequestOutcome {
        match (&mut self.outcome_rx).await {
            Ok(outcome) => outcome,
            Err(_) => self.lost_outcome(),
        }
    }

    /// Glyph for the current spinner frame.
    #[must_use]
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[*self.frame_rx.borrow() % SPINNER_FRAMES.len()]
    }

    /// Returns true until the network call has returned.
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        !*self.cancel_rx.borrow()
    }

    fn lost_outcome(&self) -> RequestOutcome {
        RequestOutcome {
            backend_name: self.backend_name.clone(),
            result: Err("request task ended without a result".to_string()),
        }
    }
}

/// Starts `prompt` on `backend` without blocking the caller.
///
/// Must be called from within a tokio runtime.
pub fn dispatch(backend: Box<dyn Backend>, prompt: String) -> InFlightRequest {
    let backend_name = backend.name().to_string();
    let (outcome_tx, outcome_rx) = oneshot::channel();
    let (frame_tx, frame_rx) = watch::channel(0usize);
    let (cancel_tx, cancel_rx) = watch::channel(false);

    spawn_spinner(frame_tx, cancel_rx.clone());

    let name = backend_name.clone();
    tokio::spawn(async move {
        tracing::info!(backend = %name, prompt_len = prompt.len(), "request started");
        let result = backend.generate(&prompt).await;

        // Stop the spinner before anything else, on success and failure alike.
        cancel_tx.send_modify(|cancelled| *cancelled = true);

        match &result {
            Ok(text) => tracing::info!(backend = %name, response_len = text.len(), "request finished"),
            Err(e) => tracing::error!(backend = %name, error = %e, "request failed"),
        }

        let outcome = RequestOutcome {
            backend_name: name,
            result: result.map_err(|e| e.to_string()),
        };
        // The receiver is gone only if the session quit mid-request.
        let _ = outcome_tx.send(outcome);
    });

    InFlightRequest {
        backend_name,
        outcome_rx,
        frame_rx,
        cancel_rx,
    }
}

/// Advances the frame counter until the cancel signal is set.
fn spawn_spinner(frame_tx: watch::Sender<usize>, mut cancel_rx: watch::Receiver<bool>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    frame_tx.send_modify(|frame| *frame = frame.wrapping_add(1));
                }
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        break;
                    }
                }
            }
        }
    });
}
