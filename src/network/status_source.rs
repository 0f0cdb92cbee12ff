//! [`StatusSource`] implementations backed by `fetch`.
//!
//! Each query runs on `spawn_local`; the monitor is only told about the
//! outcome once the promise settles.

use wasm_bindgen_futures::spawn_local;

use super::api_client::ApiClient;
use crate::models::JobStatus;
use crate::polling::{PollOutcome, Respond, StatusSource};

/// Polls `GET /queue/{id}`.  The target is the full status URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueStatusSource;

impl StatusSource for QueueStatusSource {
    fn query(&self, target: &str, respond: Respond) {
        let url = target.to_string();
        spawn_local(async move {
            let outcome = match ApiClient::queue_status(&url).await {
                Ok(status) => PollOutcome::Status(status),
                Err(err) => PollOutcome::Transport(err),
            };
            respond(outcome);
        });
    }
}

/// Probes a download link with `HEAD`; existence counts as [`JobStatus::Done`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactProbe;

impl StatusSource for ArtifactProbe {
    fn query(&self, target: &str, respond: Respond) {
        let url = target.to_string();
        spawn_local(async move {
            let outcome = match ApiClient::artifact_exists(&url).await {
                Ok(()) => PollOutcome::Status(JobStatus::Done),
                Err(err) => PollOutcome::Transport(err),
            };
            respond(outcome);
        });
    }
}
