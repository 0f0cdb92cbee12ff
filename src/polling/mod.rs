//! Long-poll monitor for server-side work that finishes asynchronously:
//! the workflow parse queue and research-object bundle generation.

pub mod monitor;
pub mod scheduler;
pub mod state;

pub use monitor::{MonitorSet, PollListener, PollingMonitor, Respond, Scheduler, StatusSource};
pub use scheduler::TimeoutScheduler;
pub use state::{PollAction, PollFailure, PollOutcome, PollPhase, PollState, RetryPolicy};
