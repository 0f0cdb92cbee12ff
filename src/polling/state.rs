//! Pure poll state machine.
//!
//! ```text
//! Idle ──start──▶ Polling ──Done──────────▶ Done
//!                  │  ▲   ──Error{msg}────▶ Failed(Job)
//!   Running /      │  │   ──ceiling hit───▶ Failed(Exhausted)
//!   transport err  └──┘   ──cancel────────▶ Cancelled
//! ```
//!
//! Nothing here touches timers, the network or the DOM; the monitor feeds
//! outcomes in and executes the returned [`PollAction`].

use crate::errors::TransportError;
use crate::models::JobStatus;

/// Retry timing for one kind of poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed delay before the next attempt.
    pub delay_ms: u32,
    /// Give up after this many attempts (None for never).
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn new(delay_ms: u32, max_attempts: Option<u32>) -> Self {
        Self {
            delay_ms,
            max_attempts,
        }
    }

    /// Never give up, retry every `delay_ms`.
    pub fn unbounded(delay_ms: u32) -> Self {
        Self::new(delay_ms, None)
    }
}

/// Why polling ended without success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollFailure {
    /// The server reported a failed job; `message` is shown verbatim.
    Job { message: String },
    /// The retry ceiling was reached.
    Exhausted { attempts: u32 },
}

impl PollFailure {
    /// Text for the error panel.
    pub fn message(&self) -> String {
        match self {
            PollFailure::Job { message } => message.clone(),
            PollFailure::Exhausted { attempts } => format!(
                "No result after {} status checks, the server may still be working. Try again later.",
                attempts
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Polling,
    Done,
    Failed(PollFailure),
    Cancelled,
}

impl PollPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PollPhase::Done | PollPhase::Failed(_) | PollPhase::Cancelled
        )
    }
}

/// Result of one query against the status source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Status(JobStatus),
    Transport(TransportError),
}

impl From<JobStatus> for PollOutcome {
    fn from(status: JobStatus) -> Self {
        PollOutcome::Status(status)
    }
}

impl From<TransportError> for PollOutcome {
    fn from(err: TransportError) -> Self {
        PollOutcome::Transport(err)
    }
}

/// What the driver has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollAction {
    /// Query again after `delay_ms`.
    Retry { delay_ms: u32 },
    /// Terminal success.
    Complete,
    /// Terminal failure.
    Fail(PollFailure),
    /// Outcome arrived for a monitor that is no longer polling.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    target: String,
    attempts: u32,
    phase: PollPhase,
}

impl PollState {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            attempts: 0,
            phase: PollPhase::Idle,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of queries issued so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn phase(&self) -> &PollPhase {
        &self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// `Idle -> Polling`.  Returns false when the monitor was already started.
    pub fn start(&mut self) -> bool {
        if self.phase == PollPhase::Idle {
            self.phase = PollPhase::Polling;
            true
        } else {
            false
        }
    }

    /// Record that a query is about to be issued.  Returns false when the
    /// state no longer polls (a cancelled monitor whose timer still fired).
    pub fn begin_attempt(&mut self) -> bool {
        if self.phase != PollPhase::Polling {
            return false;
        }
        self.attempts = self.attempts.saturating_add(1);
        true
    }

    /// Apply one query outcome.
    pub fn advance(&mut self, outcome: PollOutcome, policy: &RetryPolicy) -> PollAction {
        if self.phase != PollPhase::Polling {
            return PollAction::Ignore;
        }

        match outcome {
            PollOutcome::Status(JobStatus::Done) => {
                self.phase = PollPhase::Done;
                PollAction::Complete
            }
            PollOutcome::Status(JobStatus::Error { message }) => {
                let failure = PollFailure::Job { message };
                self.phase = PollPhase::Failed(failure.clone());
                PollAction::Fail(failure)
            }
            PollOutcome::Status(JobStatus::Running) | PollOutcome::Transport(_) => {
                match policy.max_attempts {
                    Some(max) if self.attempts >= max => {
                        let failure = PollFailure::Exhausted {
                            attempts: self.attempts,
                        };
                        self.phase = PollPhase::Failed(failure.clone());
                        PollAction::Fail(failure)
                    }
                    _ => PollAction::Retry {
                        delay_ms: policy.delay_ms,
                    },
                }
            }
        }
    }

    /// Stop a monitor that has not reached a terminal phase yet.
    pub fn cancel(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.phase = PollPhase::Cancelled;
        true
    }
}
