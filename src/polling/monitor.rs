use std::cell::RefCell;
use std::rc::Rc;

use super::state::{PollAction, PollFailure, PollOutcome, PollPhase, PollState, RetryPolicy};

/// Callback that receives the outcome of one status query.
pub type Respond = Box<dyn FnOnce(PollOutcome) + 'static>;

/// Something that can be asked for the current status of a target.
///
/// Implementations must call `respond` exactly once, either synchronously or
/// from a later event-loop turn.
pub trait StatusSource {
    fn query(&self, target: &str, respond: Respond);
}

/// Timer abstraction used between attempts.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce() + 'static>);
}

/// UI reactions to terminal phases.
pub trait PollListener {
    fn on_done(&self, target: &str);
    fn on_failed(&self, target: &str, failure: &PollFailure);
}

struct MonitorInner {
    state: RefCell<PollState>,
    policy: RetryPolicy,
    source: Box<dyn StatusSource>,
    scheduler: Box<dyn Scheduler>,
    listener: Box<dyn PollListener>,
}

/// Long-poll driver around [`PollState`].
///
/// Cloning is cheap and shares the same state; in-flight queries and pending
/// timers each hold a clone until they fire.  A new query is only chained from
/// the completion of the previous one, so at most one request is in flight.
#[derive(Clone)]
pub struct PollingMonitor {
    inner: Rc<MonitorInner>,
}

impl PollingMonitor {
    pub fn new(
        target: impl Into<String>,
        policy: RetryPolicy,
        source: Box<dyn StatusSource>,
        scheduler: Box<dyn Scheduler>,
        listener: Box<dyn PollListener>,
    ) -> Self {
        Self {
            inner: Rc::new(MonitorInner {
                state: RefCell::new(PollState::new(target)),
                policy,
                source,
                scheduler,
                listener,
            }),
        }
    }

    /// Begin polling.  Calling `start` twice is a no-op.
    pub fn start(&self) {
        let started = self.inner.state.borrow_mut().start();
        if started {
            self.poll();
        }
    }

    /// Stop polling.  A timer that is already pending fires into a no-op.
    pub fn cancel(&self) {
        let mut state = self.inner.state.borrow_mut();
        if state.cancel() {
            debug_log!("Polling of {} cancelled", state.target());
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.inner.state.borrow().phase().clone()
    }

    pub fn attempts(&self) -> u32 {
        self.inner.state.borrow().attempts()
    }

    pub fn target(&self) -> String {
        self.inner.state.borrow().target().to_string()
    }

    /// Issue one query.
    fn poll(&self) {
        let target = {
            let mut state = self.inner.state.borrow_mut();
            if !state.begin_attempt() {
                return;
            }
            debug_log!("Poll attempt {} for {}", state.attempts(), state.target());
            state.target().to_string()
        };

        let this = self.clone();
        self.inner
            .source
            .query(&target, Box::new(move |outcome| this.handle(outcome)));
    }

    fn handle(&self, outcome: PollOutcome) {
        if let PollOutcome::Transport(err) = &outcome {
            debug_log!("{}; retrying", err);
        }

        let (action, target) = {
            let mut state = self.inner.state.borrow_mut();
            let action = state.advance(outcome, &self.inner.policy);
            (action, state.target().to_string())
        };

        match action {
            PollAction::Retry { delay_ms } => {
                let this = self.clone();
                self.inner
                    .scheduler
                    .schedule(delay_ms, Box::new(move || this.poll()));
            }
            PollAction::Complete => self.inner.listener.on_done(&target),
            PollAction::Fail(failure) => {
                if let PollFailure::Exhausted { attempts } = &failure {
                    warn_log!("Gave up polling {} after {} attempts", target, attempts);
                }
                self.inner.listener.on_failed(&target, &failure);
            }
            PollAction::Ignore => {}
        }
    }
}

/// Monitors owned by one page.
///
/// They are cancelled when the page is really unloaded.  A page frozen in the
/// back/forward cache keeps them: its timers resume when it is shown again.
#[derive(Default)]
pub struct MonitorSet {
    monitors: Vec<PollingMonitor>,
}

impl MonitorSet {
    pub fn push(&mut self, monitor: PollingMonitor) {
        self.monitors.push(monitor);
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Handle `pagehide`; `persisted` is true when the page enters the cache.
    pub fn page_hidden(&mut self, persisted: bool) {
        if persisted {
            debug_log!("Page cached, keeping {} monitors", self.monitors.len());
            return;
        }
        for monitor in self.monitors.drain(..) {
            monitor.cancel();
        }
    }
}
