use gloo_timers::callback::Timeout;

use super::monitor::Scheduler;

/// `setTimeout`-backed scheduler used on real pages.
///
/// Timers are detached with `forget()`: a poll chain lives until it reaches a
/// terminal phase or the page goes away.  Cancellation is handled by the
/// monitor's phase, not by clearing the timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce() + 'static>) {
        Timeout::new(delay_ms, task).forget();
    }
}
