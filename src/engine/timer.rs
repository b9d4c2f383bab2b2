//! Single-shot fail-timer
//!
//! The timer is a deadline value, not a host callback: the host polls it
//! with the current time (once per animation frame on the web). Cancelling
//! clears the deadline synchronously, so a poll that lands after a cancel
//! never fires.

/// A cancellable single-shot deadline (milliseconds)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FailTimer {
    deadline: Option<f64>,
}

impl FailTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `after_ms` from `now`.
    ///
    /// Any previously armed deadline is cancelled first; there is never more
    /// than one pending deadline.
    pub fn arm(&mut self, now: f64, after_ms: f64) {
        self.cancel();
        self.deadline = Some(now + after_ms.max(0.0));
        log::debug!("Fail-timer armed for t={:.0}ms", now + after_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Returns true exactly once, on the first poll at or past the deadline
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
