//! Score and feedback sink
//!
//! Controllers never touch global counters; they report through an
//! `OutcomeSink` that the host owns.

/// The only two effects the engine emits outward
pub trait OutcomeSink {
    /// Add `points` to the running score (always a positive delta)
    fn on_score(&mut self, points: u32);
    /// Replace the displayed feedback message
    fn on_feedback(&mut self, message: &str);
}

/// Explicit per-page session state
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Cumulative score, never decreases
    pub total_score: u64,
    /// Latest feedback (latest message wins); `None` hides the message box
    pub feedback: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dismiss the feedback message (a new round is starting)
    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }
}

impl OutcomeSink for Session {
    fn on_score(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.total_score += u64::from(points);
    }

    fn on_feedback(&mut self, message: &str) {
        self.feedback = Some(message.to_string());
    }
}
