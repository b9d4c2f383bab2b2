//! Round state machine
//!
//! `Active -> Succeeded` and `Active -> Failed` are the only transitions.
//! Nothing leaves a terminal state until `reset`.

use serde::{Deserialize, Serialize};

use super::timer::FailTimer;

/// Current state of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Waiting for the player
    Active,
    /// Player met the goal
    Succeeded,
    /// Player missed the goal or ran out of time
    Failed,
}

/// Terminal outcome reported when a round resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

/// One play-through of a mini-game
#[derive(Debug, Clone)]
pub struct Round {
    state: RoundState,
    /// Normalized progress toward the goal [0, 1]
    progress: f32,
    timer: FailTimer,
    fail_after_ms: Option<f64>,
    /// False until the first reset and after deactivation. A round that is
    /// not live never resolves, even if its state is still `Active`.
    live: bool,
}

impl Round {
    pub fn new(fail_after_ms: Option<f64>) -> Self {
        Self {
            state: RoundState::Active,
            progress: 0.0,
            timer: FailTimer::new(),
            fail_after_ms,
            live: false,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn timer(&self) -> &FailTimer {
        &self.timer
    }

    /// Whether inputs and timers are still consequential
    pub fn is_live(&self) -> bool {
        self.live && self.state == RoundState::Active
    }

    pub fn set_progress(&mut self, progress: f32) {
        if self.is_live() {
            self.progress = progress.clamp(0.0, 1.0);
        }
    }

    /// Start a fresh round: cancel the old deadline, re-arm a new one
    pub fn reset(&mut self, now: f64) {
        self.timer.cancel();
        self.state = RoundState::Active;
        self.progress = 0.0;
        self.live = true;
        if let Some(after) = self.fail_after_ms {
            self.timer.arm(now, after);
        }
    }

    /// Freeze the round. Late timer polls and inputs become inert.
    pub fn deactivate(&mut self) {
        self.timer.cancel();
        self.live = false;
    }

    /// Transition to `outcome`. Returns false if the round was already
    /// resolved or is not live, in which case nothing changes.
    pub fn resolve(&mut self, outcome: Outcome) -> bool {
        if !self.is_live() {
            return false;
        }
        self.timer.cancel();
        self.state = match outcome {
            Outcome::Success => {
                self.progress = 1.0;
                RoundState::Succeeded
            }
            Outcome::Failure => RoundState::Failed,
        };
        true
    }

    /// Check the fail deadline. Returns `Some(Failure)` once if it expired
    /// while the round was live.
    pub fn poll(&mut self, now: f64) -> Option<Outcome> {
        if !self.is_live() {
            return None;
        }
        if self.timer.poll(now) && self.resolve(Outcome::Failure) {
            return Some(Outcome::Failure);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_live_until_reset() {
        let mut round = Round::new(None);
        assert!(!round.resolve(Outcome::Success));
        round.reset(0.0);
        assert!(round.resolve(Outcome::Success));
        assert_eq!(round.state(), RoundState::Succeeded);
    }

    #[test]
    fn test_resolves_at_most_once() {
        let mut round = Round::new(None);
        round.reset(0.0);
        assert!(round.resolve(Outcome::Success));
        assert!(!round.resolve(Outcome::Success));
        assert!(!round.resolve(Outcome::Failure));
        assert_eq!(round.state(), RoundState::Succeeded);
    }

    #[test]
    fn test_deadline_fails_round() {
        let mut round = Round::new(Some(5000.0));
        round.reset(100.0);
        assert_eq!(round.poll(5099.0), None);
        assert_eq!(round.poll(5100.0), Some(Outcome::Failure));
        assert_eq!(round.state(), RoundState::Failed);
        assert_eq!(round.poll(9000.0), None);
    }

    #[test]
    fn test_success_cancels_deadline() {
        let mut round = Round::new(Some(5000.0));
        round.reset(0.0);
        assert!(round.resolve(Outcome::Success));
        assert!(!round.timer().is_armed());
        assert_eq!(round.poll(60_000.0), None);
        assert_eq!(round.state(), RoundState::Succeeded);
    }

    #[test]
    fn test_deactivate_freezes_round() {
        let mut round = Round::new(Some(1000.0));
        round.reset(0.0);
        round.deactivate();
        assert_eq!(round.poll(2000.0), None);
        assert!(!round.resolve(Outcome::Success));
        assert_eq!(round.state(), RoundState::Active);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut round = Round::new(Some(7000.0));
        round.reset(0.0);
        round.set_progress(0.4);
        round.resolve(Outcome::Failure);

        round.reset(50.0);
        let first = (round.state(), round.progress(), round.timer().deadline());
        round.reset(50.0);
        let second = (round.state(), round.progress(), round.timer().deadline());
        assert_eq!(first, second);
        assert_eq!(first, (RoundState::Active, 0.0, Some(7050.0)));
    }
}
