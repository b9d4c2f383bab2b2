//! Card-sorting drop games
//!
//! A card matches a drop zone when their keys are equal. The sub-game
//! completes once `required` distinct cards have been placed correctly.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::session::OutcomeSink;

/// What happened to a dropped card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropResult {
    /// Wrong zone for this card
    Rejected,
    /// Correct, more cards still needed
    Accepted,
    /// Correct, and this card completed the sub-game
    Completed,
    /// Already placed, or the sub-game is already complete
    Ignored,
}

/// One card-sorting sub-game (sign matching, safety kit)
#[derive(Debug, Clone)]
pub struct CardSort {
    name: &'static str,
    required: usize,
    points: u32,
    placed: BTreeSet<String>,
    complete: bool,
    wrong_message: &'static str,
    complete_message: &'static str,
}

impl CardSort {
    pub fn new(
        name: &'static str,
        required: usize,
        points: u32,
        wrong_message: &'static str,
        complete_message: &'static str,
    ) -> Self {
        Self {
            name,
            required: required.max(1),
            points,
            placed: BTreeSet::new(),
            complete: false,
            wrong_message,
            complete_message,
        }
    }

    /// Match each traffic sign with its meaning
    pub fn sign_match(required: usize, points: u32) -> Self {
        Self::new(
            "sign-match",
            required,
            points,
            "Chưa đúng rồi, hãy xem kỹ biển báo nhé!",
            "Bạn đã ghép đúng tất cả biển báo!",
        )
    }

    /// Pack only the safety items into the kit
    pub fn safety_kit(required: usize, points: u32) -> Self {
        Self::new(
            "safety-kit",
            required,
            points,
            "Món đồ này không giúp bạn an toàn đâu!",
            "Túi đồ an toàn của bạn đã sẵn sàng!",
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn placed(&self) -> usize {
        self.placed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Handle a drop of card `card_id` (carrying `card_key`) onto `zone_key`
    pub fn drop_card(
        &mut self,
        card_id: &str,
        card_key: &str,
        zone_key: &str,
        sink: &mut dyn OutcomeSink,
    ) -> DropResult {
        if self.complete || self.placed.contains(card_id) {
            return DropResult::Ignored;
        }
        if card_key != zone_key {
            sink.on_feedback(self.wrong_message);
            return DropResult::Rejected;
        }

        self.placed.insert(card_id.to_string());
        if self.placed.len() < self.required {
            return DropResult::Accepted;
        }

        self.complete = true;
        if self.points > 0 {
            sink.on_score(self.points);
        }
        sink.on_feedback(self.complete_message);
        log::info!("{}: complete", self.name);
        DropResult::Completed
    }

    pub fn reset(&mut self) {
        self.placed.clear();
        self.complete = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::Session;

    #[test]
    fn test_three_matches_complete_once() {
        let mut kit = CardSort::safety_kit(3, 10);
        let mut session = Session::new();

        assert_eq!(kit.drop_card("helmet", "kit", "kit", &mut session), DropResult::Accepted);
        assert_eq!(kit.drop_card("helmet", "kit", "kit", &mut session), DropResult::Ignored);
        assert_eq!(kit.drop_card("lighter", "other", "kit", &mut session), DropResult::Rejected);
        assert_eq!(kit.drop_card("raincoat", "kit", "kit", &mut session), DropResult::Accepted);
        assert_eq!(kit.drop_card("first-aid", "kit", "kit", &mut session), DropResult::Completed);
        assert_eq!(kit.drop_card("whistle", "kit", "kit", &mut session), DropResult::Ignored);

        assert!(kit.is_complete());
        assert_eq!(session.total_score, 10);
    }

    #[test]
    fn test_wrong_drop_gives_feedback_without_score() {
        let mut signs = CardSort::sign_match(3, 10);
        let mut session = Session::new();
        let result = signs.drop_card("sign-1", "no-entry", "no-parking", &mut session);
        assert_eq!(result, DropResult::Rejected);
        assert_eq!(session.total_score, 0);
        assert!(session.feedback.is_some());
        assert_eq!(signs.placed(), 0);
    }

    #[test]
    fn test_reset_allows_replay() {
        let mut signs = CardSort::sign_match(1, 5);
        let mut session = Session::new();
        signs.drop_card("a", "stop", "stop", &mut session);
        signs.reset();
        assert!(!signs.is_complete());
        assert_eq!(signs.drop_card("a", "stop", "stop", &mut session), DropResult::Completed);
        assert_eq!(session.total_score, 10);
    }

    /// Records every score call, including zero deltas
    #[derive(Default)]
    struct ScoreLog(Vec<u32>);

    impl OutcomeSink for ScoreLog {
        fn on_score(&mut self, points: u32) {
            self.0.push(points);
        }
        fn on_feedback(&mut self, _message: &str) {}
    }

    #[test]
    fn test_zero_points_never_reach_sink() {
        let mut kit = CardSort::safety_kit(1, 0);
        let mut log = ScoreLog::default();
        assert_eq!(kit.drop_card("helmet", "kit", "kit", &mut log), DropResult::Completed);
        assert!(log.0.is_empty());
    }
}
