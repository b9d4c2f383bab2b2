//! The mini-game roster
//!
//! Each game is a configuration record; region names match element ids in
//! the host page.
//!
//! Check policy differs per game on purpose. Drop games (crosswalk, flyer)
//! judge only on release; slide and pull games judge on every move and
//! re-check on release.

use glam::Vec2;

use super::drag::DragMode;
use super::game::{GameController, GameId, GameSpec, InputKind};
use super::geometry::{Axis, AxisMask, GeometryProvider};
use super::predicate::{CheckPolicy, Predicate};
use super::scene::SceneController;
use crate::tuning::Tuning;

fn start(pose: [f32; 2]) -> Vec2 {
    Vec2::from_array(pose)
}

/// Drag the pedestrian onto the crosswalk; only the vertical band counts
pub fn crosswalk(t: &Tuning) -> GameSpec {
    GameSpec {
        id: GameId::Crosswalk,
        entity: "character",
        container: Some("playground"),
        input: InputKind::Pointer {
            mask: AxisMask::Both,
            mode: DragMode::Follow,
            start: start(t.crosswalk_start),
            check: CheckPolicy::OnRelease,
        },
        predicate: Predicate::CenterInBand {
            zone: "crosswalk",
            axis: Axis::Y,
        },
        hazard: None,
        miss_fails: true,
        fail_after_ms: None,
        points: t.points_per_success,
        success_message: "Bạn đã đi đúng nơi quy định! Tuyệt vời!",
        failure_message: "Bạn đã phạm luật! Bạn phải đóng phạt 150.000 VND do không đi đúng phần đường quy định.",
    }
}

/// Steer into the safe zone; brushing the phishing link fails the round
pub fn phishing(t: &Tuning) -> GameSpec {
    GameSpec {
        id: GameId::Phishing,
        entity: "phish-avatar",
        container: Some("phish-board"),
        input: InputKind::Pointer {
            mask: AxisMask::Both,
            mode: DragMode::Follow,
            start: start(t.phishing_start),
            check: CheckPolicy::OnMove,
        },
        predicate: Predicate::CenterInRect { zone: "safe-zone" },
        hazard: Some("phishing-link"),
        miss_fails: false,
        fail_after_ms: None,
        points: t.points_per_success,
        success_message: "Bạn đã tránh xa đường link lừa đảo! Luôn kiểm tra kỹ trước khi bấm.",
        failure_message: "Cẩn thận! Đường link lạ có thể đánh cắp thông tin của bạn.",
    }
}

/// Drop the flyer into the trash bin before time runs out
pub fn flyer(t: &Tuning) -> GameSpec {
    GameSpec {
        id: GameId::Flyer,
        entity: "flyer",
        container: Some("street"),
        input: InputKind::Pointer {
            mask: AxisMask::Both,
            mode: DragMode::Follow,
            start: start(t.flyer_start),
            check: CheckPolicy::OnRelease,
        },
        predicate: Predicate::CenterInRect { zone: "trash-bin" },
        hazard: None,
        miss_fails: false,
        fail_after_ms: Some(t.flyer_fail_ms),
        points: t.points_per_success,
        success_message: "Cảm ơn bạn đã bỏ rác đúng nơi quy định!",
        failure_message: "Hết giờ! Xả rác nơi công cộng có thể bị phạt tiền.",
    }
}

/// Slide the lid left over the pot
pub fn pot_lid(t: &Tuning) -> GameSpec {
    GameSpec {
        id: GameId::PotLid,
        entity: "pot-lid",
        container: Some("kitchen"),
        input: InputKind::Pointer {
            mask: AxisMask::X,
            mode: DragMode::Follow,
            start: start(t.pot_lid_start),
            check: CheckPolicy::OnMove,
        },
        predicate: Predicate::Coverage {
            zone: "pot-area",
            min: t.coverage_min,
        },
        hazard: None,
        miss_fails: false,
        fail_after_ms: Some(t.pot_lid_fail_ms),
        points: t.points_per_success,
        success_message: "Nồi đã được đậy kín, giữ vệ sinh an toàn thực phẩm!",
        failure_message: "Hết giờ! Hãy đậy nắp nồi để tránh ruồi nhặng.",
    }
}

/// Pull the firecracker string down, in as many strokes as needed
pub fn firecracker(t: &Tuning) -> GameSpec {
    GameSpec {
        id: GameId::Firecracker,
        entity: "firecracker-string",
        container: Some("firecracker-stage"),
        input: InputKind::Pointer {
            mask: AxisMask::Y,
            mode: DragMode::Accumulate {
                axis: Axis::Y,
                max: t.pull_max,
            },
            start: start(t.firecracker_start),
            check: CheckPolicy::OnMove,
        },
        predicate: Predicate::PullDistance { max: t.pull_max },
        hazard: None,
        miss_fails: false,
        fail_after_ms: Some(t.firecracker_fail_ms),
        points: t.points_per_success,
        success_message: "Bạn đã gỡ dây pháo! Đốt pháo nổ là vi phạm pháp luật.",
        failure_message: "Hết giờ! Pháo nổ gây nguy hiểm và bị cấm theo quy định.",
    }
}

/// Turn the karaoke volume down
pub fn karaoke(t: &Tuning) -> GameSpec {
    GameSpec {
        id: GameId::Karaoke,
        entity: "karaoke-volume",
        container: None,
        input: InputKind::Slider {
            initial: t.karaoke_initial,
        },
        predicate: Predicate::ScalarAtMost {
            initial: t.karaoke_initial,
            cutoff: t.karaoke_cutoff,
        },
        hazard: None,
        miss_fails: false,
        fail_after_ms: Some(t.karaoke_fail_ms),
        points: t.points_per_success,
        success_message: "Âm lượng vừa phải, hàng xóm cảm ơn bạn!",
        failure_message: "Hết giờ! Hát karaoke gây ồn ào có thể bị phạt hành chính.",
    }
}

pub fn spec_for(id: GameId, t: &Tuning) -> GameSpec {
    match id {
        GameId::Crosswalk => crosswalk(t),
        GameId::Phishing => phishing(t),
        GameId::Flyer => flyer(t),
        GameId::PotLid => pot_lid(t),
        GameId::Firecracker => firecracker(t),
        GameId::Karaoke => karaoke(t),
    }
}

/// Games that live on their own screens
pub const STANDALONE: [GameId; 3] = [GameId::Crosswalk, GameId::Phishing, GameId::Flyer];

/// Games composed behind the civic-scenes tabs
pub const CIVIC_SCENES: [GameId; 3] = [GameId::PotLid, GameId::Firecracker, GameId::Karaoke];

pub fn standalone_games(t: &Tuning, geometry: &dyn GeometryProvider) -> Vec<GameController> {
    STANDALONE
        .into_iter()
        .map(|id| GameController::bind(spec_for(id, t), geometry))
        .collect()
}

pub fn civic_scenes(t: &Tuning, geometry: &dyn GeometryProvider) -> SceneController {
    SceneController::new(
        CIVIC_SCENES
            .into_iter()
            .map(|id| GameController::bind(spec_for(id, t), geometry))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::{Rect, StaticLayout};
    use crate::engine::round::{Outcome, RoundState};
    use crate::engine::session::Session;

    fn bound(spec: GameSpec, layout: &StaticLayout) -> GameController {
        let mut game = GameController::bind(spec, layout);
        assert!(!game.is_inert());
        game.reset(0.0);
        game
    }

    fn crosswalk_layout() -> StaticLayout {
        StaticLayout::new()
            .with("playground", Rect::new(0.0, 0.0, 600.0, 400.0))
            .with("character", Rect::new(80.0, 120.0, 40.0, 40.0))
            .with("crosswalk", Rect::new(0.0, 250.0, 600.0, 60.0))
    }

    #[test]
    fn test_crosswalk_inside_band_scores() {
        let layout = crosswalk_layout();
        let mut game = bound(crosswalk(&Tuning::default()), &layout);
        let mut session = Session::new();

        // Grab the character at its center and drop it at y=280
        game.pointer_down(1, Vec2::new(100.0, 140.0), &layout);
        game.pointer_move(1, Vec2::new(450.0, 280.0), &layout, &mut session);
        assert_eq!(game.pointer_up(1, &layout, &mut session), Some(Outcome::Success));
        assert_eq!(session.total_score, 10);
        assert_eq!(
            session.feedback.as_deref(),
            Some("Bạn đã đi đúng nơi quy định! Tuyệt vời!")
        );
    }

    #[test]
    fn test_crosswalk_outside_band_is_fined() {
        let layout = crosswalk_layout();
        let mut game = bound(crosswalk(&Tuning::default()), &layout);
        let mut session = Session::new();

        game.pointer_down(1, Vec2::new(100.0, 140.0), &layout);
        game.pointer_move(1, Vec2::new(100.0, 200.0), &layout, &mut session);
        assert_eq!(game.pointer_up(1, &layout, &mut session), Some(Outcome::Failure));
        assert_eq!(session.total_score, 0);
        assert!(session.feedback.as_deref().is_some_and(|m| m.contains("150.000 VND")));
    }

    fn phish_board() -> StaticLayout {
        StaticLayout::new()
            .with("phish-board", Rect::new(0.0, 0.0, 500.0, 300.0))
            .with("phish-avatar", Rect::new(20.0, 20.0, 30.0, 30.0))
            .with("safe-zone", Rect::new(380.0, 180.0, 100.0, 100.0))
            .with("phishing-link", Rect::new(0.0, 250.0, 60.0, 50.0))
    }

    #[test]
    fn test_phishing_resolves_on_move_and_release_is_inert() {
        let layout = phish_board();
        let mut game = bound(phishing(&Tuning::default()), &layout);
        let mut session = Session::new();

        game.pointer_down(3, Vec2::new(35.0, 35.0), &layout);
        assert_eq!(
            game.pointer_move(3, Vec2::new(430.0, 230.0), &layout, &mut session),
            Some(Outcome::Success)
        );
        // Both move and release satisfy the zone; effects fire once
        assert_eq!(game.pointer_move(3, Vec2::new(431.0, 231.0), &layout, &mut session), None);
        assert_eq!(game.pointer_up(3, &layout, &mut session), None);
        assert_eq!(session.total_score, 10);
    }

    #[test]
    fn test_phishing_link_contact_fails() {
        let layout = phish_board();
        let mut game = bound(phishing(&Tuning::default()), &layout);
        let mut session = Session::new();

        // Avatar center lands on (20, 280), inside the link
        game.pointer_down(3, Vec2::new(35.0, 35.0), &layout);
        assert_eq!(
            game.pointer_move(3, Vec2::new(20.0, 280.0), &layout, &mut session),
            Some(Outcome::Failure)
        );
        assert_eq!(game.state(), Some(RoundState::Failed));
        assert_eq!(
            session.feedback.as_deref(),
            Some("Cẩn thận! Đường link lạ có thể đánh cắp thông tin của bạn.")
        );

        // Reaching the safe zone afterwards does not score
        assert_eq!(game.pointer_move(3, Vec2::new(430.0, 230.0), &layout, &mut session), None);
        assert_eq!(game.pointer_up(3, &layout, &mut session), None);
        assert_eq!(session.total_score, 0);
    }

    #[test]
    fn test_phishing_needs_link_region() {
        let mut layout = phish_board();
        layout.remove("phishing-link");
        assert!(GameController::bind(phishing(&Tuning::default()), &layout).is_inert());
    }

    fn kitchen() -> StaticLayout {
        StaticLayout::new()
            .with("kitchen", Rect::new(0.0, 0.0, 400.0, 200.0))
            .with("pot-lid", Rect::new(300.0, 20.0, 80.0, 20.0))
            .with("pot-area", Rect::new(40.0, 60.0, 120.0, 100.0))
    }

    #[test]
    fn test_pot_lid_coverage_threshold() {
        let layout = kitchen();
        let mut game = bound(pot_lid(&Tuning::default()), &layout);
        let mut session = Session::new();

        game.pointer_down(1, Vec2::new(300.0, 20.0), &layout);
        // Halfway: 300 -> 170 of 260px span
        assert_eq!(game.pointer_move(1, Vec2::new(170.0, 20.0), &layout, &mut session), None);
        let half = game.view().map(|v| v.progress).unwrap_or(0.0);
        assert!((half - 0.5).abs() < 1e-4);

        // Within 2%: 4px short of the pot edge
        assert_eq!(
            game.pointer_move(1, Vec2::new(44.0, 20.0), &layout, &mut session),
            Some(Outcome::Success)
        );
    }

    #[test]
    fn test_pot_lid_times_out() {
        let layout = kitchen();
        let mut game = bound(pot_lid(&Tuning::default()), &layout);
        let mut session = Session::new();
        assert_eq!(game.poll(6499.0, &mut session), None);
        assert_eq!(game.poll(6500.0, &mut session), Some(Outcome::Failure));
    }

    fn stage() -> StaticLayout {
        StaticLayout::new()
            .with("firecracker-stage", Rect::new(0.0, 0.0, 200.0, 400.0))
            .with("firecracker-string", Rect::new(90.0, 0.0, 10.0, 60.0))
    }

    #[test]
    fn test_firecracker_exact_pull_succeeds() {
        let layout = stage();
        let mut game = bound(firecracker(&Tuning::default()), &layout);
        let mut session = Session::new();

        game.pointer_down(1, Vec2::new(95.0, 30.0), &layout);
        game.pointer_move(1, Vec2::new(95.0, 90.0), &layout, &mut session);
        game.pointer_up(1, &layout, &mut session);
        assert_eq!(game.state(), Some(RoundState::Active));

        game.pointer_down(1, Vec2::new(95.0, 30.0), &layout);
        assert_eq!(
            game.pointer_move(1, Vec2::new(95.0, 90.0), &layout, &mut session),
            Some(Outcome::Success)
        );
        assert_eq!(game.poll(5000.0, &mut session), None);
        assert_eq!(session.total_score, 10);
    }

    #[test]
    fn test_firecracker_short_pull_times_out() {
        let layout = stage();
        let mut game = bound(firecracker(&Tuning::default()), &layout);
        let mut session = Session::new();

        game.pointer_down(1, Vec2::new(95.0, 30.0), &layout);
        game.pointer_move(1, Vec2::new(95.0, 149.0), &layout, &mut session);
        assert_eq!(game.state(), Some(RoundState::Active));
        assert_eq!(game.poll(4999.0, &mut session), None);
        assert_eq!(game.poll(5000.0, &mut session), Some(Outcome::Failure));
        assert_eq!(session.total_score, 0);
    }

    fn stereo() -> StaticLayout {
        StaticLayout::new().with("karaoke-volume", Rect::new(0.0, 0.0, 200.0, 20.0))
    }

    #[test]
    fn test_karaoke_at_cutoff_succeeds() {
        let layout = stereo();
        let mut game = bound(karaoke(&Tuning::default()), &layout);
        let mut session = Session::new();
        assert_eq!(game.view().map(|v| v.value), Some(85.0));
        assert_eq!(game.set_value(20.0, &layout, &mut session), Some(Outcome::Success));
        assert_eq!(game.poll(7000.0, &mut session), None);
        assert_eq!(session.total_score, 10);
    }

    #[test]
    fn test_karaoke_above_cutoff_times_out() {
        let layout = stereo();
        let mut game = bound(karaoke(&Tuning::default()), &layout);
        let mut session = Session::new();
        assert_eq!(game.set_value(21.0, &layout, &mut session), None);
        assert_eq!(game.poll(7000.0, &mut session), Some(Outcome::Failure));
        assert_eq!(
            session.feedback.as_deref(),
            Some("Hết giờ! Hát karaoke gây ồn ào có thể bị phạt hành chính.")
        );
    }

    #[test]
    fn test_karaoke_ignores_pointer_input() {
        let layout = stereo();
        let mut game = bound(karaoke(&Tuning::default()), &layout);
        assert!(!game.pointer_down(1, Vec2::new(5.0, 5.0), &layout));
    }

    #[test]
    fn test_standalone_timer_waits_for_its_screen() {
        let layout = StaticLayout::new()
            .with("street", Rect::new(0.0, 0.0, 500.0, 300.0))
            .with("flyer", Rect::new(10.0, 10.0, 20.0, 20.0))
            .with("trash-bin", Rect::new(400.0, 200.0, 80.0, 80.0));
        let mut screens = SceneController::new(standalone_games(&Tuning::default(), &layout));
        let mut session = Session::new();

        // Long after page load, nothing has been opened so nothing fails
        assert_eq!(screens.poll(60_000.0, &mut session), None);
        assert_eq!(session.feedback, None);

        assert!(screens.switch_scene(GameId::Flyer, 60_000.0));
        assert_eq!(screens.poll(66_499.0, &mut session), None);
        assert_eq!(
            screens.poll(66_500.0, &mut session),
            Some((GameId::Flyer, Outcome::Failure))
        );
    }

    #[test]
    fn test_missing_host_page_regions() {
        let games = standalone_games(&Tuning::default(), &crosswalk_layout());
        let inert: Vec<GameId> = games.iter().filter(|g| g.is_inert()).map(|g| g.id()).collect();
        assert_eq!(inert, vec![GameId::Phishing, GameId::Flyer]);
    }
}
