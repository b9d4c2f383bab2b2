//! Parameterized mini-game controller
//!
//! Every game is a `GameSpec` record driving the same controller: a round,
//! an optional draggable entity and a success predicate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::drag::{DragMode, DragTracker};
use super::geometry::{AxisMask, GeometryProvider, Rect};
use super::predicate::{CheckPolicy, Evaluation, Predicate, Probe};
use super::round::{Outcome, Round, RoundState};
use super::session::OutcomeSink;
use crate::error::BindError;

/// Mini-game identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameId {
    Crosswalk,
    Phishing,
    Flyer,
    PotLid,
    Firecracker,
    Karaoke,
}

impl GameId {
    pub const ALL: [GameId; 6] = [
        GameId::Crosswalk,
        GameId::Phishing,
        GameId::Flyer,
        GameId::PotLid,
        GameId::Firecracker,
        GameId::Karaoke,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Crosswalk => "crosswalk",
            GameId::Phishing => "phishing",
            GameId::Flyer => "flyer",
            GameId::PotLid => "pot-lid",
            GameId::Firecracker => "firecracker",
            GameId::Karaoke => "karaoke",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

/// How the player drives a game
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    /// Pointer drag inside a container
    Pointer {
        mask: AxisMask,
        mode: DragMode,
        /// Canonical start pose, container-relative
        start: Vec2,
        check: CheckPolicy,
    },
    /// Value-changed events from a slider; no pointer machinery
    Slider { initial: f32 },
}

/// Configuration record for one mini-game
#[derive(Debug, Clone)]
pub struct GameSpec {
    pub id: GameId,
    /// Draggable entity (or the slider) region
    pub entity: &'static str,
    /// Bounding container for pointer games
    pub container: Option<&'static str>,
    pub input: InputKind,
    pub predicate: Predicate,
    /// Region the entity center must never enter; touching it fails the round
    pub hazard: Option<&'static str>,
    /// A release that misses the goal fails the round instead of letting
    /// the player try again
    pub miss_fails: bool,
    pub fail_after_ms: Option<f64>,
    pub points: u32,
    pub success_message: &'static str,
    pub failure_message: &'static str,
}

impl GameSpec {
    /// Host regions that must exist for the game to be playable
    pub fn required_regions(&self) -> Vec<&'static str> {
        let mut regions = vec![self.entity];
        regions.extend(self.container);
        regions.extend(self.predicate.zone());
        regions.extend(self.hazard);
        regions
    }
}

/// Read-only snapshot for presentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameView {
    /// Container-relative entity position (pointer games)
    pub position: Vec2,
    pub progress: f32,
    pub state: RoundState,
    pub dragging: bool,
    /// Latest slider value (slider games)
    pub value: f32,
}

#[derive(Debug, Clone)]
struct Play {
    round: Round,
    drag: Option<DragTracker>,
    entity_size: Vec2,
    value: f32,
}

/// Runs rounds of one mini-game. Inert when the host lacks its regions.
#[derive(Debug, Clone)]
pub struct GameController {
    spec: GameSpec,
    play: Option<Play>,
}

impl GameController {
    /// Bind to host geometry, failing if a required region is missing
    pub fn try_bind(spec: GameSpec, geometry: &dyn GeometryProvider) -> Result<Self, BindError> {
        if let Some(region) = spec.required_regions().into_iter().find(|r| !geometry.has(r)) {
            return Err(BindError::MissingRegion {
                game: spec.id.as_str(),
                region,
            });
        }

        let (drag, value) = match spec.input {
            InputKind::Pointer { mask, mode, start, .. } => {
                (Some(DragTracker::new(mask, mode, start)), 0.0)
            }
            InputKind::Slider { initial } => (None, initial),
        };
        let entity_size = geometry.bounds(spec.entity).map(|r| r.size).unwrap_or(Vec2::ZERO);
        let round = Round::new(spec.fail_after_ms);

        Ok(Self {
            spec,
            play: Some(Play {
                round,
                drag,
                entity_size,
                value,
            }),
        })
    }

    /// Bind to host geometry; a missing region yields an inert controller
    pub fn bind(spec: GameSpec, geometry: &dyn GeometryProvider) -> Self {
        let id = spec.id;
        match Self::try_bind(spec.clone(), geometry) {
            Ok(controller) => controller,
            Err(e) => {
                log::warn!("{}: disabled ({})", id.as_str(), e);
                Self::inert(spec)
            }
        }
    }

    /// A controller whose every operation is a no-op
    pub fn inert(spec: GameSpec) -> Self {
        Self { spec, play: None }
    }

    pub fn id(&self) -> GameId {
        self.spec.id
    }

    pub fn spec(&self) -> &GameSpec {
        &self.spec
    }

    pub fn is_inert(&self) -> bool {
        self.play.is_none()
    }

    pub fn is_live(&self) -> bool {
        self.play.as_ref().is_some_and(|p| p.round.is_live())
    }

    pub fn state(&self) -> Option<RoundState> {
        self.play.as_ref().map(|p| p.round.state())
    }

    /// Start a new round at `now`: cancel the old deadline, restore the
    /// start pose, arm a fresh deadline
    pub fn reset(&mut self, now: f64) {
        let Some(play) = self.play.as_mut() else {
            return;
        };
        play.round.reset(now);
        if let Some(drag) = play.drag.as_mut() {
            drag.reset();
        }
        if let InputKind::Slider { initial } = self.spec.input {
            play.value = initial;
        }
        log::debug!("{}: round reset", self.spec.id.as_str());
    }

    /// Stop the timer and make late inputs inert
    pub fn deactivate(&mut self) {
        let Some(play) = self.play.as_mut() else {
            return;
        };
        play.round.deactivate();
        if let Some(drag) = play.drag.as_mut() {
            drag.abandon();
        }
    }

    /// Pointer-down on the entity. Returns true if the pointer captured it.
    pub fn pointer_down(
        &mut self,
        pointer_id: i32,
        pointer: Vec2,
        geometry: &dyn GeometryProvider,
    ) -> bool {
        let Some(play) = self.play.as_mut().filter(|p| p.round.is_live()) else {
            return false;
        };
        let Some(drag) = play.drag.as_mut() else {
            return false;
        };
        let Some(entity) = geometry.bounds(self.spec.entity) else {
            return false;
        };
        play.entity_size = entity.size;
        drag.press(pointer_id, pointer, entity)
    }

    /// Pointer-move while captured
    pub fn pointer_move(
        &mut self,
        pointer_id: i32,
        pointer: Vec2,
        geometry: &dyn GeometryProvider,
        sink: &mut dyn OutcomeSink,
    ) -> Option<Outcome> {
        let play = self.play.as_mut().filter(|p| p.round.is_live())?;
        let container = geometry.bounds(self.spec.container?)?;
        let drag = play.drag.as_mut()?;
        drag.drag(pointer_id, pointer, container, play.entity_size)?;

        if in_hazard(&self.spec, play, container, geometry) {
            return settle(&self.spec, &mut play.round, Outcome::Failure, sink);
        }

        let eval = evaluate(&self.spec, play, container, geometry)?;
        play.round.set_progress(eval.progress);

        match self.spec.input {
            InputKind::Pointer {
                check: CheckPolicy::OnMove,
                ..
            } if eval.satisfied => settle(&self.spec, &mut play.round, Outcome::Success, sink),
            _ => None,
        }
    }

    /// Pointer-up: the last chance to meet the goal
    pub fn pointer_up(
        &mut self,
        pointer_id: i32,
        geometry: &dyn GeometryProvider,
        sink: &mut dyn OutcomeSink,
    ) -> Option<Outcome> {
        let play = self.play.as_mut()?;
        if !play.drag.as_mut()?.release(pointer_id) || !play.round.is_live() {
            return None;
        }

        let container = geometry.bounds(self.spec.container?)?;
        if in_hazard(&self.spec, play, container, geometry) {
            return settle(&self.spec, &mut play.round, Outcome::Failure, sink);
        }

        let eval = evaluate(&self.spec, play, container, geometry)?;
        play.round.set_progress(eval.progress);

        if eval.satisfied {
            settle(&self.spec, &mut play.round, Outcome::Success, sink)
        } else if self.spec.miss_fails {
            settle(&self.spec, &mut play.round, Outcome::Failure, sink)
        } else {
            None
        }
    }

    /// Pointer-cancel is handled exactly like pointer-up
    pub fn pointer_cancel(
        &mut self,
        pointer_id: i32,
        geometry: &dyn GeometryProvider,
        sink: &mut dyn OutcomeSink,
    ) -> Option<Outcome> {
        self.pointer_up(pointer_id, geometry, sink)
    }

    /// Value-changed event from a slider
    pub fn set_value(
        &mut self,
        value: f32,
        geometry: &dyn GeometryProvider,
        sink: &mut dyn OutcomeSink,
    ) -> Option<Outcome> {
        let play = self.play.as_mut().filter(|p| p.round.is_live())?;
        if !matches!(self.spec.input, InputKind::Slider { .. }) {
            return None;
        }
        play.value = value;

        let eval = evaluate(&self.spec, play, Rect::default(), geometry)?;
        play.round.set_progress(eval.progress);
        if eval.satisfied {
            settle(&self.spec, &mut play.round, Outcome::Success, sink)
        } else {
            None
        }
    }

    /// Check the fail deadline
    pub fn poll(&mut self, now: f64, sink: &mut dyn OutcomeSink) -> Option<Outcome> {
        let play = self.play.as_mut()?;
        let outcome = play.round.poll(now)?;
        sink.on_feedback(self.spec.failure_message);
        log::info!("{}: time is up", self.spec.id.as_str());
        Some(outcome)
    }

    pub fn view(&self) -> Option<GameView> {
        let play = self.play.as_ref()?;
        Some(GameView {
            position: play.drag.as_ref().map(|d| d.position()).unwrap_or(Vec2::ZERO),
            progress: play.round.progress(),
            state: play.round.state(),
            dragging: play.drag.as_ref().is_some_and(|d| d.is_captured()),
            value: play.value,
        })
    }

    /// Fail-timer deadline, if one is pending
    pub fn deadline(&self) -> Option<f64> {
        self.play.as_ref().and_then(|p| p.round.timer().deadline())
    }
}

fn evaluate(
    spec: &GameSpec,
    play: &Play,
    container: Rect,
    geometry: &dyn GeometryProvider,
) -> Option<Evaluation> {
    let (entity, start, pulled) = match play.drag.as_ref() {
        Some(drag) => (
            drag.client_rect(container, play.entity_size),
            container.min + drag.start(),
            drag.pulled(),
        ),
        None => (Rect::default(), Vec2::ZERO, 0.0),
    };
    let probe = Probe {
        entity,
        start,
        pulled,
        value: play.value,
    };
    spec.predicate.evaluate(&probe, geometry)
}

/// Whether the entity center sits inside the game's hazard region
fn in_hazard(
    spec: &GameSpec,
    play: &Play,
    container: Rect,
    geometry: &dyn GeometryProvider,
) -> bool {
    let (Some(hazard), Some(drag)) = (spec.hazard, play.drag.as_ref()) else {
        return false;
    };
    let center = drag.client_rect(container, play.entity_size).center();
    geometry.bounds(hazard).is_some_and(|zone| zone.contains(center))
}

/// Resolve the round and emit effects, at most once per round
fn settle(
    spec: &GameSpec,
    round: &mut Round,
    outcome: Outcome,
    sink: &mut dyn OutcomeSink,
) -> Option<Outcome> {
    if !round.resolve(outcome) {
        return None;
    }
    match outcome {
        Outcome::Success => {
            if spec.points > 0 {
                sink.on_score(spec.points);
            }
            sink.on_feedback(spec.success_message);
        }
        Outcome::Failure => sink.on_feedback(spec.failure_message),
    }
    log::info!("{}: {:?}", spec.id.as_str(), outcome);
    Some(outcome)
}
