//! Tabbed scene composition
//!
//! At most one scene is live. Switching always deactivates the previous
//! scene before the next one is reset, so a hidden scene can never score
//! or fail.

use glam::Vec2;

use super::game::{GameController, GameId};
use super::geometry::GeometryProvider;
use super::round::Outcome;
use super::session::OutcomeSink;

/// A set of mini-games behind a tab selector
#[derive(Debug, Clone)]
pub struct SceneController {
    scenes: Vec<GameController>,
    active: Option<usize>,
}

impl SceneController {
    /// All scenes start hidden; call `switch_scene` to show one
    pub fn new(scenes: Vec<GameController>) -> Self {
        let mut controller = Self {
            scenes,
            active: None,
        };
        for scene in &mut controller.scenes {
            scene.deactivate();
        }
        controller
    }

    pub fn active(&self) -> Option<GameId> {
        self.active.map(|i| self.scenes[i].id())
    }

    pub fn scene(&self, id: GameId) -> Option<&GameController> {
        self.scenes.iter().find(|s| s.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = GameId> + '_ {
        self.scenes.iter().map(|s| s.id())
    }

    /// Show scene `id`. Selecting the visible scene again replays it.
    ///
    /// Returns false if no scene has that id.
    pub fn switch_scene(&mut self, id: GameId, now: f64) -> bool {
        let Some(next) = self.scenes.iter().position(|s| s.id() == id) else {
            return false;
        };

        if self.active == Some(next) {
            log::info!("Replaying scene {}", id.as_str());
            self.scenes[next].reset(now);
            return true;
        }

        if let Some(prev) = self.active.take() {
            self.scenes[prev].deactivate();
        }
        self.active = Some(next);
        self.scenes[next].reset(now);
        log::info!("Switched to scene {}", id.as_str());
        true
    }

    /// External reset control bound to whichever scene is visible
    pub fn reset_active(&mut self, now: f64) {
        if let Some(scene) = self.active_mut() {
            scene.reset(now);
        }
    }

    /// Hide everything (panel closed)
    pub fn deactivate_all(&mut self) {
        if let Some(prev) = self.active.take() {
            self.scenes[prev].deactivate();
        }
    }

    pub fn pointer_down(
        &mut self,
        id: GameId,
        pointer_id: i32,
        pointer: Vec2,
        geometry: &dyn GeometryProvider,
    ) -> bool {
        self.live_scene(id)
            .is_some_and(|s| s.pointer_down(pointer_id, pointer, geometry))
    }

    pub fn pointer_move(
        &mut self,
        id: GameId,
        pointer_id: i32,
        pointer: Vec2,
        geometry: &dyn GeometryProvider,
        sink: &mut dyn OutcomeSink,
    ) -> Option<Outcome> {
        self.live_scene(id)?
            .pointer_move(pointer_id, pointer, geometry, sink)
    }

    pub fn pointer_up(
        &mut self,
        id: GameId,
        pointer_id: i32,
        geometry: &dyn GeometryProvider,
        sink: &mut dyn OutcomeSink,
    ) -> Option<Outcome> {
        self.live_scene(id)?.pointer_up(pointer_id, geometry, sink)
    }

    pub fn pointer_cancel(
        &mut self,
        id: GameId,
        pointer_id: i32,
        geometry: &dyn GeometryProvider,
        sink: &mut dyn OutcomeSink,
    ) -> Option<Outcome> {
        self.live_scene(id)?
            .pointer_cancel(pointer_id, geometry, sink)
    }

    pub fn set_value(
        &mut self,
        id: GameId,
        value: f32,
        geometry: &dyn GeometryProvider,
        sink: &mut dyn OutcomeSink,
    ) -> Option<Outcome> {
        self.live_scene(id)?.set_value(value, geometry, sink)
    }

    /// Poll the visible scene's fail-timer
    pub fn poll(&mut self, now: f64, sink: &mut dyn OutcomeSink) -> Option<(GameId, Outcome)> {
        let scene = self.active_mut()?;
        let outcome = scene.poll(now, sink)?;
        Some((scene.id(), outcome))
    }

    fn active_mut(&mut self) -> Option<&mut GameController> {
        let index = self.active?;
        self.scenes.get_mut(index)
    }

    /// Input for a hidden scene is dropped
    fn live_scene(&mut self, id: GameId) -> Option<&mut GameController> {
        self.active_mut().filter(|s| s.id() == id)
    }
}
