//! Pointer-drag tracking
//!
//! Positions are container-relative. Pointers and entity rectangles come in
//! client coordinates and are converted here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Axis, AxisMask, Rect, clamp_to_container};

/// How pointer motion maps to entity motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragMode {
    /// Entity follows the pointer, keeping the grab offset
    Follow,
    /// Entity is pulled along `axis` by frame-to-frame pointer deltas.
    /// Only forward motion counts and the total is capped at `max`, so a
    /// pull can be made in several strokes.
    Accumulate { axis: Axis, max: f32 },
}

#[derive(Debug, Clone, Copy)]
struct Capture {
    pointer_id: i32,
    /// Pointer position minus entity origin at capture time
    offset: Vec2,
    /// Last pointer position seen (for delta mode)
    last: Vec2,
}

/// A draggable entity with pointer-capture semantics
#[derive(Debug, Clone)]
pub struct DragTracker {
    mask: AxisMask,
    mode: DragMode,
    start: Vec2,
    position: Vec2,
    pulled: f32,
    capture: Option<Capture>,
}

impl DragTracker {
    pub fn new(mask: AxisMask, mode: DragMode, start: Vec2) -> Self {
        Self {
            mask,
            mode,
            start,
            position: start,
            pulled: 0.0,
            capture: None,
        }
    }

    /// Container-relative position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Accumulated pull distance (delta mode only)
    pub fn pulled(&self) -> f32 {
        self.pulled
    }

    pub fn is_captured(&self) -> bool {
        self.capture.is_some()
    }

    /// Restore the canonical start pose and drop any capture
    pub fn reset(&mut self) {
        self.position = self.start;
        self.pulled = 0.0;
        self.capture = None;
    }

    /// Begin a drag. `entity` is the entity's current client rectangle.
    ///
    /// Returns false if another pointer already owns the entity.
    pub fn press(&mut self, pointer_id: i32, pointer: Vec2, entity: Rect) -> bool {
        if self.capture.is_some() {
            return false;
        }
        self.capture = Some(Capture {
            pointer_id,
            offset: pointer - entity.min,
            last: pointer,
        });
        log::debug!("Pointer {} captured entity", pointer_id);
        true
    }

    /// Apply a move event. Returns the new position, or `None` when the
    /// event does not belong to the capturing pointer.
    pub fn drag(
        &mut self,
        pointer_id: i32,
        pointer: Vec2,
        container: Rect,
        entity_size: Vec2,
    ) -> Option<Vec2> {
        let capture = self.capture.as_mut().filter(|c| c.pointer_id == pointer_id)?;

        let raw = match self.mode {
            DragMode::Follow => pointer - container.min - capture.offset,
            DragMode::Accumulate { axis, max } => {
                let delta = axis.of(pointer - capture.last);
                self.pulled = (self.pulled + delta.max(0.0)).min(max);
                self.start + axis.unit() * self.pulled
            }
        };
        capture.last = pointer;

        // Axes outside the mask stay at the start pose
        let raw = Vec2::new(
            if self.mask.includes(Axis::X) { raw.x } else { self.start.x },
            if self.mask.includes(Axis::Y) { raw.y } else { self.start.y },
        );
        self.position = clamp_to_container(raw, container.size, entity_size, self.mask);
        Some(self.position)
    }

    /// End a drag (pointer-up or pointer-cancel). Returns false if
    /// `pointer_id` did not own the capture.
    pub fn release(&mut self, pointer_id: i32) -> bool {
        match self.capture {
            Some(c) if c.pointer_id == pointer_id => {
                self.capture = None;
                log::debug!("Pointer {} released entity", pointer_id);
                true
            }
            _ => false,
        }
    }

    /// Drop the capture without a release event (scene switched away)
    pub fn abandon(&mut self) {
        self.capture = None;
    }

    /// Entity rectangle in client coordinates
    pub fn client_rect(&self, container: Rect, entity_size: Vec2) -> Rect {
        Rect::from_min_size(container.min + self.position, entity_size)
    }
}
