//! Rectangles, axes and the geometry capability
//!
//! Every rectangle handed to the engine is in the same coordinate space
//! (client/viewport pixels on the web, arbitrary units in tests).

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Unit vector along this axis
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }
}

/// Which axes a draggable entity may move along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisMask {
    /// Horizontal slide only
    X,
    /// Vertical pull only
    Y,
    /// Free 2D drag
    Both,
}

impl AxisMask {
    pub fn includes(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (AxisMask::Both, _) | (AxisMask::X, Axis::X) | (AxisMask::Y, Axis::Y)
        )
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict containment on one axis (edges are outside)
    pub fn contains_on(&self, point: Vec2, axis: Axis) -> bool {
        let p = axis.of(point);
        p > axis.of(self.min) && p < axis.of(self.max())
    }

    /// Strict containment on both axes
    pub fn contains(&self, point: Vec2) -> bool {
        self.contains_on(point, Axis::X) && self.contains_on(point, Axis::Y)
    }
}

/// Clamp a container-relative position to `[0, container - entity]` on each masked axis.
///
/// Unmasked axes pass through untouched. An entity larger than its container
/// is pinned to 0.
pub fn clamp_to_container(pos: Vec2, container: Vec2, entity: Vec2, mask: AxisMask) -> Vec2 {
    let limit = (container - entity).max(Vec2::ZERO);
    let mut out = pos;
    if mask.includes(Axis::X) {
        out.x = pos.x.clamp(0.0, limit.x);
    }
    if mask.includes(Axis::Y) {
        out.y = pos.y.clamp(0.0, limit.y);
    }
    out
}

/// Source of current bounding geometry for named host regions
/// ("character", "playground", "crosswalk", ...).
pub trait GeometryProvider {
    /// Current bounds of `region`, or `None` when the host has no such region
    fn bounds(&self, region: &str) -> Option<Rect>;

    fn has(&self, region: &str) -> bool {
        self.bounds(region).is_some()
    }
}

/// Fixed set of rectangles, used for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    regions: BTreeMap<String, Rect>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, region: &str, rect: Rect) -> Self {
        self.set(region, rect);
        self
    }

    pub fn set(&mut self, region: &str, rect: Rect) {
        self.regions.insert(region.to_string(), rect);
    }

    pub fn remove(&mut self, region: &str) {
        self.regions.remove(region);
    }
}

impl GeometryProvider for StaticLayout {
    fn bounds(&self, region: &str) -> Option<Rect> {
        self.regions.get(region).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_center_and_max() {
        let r = Rect::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(r.max(), Vec2::new(50.0, 80.0));
        assert_eq!(r.center(), Vec2::new(30.0, 50.0));
    }

    #[test]
    fn test_contains_is_strict() {
        let r = Rect::new(0.0, 100.0, 300.0, 50.0);
        assert!(r.contains_on(Vec2::new(-500.0, 120.0), Axis::Y));
        assert!(!r.contains_on(Vec2::new(0.0, 100.0), Axis::Y));
        assert!(!r.contains_on(Vec2::new(0.0, 150.0), Axis::Y));
        assert!(!r.contains(Vec2::new(-500.0, 120.0)));
        assert!(r.contains(Vec2::new(10.0, 120.0)));
    }

    #[test]
    fn test_clamp_respects_mask() {
        let container = Vec2::new(400.0, 300.0);
        let entity = Vec2::new(50.0, 50.0);

        let both = clamp_to_container(Vec2::new(-20.0, 999.0), container, entity, AxisMask::Both);
        assert_eq!(both, Vec2::new(0.0, 250.0));

        let x_only = clamp_to_container(Vec2::new(999.0, 999.0), container, entity, AxisMask::X);
        assert_eq!(x_only, Vec2::new(350.0, 999.0));
    }

    #[test]
    fn test_clamp_oversized_entity_pins_to_origin() {
        let pos = clamp_to_container(
            Vec2::new(30.0, 30.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(50.0, 50.0),
            AxisMask::Both,
        );
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_static_layout_lookup() {
        let mut layout = StaticLayout::new().with("playground", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(layout.has("playground"));
        assert!(!layout.has("crosswalk"));
        layout.remove("playground");
        assert!(layout.bounds("playground").is_none());
    }

    proptest! {
        #[test]
        fn prop_clamped_position_stays_inside(
            px in -5000.0f32..5000.0,
            py in -5000.0f32..5000.0,
            cw in 1.0f32..2000.0,
            ch in 1.0f32..2000.0,
            ew in 1.0f32..200.0,
            eh in 1.0f32..200.0,
        ) {
            let container = Vec2::new(cw, ch);
            let entity = Vec2::new(ew, eh);
            let pos = clamp_to_container(Vec2::new(px, py), container, entity, AxisMask::Both);
            prop_assert!(pos.x >= 0.0 && pos.x <= (cw - ew).max(0.0));
            prop_assert!(pos.y >= 0.0 && pos.y <= (ch - eh).max(0.0));
        }
    }
}
