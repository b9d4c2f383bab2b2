//! Success predicates
//!
//! Every game reduces to "is progress >= threshold". The predicate decides
//! both the progress value shown to the player and whether it satisfies the
//! goal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Axis, GeometryProvider, Rect};

/// When the predicate is evaluated for pointer games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckPolicy {
    /// After every move; release re-checks as a safety net
    OnMove,
    /// Only when the pointer lets go (drop games)
    OnRelease,
}

/// Goal shape, parameterized per game instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Entity center strictly inside the zone on one axis only
    CenterInBand { zone: &'static str, axis: Axis },
    /// Entity center strictly inside the zone on both axes
    CenterInRect { zone: &'static str },
    /// Sliding toward the zone's left edge; linear in position
    Coverage { zone: &'static str, min: f32 },
    /// Accumulated pull reaches `max`
    PullDistance { max: f32 },
    /// Externally set value drops to `cutoff` or below, starting from `initial`
    ScalarAtMost { initial: f32, cutoff: f32 },
}

/// Everything a predicate may look at
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    /// Entity client rectangle after the latest move
    pub entity: Rect,
    /// Entity client origin at the canonical start pose
    pub start: Vec2,
    /// Accumulated pull distance
    pub pulled: f32,
    /// Latest scalar input value
    pub value: f32,
}

/// Result of one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub progress: f32,
    pub satisfied: bool,
}

impl Evaluation {
    fn binary(satisfied: bool) -> Self {
        Self {
            progress: if satisfied { 1.0 } else { 0.0 },
            satisfied,
        }
    }
}

impl Predicate {
    /// Host region this predicate measures against, if any
    pub fn zone(&self) -> Option<&'static str> {
        match *self {
            Predicate::CenterInBand { zone, .. }
            | Predicate::CenterInRect { zone }
            | Predicate::Coverage { zone, .. } => Some(zone),
            Predicate::PullDistance { .. } | Predicate::ScalarAtMost { .. } => None,
        }
    }

    /// Evaluate against current geometry. `None` if the zone has vanished.
    pub fn evaluate(&self, probe: &Probe, geometry: &dyn GeometryProvider) -> Option<Evaluation> {
        let zone = match self.zone() {
            Some(name) => Some(geometry.bounds(name)?),
            None => None,
        };

        let eval = match (*self, zone) {
            (Predicate::CenterInBand { axis, .. }, Some(zone)) => {
                Evaluation::binary(zone.contains_on(probe.entity.center(), axis))
            }
            (Predicate::CenterInRect { .. }, Some(zone)) => {
                Evaluation::binary(zone.contains(probe.entity.center()))
            }
            (Predicate::Coverage { min, .. }, Some(zone)) => {
                let progress = coverage_fraction(probe.start.x, probe.entity.min.x, zone.min.x);
                Evaluation {
                    progress,
                    satisfied: progress >= min,
                }
            }
            (Predicate::PullDistance { max }, _) => Evaluation {
                progress: if max > 0.0 { (probe.pulled / max).clamp(0.0, 1.0) } else { 1.0 },
                satisfied: probe.pulled >= max,
            },
            (Predicate::ScalarAtMost { initial, cutoff }, _) => {
                let span = initial - cutoff;
                let progress = if span > 0.0 {
                    ((initial - probe.value) / span).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                Evaluation {
                    progress,
                    satisfied: probe.value <= cutoff,
                }
            }
            _ => return None,
        };
        Some(eval)
    }
}

/// Linear coverage when sliding from `start_x` toward `target_x` (leftward).
///
/// 0 at the start pose, 1 once the left edge reaches the target.
pub fn coverage_fraction(start_x: f32, current_x: f32, target_x: f32) -> f32 {
    let span = start_x - target_x;
    if span <= f32::EPSILON {
        return 1.0;
    }
    ((start_x - current_x) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::StaticLayout;
    use proptest::prelude::*;

    fn probe_at(entity: Rect) -> Probe {
        Probe {
            entity,
            start: entity.min,
            pulled: 0.0,
            value: 0.0,
        }
    }

    #[test]
    fn test_center_in_band_ignores_other_axis() {
        let layout = StaticLayout::new().with("crosswalk", Rect::new(0.0, 200.0, 50.0, 60.0));
        let pred = Predicate::CenterInBand {
            zone: "crosswalk",
            axis: Axis::Y,
        };
        // Far right of the zone horizontally, but vertically inside
        let eval = pred.evaluate(&probe_at(Rect::new(900.0, 210.0, 20.0, 20.0)), &layout);
        assert_eq!(eval.map(|e| e.satisfied), Some(true));

        let eval = pred.evaluate(&probe_at(Rect::new(900.0, 290.0, 20.0, 20.0)), &layout);
        assert_eq!(eval.map(|e| e.satisfied), Some(false));
    }

    #[test]
    fn test_center_in_rect_needs_both_axes() {
        let layout = StaticLayout::new().with("trash-bin", Rect::new(100.0, 100.0, 80.0, 80.0));
        let pred = Predicate::CenterInRect { zone: "trash-bin" };
        let inside = pred.evaluate(&probe_at(Rect::new(120.0, 120.0, 20.0, 20.0)), &layout);
        let beside = pred.evaluate(&probe_at(Rect::new(300.0, 120.0, 20.0, 20.0)), &layout);
        assert_eq!(inside.map(|e| e.satisfied), Some(true));
        assert_eq!(beside.map(|e| e.satisfied), Some(false));
    }

    #[test]
    fn test_missing_zone_evaluates_to_none() {
        let pred = Predicate::CenterInRect { zone: "safe-zone" };
        let eval = pred.evaluate(&probe_at(Rect::new(0.0, 0.0, 1.0, 1.0)), &StaticLayout::new());
        assert!(eval.is_none());
    }

    #[test]
    fn test_coverage_has_rounding_slack() {
        assert_eq!(coverage_fraction(300.0, 300.0, 100.0), 0.0);
        assert_eq!(coverage_fraction(300.0, 100.0, 100.0), 1.0);
        let almost = coverage_fraction(300.0, 103.0, 100.0);
        assert!(almost >= 0.98 && almost < 1.0);
    }

    #[test]
    fn test_pull_distance_threshold() {
        let pred = Predicate::PullDistance { max: 120.0 };
        let layout = StaticLayout::new();
        let mut probe = probe_at(Rect::new(0.0, 0.0, 10.0, 10.0));
        probe.pulled = 119.0;
        assert_eq!(pred.evaluate(&probe, &layout).map(|e| e.satisfied), Some(false));
        probe.pulled = 120.0;
        assert_eq!(pred.evaluate(&probe, &layout).map(|e| e.satisfied), Some(true));
    }

    #[test]
    fn test_scalar_cutoff_is_inclusive() {
        let pred = Predicate::ScalarAtMost {
            initial: 85.0,
            cutoff: 20.0,
        };
        let layout = StaticLayout::new();
        let mut probe = probe_at(Rect::new(0.0, 0.0, 1.0, 1.0));
        probe.value = 21.0;
        assert_eq!(pred.evaluate(&probe, &layout).map(|e| e.satisfied), Some(false));
        probe.value = 20.0;
        let eval = pred.evaluate(&probe, &layout);
        assert_eq!(eval.map(|e| e.satisfied), Some(true));
        assert_eq!(eval.map(|e| e.progress), Some(1.0));
    }

    proptest! {
        #[test]
        fn prop_coverage_monotonic_leftward(
            start in 200.0f32..600.0,
            target in 0.0f32..190.0,
            a in 0.0f32..600.0,
            step in 0.0f32..300.0,
        ) {
            let further_left = a - step;
            prop_assert!(
                coverage_fraction(start, further_left, target) >= coverage_fraction(start, a, target)
            );
        }
    }
}
