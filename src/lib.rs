//! Civic Games - drag-and-drop civic education mini-games
//!
//! Core modules:
//! - `engine`: Deterministic round/drag/predicate engine (no DOM, no clock)
//! - `platform`: Browser bindings (geometry, presentation)
//! - `tuning`: Data-driven game balance
//! - `error`: Binding and configuration errors

pub mod engine;
pub mod error;
pub mod platform;
pub mod tuning;

pub use error::{BindError, TuningError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Points awarded for every successful round
    pub const POINTS_PER_SUCCESS: u32 = 10;

    /// Crosswalk canonical start pose (container-relative pixels)
    pub const CROSSWALK_START: (f32, f32) = (80.0, 120.0);

    /// Coverage needed to count the pot as covered (pixel rounding slack)
    pub const COVERAGE_MIN: f32 = 0.98;

    /// Firecracker string must be pulled this far
    pub const PULL_MAX: f32 = 120.0;

    /// Karaoke volume at round start
    pub const KARAOKE_INITIAL: f32 = 85.0;
    /// Karaoke volume at or below which the neighbours are happy
    pub const KARAOKE_CUTOFF: f32 = 20.0;

    /// Fail-timer durations (milliseconds)
    pub const POT_LID_FAIL_MS: f64 = 6500.0;
    pub const FIRECRACKER_FAIL_MS: f64 = 5000.0;
    pub const FLYER_FAIL_MS: f64 = 6500.0;
    pub const KARAOKE_FAIL_MS: f64 = 7000.0;

    /// Correct cards needed to finish a card-sort sub-game
    pub const CARD_SORT_REQUIRED: usize = 3;
}
