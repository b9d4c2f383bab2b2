//! Data-driven game balance
//!
//! Read from an inline JSON block in the host page. Nothing is persisted;
//! a missing or bad block means defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Balance knobs for every mini-game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scoring ===
    /// Points per successful round
    pub points_per_success: u32,
    /// Correct cards needed to finish a card-sort sub-game
    pub card_sort_required: usize,

    // === Free drag games (container-relative start poses) ===
    pub crosswalk_start: [f32; 2],
    pub phishing_start: [f32; 2],
    pub flyer_start: [f32; 2],
    pub flyer_fail_ms: f64,

    // === Pot lid ===
    pub pot_lid_start: [f32; 2],
    pub pot_lid_fail_ms: f64,
    /// Coverage fraction that counts as covered
    pub coverage_min: f32,

    // === Firecracker ===
    pub firecracker_start: [f32; 2],
    pub firecracker_fail_ms: f64,
    /// Pull distance needed to take the string down
    pub pull_max: f32,

    // === Karaoke ===
    pub karaoke_initial: f32,
    pub karaoke_cutoff: f32,
    pub karaoke_fail_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            points_per_success: POINTS_PER_SUCCESS,
            card_sort_required: CARD_SORT_REQUIRED,

            crosswalk_start: [CROSSWALK_START.0, CROSSWALK_START.1],
            phishing_start: [20.0, 20.0],
            flyer_start: [20.0, 140.0],
            flyer_fail_ms: FLYER_FAIL_MS,

            pot_lid_start: [300.0, 20.0],
            pot_lid_fail_ms: POT_LID_FAIL_MS,
            coverage_min: COVERAGE_MIN,

            firecracker_start: [90.0, 0.0],
            firecracker_fail_ms: FIRECRACKER_FAIL_MS,
            pull_max: PULL_MAX,

            karaoke_initial: KARAOKE_INITIAL,
            karaoke_cutoff: KARAOKE_CUTOFF,
            karaoke_fail_ms: KARAOKE_FAIL_MS,
        }
    }
}

impl Tuning {
    /// Element id of the inline JSON block
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "game-tuning";

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), TuningError> {
            Err(TuningError::Invalid {
                field,
                reason: reason.to_string(),
            })
        }

        if self.points_per_success == 0 {
            return invalid("points_per_success", "must be positive");
        }
        if self.card_sort_required == 0 {
            return invalid("card_sort_required", "must be at least 1");
        }
        if !(self.coverage_min > 0.0 && self.coverage_min <= 1.0) {
            return invalid("coverage_min", "must be in (0, 1]");
        }
        if self.pull_max <= 0.0 {
            return invalid("pull_max", "must be positive");
        }
        if self.karaoke_cutoff >= self.karaoke_initial {
            return invalid("karaoke_cutoff", "must be below karaoke_initial");
        }
        for (field, ms) in [
            ("flyer_fail_ms", self.flyer_fail_ms),
            ("pot_lid_fail_ms", self.pot_lid_fail_ms),
            ("firecracker_fail_ms", self.firecracker_fail_ms),
            ("karaoke_fail_ms", self.karaoke_fail_ms),
        ] {
            if ms <= 0.0 {
                return invalid(field, "must be positive");
            }
        }
        Ok(())
    }

    /// Load tuning from the host page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("No tuning block, using defaults");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning block: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
