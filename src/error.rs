//! Error types
//!
//! None of these are fatal: a binding error turns one mini-game inert and a
//! tuning error falls back to defaults.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("game '{game}' needs region '{region}' but the host page has none")]
    MissingRegion {
        game: &'static str,
        region: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field '{field}' is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
