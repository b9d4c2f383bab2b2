//! Platform abstraction layer
//!
//! Handles the browser side of the engine:
//! - Geometry from live layout
//! - Presentation (style position, CSS state classes, text)

#[cfg(target_arch = "wasm32")]
pub mod dom;

use crate::engine::{GameView, RoundState};

/// CSS state classes understood by the host stylesheet
pub mod classes {
    pub const DRAGGING: &str = "dragging";
    pub const SUCCESS: &str = "success";
    pub const FAIL: &str = "fail";
    pub const HIDDEN: &str = "hidden";
    pub const ACTIVE: &str = "active";
}

/// Which state classes an entity should carry for `view`, as (class, on) pairs
pub fn entity_classes(view: &GameView) -> [(&'static str, bool); 3] {
    [
        (classes::DRAGGING, view.dragging),
        (classes::SUCCESS, view.state == RoundState::Succeeded),
        (classes::FAIL, view.state == RoundState::Failed),
    ]
}

/// Pixel style value
pub fn px(v: f32) -> String {
    format!("{}px", v.round())
}
