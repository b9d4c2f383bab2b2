//! Mini-game engine
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters as explicit millisecond timestamps
//! - Geometry only enters through `GeometryProvider`
//! - Effects only leave through `OutcomeSink`
//! - No DOM or platform dependencies

pub mod card_sort;
pub mod catalog;
pub mod drag;
pub mod game;
pub mod geometry;
pub mod predicate;
pub mod round;
pub mod scene;
pub mod session;
pub mod timer;

pub use card_sort::{CardSort, DropResult};
pub use drag::{DragMode, DragTracker};
pub use game::{GameController, GameId, GameSpec, GameView, InputKind};
pub use geometry::{Axis, AxisMask, GeometryProvider, Rect, StaticLayout, clamp_to_container};
pub use predicate::{CheckPolicy, Predicate};
pub use round::{Outcome, Round, RoundState};
pub use scene::SceneController;
pub use session::{OutcomeSink, Session};
pub use timer::FailTimer;
