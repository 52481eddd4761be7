//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - One tick per frame, no parallelism
//! - Seeded RNG only
//! - Deferred work goes through the timer queue and runs inside a tick

pub mod anim;
pub mod autopilot;
pub mod collision;
pub mod dragon;
pub mod effects;
pub mod input;
pub mod knight;
pub mod powerup;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use autopilot::autopilot;
pub use collision::{Rect, overlaps, sword_reaches};
pub use dragon::Dragon;
pub use effects::{Dust, Explosion, Phrase};
pub use input::{Control, InputState};
pub use knight::{Knight, Movement};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{Facing, GameEvent, GamePhase, GameState, Keep};
pub use tick::{replay, start, tick};
pub use timers::{TimerEvent, TimerQueue};
