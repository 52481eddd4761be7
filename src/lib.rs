//! Keep Defense - A wave-defense arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, collisions, spawning, progression)
//! - `renderer`: Draw-command model and render sink
//! - `audio`: Sound clip catalogue and channel-gated dispatch
//! - `hud`: Score/kills/health presentation sink
//! - `platform`: Headless (native) and browser sinks
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Sprite geometry is tied to the art assets and is not tunable.
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz, one tick per frame)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Knight sprite (231x219 frames)
    pub const KNIGHT_WIDTH: f32 = 231.0;
    pub const KNIGHT_HEIGHT: f32 = 219.0;
    pub const KNIGHT_START_X: f32 = 100.0;
    pub const KNIGHT_START_Y: f32 = 100.0;
    pub const KNIGHT_IDLE_FRAMES: u32 = 8;
    pub const KNIGHT_RUN_FRAMES: u32 = 17;
    pub const KNIGHT_ATTACK_FRAMES: u32 = 12;
    pub const KNIGHT_FRAME_INTERVAL: f32 = 4.0;
    /// Attack frame at which the swing sound plays
    pub const SWORD_SOUND_FRAME: u32 = 9;
    /// Attack frame from which the blade can hit (weapon extended)
    pub const WEAPON_EXTENDED_FRAME: u32 = 10;

    /// Dragon sprite (370x200 frames)
    pub const DRAGON_WIDTH: f32 = 370.0;
    pub const DRAGON_HEIGHT: f32 = 200.0;
    pub const DRAGON_FRAMES: u32 = 10;
    pub const DRAGON_FRAME_INTERVAL: f32 = 5.0;
    /// Homing target offset left of the keep sprite origin
    pub const DRAGON_TARGET_OFFSET_X: f32 = 70.0;

    /// Keep sprite and its (much smaller) collision box
    pub const KEEP_SIZE: f32 = 250.0;
    pub const KEEP_HITBOX_SIZE: f32 = 10.0;
    pub const KEEP_HITBOX_DROP: f32 = 30.0;

    /// Explosion: 5x4 sheet of 192px cells drawn at 150px
    pub const EXPLOSION_SIZE: f32 = 150.0;
    pub const EXPLOSION_CELL: f32 = 192.0;
    pub const EXPLOSION_COLUMNS: u32 = 5;
    pub const EXPLOSION_ROWS: u32 = 4;
    pub const EXPLOSION_FRAME_INTERVAL: f32 = 3.0;
    pub const EXPLOSION_JITTER: [f32; 6] = [-30.0, -20.0, -10.0, 10.0, 20.0, 30.0];

    /// Kill phrase: 3x3 sheet of 410px cells drawn at 200px
    pub const PHRASE_SIZE: f32 = 200.0;
    pub const PHRASE_CELL: f32 = 410.0;
    pub const PHRASE_FADE_STEP: f32 = 0.05;
    pub const PHRASE_MAX_TILT_DEG: f32 = 20.0;
    pub const PHRASE_TILT_STEP_DEG: f32 = 2.0;

    /// Dust: 3x2 sheet of 200px cells drawn at 70px
    pub const DUST_SIZE: f32 = 70.0;
    pub const DUST_CELL: f32 = 200.0;
    pub const DUST_COLUMNS: u32 = 3;
    pub const DUST_ROWS: u32 = 2;
    pub const DUST_FRAME_INTERVAL: f32 = 4.0;
    pub const DUST_OPACITY: f32 = 0.8;

    /// Power-up icon
    pub const POWERUP_WIDTH: f32 = 72.6;
    pub const POWERUP_HEIGHT: f32 = 60.0;
    pub const POWERUP_FADE_STEP: f32 = 0.02;
}

/// Center of a box given its top-left corner and size
#[inline]
pub fn rect_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}

/// Move `from` toward `target` by exactly `speed` units
///
/// Returns `from` unchanged when already on the target.
#[inline]
pub fn step_toward(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    from + (target - from).normalize_or_zero() * speed
}
