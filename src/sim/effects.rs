//! Transient visual effects
//!
//! Each effect plays forward once and then switches itself off; the tick
//! prunes inactive ones.

use glam::Vec2;
use rand::Rng;

use super::anim::SheetCursor;
use super::state::Facing;
use crate::consts::*;

/// Fireball where a dragon struck the keep
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub active: bool,
    cursor: SheetCursor,
    sounded: bool,
}

impl Explosion {
    /// Spawn centred on `center`, jittered a little on each axis
    pub fn new<R: Rng>(center: Vec2, rng: &mut R) -> Self {
        let jitter = Vec2::new(
            EXPLOSION_JITTER[rng.random_range(0..EXPLOSION_JITTER.len())],
            EXPLOSION_JITTER[rng.random_range(0..EXPLOSION_JITTER.len())],
        );
        Self {
            pos: center - Vec2::splat(EXPLOSION_SIZE / 2.0) + jitter,
            active: true,
            cursor: SheetCursor::new(EXPLOSION_COLUMNS, EXPLOSION_ROWS, EXPLOSION_FRAME_INTERVAL),
            sounded: false,
        }
    }

    /// Advance one tick. Returns true when the blast sound should play.
    pub fn update(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.cursor.advance(1.0);
        if self.cursor.is_finished() {
            self.active = false;
            return false;
        }
        if !self.sounded && self.cursor.is_row_end(0) {
            self.sounded = true;
            return true;
        }
        false
    }

    /// Source offset into the explosion sheet
    pub fn source(&self) -> Vec2 {
        self.cursor.offset(EXPLOSION_CELL)
    }
}

/// Floating exclamation over a slain dragon
#[derive(Debug, Clone)]
pub struct Phrase {
    pub id: u32,
    pub pos: Vec2,
    /// (column, row) of the phrase in its sheet
    pub cell: (u32, u32),
    pub opacity: f32,
    /// Current wobble angle in degrees
    pub tilt_deg: f32,
    tilt_step: f32,
    fade_armed: bool,
    pub fading: bool,
    pub active: bool,
}

impl Phrase {
    pub fn new<R: Rng>(id: u32, anchor: Vec2, rng: &mut R) -> Self {
        let index = rng.random_range(0..8u32);
        let cell = (index % 3, index / 3);
        let mut pos = anchor;
        // The sixth phrase sits low in its cell
        if cell == (2, 1) {
            pos.y -= 50.0;
        }
        Self {
            id,
            pos,
            cell,
            opacity: 1.0,
            tilt_deg: 1.0,
            tilt_step: PHRASE_TILT_STEP_DEG,
            fade_armed: false,
            fading: false,
            active: true,
        }
    }

    /// Advance one tick. Returns true on the first update, when the caller
    /// should schedule the delayed fade.
    pub fn update(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.tilt_deg += self.tilt_step;
        if self.tilt_deg >= PHRASE_MAX_TILT_DEG || self.tilt_deg <= -PHRASE_MAX_TILT_DEG {
            self.tilt_step = -self.tilt_step;
        }

        if self.fading {
            self.opacity = (self.opacity - PHRASE_FADE_STEP).max(0.0);
            if self.opacity <= 0.0 {
                self.active = false;
            }
        }

        if !self.fade_armed {
            self.fade_armed = true;
            return true;
        }
        false
    }

    pub fn begin_fade(&mut self) {
        self.fading = true;
    }

    pub fn source(&self) -> Vec2 {
        Vec2::new(self.cell.0 as f32, self.cell.1 as f32) * PHRASE_CELL
    }
}

/// Puff of dust where the knight turned around
#[derive(Debug, Clone)]
pub struct Dust {
    pub pos: Vec2,
    /// Direction the cloud drifts (the direction of the turn)
    pub drift: Facing,
    pub active: bool,
    cursor: SheetCursor,
}

impl Dust {
    pub fn new(pos: Vec2, drift: Facing) -> Self {
        Self {
            pos,
            drift,
            active: true,
            cursor: SheetCursor::new(DUST_COLUMNS, DUST_ROWS, DUST_FRAME_INTERVAL),
        }
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.cursor.advance(1.0);
        if self.cursor.is_finished() {
            self.active = false;
        }
    }

    /// A cloud stops counting as visible on its last frame, so the next one
    /// can start while it finishes
    pub fn is_visible(&self) -> bool {
        self.active && !self.cursor.is_last_cell()
    }

    pub fn source(&self) -> Vec2 {
        self.cursor.offset(DUST_CELL)
    }
}
