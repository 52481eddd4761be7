//! Level-up power-ups
//!
//! The permanent effect is applied the moment the power-up is granted; the
//! entity itself is only the icon that rides beside the knight and fades.

use glam::Vec2;
use rand::Rng;

use super::knight::Knight;
use super::state::Facing;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Permanently faster movement
    Movement,
    /// Permanently faster attacks
    Attack,
    /// Repairs the keep
    Rebuild,
}

/// Kinds that may be granted; `Rebuild` is pointless on an undamaged keep
pub fn eligible_kinds(health: u8, max_health: u8) -> &'static [PowerUpKind] {
    if health >= max_health {
        &[PowerUpKind::Movement, PowerUpKind::Attack]
    } else {
        &[PowerUpKind::Movement, PowerUpKind::Attack, PowerUpKind::Rebuild]
    }
}

/// Pick a kind uniformly from the eligible set
pub fn choose_kind<R: Rng>(health: u8, max_health: u8, rng: &mut R) -> PowerUpKind {
    let kinds = eligible_kinds(health, max_health);
    kinds[rng.random_range(0..kinds.len())]
}

/// The icon of the most recent power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub opacity: f32,
    /// Fade has begun (set by the delayed timer)
    pub fade_started: bool,
    acquired: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, knight: &Knight) -> Self {
        let mut power_up = Self {
            id,
            kind,
            pos: Vec2::ZERO,
            opacity: 1.0,
            fade_started: false,
            acquired: false,
        };
        power_up.follow(knight);
        power_up
    }

    /// Advance one tick. Returns true on the first update, when the pickup
    /// sound plays and the fade timer should be scheduled.
    pub fn update(&mut self, knight: &Knight) -> bool {
        if self.is_expired() {
            return false;
        }
        self.follow(knight);

        if self.fade_started {
            self.opacity = (self.opacity - POWERUP_FADE_STEP).max(0.0);
        }

        if !self.acquired {
            self.acquired = true;
            return true;
        }
        false
    }

    pub fn begin_fade(&mut self) {
        self.fade_started = true;
    }

    /// Fully faded: draws nothing, does nothing
    pub fn is_expired(&self) -> bool {
        self.opacity <= 0.0
    }

    /// Sit beside the knight's head on whichever side it faces
    fn follow(&mut self, knight: &Knight) {
        let dx = match knight.facing {
            Facing::Right => 65.0,
            Facing::Left => 113.0,
        };
        self.pos = knight.pos + Vec2::new(dx, -50.0);
    }
}
