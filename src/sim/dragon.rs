//! Dragons: homing flyers that attack the keep

use glam::Vec2;

use super::anim::SpriteCursor;
use super::collision::{Rect, overlaps, sword_reaches};
use super::knight::Knight;
use super::state::{Facing, Keep};
use crate::consts::*;
use crate::step_toward;

/// What happened to a dragon this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragonFate {
    /// Still flying
    Flying,
    /// Reached the keep and exploded
    HitKeep,
    /// Cut down by the knight
    Slain,
    /// Already dead; nothing happens
    Inert,
}

#[derive(Debug, Clone)]
pub struct Dragon {
    pub id: u32,
    pub pos: Vec2,
    pub alive: bool,
    /// Died by flying into the keep (never true together with `alive`)
    pub exploded: bool,
    /// Fixed at spawn: right when approaching from the left of the keep
    pub facing: Facing,
    pub flight_speed: f32,
    cursor: SpriteCursor,
}

impl Dragon {
    pub fn new(id: u32, pos: Vec2, flight_speed: f32, keep: &Keep) -> Self {
        let facing = if pos.x < keep.sprite.pos.x {
            Facing::Right
        } else {
            Facing::Left
        };
        Self {
            id,
            pos,
            alive: true,
            exploded: false,
            facing,
            flight_speed,
            cursor: SpriteCursor::new(DRAGON_FRAMES, DRAGON_FRAME_INTERVAL),
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(DRAGON_WIDTH, DRAGON_HEIGHT)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::size())
    }

    pub fn frame(&self) -> u32 {
        self.cursor.frame()
    }

    /// Where the kill phrase floats up from
    pub fn phrase_anchor(&self) -> Vec2 {
        let dx = match self.facing {
            Facing::Right => DRAGON_WIDTH / 4.0,
            Facing::Left => DRAGON_WIDTH / 6.0,
        };
        self.pos + Vec2::new(dx, 0.0)
    }

    /// Fly one step toward the keep, then resolve collisions
    ///
    /// Keep contact takes priority over the sword. Both deaths are one-shot:
    /// a dead dragon never damages the keep and can never be slain again.
    pub fn update(&mut self, keep: &Keep, knight: &Knight) -> DragonFate {
        if !self.alive {
            return DragonFate::Inert;
        }

        self.cursor.advance(1.0);
        self.pos = step_toward(self.pos, keep.dragon_target(), self.flight_speed);

        if overlaps(&self.bounds(), &keep.hitbox) {
            self.alive = false;
            self.exploded = true;
            return DragonFate::HitKeep;
        }

        if knight.is_weapon_extended() && sword_reaches(knight.pos, &self.bounds(), self.facing) {
            self.alive = false;
            return DragonFate::Slain;
        }

        DragonFate::Flying
    }
}
