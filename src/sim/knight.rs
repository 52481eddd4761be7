//! The player's knight
//!
//! Movement state machine, evaluated once per tick in priority order:
//! a locked attack runs to completion, then a new attack, then running,
//! then idling.

use glam::Vec2;

use super::anim::SpriteCursor;
use super::collision::{Rect, overlaps};
use super::input::InputState;
use super::state::Facing;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which sprite sheet the knight is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Idle,
    Run,
    Attack,
}

/// Side effects of one knight update, applied by the tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KnightTick {
    /// Spawn a dust cloud here, drifting this way
    pub dust: Option<(Vec2, Facing)>,
    /// Play a sword swing
    pub swing: bool,
}

#[derive(Debug, Clone)]
pub struct Knight {
    pub pos: Vec2,
    pub facing: Facing,
    pub movement: Movement,
    /// Held for the full length of one attack animation
    pub attack_locked: bool,
    pub move_speed: f32,
    /// Per-tick step of the attack cursor
    pub attack_cadence: f32,
    /// Last level observed by progression
    pub level: u32,
    idle: SpriteCursor,
    run: SpriteCursor,
    attack: SpriteCursor,
    swing_played: bool,
}

impl Knight {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(KNIGHT_START_X, KNIGHT_START_Y),
            facing: Facing::Right,
            movement: Movement::Idle,
            attack_locked: false,
            move_speed: tuning.knight_move_speed,
            attack_cadence: tuning.knight_attack_cadence,
            level: 0,
            idle: SpriteCursor::new(KNIGHT_IDLE_FRAMES, KNIGHT_FRAME_INTERVAL),
            run: SpriteCursor::new(KNIGHT_RUN_FRAMES, KNIGHT_FRAME_INTERVAL),
            attack: SpriteCursor::new(KNIGHT_ATTACK_FRAMES, KNIGHT_FRAME_INTERVAL),
            swing_played: false,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(KNIGHT_WIDTH, KNIGHT_HEIGHT)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::size())
    }

    /// Frame of the sheet currently showing
    pub fn frame(&self) -> u32 {
        match self.movement {
            Movement::Idle => self.idle.frame(),
            Movement::Run => self.run.frame(),
            Movement::Attack => self.attack.frame(),
        }
    }

    pub fn attack_frame(&self) -> u32 {
        self.attack.frame()
    }

    /// Blade is out far enough to hit
    pub fn is_weapon_extended(&self) -> bool {
        self.attack_locked && self.attack.frame() >= WEAPON_EXTENDED_FRAME
    }

    /// Advance the knight by one tick
    ///
    /// `dust_visible` reports whether a dust cloud is already showing;
    /// `keep` is the box the knight may not walk into.
    pub fn update(
        &mut self,
        input: &InputState,
        keep: &Rect,
        playfield: Vec2,
        dust_visible: bool,
    ) -> KnightTick {
        let mut out = KnightTick::default();

        // Dust compares the held direction against the facing from last tick
        if !dust_visible {
            out.dust = self.dust_trail(input);
        }
        if input.left() {
            self.facing = Facing::Left;
        }
        if input.right() {
            self.facing = Facing::Right;
        }

        if self.attack_locked {
            if self.attack.advance(self.attack_cadence) {
                self.attack_locked = false;
            } else {
                if !self.swing_played && self.attack.frame() >= SWORD_SOUND_FRAME {
                    self.swing_played = true;
                    out.swing = true;
                }
                return out;
            }
        }

        if input.attack() {
            self.begin_attack();
        } else if input.any_direction() {
            self.set_movement(Movement::Run);
            self.run.advance(1.0);
            self.step(input, keep, playfield);
        } else {
            self.set_movement(Movement::Idle);
            self.idle.advance(1.0);
        }
        out
    }

    /// Force the knight out of any attack (game over)
    pub fn cancel_attack(&mut self) {
        self.attack_locked = false;
        self.set_movement(Movement::Idle);
    }

    fn begin_attack(&mut self) {
        self.set_movement(Movement::Attack);
        self.attack.reset();
        self.attack_locked = true;
        self.swing_played = false;
    }

    /// Switching sheets restarts every cursor so no stale offset carries over
    fn set_movement(&mut self, next: Movement) {
        if next != self.movement {
            self.movement = next;
            self.idle.reset();
            self.run.reset();
            self.attack.reset();
        }
    }

    /// Move one step per held direction, clamped to the playfield
    ///
    /// Each axis is applied separately; a step that would put the knight over
    /// the keep's box is dropped.
    fn step(&mut self, input: &InputState, keep: &Rect, playfield: Vec2) {
        let mut delta = Vec2::ZERO;
        if input.up() {
            delta.y -= self.move_speed;
        }
        if input.down() {
            delta.y += self.move_speed;
        }
        if input.right() {
            delta.x += self.move_speed;
        }
        if input.left() {
            delta.x -= self.move_speed;
        }

        let max = (playfield - Self::size()).max(Vec2::ZERO);
        let size = Self::size();

        let x = (self.pos.x + delta.x).clamp(0.0, max.x);
        if !overlaps(&Rect::from_pos_size(Vec2::new(x, self.pos.y), size), keep) {
            self.pos.x = x;
        }
        let y = (self.pos.y + delta.y).clamp(0.0, max.y);
        if !overlaps(&Rect::from_pos_size(Vec2::new(self.pos.x, y), size), keep) {
            self.pos.y = y;
        }
    }

    /// A cloud kicks up when the held direction opposes the current facing
    fn dust_trail(&self, input: &InputState) -> Option<(Vec2, Facing)> {
        let (dx, drift) = if input.left() && self.facing == Facing::Right {
            (60.0, Facing::Left)
        } else if input.right() && self.facing == Facing::Left {
            (80.0, Facing::Right)
        } else {
            return None;
        };

        let mut dy = 150.0;
        if input.down() {
            dy += 30.0;
        } else if input.up() {
            dy -= 40.0;
        }
        Some((self.pos + Vec2::new(dx, dy), drift))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Control;

    const FIELD: Vec2 = Vec2::new(1050.0, 700.0);

    fn far_keep() -> Rect {
        Rect::new(2000.0, 2000.0, 10.0, 10.0)
    }

    fn knight() -> Knight {
        Knight::new(&Tuning::default())
    }

    fn run_attack(knight: &mut Knight) -> (u32, bool) {
        let attack = InputState::default().with(Control::Attack);
        let idle = InputState::default();
        knight.update(&attack, &far_keep(), FIELD, true);
        let mut ticks = 0;
        let mut swings = 0;
        while knight.attack_locked {
            let out = knight.update(&idle, &far_keep(), FIELD, true);
            if out.swing {
                swings += 1;
            }
            ticks += 1;
            assert!(ticks < 1000, "attack never completed");
        }
        (ticks, swings == 1)
    }

    #[test]
    fn test_idle_by_default() {
        let mut k = knight();
        k.update(&InputState::default(), &far_keep(), FIELD, true);
        assert_eq!(k.movement, Movement::Idle);
        assert_eq!(k.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_run_moves_and_faces() {
        let mut k = knight();
        let left = InputState::default().with(Control::Left);
        k.update(&left, &far_keep(), FIELD, true);
        assert_eq!(k.movement, Movement::Run);
        assert_eq!(k.facing, Facing::Left);
        assert_eq!(k.pos.x, 95.0);
    }

    #[test]
    fn test_movement_clamped_to_playfield() {
        let mut k = knight();
        k.pos = Vec2::new(2.0, 1.0);
        let up_left = InputState::default().with(Control::Up).with(Control::Left);
        k.update(&up_left, &far_keep(), FIELD, true);
        assert_eq!(k.pos, Vec2::ZERO);

        k.pos = Vec2::new(FIELD.x - KNIGHT_WIDTH, FIELD.y - KNIGHT_HEIGHT);
        let down_right = InputState::default().with(Control::Down).with(Control::Right);
        k.update(&down_right, &far_keep(), FIELD, true);
        assert_eq!(k.pos, FIELD - Knight::size());
    }

    #[test]
    fn test_keep_blocks_movement() {
        let mut k = knight();
        // Keep box just right of the knight's right edge
        let keep = Rect::new(100.0 + KNIGHT_WIDTH + 2.0, 150.0, 10.0, 10.0);
        let right = InputState::default().with(Control::Right);
        k.update(&right, &keep, FIELD, true);
        assert_eq!(k.pos.x, 100.0);
        // Vertical movement is still allowed
        let up = InputState::default().with(Control::Up);
        k.update(&up, &keep, FIELD, true);
        assert_eq!(k.pos.y, 95.0);
    }

    #[test]
    fn test_attack_locks_until_complete() {
        let mut k = knight();
        let (ticks, one_swing) = run_attack(&mut k);
        // 12 frames x 4 ticks per frame
        assert_eq!(ticks, 48);
        assert!(one_swing);
        assert!(!k.attack_locked);
    }

    #[test]
    fn test_attack_ignores_movement() {
        let mut k = knight();
        let attack = InputState::default().with(Control::Attack);
        k.update(&attack, &far_keep(), FIELD, true);
        let right = InputState::default().with(Control::Right);
        for _ in 0..10 {
            k.update(&right, &far_keep(), FIELD, true);
            assert_eq!(k.movement, Movement::Attack);
        }
        assert_eq!(k.pos.x, 100.0);
    }

    #[test]
    fn test_faster_cadence_shortens_attack() {
        let mut k = knight();
        k.attack_cadence = 2.0;
        let (ticks, _) = run_attack(&mut k);
        assert_eq!(ticks, 24);
    }

    #[test]
    fn test_weapon_extended_window() {
        let mut k = knight();
        let attack = InputState::default().with(Control::Attack);
        k.update(&attack, &far_keep(), FIELD, true);
        assert!(!k.is_weapon_extended());
        let idle = InputState::default();
        // Frame 10 is reached after 40 ticks
        for _ in 0..39 {
            k.update(&idle, &far_keep(), FIELD, true);
        }
        assert_eq!(k.attack_frame(), 9);
        assert!(!k.is_weapon_extended());
        k.update(&idle, &far_keep(), FIELD, true);
        assert!(k.is_weapon_extended());
    }

    #[test]
    fn test_state_change_resets_cursor() {
        let mut k = knight();
        let idle = InputState::default();
        for _ in 0..8 {
            k.update(&idle, &far_keep(), FIELD, true);
        }
        assert_eq!(k.frame(), 2);
        let right = InputState::default().with(Control::Right);
        k.update(&right, &far_keep(), FIELD, true);
        assert_eq!(k.movement, Movement::Run);
        assert_eq!(k.frame(), 0);
    }

    #[test]
    fn test_dust_on_direction_flip() {
        let mut k = knight();
        let left = InputState::default().with(Control::Left);
        let out = k.update(&left, &far_keep(), FIELD, false);
        let (pos, drift) = out.dust.expect("dust on flip");
        assert_eq!(drift, Facing::Left);
        assert_eq!(pos, Vec2::new(160.0, 250.0));

        // Holding the same direction does not kick up more dust
        let out = k.update(&left, &far_keep(), FIELD, false);
        assert!(out.dust.is_none());
    }

    #[test]
    fn test_dust_suppressed_while_visible() {
        let mut k = knight();
        let left = InputState::default().with(Control::Left);
        let out = k.update(&left, &far_keep(), FIELD, true);
        assert!(out.dust.is_none());
    }
}
