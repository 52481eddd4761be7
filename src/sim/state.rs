//! Game state and core simulation types
//!
//! `GameState` is the one session object: it owns every entity collection and
//! is only mutated from inside `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::dragon::Dragon;
use super::effects::{Dust, Explosion, Phrase};
use super::knight::Knight;
use super::powerup::{PowerUp, PowerUpKind};
use super::progression::ProgressionTracker;
use super::spawn::SpawnScheduler;
use super::timers::{TimerEvent, TimerQueue};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start signal
    NotStarted,
    /// Simulation running
    Active,
    /// Keep fell; waiting for the replay signal
    GameOver,
}

/// Horizontal facing of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Things that happened during a tick, drained by the host for audio and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Sound(SoundEffect),
    /// A dragon reached the keep
    KeepHit { health: u8 },
    /// A dragon fell to the knight's sword
    DragonSlain { id: u32, kill_count: u32 },
    LevelUp { level: u32 },
    PowerUpGranted(PowerUpKind),
    GameOver { score: u64 },
    Replayed,
}

/// The defended keep: a large sprite with a small collision box near its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keep {
    pub sprite: Rect,
    pub hitbox: Rect,
}

impl Keep {
    pub fn new(playfield: Vec2) -> Self {
        let center = playfield * 0.5;
        let sprite = Rect::new(
            center.x - KEEP_SIZE / 2.0,
            center.y - KEEP_SIZE / 2.0,
            KEEP_SIZE,
            KEEP_SIZE,
        );
        let hitbox = Rect::new(
            center.x - KEEP_HITBOX_SIZE / 2.0,
            center.y - KEEP_HITBOX_SIZE / 2.0 + KEEP_HITBOX_DROP,
            KEEP_HITBOX_SIZE,
            KEEP_HITBOX_SIZE,
        );
        Self { sprite, hitbox }
    }

    /// Point dragons home in on (their top-left corner aims here)
    pub fn dragon_target(&self) -> Vec2 {
        Vec2::new(self.sprite.pos.x - DRAGON_TARGET_OFFSET_X, self.sprite.pos.y)
    }

    pub fn center(&self) -> Vec2 {
        self.sprite.center()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Dragons slain by the sword (keep collisions do not count)
    pub kill_count: u32,
    /// Keep health, always within 0..=max
    pub health: u8,
    pub knight: Knight,
    pub keep: Keep,
    pub dragons: Vec<Dragon>,
    pub explosions: Vec<Explosion>,
    pub phrases: Vec<Phrase>,
    pub dust: Vec<Dust>,
    /// Single power-up slot; a new grant replaces the old one
    pub power_up: Option<PowerUp>,
    pub spawner: SpawnScheduler,
    pub progression: ProgressionTracker,
    pub timers: TimerQueue,
    /// Session clock (ms), advanced only while active
    pub clock_ms: f64,
    /// Active ticks since the session started
    pub time_ticks: u64,
    /// Set once the lethal hit lands; the game-over timer is in flight
    pub game_over_pending: bool,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a session that has not started yet
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(tuning: Tuning, rng: Pcg32) -> Self {
        let playfield = Vec2::new(tuning.playfield_width, tuning.playfield_height);
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            kill_count: 0,
            health: tuning.structure_max_health,
            knight: Knight::new(&tuning),
            keep: Keep::new(playfield),
            dragons: Vec::new(),
            explosions: Vec::new(),
            phrases: Vec::new(),
            dust: Vec::new(),
            power_up: None,
            spawner: SpawnScheduler::default(),
            progression: ProgressionTracker::default(),
            timers: TimerQueue::default(),
            clock_ms: 0.0,
            time_ticks: 0,
            game_over_pending: false,
            events: Vec::new(),
            rng,
            next_id: 1,
            tuning,
        }
    }

    /// Return every counter and collection to its initial value, keeping the
    /// tuning and continuing the RNG stream
    pub fn reset(&mut self) {
        let tuning = self.tuning.clone();
        let rng = self.rng.clone();
        let events = std::mem::take(&mut self.events);
        *self = Self::with_rng(tuning, rng);
        self.events = events;
    }

    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.tuning.playfield_width, self.tuning.playfield_height)
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Derived level from the current kill count
    pub fn level(&self) -> u32 {
        super::progression::level_for(self.kill_count, self.tuning.level_interval)
    }

    /// Apply keep damage, clamping at zero
    ///
    /// The first hit that empties the keep schedules the game-over transition;
    /// later hits while it is pending change nothing.
    pub fn damage_keep(&mut self, amount: u8) {
        if self.game_over_pending {
            return;
        }
        self.health = self.health.saturating_sub(amount);
        self.emit(GameEvent::KeepHit {
            health: self.health,
        });
        if self.health == 0 {
            self.game_over_pending = true;
            let delay = self.tuning.game_over_delay_ms;
            self.timers
                .schedule(self.clock_ms, delay, TimerEvent::GameOver);
            log::info!("Keep has fallen, game over in {delay}ms");
        }
    }

    /// Restore keep health, never above the maximum
    pub fn repair_keep(&mut self, amount: u8) {
        if self.game_over_pending {
            return;
        }
        let max = self.tuning.structure_max_health;
        self.health = self.health.saturating_add(amount).min(max);
    }

    /// Whether a dust cloud is still on its visible frames
    pub fn dust_visible(&self) -> bool {
        self.dust.iter().any(|d| d.is_visible())
    }

    /// Live dragons (the dead are pruned at the end of each tick)
    pub fn living_dragons(&self) -> impl Iterator<Item = &Dragon> {
        self.dragons.iter().filter(|d| d.alive)
    }
}
