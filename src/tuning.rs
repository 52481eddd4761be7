//! Data-driven game balance
//!
//! Every gameplay number that is not sprite geometry lives here so a run can
//! be rebalanced from a JSON file without recompiling.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Balance parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Spawning ===
    /// Active ticks between spawn batches
    pub spawn_interval_ticks: u32,
    /// Active ticks between batch-size increments
    pub ramp_interval_ticks: u32,
    /// Enemies placed immediately when a session starts
    pub initial_enemies: u32,
    /// Kill counts at which dragons move up a speed tier
    pub tier_thresholds: [u32; 2],
    /// Flight speeds per tier (pixels per tick), one picked at random per spawn
    pub speed_tiers: [Vec<f32>; 3],

    // === Progression ===
    /// Kills per level
    pub level_interval: u32,
    pub knight_move_speed: f32,
    pub move_speed_bonus: f32,
    pub knight_attack_cadence: f32,
    pub attack_cadence_bonus: f32,
    pub rebuild_amount: u8,

    // === Keep ===
    pub structure_max_health: u8,
    pub structure_damage: u8,

    // === Scoring ===
    pub kill_score: u64,

    // === Timers ===
    /// Delay before a power-up or kill phrase starts fading
    pub fade_delay_ms: f64,
    /// Delay between the lethal hit and the game-over screen
    pub game_over_delay_ms: f64,

    // === Effects ===
    /// Dust clouds are all cleared once more than this many exist
    pub dust_cap: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: 1050.0,
            playfield_height: 700.0,

            spawn_interval_ticks: 150,
            ramp_interval_ticks: 1000,
            initial_enemies: 2,
            tier_thresholds: [300, 500],
            speed_tiers: [
                vec![1.25, 1.35, 1.5, 1.65, 1.75, 2.0],
                vec![2.25, 2.35, 2.5, 2.65, 2.75, 3.0],
                vec![3.25, 3.35, 3.5, 3.65, 3.75, 4.0],
            ],

            level_interval: 5,
            knight_move_speed: 5.0,
            move_speed_bonus: 0.1,
            knight_attack_cadence: 1.0,
            attack_cadence_bonus: 0.1,
            rebuild_amount: 20,

            structure_max_health: 100,
            structure_damage: 10,

            kill_score: 75,

            fade_delay_ms: 1000.0,
            game_over_delay_ms: 500.0,

            dust_cap: 20,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file, falling back to defaults if it does not exist
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, GameError> {
        if !path.exists() {
            log::info!("No tuning file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that every value keeps the simulation well defined
    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |why: &str| Err(GameError::InvalidConfig(why.to_string()));

        if self.playfield_width <= 0.0 || self.playfield_height <= 0.0 {
            return fail("playfield dimensions must be positive");
        }
        if self.spawn_interval_ticks == 0 {
            return fail("spawn_interval_ticks must be > 0");
        }
        if self.ramp_interval_ticks == 0 {
            return fail("ramp_interval_ticks must be > 0");
        }
        if self.level_interval == 0 {
            return fail("level_interval must be > 0");
        }
        if self.tier_thresholds[0] >= self.tier_thresholds[1] {
            return fail("tier_thresholds must be strictly increasing");
        }
        for tier in &self.speed_tiers {
            if tier.is_empty() {
                return fail("every speed tier needs at least one speed");
            }
            if tier.iter().any(|s| *s <= 0.0) {
                return fail("flight speeds must be positive");
            }
        }
        if self.knight_move_speed <= 0.0 || self.knight_attack_cadence <= 0.0 {
            return fail("knight speeds must be positive");
        }
        if self.structure_max_health == 0 || self.structure_max_health > 100 {
            return fail("structure_max_health must be in 1..=100");
        }
        if self.fade_delay_ms < 0.0 || self.game_over_delay_ms < 0.0 {
            return fail("timer delays cannot be negative");
        }
        Ok(())
    }

    /// Speed tier index for a given cumulative kill count
    pub fn speed_tier(&self, kill_count: u32) -> usize {
        if kill_count >= self.tier_thresholds[1] {
            2
        } else if kill_count >= self.tier_thresholds[0] {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_interval_ticks": 60 }"#).unwrap();
        assert_eq!(tuning.spawn_interval_ticks, 60);
        assert_eq!(tuning.ramp_interval_ticks, 1000);
        assert_eq!(tuning.level_interval, 5);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Tuning::from_json(r#"{ "level_interval": 0 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let err = Tuning::from_json(r#"{ "tier_thresholds": [500, 300] }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ spawn_interval_ticks: ").unwrap_err();
        assert!(matches!(err, GameError::Parse(_)));
    }

    #[test]
    fn test_speed_tier_brackets() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_tier(0), 0);
        assert_eq!(tuning.speed_tier(299), 0);
        assert_eq!(tuning.speed_tier(300), 1);
        assert_eq!(tuning.speed_tier(499), 1);
        assert_eq!(tuning.speed_tier(500), 2);
        assert_eq!(tuning.speed_tier(10_000), 2);
    }
}
