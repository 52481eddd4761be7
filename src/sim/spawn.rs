//! Dragon spawning and the difficulty ramp
//!
//! Two independent counters run on active ticks: one triggers a batch, the
//! other grows the batch size. Batch size therefore grows with play time,
//! not with kills; kills only pick the speed tier.

use glam::Vec2;
use rand::Rng;

use crate::tuning::Tuning;

/// Extra spread applied along the chosen spawn axis
const SALT: [f32; 8] = [-300.0, -200.0, -100.0, -50.0, 50.0, 100.0, 200.0, 300.0];

/// Which pair of playfield edges a dragon enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnAxis {
    /// Above or below the playfield
    Vertical,
    /// Left or right of the playfield
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnScheduler {
    pub spawn_counter: u32,
    /// Dragons per batch, starts at 1
    pub spawn_amount: u32,
    pub ramp_counter: u32,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self {
            spawn_counter: 0,
            spawn_amount: 1,
            ramp_counter: 0,
        }
    }
}

impl SpawnScheduler {
    /// Advance both counters by one active tick
    ///
    /// Returns how many dragons to spawn now (zero on most ticks). The batch
    /// uses the size in effect before this tick's ramp.
    pub fn tick(&mut self, tuning: &Tuning) -> u32 {
        let mut batch = 0;

        self.spawn_counter += 1;
        if self.spawn_counter >= tuning.spawn_interval_ticks {
            self.spawn_counter = 0;
            batch = self.spawn_amount;
        }

        self.ramp_counter += 1;
        if self.ramp_counter >= tuning.ramp_interval_ticks {
            self.ramp_counter = 0;
            self.spawn_amount += 1;
            log::debug!("Spawn batch size now {}", self.spawn_amount);
        }

        batch
    }
}

/// Pick an off-screen entry point
pub fn spawn_position<R: Rng>(playfield: Vec2, rng: &mut R) -> Vec2 {
    let axis = if rng.random_bool(0.5) {
        SpawnAxis::Vertical
    } else {
        SpawnAxis::Horizontal
    };
    let x_salt = SALT[rng.random_range(0..SALT.len())];
    let y_salt = SALT[rng.random_range(0..SALT.len())];
    let (w, h) = (playfield.x, playfield.y);

    match axis {
        SpawnAxis::Vertical => {
            let xs = [w / 2.0 - 285.0, w / 2.0 - 185.0, w / 2.0 - 85.0];
            let ys = [-200.0, h + 200.0];
            Vec2::new(pick(&xs, rng) + x_salt, pick(&ys, rng))
        }
        SpawnAxis::Horizontal => {
            let xs = [-370.0, w + 370.0];
            let ys = [h / 2.0 - 100.0, h / 2.0 + 100.0, h / 2.0 + 200.0];
            Vec2::new(pick(&xs, rng), pick(&ys, rng) + y_salt)
        }
    }
}

fn pick<R: Rng>(options: &[f32], rng: &mut R) -> f32 {
    options[rng.random_range(0..options.len())]
}

/// Draw a flight speed from the tier matching the current kill count
pub fn flight_speed<R: Rng>(tuning: &Tuning, kill_count: u32, rng: &mut R) -> f32 {
    let tier = &tuning.speed_tiers[tuning.speed_tier(kill_count)];
    tier[rng.random_range(0..tier.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_batch_every_interval() {
        let tuning = Tuning::default();
        let mut scheduler = SpawnScheduler::default();
        let mut spawned = 0;
        for tick in 1..=300 {
            let batch = scheduler.tick(&tuning);
            if tick % 150 == 0 {
                assert_eq!(batch, 1);
            } else {
                assert_eq!(batch, 0);
            }
            spawned += batch;
        }
        assert_eq!(spawned, 2);
    }

    #[test]
    fn test_ramp_adds_one_per_interval() {
        let tuning = Tuning::default();
        let mut scheduler = SpawnScheduler::default();
        for _ in 0..999 {
            scheduler.tick(&tuning);
        }
        assert_eq!(scheduler.spawn_amount, 1);
        scheduler.tick(&tuning);
        assert_eq!(scheduler.spawn_amount, 2);
        for _ in 0..1000 {
            scheduler.tick(&tuning);
        }
        assert_eq!(scheduler.spawn_amount, 3);
    }

    #[test]
    fn test_spawn_positions_off_screen() {
        let mut rng = Pcg32::seed_from_u64(21);
        let field = Vec2::new(1050.0, 700.0);
        for _ in 0..500 {
            let pos = spawn_position(field, &mut rng);
            let outside_x = pos.x <= -370.0 || pos.x >= field.x + 370.0;
            let outside_y = pos.y <= -200.0 || pos.y >= field.y + 200.0;
            assert!(outside_x || outside_y, "spawned on screen at {pos:?}");
        }
    }

    #[test]
    fn test_both_axes_used() {
        let mut rng = Pcg32::seed_from_u64(4);
        let field = Vec2::new(1050.0, 700.0);
        let positions: Vec<Vec2> = (0..200).map(|_| spawn_position(field, &mut rng)).collect();
        assert!(positions.iter().any(|p| p.y == -200.0 || p.y == field.y + 200.0));
        assert!(positions.iter().any(|p| p.x == -370.0 || p.x == field.x + 370.0));
    }

    #[test]
    fn test_flight_speed_tiers() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..100 {
            let slow = flight_speed(&tuning, 10, &mut rng);
            assert!((1.25..=2.0).contains(&slow));
            let mid = flight_speed(&tuning, 350, &mut rng);
            assert!((2.25..=3.0).contains(&mid));
            let fast = flight_speed(&tuning, 800, &mut rng);
            assert!((3.25..=4.0).contains(&fast));
        }
    }
}
