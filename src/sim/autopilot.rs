//! Idle/demo mode: generates the knight's input from the game state
//!
//! Hunts the dragon closest to the keep, leading it by the time a swing
//! takes to extend, and swings once the predicted box is in reach.

use glam::Vec2;

use super::collision::{Rect, sword_reaches};
use super::dragon::Dragon;
use super::input::{Control, InputState};
use super::state::GameState;
use crate::consts::*;

/// Ticks from pressing attack until the blade is out
const LEAD_TICKS: f32 = WEAPON_EXTENDED_FRAME as f32 * KNIGHT_FRAME_INTERVAL;
/// Where the knight wants to stand relative to the dragon's origin
const STRIKE_OFFSET: Vec2 = Vec2::new(110.0, 25.0);

/// Build this tick's input for the autopilot
pub fn autopilot(state: &GameState) -> InputState {
    let mut input = InputState::default();
    if !state.is_active() {
        return input;
    }

    let keep = state.keep.center();
    let Some(dragon) = state.living_dragons().min_by(|a, b| {
        let da = a.bounds().center().distance_squared(keep);
        let db = b.bounds().center().distance_squared(keep);
        da.total_cmp(&db)
    }) else {
        return input;
    };

    let knight = &state.knight;
    let lead = (state.keep.dragon_target() - dragon.pos).normalize_or_zero()
        * dragon.flight_speed
        * LEAD_TICKS
        / knight.attack_cadence.max(0.1);
    let future = Rect::from_pos_size(dragon.pos + lead, Dragon::size());

    if sword_reaches(knight.pos, &future, dragon.facing) {
        input.press(Control::Attack);
        return input;
    }

    let to_target = future.pos + STRIKE_OFFSET - knight.pos;
    let deadzone = knight.move_speed;
    if to_target.x > deadzone {
        input.press(Control::Right);
    } else if to_target.x < -deadzone {
        input.press(Control::Left);
    }
    if to_target.y > deadzone {
        input.press(Control::Down);
    } else if to_target.y < -deadzone {
        input.press(Control::Up);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT_MS;
    use crate::sim::tick::{start, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_idle_when_not_active() {
        let state = GameState::new(Tuning::default(), 1);
        assert_eq!(autopilot(&state), InputState::default());
    }

    #[test]
    fn test_steers_toward_dragon() {
        let mut state = GameState::new(Tuning::default(), 2);
        start(&mut state);
        state.dragons.clear();
        let id = state.next_entity_id();
        let dragon = Dragon::new(id, Vec2::new(700.0, 500.0), 1.0, &state.keep);
        state.dragons.push(dragon);

        let input = autopilot(&state);
        assert!(input.right());
        assert!(input.down());
        assert!(!input.attack());
    }

    #[test]
    fn test_attacks_when_in_reach() {
        let mut state = GameState::new(Tuning::default(), 3);
        start(&mut state);
        state.dragons.clear();
        let id = state.next_entity_id();
        let dragon = Dragon::new(id, Vec2::new(0.0, 0.0), 0.5, &state.keep);
        state.dragons.push(dragon);
        state.knight.pos = Vec2::new(100.0, 20.0);

        assert!(autopilot(&state).attack());
    }

    #[test]
    fn test_demo_session_scores_kills() {
        let mut state = GameState::new(Tuning::default(), 4);
        start(&mut state);
        for _ in 0..(60 * 60) {
            let input = autopilot(&state);
            tick(&mut state, &input, SIM_DT_MS);
            if !state.is_active() {
                break;
            }
        }
        assert!(state.kill_count > 0, "autopilot never landed a hit");
    }
}
