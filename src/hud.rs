//! Score, kill count, keep health and the game-over panel
//!
//! `Hud` compares against what it last wrote and only touches the sink when
//! something changed.

use crate::sim::{GamePhase, GameState};

/// Where HUD text and visibility go (DOM, terminal, test recorder)
pub trait HudSink {
    fn set_score(&mut self, text: &str);
    fn set_kills(&mut self, text: &str);
    /// Keep health bar width, 0..=100
    fn set_health_percent(&mut self, percent: f32);
    fn show_game_over(&mut self, final_score: u64);
    fn hide_game_over(&mut self);
}

/// Everything the HUD shows, derived from the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    pub kills: u32,
    pub health_percent: f32,
    pub game_over: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let max = f32::from(state.tuning.structure_max_health.max(1));
        Self {
            score: state.score,
            kills: state.kill_count,
            health_percent: (f32::from(state.health) / max * 100.0).clamp(0.0, 100.0),
            game_over: state.phase == GamePhase::GameOver,
        }
    }
}

/// Change-diffing HUD presenter
#[derive(Debug, Clone, Default)]
pub struct Hud {
    last: Option<HudSnapshot>,
}

impl Hud {
    /// Push the current state to the sink, skipping unchanged fields
    pub fn present<S: HudSink + ?Sized>(&mut self, state: &GameState, sink: &mut S) {
        let next = HudSnapshot::from_state(state);
        let last = self.last;

        if last.map(|l| l.score) != Some(next.score) {
            sink.set_score(&format!("Score: {}", next.score));
        }
        if last.map(|l| l.kills) != Some(next.kills) {
            sink.set_kills(&format!("Killed: {}", next.kills));
        }
        if last.map(|l| l.health_percent) != Some(next.health_percent) {
            sink.set_health_percent(next.health_percent);
        }
        if last.map(|l| l.game_over) != Some(next.game_over) {
            if next.game_over {
                sink.show_game_over(next.score);
            } else {
                sink.hide_game_over();
            }
        }

        self.last = Some(next);
    }

    /// Forget what was written so the next `present` rewrites everything
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
