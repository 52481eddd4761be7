//! Headless sinks
//!
//! Nothing is drawn or heard. Draws are recorded per frame, clips are logged
//! and held "playing" for a nominal length so channel gating still applies.

use std::collections::HashMap;

use glam::Vec2;

use crate::audio::{AudioSink, Channel};
use crate::hud::HudSink;
use crate::renderer::{DrawCommand, RenderSink};

/// How long a one-shot clip occupies its channel
pub const NOMINAL_CLIP_MS: f64 = 400.0;

/// Keeps the draw list of the most recent frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Vec2,
    pub frames: u64,
    pub last_frame: Vec<DrawCommand>,
}

impl RenderSink for RecordingSurface {
    fn begin_frame(&mut self, size: Vec2) {
        self.size = size;
        self.frames += 1;
        self.last_frame.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.last_frame.push(*command);
    }
}

/// Logs clip requests instead of playing them
#[derive(Debug, Default)]
pub struct LogAudio {
    /// Remaining play time per busy channel
    busy: HashMap<Channel, f64>,
    /// Every clip started, in order
    pub history: Vec<String>,
}

impl AudioSink for LogAudio {
    fn play(&mut self, channel: Channel, clip: &str, volume: f32, looping: bool) {
        log::debug!("play {clip} on {channel:?} at {volume:.3}");
        let length = if looping { f64::INFINITY } else { NOMINAL_CLIP_MS };
        self.busy.insert(channel, length);
        self.history.push(clip.to_string());
    }

    fn is_playing(&self, channel: Channel) -> bool {
        self.busy.contains_key(&channel)
    }

    fn stop(&mut self, channel: Channel) {
        self.busy.remove(&channel);
    }

    fn advance(&mut self, dt_ms: f64) {
        self.busy.retain(|_, remaining| {
            *remaining -= dt_ms;
            *remaining > 0.0
        });
    }
}

/// Holds the current HUD text in memory
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogHud {
    pub score: String,
    pub kills: String,
    pub health_percent: f32,
    /// Final score while the game-over panel is showing
    pub game_over: Option<u64>,
}

impl HudSink for LogHud {
    fn set_score(&mut self, text: &str) {
        self.score = text.to_string();
    }

    fn set_kills(&mut self, text: &str) {
        self.kills = text.to_string();
    }

    fn set_health_percent(&mut self, percent: f32) {
        self.health_percent = percent;
    }

    fn show_game_over(&mut self, final_score: u64) {
        log::info!("Game over panel: final score {final_score}");
        self.game_over = Some(final_score);
    }

    fn hide_game_over(&mut self) {
        self.game_over = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_frees_channel() {
        let mut audio = LogAudio::default();
        audio.play(Channel::Hit, "audio/hit-1.wav", 0.2, false);
        assert!(audio.is_playing(Channel::Hit));
        audio.advance(NOMINAL_CLIP_MS / 2.0);
        assert!(audio.is_playing(Channel::Hit));
        audio.advance(NOMINAL_CLIP_MS);
        assert!(!audio.is_playing(Channel::Hit));
    }

    #[test]
    fn test_looping_until_stopped() {
        let mut audio = LogAudio::default();
        audio.play(Channel::Music, "audio/theme.mp3", 0.03, true);
        audio.advance(1_000_000.0);
        assert!(audio.is_playing(Channel::Music));
        audio.stop(Channel::Music);
        assert!(!audio.is_playing(Channel::Music));
        assert_eq!(audio.history, vec!["audio/theme.mp3"]);
    }
}
