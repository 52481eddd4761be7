//! Audio output
//!
//! The simulation only names sound effects; `AudioManager` turns them into
//! fire-and-forget clip requests on an `AudioSink`, scaled by settings and
//! dropped if the same logical channel is still playing.

use crate::settings::Settings;

/// Number of sword swing variants
pub const SWORD_VARIANTS: u8 = 3;
/// Number of dragon hit variants
pub const HIT_VARIANTS: u8 = 6;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Looping background music
    Theme,
    /// Sword swing (variant 0..SWORD_VARIANTS)
    Sword(u8),
    /// Sword connects with a dragon (variant 0..HIT_VARIANTS)
    Hit(u8),
    /// Dragon explodes against the keep
    Explosion,
    /// Power-up acquired
    PowerUp,
    /// Game over sting
    Lose,
    /// Crowd gasp at game over
    Gasp,
}

/// Logical playback channel; one clip at a time per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Music,
    Sword,
    Hit,
    Explosion,
    PowerUp,
    Lose,
    Gasp,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Music,
        Channel::Sword,
        Channel::Hit,
        Channel::Explosion,
        Channel::PowerUp,
        Channel::Lose,
        Channel::Gasp,
    ];
}

impl SoundEffect {
    pub fn channel(self) -> Channel {
        match self {
            SoundEffect::Theme => Channel::Music,
            SoundEffect::Sword(_) => Channel::Sword,
            SoundEffect::Hit(_) => Channel::Hit,
            SoundEffect::Explosion => Channel::Explosion,
            SoundEffect::PowerUp => Channel::PowerUp,
            SoundEffect::Lose => Channel::Lose,
            SoundEffect::Gasp => Channel::Gasp,
        }
    }

    /// Asset path of the clip
    pub fn clip(self) -> &'static str {
        const SWORDS: [&str; SWORD_VARIANTS as usize] =
            ["audio/sword-1.wav", "audio/sword-2.wav", "audio/sword-3.wav"];
        const HITS: [&str; HIT_VARIANTS as usize] = [
            "audio/hit-1.wav",
            "audio/hit-2.wav",
            "audio/hit-3.wav",
            "audio/hit-4.wav",
            "audio/hit-5.wav",
            "audio/hit-6.wav",
        ];
        match self {
            SoundEffect::Theme => "audio/theme.mp3",
            SoundEffect::Sword(v) => SWORDS[v as usize % SWORDS.len()],
            SoundEffect::Hit(v) => HITS[v as usize % HITS.len()],
            SoundEffect::Explosion => "audio/explode.wav",
            SoundEffect::PowerUp => "audio/speed-powerup.wav",
            SoundEffect::Lose => "audio/lose.wav",
            SoundEffect::Gasp => "audio/gasp.wav",
        }
    }

    /// Mix volume before settings are applied
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Theme => 0.03,
            SoundEffect::Sword(_) => 0.1,
            SoundEffect::Hit(_) => 0.2,
            SoundEffect::Explosion => 0.03,
            SoundEffect::PowerUp => 0.02,
            SoundEffect::Lose | SoundEffect::Gasp => 0.2,
        }
    }

    pub fn looping(self) -> bool {
        self == SoundEffect::Theme
    }
}

/// Where clip requests go (HTML audio, a mixer, or a log)
pub trait AudioSink {
    /// Start `clip` on `channel` from the beginning
    fn play(&mut self, channel: Channel, clip: &str, volume: f32, looping: bool);
    /// Whether the channel's last clip is still playing
    fn is_playing(&self, channel: Channel) -> bool;
    fn stop(&mut self, channel: Channel);
    /// Let time pass for sinks that track playback themselves
    fn advance(&mut self, _dt_ms: f64) {}
}

/// Audio manager for the game
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    settings: Settings,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
    }

    /// Play a sound effect unless its channel is busy. Returns whether it played.
    pub fn play<S: AudioSink + ?Sized>(&self, sink: &mut S, effect: SoundEffect) -> bool {
        let gain = match effect.channel() {
            Channel::Music => self.settings.music_gain(),
            _ => self.settings.sfx_gain(),
        };
        if gain <= 0.0 {
            return false;
        }

        let channel = effect.channel();
        if sink.is_playing(channel) {
            log::debug!("{channel:?} channel busy, dropping {effect:?}");
            return false;
        }

        sink.play(channel, effect.clip(), effect.base_volume() * gain, effect.looping());
        true
    }

    /// Restart the theme from the beginning
    pub fn restart_music<S: AudioSink + ?Sized>(&self, sink: &mut S) {
        sink.stop(Channel::Music);
        self.play(sink, SoundEffect::Theme);
    }

    pub fn stop_music<S: AudioSink + ?Sized>(&self, sink: &mut S) {
        sink.stop(Channel::Music);
    }
}
