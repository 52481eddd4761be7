//! Game host
//!
//! Owns the session and the three output sinks. The platform calls `frame`
//! once per display frame and forwards key and lifecycle signals; everything
//! else happens here.

use crate::audio::{AudioManager, AudioSink};
use crate::consts::*;
use crate::hud::{Hud, HudSink};
use crate::renderer::{RenderSink, render};
use crate::settings::Settings;
use crate::sim::{Control, GameEvent, GameState, InputState, autopilot, tick};
use crate::tuning::Tuning;

/// Longest frame delta fed to the accumulator (a backgrounded tab can report seconds)
const MAX_FRAME_MS: f64 = 100.0;

/// Game instance holding the session and its sinks
pub struct Game<R: RenderSink, A: AudioSink, H: HudSink> {
    state: GameState,
    input: InputState,
    /// Idle/demo mode: the autopilot plays instead of the keyboard
    pub autopilot: bool,
    accumulator: f64,
    audio: AudioManager,
    hud: Hud,
    renderer: R,
    audio_sink: A,
    hud_sink: H,
}

impl<R: RenderSink, A: AudioSink, H: HudSink> Game<R, A, H> {
    pub fn new(
        tuning: Tuning,
        settings: Settings,
        seed: u64,
        renderer: R,
        audio_sink: A,
        hud_sink: H,
    ) -> Self {
        log::info!("Game initialized with seed: {seed}");
        Self {
            state: GameState::new(tuning, seed),
            input: InputState::default(),
            autopilot: false,
            accumulator: 0.0,
            audio: AudioManager::new(settings),
            hud: Hud::default(),
            renderer,
            audio_sink,
            hud_sink,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio_sink(&self) -> &A {
        &self.audio_sink
    }

    pub fn hud_sink(&self) -> &H {
        &self.hud_sink
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
        if muted {
            self.audio.stop_music(&mut self.audio_sink);
        } else if self.state.is_active() {
            self.audio.restart_music(&mut self.audio_sink);
        }
    }

    /// External start signal
    pub fn start(&mut self) {
        crate::sim::start(&mut self.state);
        self.accumulator = 0.0;
        self.dispatch_events();
    }

    /// External replay signal (only after game over)
    pub fn replay(&mut self) {
        crate::sim::replay(&mut self.state);
        self.accumulator = 0.0;
        self.input.reset();
        self.dispatch_events();
    }

    /// Latch a control; ignored unless the session is active
    pub fn key_down(&mut self, control: Control) {
        if self.state.is_active() {
            self.input.press(control);
        }
    }

    pub fn key_up(&mut self, control: Control) {
        self.input.release(control);
    }

    /// Window blur or tab hidden: force every control up
    pub fn focus_lost(&mut self) {
        self.input.reset();
    }

    /// Advance by one display frame of `dt_ms`, then draw it
    ///
    /// Returns the number of simulation ticks run.
    pub fn frame(&mut self, dt_ms: f64) -> u32 {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);
        self.accumulator += dt_ms;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let input = if self.autopilot {
                autopilot(&self.state)
            } else {
                self.input
            };
            tick(&mut self.state, &input, SIM_DT_MS);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;
        }

        self.audio_sink.advance(dt_ms);
        self.dispatch_events();
        render(&self.state, &mut self.renderer);
        self.hud.present(&self.state, &mut self.hud_sink);
        substeps
    }

    /// Route session events to audio and log the notable ones
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(effect) => {
                    self.audio.play(&mut self.audio_sink, effect);
                }
                GameEvent::Started | GameEvent::Replayed => {
                    self.audio.restart_music(&mut self.audio_sink);
                }
                GameEvent::GameOver { score } => {
                    self.input.reset();
                    self.audio.stop_music(&mut self.audio_sink);
                    log::info!("Final score: {score}");
                }
                GameEvent::KeepHit { health } => {
                    log::debug!("Keep health {health}");
                }
                GameEvent::DragonSlain { .. }
                | GameEvent::LevelUp { .. }
                | GameEvent::PowerUpGranted(_) => {}
            }
        }
    }
}
