//! Per-frame simulation tick
//!
//! Core game loop: one tick per rendered frame, advanced in a fixed order so
//! deaths are resolved before spawning and progression read the kill count.

use rand::Rng;

use super::dragon::{Dragon, DragonFate};
use super::effects::{Dust, Explosion, Phrase};
use super::input::InputState;
use super::powerup::{PowerUp, PowerUpKind, choose_kind};
use super::spawn::{flight_speed, spawn_position};
use super::state::{GameEvent, GamePhase, GameState};
use super::timers::TimerEvent;
use crate::audio::{HIT_VARIANTS, SWORD_VARIANTS, SoundEffect};

/// Begin a fresh session (not-started -> active)
pub fn start(state: &mut GameState) {
    if state.phase != GamePhase::NotStarted {
        log::warn!("Start ignored in phase {:?}", state.phase);
        return;
    }
    activate(state);
    state.emit(GameEvent::Started);
    log::info!("Session started");
}

/// Restart after game over with every counter back at its initial value
pub fn replay(state: &mut GameState) {
    if state.phase != GamePhase::GameOver {
        log::warn!("Replay ignored in phase {:?}", state.phase);
        return;
    }
    state.reset();
    activate(state);
    state.emit(GameEvent::Replayed);
    log::info!("Session replayed");
}

fn activate(state: &mut GameState) {
    state.phase = GamePhase::Active;
    let initial = state.tuning.initial_enemies as usize;
    while state.living_dragons().count() < initial {
        spawn_dragon(state);
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &InputState, dt_ms: f64) {
    // Frozen outside an active session; pending timers wait with the clock
    if !state.is_active() {
        return;
    }

    state.clock_ms += dt_ms;
    state.time_ticks += 1;

    // Deferred events first, before any entity moves
    for event in state.timers.drain_due(state.clock_ms) {
        if !state.is_active() {
            break;
        }
        apply_timer(state, event);
    }
    if !state.is_active() {
        return;
    }

    state.score += 1;

    update_effects(state);
    update_dragons(state);
    update_knight(state, input);

    if let Some(power_up) = state.power_up.as_mut() {
        if power_up.update(&state.knight) {
            state.events.push(GameEvent::Sound(SoundEffect::PowerUp));
            state.timers.schedule(
                state.clock_ms,
                state.tuning.fade_delay_ms,
                TimerEvent::FadePowerUp(power_up.id),
            );
        }
    }

    let batch = state.spawner.tick(&state.tuning);
    for _ in 0..batch {
        spawn_dragon(state);
    }

    if let Some(level) = state
        .progression
        .check(state.kill_count, state.tuning.level_interval)
    {
        grant_power_up(state, level);
    }

    // Prune finished entities
    state.explosions.retain(|e| e.active);
    state.phrases.retain(|p| p.active);
    state.dust.retain(|d| d.active);
    state.dragons.retain(|d| d.alive);
}

fn apply_timer(state: &mut GameState, event: TimerEvent) {
    match event {
        TimerEvent::FadePowerUp(id) => {
            if let Some(power_up) = state.power_up.as_mut().filter(|p| p.id == id) {
                power_up.begin_fade();
            }
        }
        TimerEvent::FadePhrase(id) => {
            if let Some(phrase) = state.phrases.iter_mut().find(|p| p.id == id) {
                phrase.begin_fade();
            }
        }
        TimerEvent::GameOver => {
            state.phase = GamePhase::GameOver;
            state.knight.cancel_attack();
            state.emit(GameEvent::Sound(SoundEffect::Lose));
            state.emit(GameEvent::Sound(SoundEffect::Gasp));
            state.emit(GameEvent::GameOver { score: state.score });
            log::info!(
                "Game over: score {}, {} dragons slain",
                state.score,
                state.kill_count
            );
        }
    }
}

/// Explosions, phrases and dust, oldest first
fn update_effects(state: &mut GameState) {
    for explosion in &mut state.explosions {
        if explosion.update() {
            state.events.push(GameEvent::Sound(SoundEffect::Explosion));
        }
    }

    let fade_delay = state.tuning.fade_delay_ms;
    for phrase in &mut state.phrases {
        if phrase.update() {
            state
                .timers
                .schedule(state.clock_ms, fade_delay, TimerEvent::FadePhrase(phrase.id));
        }
    }

    for dust in &mut state.dust {
        dust.update();
    }
}

fn update_dragons(state: &mut GameState) {
    let mut keep_hits = 0;
    let mut slain = Vec::new();

    for dragon in &mut state.dragons {
        match dragon.update(&state.keep, &state.knight) {
            DragonFate::HitKeep => keep_hits += 1,
            DragonFate::Slain => slain.push((dragon.id, dragon.phrase_anchor())),
            DragonFate::Flying | DragonFate::Inert => {}
        }
    }

    for _ in 0..keep_hits {
        let explosion = Explosion::new(state.keep.center(), &mut state.rng);
        state.explosions.push(explosion);
        state.damage_keep(state.tuning.structure_damage);
        log::debug!("Dragon struck the keep, health {}", state.health);
    }

    for (dragon_id, anchor) in slain {
        state.kill_count += 1;
        state.score += state.tuning.kill_score;

        let id = state.next_entity_id();
        let phrase = Phrase::new(id, anchor, &mut state.rng);
        state.phrases.push(phrase);

        let variant = state.rng.random_range(0..HIT_VARIANTS);
        state.emit(GameEvent::Sound(SoundEffect::Hit(variant)));
        state.emit(GameEvent::DragonSlain {
            id: dragon_id,
            kill_count: state.kill_count,
        });
        log::debug!("Dragon {dragon_id} slain ({} total)", state.kill_count);
    }
}

fn update_knight(state: &mut GameState, input: &InputState) {
    let dust_visible = state.dust_visible();
    let playfield = state.playfield();
    let out = state
        .knight
        .update(input, &state.keep.hitbox, playfield, dust_visible);

    if let Some((pos, drift)) = out.dust {
        state.dust.push(Dust::new(pos, drift));
        if state.dust.len() > state.tuning.dust_cap {
            state.dust.clear();
        }
    }

    if out.swing {
        let variant = state.rng.random_range(0..SWORD_VARIANTS);
        state.emit(GameEvent::Sound(SoundEffect::Sword(variant)));
    }
}

/// Create one dragon off-screen with a speed from the current tier
fn spawn_dragon(state: &mut GameState) {
    let pos = spawn_position(state.playfield(), &mut state.rng);
    let speed = flight_speed(&state.tuning, state.kill_count, &mut state.rng);
    let id = state.next_entity_id();
    state.dragons.push(Dragon::new(id, pos, speed, &state.keep));
    log::debug!("Spawned dragon {id} at ({:.0}, {:.0}) speed {speed}", pos.x, pos.y);
}

/// Replace the power-up slot and apply the new kind's permanent effect
fn grant_power_up(state: &mut GameState, level: u32) {
    state.knight.level = level;
    let kind = choose_kind(
        state.health,
        state.tuning.structure_max_health,
        &mut state.rng,
    );
    let id = state.next_entity_id();
    state.power_up = Some(PowerUp::new(id, kind, &state.knight));

    match kind {
        PowerUpKind::Movement => state.knight.move_speed += state.tuning.move_speed_bonus,
        PowerUpKind::Attack => state.knight.attack_cadence += state.tuning.attack_cadence_bonus,
        PowerUpKind::Rebuild => state.repair_keep(state.tuning.rebuild_amount),
    }

    state.emit(GameEvent::LevelUp { level });
    state.emit(GameEvent::PowerUpGranted(kind));
    log::info!("Level {level}: granted {kind:?} power-up");
}
