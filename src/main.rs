//! Keep Defense entry point
//!
//! Native: a headless runner that lets the autopilot play one session and
//! prints a JSON summary. Web: wires the canvas, audio and DOM to the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent, Window};

    use keep_defense::consts::*;
    use keep_defense::platform::web::{CanvasSurface, DomHud, HtmlAudio, WebGame};
    use keep_defense::sim::Control;
    use keep_defense::{Game, GameError, Settings, Tuning};

    type Shared = Rc<RefCell<WebGame>>;

    pub fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger already set: {e}").into());
        }

        log::info!("Keep Defense starting...");

        let window =
            web_sys::window().ok_or_else(|| GameError::MissingSurface("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::MissingSurface("no document".into()))?;

        // No canvas, no game
        let renderer = CanvasSurface::from_document(&document, "game")?;

        let seed = js_sys::Date::now() as u64;
        let game: Shared = Rc::new(RefCell::new(Game::new(
            Tuning::default(),
            Settings::default(),
            seed,
            renderer,
            HtmlAudio::default(),
            DomHud::new(document.clone()),
        )));

        setup_input_handlers(&window, &document, game.clone());
        setup_start_button(&document, game.clone());
        setup_replay_button(&document, game.clone());

        request_animation_frame(game, None);

        log::info!("Keep Defense running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, document: &Document, game: Shared) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut g = game.borrow_mut();
                if let Some(control) = Control::from_key_code(&code) {
                    event.prevent_default();
                    g.key_down(control);
                } else if code == "KeyI" {
                    g.autopilot = !g.autopilot;
                    g.focus_lost();
                    log::info!("Idle mode: {}", g.autopilot);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(control) = Control::from_key_code(&event.code()) {
                    game.borrow_mut().key_up(control);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Visibility change (tab switch, minimize): key-up events may never arrive
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().focus_lost();
                log::debug!("Controls released (visibility change)");
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().focus_lost();
                log::debug!("Controls released (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Shared) {
        let Some(btn) = document.query_selector(".start-game-button").ok().flatten() else {
            // No splash screen on this page
            game.borrow_mut().start();
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Some(splash) = document.query_selector(".splash-container").ok().flatten() {
                    splash.remove();
                }
            }
            game.borrow_mut().start();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// The replay button is created with the game-over panel, so listen on the document
    fn setup_replay_button(document: &Document, game: Shared) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let is_replay = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .is_some_and(|el| el.class_list().contains("replay-button"));
            if is_replay {
                game.borrow_mut().replay();
            }
        });
        let _ =
            document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Shared, last_time: Option<f64>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time, last_time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Shared, time: f64, last_time: Option<f64>) {
        let dt = last_time.map_or(SIM_DT_MS, |last| time - last);
        game.borrow_mut().frame(dt);
        request_animation_frame(game, Some(time));
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use serde::Serialize;

    use keep_defense::consts::SIM_DT_MS;
    use keep_defense::platform::headless::{LogAudio, LogHud, RecordingSurface};
    use keep_defense::sim::GamePhase;
    use keep_defense::{Game, GameError, Settings, Tuning};

    const USAGE: &str =
        "usage: keep-defense [tuning.json] [--settings settings.json] [--seconds N] [--seed S]";

    #[derive(Debug)]
    struct Args {
        tuning: Option<PathBuf>,
        settings: Option<PathBuf>,
        seconds: f64,
        seed: Option<u64>,
    }

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, GameError> {
        let mut parsed = Args {
            tuning: None,
            settings: None,
            seconds: 60.0,
            seed: None,
        };
        let bad = |msg: String| GameError::InvalidConfig(format!("{msg}\n{USAGE}"));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seconds" => {
                    let value = args.next().ok_or_else(|| bad("--seconds needs a value".into()))?;
                    parsed.seconds = value
                        .parse()
                        .map_err(|_| bad(format!("invalid --seconds '{value}'")))?;
                    if !(parsed.seconds > 0.0) {
                        return Err(bad("--seconds must be positive".into()));
                    }
                }
                "--seed" => {
                    let value = args.next().ok_or_else(|| bad("--seed needs a value".into()))?;
                    parsed.seed = Some(
                        value
                            .parse()
                            .map_err(|_| bad(format!("invalid --seed '{value}'")))?,
                    );
                }
                "--settings" => {
                    let value = args.next().ok_or_else(|| bad("--settings needs a path".into()))?;
                    parsed.settings = Some(PathBuf::from(value));
                }
                flag if flag.starts_with("--") => {
                    return Err(bad(format!("unknown option '{flag}'")));
                }
                path if parsed.tuning.is_none() => parsed.tuning = Some(PathBuf::from(path)),
                extra => return Err(bad(format!("unexpected argument '{extra}'"))),
            }
        }
        Ok(parsed)
    }

    /// Printed at the end of a run
    #[derive(Debug, Serialize)]
    struct SessionSummary {
        seed: u64,
        outcome: &'static str,
        score: u64,
        kills: u32,
        level: u32,
        health: u8,
        ticks: u64,
        seconds: f64,
    }

    pub fn run() -> Result<(), GameError> {
        let args = parse_args(std::env::args().skip(1))?;

        let tuning = match &args.tuning {
            Some(path) => Tuning::from_file(path)?,
            None => Tuning::default(),
        };
        let settings = match &args.settings {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64)
        });

        let mut game = Game::new(
            tuning,
            settings,
            seed,
            RecordingSurface::default(),
            LogAudio::default(),
            LogHud::default(),
        );
        game.autopilot = true;
        game.start();

        let frames = (args.seconds * 1000.0 / SIM_DT_MS).ceil() as u64;
        for _ in 0..frames {
            game.frame(SIM_DT_MS);
            if game.state().phase == GamePhase::GameOver {
                break;
            }
        }

        let state = game.state();
        let summary = SessionSummary {
            seed,
            outcome: if state.phase == GamePhase::GameOver {
                "keep_fell"
            } else {
                "survived"
            },
            score: state.score,
            kills: state.kill_count,
            level: state.level(),
            health: state.health,
            ticks: state.time_ticks,
            seconds: state.clock_ms / 1000.0,
        };
        log::info!(
            "Session ended ({}): {} frames drawn, {} clips played",
            summary.outcome,
            game.renderer().frames,
            game.audio_sink().history.len()
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Keep Defense (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
