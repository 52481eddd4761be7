//! Browser sinks: canvas 2D drawing, HTML audio elements and DOM HUD

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlAudioElement, HtmlCanvasElement, HtmlElement,
    HtmlImageElement,
};

use crate::audio::{AudioSink, Channel};
use crate::error::GameError;
use crate::game::Game;
use crate::hud::HudSink;
use crate::renderer::{DrawCommand, ImageId, RenderSink};

/// The game as hosted in a browser page
pub type WebGame = Game<CanvasSurface, HtmlAudio, DomHud>;

fn surface_error(what: &str) -> GameError {
    GameError::MissingSurface(what.to_string())
}

/// Draws into a `<canvas>` through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<ImageId, HtmlImageElement>,
}

impl CanvasSurface {
    /// Find the canvas by id and start loading every image
    ///
    /// Fails when the page has no such canvas or it has no 2D context.
    pub fn from_document(document: &Document, canvas_id: &str) -> Result<Self, GameError> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| surface_error(&format!("no element with id '{canvas_id}'")))?
            .dyn_into()
            .map_err(|_| surface_error(&format!("'{canvas_id}' is not a canvas")))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| surface_error(&format!("getContext failed: {e:?}")))?
            .ok_or_else(|| surface_error("canvas has no 2d context"))?
            .dyn_into()
            .map_err(|_| surface_error("2d context has the wrong type"))?;

        let mut images = HashMap::new();
        for id in ImageId::ALL {
            let image = HtmlImageElement::new()
                .map_err(|e| surface_error(&format!("cannot create image: {e:?}")))?;
            image.set_src(id.path());
            images.insert(id, image);
        }

        Ok(Self {
            canvas,
            ctx,
            images,
        })
    }

    fn casts_shadow(image: ImageId) -> bool {
        matches!(
            image,
            ImageId::Keep
                | ImageId::KnightIdle
                | ImageId::KnightRun
                | ImageId::KnightAttack
                | ImageId::Dragon
                | ImageId::Shoe
                | ImageId::Sword
                | ImageId::Hammer
        )
    }
}

impl RenderSink for CanvasSurface {
    fn begin_frame(&mut self, size: Vec2) {
        let (w, h) = (size.x as u32, size.y as u32);
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
        self.ctx.clear_rect(0.0, 0.0, f64::from(w), f64::from(h));
    }

    fn draw(&mut self, command: &DrawCommand) {
        let Some(image) = self.images.get(&command.image) else {
            return;
        };
        // Not loaded yet (or failed): skip rather than draw garbage
        if !image.complete() || image.natural_width() == 0 {
            return;
        }

        let ctx = &self.ctx;
        let dst = command.dst;
        ctx.save();
        ctx.set_global_alpha(f64::from(command.opacity.clamp(0.0, 1.0)));
        if Self::casts_shadow(command.image) {
            ctx.set_shadow_color("black");
            ctx.set_shadow_blur(5.0);
        }

        if command.flip_x || command.rotation_deg != 0.0 {
            let center = dst.center();
            let _ = ctx.translate(f64::from(center.x), f64::from(center.y));
            if command.rotation_deg != 0.0 {
                let _ = ctx.rotate(f64::from(command.rotation_deg.to_radians()));
            }
            if command.flip_x {
                let _ = ctx.scale(-1.0, 1.0);
            }
            let _ = ctx.translate(-f64::from(center.x), -f64::from(center.y));
        }

        let (dx, dy) = (f64::from(dst.pos.x), f64::from(dst.pos.y));
        let (dw, dh) = (f64::from(dst.size.x), f64::from(dst.size.y));
        let _ = match command.src {
            Some(src) => ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image,
                    f64::from(src.pos.x),
                    f64::from(src.pos.y),
                    f64::from(src.size.x),
                    f64::from(src.size.y),
                    dx,
                    dy,
                    dw,
                    dh,
                ),
            None => ctx.draw_image_with_html_image_element_and_dw_and_dh(image, dx, dy, dw, dh),
        };
        ctx.restore();
    }
}

/// One `<audio>` element per logical channel
#[derive(Default)]
pub struct HtmlAudio {
    channels: HashMap<Channel, HtmlAudioElement>,
}

impl AudioSink for HtmlAudio {
    fn play(&mut self, channel: Channel, clip: &str, volume: f32, looping: bool) {
        let element = match HtmlAudioElement::new_with_src(clip) {
            Ok(element) => element,
            Err(e) => {
                log::warn!("Cannot create audio for {clip}: {e:?}");
                return;
            }
        };
        element.set_volume(f64::from(volume.clamp(0.0, 1.0)));
        element.set_loop(looping);
        // Autoplay may be refused before the first user gesture
        if let Err(e) = element.play() {
            log::warn!("Playback of {clip} refused: {e:?}");
        }
        self.channels.insert(channel, element);
    }

    fn is_playing(&self, channel: Channel) -> bool {
        self.channels
            .get(&channel)
            .is_some_and(|e| !e.paused() && !e.ended())
    }

    fn stop(&mut self, channel: Channel) {
        if let Some(element) = self.channels.remove(&channel) {
            let _ = element.pause();
            element.set_current_time(0.0);
        }
    }
}

/// Writes HUD values into the page
pub struct DomHud {
    document: Document,
}

impl DomHud {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(el) = self.document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Build the game-over panel under `.canvas-container`
    fn create_game_over_panel(&self, final_score: u64) -> Result<(), wasm_bindgen::JsValue> {
        let document = &self.document;
        let panel = document.create_element("div")?;
        panel.set_class_name("game-over-menu-container");

        let title = document.create_element("span")?;
        title.set_class_name("game-over-title");
        title.set_text_content(Some("Game Over"));
        panel.append_child(&title)?;

        let content = document.create_element("div")?;
        content.set_class_name("game-over-content-container");
        let score = document.create_element("span")?;
        score.set_class_name("game-over-score");
        score.set_text_content(Some(&format!("Score: {final_score}")));
        content.append_child(&score)?;
        let button = document.create_element("button")?;
        button.set_class_name("replay-button");
        button.set_text_content(Some("Replay"));
        content.append_child(&button)?;
        panel.append_child(&content)?;

        match document.query_selector(".canvas-container")? {
            Some(container) => container.append_child(&panel)?,
            None => match document.body() {
                Some(body) => body.append_child(&panel)?,
                None => return Ok(()),
            },
        };
        Ok(())
    }
}

impl HudSink for DomHud {
    fn set_score(&mut self, text: &str) {
        self.set_text(".score-container", text);
    }

    fn set_kills(&mut self, text: &str) {
        self.set_text(".monsters-killed-container", text);
    }

    fn set_health_percent(&mut self, percent: f32) {
        let bar = self
            .document
            .query_selector(".castle-blood")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(bar) = bar {
            let _ = bar.style().set_property("width", &format!("{percent}%"));
        }
    }

    fn show_game_over(&mut self, final_score: u64) {
        let exists = self
            .document
            .query_selector(".game-over-menu-container")
            .ok()
            .flatten();
        if let Some(panel) = exists {
            panel.remove();
        }
        if let Err(e) = self.create_game_over_panel(final_score) {
            log::warn!("Cannot build game over panel: {e:?}");
        }
    }

    fn hide_game_over(&mut self) {
        if let Some(panel) = self
            .document
            .query_selector(".game-over-menu-container")
            .ok()
            .flatten()
        {
            panel.remove();
        }
    }
}
