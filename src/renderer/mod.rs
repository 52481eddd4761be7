//! Sprite rendering module
//!
//! Turns the session into an ordered list of image draws. The sink owns the
//! images and the surface; the simulation never reads pixels back.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Facing, GameState, Knight, Movement, PowerUpKind, Rect};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Background,
    Keep,
    KnightIdle,
    KnightRun,
    KnightAttack,
    Dragon,
    Explosion,
    Phrases,
    Dust,
    Shoe,
    Sword,
    Hammer,
}

impl ImageId {
    pub const ALL: [ImageId; 12] = [
        ImageId::Background,
        ImageId::Keep,
        ImageId::KnightIdle,
        ImageId::KnightRun,
        ImageId::KnightAttack,
        ImageId::Dragon,
        ImageId::Explosion,
        ImageId::Phrases,
        ImageId::Dust,
        ImageId::Shoe,
        ImageId::Sword,
        ImageId::Hammer,
    ];

    /// Asset path relative to the page
    pub fn path(self) -> &'static str {
        match self {
            ImageId::Background => "images/background.png",
            ImageId::Keep => "images/castle.png",
            ImageId::KnightIdle => "images/knight/idle.png",
            ImageId::KnightRun => "images/knight/run.png",
            ImageId::KnightAttack => "images/knight/attack.png",
            ImageId::Dragon => "images/black dragon/flying2.png",
            ImageId::Explosion => "images/explosion.png",
            ImageId::Phrases => "images/phrases.png",
            ImageId::Dust => "images/dust.png",
            ImageId::Shoe => "images/shoe.png",
            ImageId::Sword => "images/sword.png",
            ImageId::Hammer => "images/hammer.png",
        }
    }

    fn for_power_up(kind: PowerUpKind) -> Self {
        match kind {
            PowerUpKind::Movement => ImageId::Shoe,
            PowerUpKind::Attack => ImageId::Sword,
            PowerUpKind::Rebuild => ImageId::Hammer,
        }
    }
}

/// One image draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub image: ImageId,
    /// Region of the image to copy; `None` draws the whole image
    pub src: Option<Rect>,
    pub dst: Rect,
    /// Mirror horizontally about the destination center
    pub flip_x: bool,
    /// Rotation about the destination center, in degrees
    pub rotation_deg: f32,
    pub opacity: f32,
}

impl DrawCommand {
    fn new(image: ImageId, dst: Rect) -> Self {
        Self {
            image,
            src: None,
            dst,
            flip_x: false,
            rotation_deg: 0.0,
            opacity: 1.0,
        }
    }

    fn src(mut self, pos: Vec2, size: Vec2) -> Self {
        self.src = Some(Rect::from_pos_size(pos, size));
        self
    }

    fn flipped(mut self, flip: bool) -> Self {
        self.flip_x = flip;
        self
    }

    fn rotated(mut self, degrees: f32) -> Self {
        self.rotation_deg = degrees;
        self
    }

    fn alpha(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// A drawing surface (canvas 2D context, recorder)
pub trait RenderSink {
    /// Start a frame of the given size
    fn begin_frame(&mut self, size: Vec2);
    fn draw(&mut self, command: &DrawCommand);
    fn end_frame(&mut self) {}
}

/// Build the draw list for the current frame, back to front
pub fn frame_commands(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    let playfield = state.playfield();

    commands.push(DrawCommand::new(
        ImageId::Background,
        Rect::from_pos_size(Vec2::ZERO, playfield),
    ));
    commands.push(DrawCommand::new(ImageId::Keep, state.keep.sprite));

    for explosion in &state.explosions {
        let dst = Rect::from_pos_size(explosion.pos, Vec2::splat(EXPLOSION_SIZE));
        commands.push(
            DrawCommand::new(ImageId::Explosion, dst)
                .src(explosion.source(), Vec2::splat(EXPLOSION_CELL)),
        );
    }

    for phrase in &state.phrases {
        let dst = Rect::from_pos_size(phrase.pos, Vec2::splat(PHRASE_SIZE));
        commands.push(
            DrawCommand::new(ImageId::Phrases, dst)
                .src(phrase.source(), Vec2::splat(PHRASE_CELL))
                .rotated(phrase.tilt_deg)
                .alpha(phrase.opacity),
        );
    }

    for dust in &state.dust {
        let dst = Rect::from_pos_size(dust.pos, Vec2::splat(DUST_SIZE));
        commands.push(
            DrawCommand::new(ImageId::Dust, dst)
                .src(dust.source(), Vec2::splat(DUST_CELL))
                .flipped(dust.drift == Facing::Left)
                .alpha(DUST_OPACITY),
        );
    }

    // The dragon sheet faces left
    for dragon in state.living_dragons() {
        let size = Vec2::new(DRAGON_WIDTH, DRAGON_HEIGHT);
        let src = Vec2::new(dragon.frame() as f32 * DRAGON_WIDTH, 0.0);
        commands.push(
            DrawCommand::new(ImageId::Dragon, dragon.bounds())
                .src(src, size)
                .flipped(dragon.facing == Facing::Right),
        );
    }

    commands.push(knight_command(&state.knight));

    if let Some(power_up) = state.power_up.as_ref().filter(|p| !p.is_expired()) {
        let dst = Rect::from_pos_size(power_up.pos, Vec2::new(POWERUP_WIDTH, POWERUP_HEIGHT));
        commands.push(
            DrawCommand::new(ImageId::for_power_up(power_up.kind), dst).alpha(power_up.opacity),
        );
    }

    commands
}

fn knight_command(knight: &Knight) -> DrawCommand {
    let image = match knight.movement {
        Movement::Idle => ImageId::KnightIdle,
        Movement::Run => ImageId::KnightRun,
        Movement::Attack => ImageId::KnightAttack,
    };
    let src = Vec2::new(knight.frame() as f32 * KNIGHT_WIDTH, 0.0);
    DrawCommand::new(image, knight.bounds())
        .src(src, Knight::size())
        .flipped(knight.facing == Facing::Left)
}

/// Draw the current frame into `sink`
pub fn render<S: RenderSink + ?Sized>(state: &GameState, sink: &mut S) {
    sink.begin_frame(state.playfield());
    for command in frame_commands(state) {
        sink.draw(&command);
    }
    sink.end_frame();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Dragon, InputState, start, tick};
    use crate::tuning::Tuning;

    fn images(commands: &[DrawCommand]) -> Vec<ImageId> {
        commands.iter().map(|c| c.image).collect()
    }

    #[test]
    fn test_idle_frame_layers() {
        let state = GameState::new(Tuning::default(), 1);
        let commands = frame_commands(&state);
        assert_eq!(
            images(&commands),
            vec![ImageId::Background, ImageId::Keep, ImageId::KnightIdle]
        );
        assert_eq!(commands[1].dst.pos, Vec2::new(400.0, 225.0));
        assert!(!commands[2].flip_x);
    }

    #[test]
    fn test_dragons_flip_when_facing_right() {
        let mut state = GameState::new(Tuning::default(), 2);
        let keep = state.keep;
        state.dragons.push(Dragon::new(1, Vec2::new(-370.0, 300.0), 1.0, &keep));
        state.dragons.push(Dragon::new(2, Vec2::new(1420.0, 300.0), 1.0, &keep));
        state.dragons[1].alive = false;

        let commands = frame_commands(&state);
        let dragons: Vec<&DrawCommand> = commands
            .iter()
            .filter(|c| c.image == ImageId::Dragon)
            .collect();
        // Dead dragons are not drawn
        assert_eq!(dragons.len(), 1);
        assert!(dragons[0].flip_x);
        assert_eq!(dragons[0].src.map(|r| r.size), Some(Vec2::new(370.0, 200.0)));
    }

    #[test]
    fn test_knight_drawn_above_dragons() {
        let mut state = GameState::new(Tuning::default(), 3);
        start(&mut state);
        tick(&mut state, &InputState::default(), SIM_DT_MS);
        let commands = images(&frame_commands(&state));
        let knight = commands
            .iter()
            .position(|i| *i == ImageId::KnightIdle)
            .expect("knight drawn");
        let last_dragon = commands
            .iter()
            .rposition(|i| *i == ImageId::Dragon)
            .expect("dragons drawn");
        assert!(knight > last_dragon);
    }

    #[test]
    fn test_expired_power_up_not_drawn() {
        let mut state = GameState::new(Tuning::default(), 4);
        start(&mut state);
        state.kill_count = 5;
        tick(&mut state, &InputState::default(), SIM_DT_MS);
        let commands = frame_commands(&state);
        let icon = commands.last().expect("commands");
        assert!(matches!(icon.image, ImageId::Shoe | ImageId::Sword));

        if let Some(power_up) = state.power_up.as_mut() {
            power_up.opacity = 0.0;
        }
        let commands = frame_commands(&state);
        assert!(!commands
            .iter()
            .any(|c| matches!(c.image, ImageId::Shoe | ImageId::Sword | ImageId::Hammer)));
    }

    #[derive(Default)]
    struct Counter {
        frames: u32,
        draws: usize,
    }

    impl RenderSink for Counter {
        fn begin_frame(&mut self, _size: Vec2) {
            self.frames += 1;
        }

        fn draw(&mut self, _command: &DrawCommand) {
            self.draws += 1;
        }
    }

    #[test]
    fn test_render_into_sink() {
        let state = GameState::new(Tuning::default(), 5);
        let mut sink = Counter::default();
        render(&state, &mut sink);
        assert_eq!(sink.frames, 1);
        assert_eq!(sink.draws, 3);
    }
}
