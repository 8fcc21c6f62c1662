use std::fmt;
use std::time::Duration;

use bevy_ecs::prelude::Component;
use glam::{Affine2, Vec2};

use crate::components::animation::Rect;
use crate::components::animator::{AnimationControl, Animator};
use crate::error::AnimationError;
use crate::resources::input::InputState;

/// Reference point a sprite's position is measured from.
///
/// ```text
///  TopLeft
///     o────────────┐
///     │            │
///     │     o ─────┼── Center
///     │            │
///     └────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Origin {
    #[default]
    TopLeft,
    Center,
}

/// Handle to a texture owned by the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    pub key: String,
    pub width: i32,
    pub height: i32,
}

impl TextureRef {
    pub fn new(key: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Per-tick data handed to a sprite's update routine.
#[derive(Debug, Clone, Copy)]
pub struct SpriteTick<'a> {
    /// Scaled time since the previous tick.
    pub delta: Duration,
    /// Scaled time since the world started.
    pub elapsed: Duration,
    pub input: &'a InputState,
}

/// Game-specific per-tick logic, usually deciding which animation to play.
pub type UpdateFn =
    Box<dyn FnMut(&mut Sprite, &SpriteTick<'_>) -> Result<(), AnimationError> + Send + Sync>;

/// Everything the renderer needs to blit one sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Region of the texture to draw.
    pub source: Rect,
    /// Translation applied before scaling to honour the origin.
    pub origin_offset: Vec2,
    /// Flip-adjusted scale.
    pub scale: Vec2,
    pub position: Vec2,
    /// Solid RGBA fill used instead of the texture contents.
    pub fill: Option<[u8; 4]>,
}

impl DrawParams {
    /// Texture-local to screen transform: origin offset, then scale, then position.
    pub fn transform(&self) -> Affine2 {
        Affine2::from_translation(self.position)
            * Affine2::from_scale(self.scale)
            * Affine2::from_translation(self.origin_offset)
    }
}

/// A visible image, optionally animated from a spritesheet.
///
/// The scale is stored as given and the flip flags are applied only when
/// reading it back, so toggling a flip never loses the magnitude.
#[derive(Component)]
pub struct Sprite {
    pub texture: TextureRef,
    pub position: Vec2,
    pub animator: Option<Animator>,
    pub origin: Origin,
    pub fill: Option<[u8; 4]>,
    scale: Vec2,
    flipped_horizontal: bool,
    flipped_vertical: bool,
    update_fn: Option<UpdateFn>,
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("texture", &self.texture)
            .field("position", &self.position)
            .field("animator", &self.animator)
            .field("origin", &self.origin)
            .field("fill", &self.fill)
            .field("scale", &self.scale)
            .field("flipped_horizontal", &self.flipped_horizontal)
            .field("flipped_vertical", &self.flipped_vertical)
            .field("update_fn", &self.update_fn.is_some())
            .finish()
    }
}

impl Sprite {
    pub fn new(texture: TextureRef, position: Vec2) -> Self {
        Self {
            texture,
            position,
            animator: None,
            origin: Origin::TopLeft,
            fill: None,
            scale: Vec2::ZERO,
            flipped_horizontal: false,
            flipped_vertical: false,
            update_fn: None,
        }
    }

    pub fn with_animator(mut self, animator: Animator) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_fill(mut self, rgba: [u8; 4]) -> Self {
        self.fill = Some(rgba);
        self
    }

    pub fn with_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Sprite, &SpriteTick<'_>) -> Result<(), AnimationError>
            + Send
            + Sync
            + 'static,
    {
        self.update_fn = Some(Box::new(f));
        self
    }

    /// Run one logical tick: feed the animator clock, then the update routine.
    ///
    /// The sprite has no animation selection policy of its own.
    pub fn update(&mut self, tick: &SpriteTick<'_>) -> Result<(), AnimationError> {
        if let Some(animator) = self.animator.as_mut() {
            animator.tick(tick.delta);
        }
        let Some(mut update_fn) = self.update_fn.take() else {
            return Ok(());
        };
        let result = update_fn(self, tick);
        // The routine may have installed a replacement for itself.
        if self.update_fn.is_none() {
            self.update_fn = Some(update_fn);
        }
        result
    }

    /// Shortcut for `animator.play(name)`.
    pub fn play(&mut self, name: &str) -> Result<(), AnimationError> {
        match self.animator.as_mut() {
            Some(animator) => animator.play(name),
            None => Err(AnimationError::NotFound(name.to_string())),
        }
    }

    /// The active animation frame, or the whole texture.
    pub fn current_frame_rect(&self) -> Rect {
        self.animator
            .as_ref()
            .and_then(|a| a.current())
            .map_or_else(|| self.texture.bounds(), |anim| anim.frame_rect())
    }

    /// Pixel size of what is drawn, before scaling.
    pub fn frame_size(&self) -> (i32, i32) {
        match self.animator.as_ref().and_then(|a| a.current()) {
            Some(anim) => (anim.frame_width(), anim.frame_height()),
            None => (self.texture.width, self.texture.height),
        }
    }

    pub fn set_scale(&mut self, x: f32, y: f32) {
        self.scale = Vec2::new(x, y);
    }

    /// Scale with flips applied. Zero means "unset".
    pub fn scale(&self) -> Vec2 {
        self.apply_flips(self.scale)
    }

    /// Scale the renderer should use: an unset scale becomes 1 before flipping.
    pub fn draw_scale(&self) -> Vec2 {
        let base = if self.scale == Vec2::ZERO {
            Vec2::ONE
        } else {
            self.scale
        };
        self.apply_flips(base)
    }

    fn apply_flips(&self, base: Vec2) -> Vec2 {
        Vec2::new(
            if self.flipped_horizontal { -base.x } else { base.x },
            if self.flipped_vertical { -base.y } else { base.y },
        )
    }

    /// Mirror along the x axis. Repeating the same value is a no-op and
    /// un-flipping leaves a positive magnitude.
    pub fn flip_horizontal(&mut self, flipped: bool) {
        if !flipped {
            self.scale.x = self.scale.x.abs();
        }
        self.flipped_horizontal = flipped;
    }

    /// Mirror along the y axis. See [`flip_horizontal`](Self::flip_horizontal).
    pub fn flip_vertical(&mut self, flipped: bool) {
        if !flipped {
            self.scale.y = self.scale.y.abs();
        }
        self.flipped_vertical = flipped;
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.flipped_horizontal
    }

    pub fn is_flipped_vertical(&self) -> bool {
        self.flipped_vertical
    }

    pub fn draw_params(&self) -> DrawParams {
        let origin_offset = match self.origin {
            Origin::TopLeft => Vec2::ZERO,
            Origin::Center => {
                let (w, h) = self.frame_size();
                -Vec2::new((w / 2) as f32, (h / 2) as f32)
            }
        };
        DrawParams {
            source: self.current_frame_rect(),
            origin_offset,
            scale: self.draw_scale(),
            position: self.position,
            fill: self.fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::{Animation, Direction, Frame};

    fn fox_sprite() -> Sprite {
        let mut animator = Animator::new();
        animator
            .add(
                "idle",
                Animation::new(
                    Frame::new(0, 0, 32, 32),
                    5,
                    Duration::from_millis(150),
                    Direction::Horizontal,
                )
                .unwrap(),
            )
            .unwrap();
        Sprite::new(TextureRef::new("fox", 448, 224), Vec2::new(320.0, 240.0))
            .with_animator(animator)
            .with_origin(Origin::Center)
    }

    #[test]
    fn test_frame_rect_falls_back_to_texture() {
        let sprite = Sprite::new(TextureRef::new("box", 32, 16), Vec2::ZERO);
        assert_eq!(sprite.current_frame_rect(), Rect::new(0, 0, 32, 16));
        assert_eq!(sprite.frame_size(), (32, 16));

        // An animator with nothing played yet also falls back.
        let sprite = fox_sprite();
        assert_eq!(sprite.current_frame_rect(), Rect::new(0, 0, 448, 224));
    }

    #[test]
    fn test_frame_rect_follows_animation() {
        let mut sprite = fox_sprite();
        sprite.play("idle").unwrap();
        assert_eq!(sprite.current_frame_rect(), Rect::new(0, 0, 32, 32));
        assert_eq!(sprite.frame_size(), (32, 32));
    }

    #[test]
    fn test_play_without_animator() {
        let mut sprite = Sprite::new(TextureRef::new("box", 32, 32), Vec2::ZERO);
        assert_eq!(
            sprite.play("idle"),
            Err(AnimationError::NotFound("idle".into()))
        );
    }

    #[test]
    fn test_unset_scale_defaults_at_draw() {
        let mut sprite = fox_sprite();
        assert_eq!(sprite.scale(), Vec2::ZERO);
        assert_eq!(sprite.draw_scale(), Vec2::ONE);
        sprite.set_scale(4.0, 4.0);
        assert_eq!(sprite.draw_scale(), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_flip_horizontal_is_idempotent() {
        let mut sprite = fox_sprite();
        sprite.set_scale(4.0, 4.0);
        sprite.flip_horizontal(true);
        sprite.flip_horizontal(true);
        assert_eq!(sprite.scale(), Vec2::new(-4.0, 4.0));
        sprite.flip_horizontal(false);
        assert_eq!(sprite.scale(), Vec2::new(4.0, 4.0));
        assert!(!sprite.is_flipped_horizontal());
    }

    #[test]
    fn test_unflip_restores_positive_magnitude() {
        let mut sprite = fox_sprite();
        sprite.set_scale(-2.0, -3.0);
        sprite.flip_vertical(true);
        assert_eq!(sprite.scale(), Vec2::new(-2.0, 3.0));
        sprite.flip_vertical(false);
        sprite.flip_horizontal(false);
        assert_eq!(sprite.scale(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_flip_survives_unset_scale() {
        let mut sprite = fox_sprite();
        sprite.flip_horizontal(true);
        sprite.flip_vertical(true);
        assert_eq!(sprite.draw_scale(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_set_scale_while_flipped_keeps_flip() {
        let mut sprite = fox_sprite();
        sprite.flip_horizontal(true);
        sprite.set_scale(3.0, 3.0);
        assert_eq!(sprite.scale(), Vec2::new(-3.0, 3.0));
    }

    #[test]
    fn test_draw_params_centered() {
        let mut sprite = fox_sprite();
        sprite.set_scale(4.0, 4.0);
        sprite.play("idle").unwrap();
        let params = sprite.draw_params();
        assert_eq!(params.source, Rect::new(0, 0, 32, 32));
        assert_eq!(params.origin_offset, Vec2::new(-16.0, -16.0));
        assert_eq!(params.scale, Vec2::new(4.0, 4.0));

        // The frame centre lands on the sprite position.
        let centre = params.transform().transform_point2(Vec2::new(16.0, 16.0));
        assert_eq!(centre, Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_draw_params_top_left_unanimated() {
        let sprite = Sprite::new(TextureRef::new("box", 33, 17), Vec2::new(10.0, 20.0))
            .with_fill([255, 255, 255, 255]);
        let params = sprite.draw_params();
        assert_eq!(params.origin_offset, Vec2::ZERO);
        assert_eq!(params.fill, Some([255, 255, 255, 255]));
        let corner = params.transform().transform_point2(Vec2::ZERO);
        assert_eq!(corner, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_update_runs_routine_and_ticks_clock() {
        let input = InputState::default();
        let mut sprite = fox_sprite().with_update(|s, _tick| {
            s.position.x += 1.0;
            s.play("idle")
        });
        let tick = SpriteTick {
            delta: Duration::from_millis(150),
            elapsed: Duration::from_millis(150),
            input: &input,
        };
        sprite.update(&tick).unwrap();
        sprite.update(&tick).unwrap();
        assert_eq!(sprite.position.x, 322.0);
        let animator = sprite.animator.as_ref().unwrap();
        assert_eq!(animator.clock(), Duration::from_millis(300));
        assert_eq!(animator.current().unwrap().frame_index(), 1);
    }

    #[test]
    fn test_update_propagates_routine_error() {
        let input = InputState::default();
        let mut sprite = fox_sprite().with_update(|s, _| s.play("trot"));
        let tick = SpriteTick {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            input: &input,
        };
        assert_eq!(
            sprite.update(&tick),
            Err(AnimationError::NotFound("trot".into()))
        );
        // The routine is kept for the next tick.
        assert!(sprite.update(&tick).is_err());
    }
}
