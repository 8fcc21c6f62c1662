//! Spritesheet animation playback.
//!
//! An [`Animation`] describes a strip of equally sized frames laid out along
//! one axis of a spritesheet and keeps the playback cursor for that strip.
//! It is advanced with the time elapsed since it last advanced; once the
//! accumulated time reaches the delay the cursor steps to the next frame and
//! the accumulator starts again from zero.

use std::time::Duration;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// A rectangle descriptor inside a spritesheet, in pixels.
///
/// As a starting cell the four values are an offset and an extent. The
/// playback cursor reuses the same shape for the computed viewport, where
/// `width` and `height` hold the far corner instead of an extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Axis along which successive frames are read from the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right along a row.
    #[default]
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
}

/// Axis-aligned box with absolute corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min: IVec2::new(min_x, min_y),
            max: IVec2::new(max_x, max_y),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }
}

/// Viewport of frame `index`, or `None` if a coordinate overflows.
fn frame_at(start: Frame, direction: Direction, index: i32) -> Option<Frame> {
    let (x, y) = match direction {
        Direction::Horizontal => (index.checked_mul(start.width)?, start.y),
        // Pinned to the start width and stepped by the start y.
        Direction::Vertical => (start.width, index.checked_mul(start.y)?),
    };
    Some(Frame {
        x,
        y,
        width: x.checked_add(start.width)?,
        height: y.checked_add(start.height)?,
    })
}

/// One animation strip and its playback cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    start_frame: Frame,
    frame_count: u32,
    delay: Duration,
    direction: Direction,

    current_frame: Frame,
    frame_index: u32,
    paused: bool,
    accumulated: Duration,
}

impl Animation {
    /// Build an animation, rejecting a zero frame count or a zero delay.
    pub fn new(
        start_frame: Frame,
        frame_count: u32,
        delay: Duration,
        direction: Direction,
    ) -> Result<Self, AnimationError> {
        if frame_count == 0 {
            return Err(AnimationError::InvalidConfiguration(
                "frame count must be positive".into(),
            ));
        }
        if delay.is_zero() {
            return Err(AnimationError::InvalidConfiguration(
                "delay must be positive".into(),
            ));
        }
        // Coordinates are linear in the index, so both ends bound every frame.
        let last = i32::try_from(frame_count - 1).ok();
        let fits = last.is_some_and(|last| {
            [0, last]
                .into_iter()
                .all(|index| frame_at(start_frame, direction, index).is_some())
        });
        if !fits {
            return Err(AnimationError::InvalidConfiguration(
                "frame geometry does not fit in i32 coordinates".into(),
            ));
        }
        let mut animation = Self {
            start_frame,
            frame_count,
            delay,
            direction,
            current_frame: Frame::default(),
            frame_index: 0,
            paused: false,
            accumulated: Duration::ZERO,
        };
        animation.refresh_frame();
        Ok(animation)
    }

    /// Advance playback by `elapsed`. Does nothing while paused.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.paused {
            return;
        }

        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated >= self.delay {
            // Reset, not subtract: any overshoot is dropped.
            self.accumulated = Duration::ZERO;
            self.frame_index += 1;
            if self.frame_index >= self.frame_count {
                self.frame_index = 0;
            }
        }
        self.refresh_frame();
    }

    fn refresh_frame(&mut self) {
        // Checked in `new` for every index below `frame_count`.
        self.current_frame = i32::try_from(self.frame_index)
            .ok()
            .and_then(|index| frame_at(self.start_frame, self.direction, index))
            .unwrap_or_default();
    }

    /// The visible region of the sheet for the current frame.
    pub fn frame_rect(&self) -> Rect {
        let f = self.current_frame;
        Rect::new(f.x, f.y, f.width, f.height)
    }

    /// Pixel width of the current frame.
    pub fn frame_width(&self) -> i32 {
        self.current_frame.width - self.current_frame.x
    }

    /// Pixel height of the current frame.
    pub fn frame_height(&self) -> i32 {
        self.current_frame.height - self.current_frame.y
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Rewind to the first frame. The pause state and accumulated time are kept.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.refresh_frame();
    }

    /// Time needed to play every frame once.
    pub fn cycle_duration(&self) -> Duration {
        self.delay.saturating_mul(self.frame_count)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn current_frame(&self) -> Frame {
        self.current_frame
    }

    pub fn start_frame(&self) -> Frame {
        self.start_frame
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(150);

    fn idle() -> Animation {
        Animation::new(Frame::new(0, 0, 32, 32), 5, DELAY, Direction::Horizontal).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_frame_count() {
        let err = Animation::new(Frame::new(0, 0, 32, 32), 0, DELAY, Direction::Horizontal)
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_new_rejects_zero_delay() {
        let err = Animation::new(
            Frame::new(0, 0, 32, 32),
            3,
            Duration::ZERO,
            Direction::Horizontal,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_new_rejects_overflowing_horizontal_strip() {
        let err = Animation::new(
            Frame::new(0, 0, 1_000_000_000, 32),
            4,
            DELAY,
            Direction::Horizontal,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_new_rejects_overflowing_first_frame() {
        let err = Animation::new(
            Frame::new(0, 2_000_000_000, 32, 2_000_000_000),
            1,
            DELAY,
            Direction::Horizontal,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_new_rejects_overflowing_vertical_strip() {
        let err = Animation::new(
            Frame::new(0, 1_000_000, 32, 32),
            5_000,
            DELAY,
            Direction::Vertical,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_new_rejects_frame_count_beyond_i32() {
        let err = Animation::new(Frame::new(0, 0, 0, 0), u32::MAX, DELAY, Direction::Horizontal)
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_largest_fitting_strip_plays_through() {
        let mut anim = Animation::new(
            Frame::new(0, 0, 1_000_000_000, 32),
            2,
            DELAY,
            Direction::Horizontal,
        )
        .unwrap();
        anim.advance(DELAY);
        assert_eq!(
            anim.frame_rect(),
            Rect::new(1_000_000_000, 0, 2_000_000_000, 32)
        );
        assert_eq!(anim.frame_width(), 1_000_000_000);
        anim.advance(DELAY);
        assert_eq!(anim.frame_index(), 0);
    }

    #[test]
    fn test_fresh_animation_shows_first_frame() {
        let anim = idle();
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.frame_rect(), Rect::new(0, 0, 32, 32));
        assert_eq!(anim.frame_width(), 32);
        assert_eq!(anim.frame_height(), 32);
    }

    #[test]
    fn test_horizontal_scenario() {
        let mut anim = idle();
        anim.advance(Duration::ZERO);
        assert_eq!(anim.frame_rect(), Rect::new(0, 0, 32, 32));

        anim.advance(DELAY);
        assert_eq!(anim.frame_index(), 1);
        assert_eq!(anim.frame_rect(), Rect::new(32, 0, 64, 32));

        for _ in 0..4 {
            anim.advance(DELAY);
        }
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.frame_rect(), Rect::new(0, 0, 32, 32));
    }

    #[test]
    fn test_horizontal_keeps_start_row() {
        let mut anim =
            Animation::new(Frame::new(0, 64, 32, 32), 8, DELAY, Direction::Horizontal).unwrap();
        anim.advance(DELAY);
        anim.advance(DELAY);
        assert_eq!(anim.frame_rect(), Rect::new(64, 64, 96, 96));
        assert_eq!(anim.frame_width(), 32);
        assert_eq!(anim.frame_height(), 32);
    }

    #[test]
    fn test_vertical_geometry() {
        let mut anim =
            Animation::new(Frame::new(0, 16, 32, 16), 4, DELAY, Direction::Vertical).unwrap();
        assert_eq!(anim.frame_rect(), Rect::new(32, 0, 64, 16));
        anim.advance(DELAY);
        assert_eq!(anim.frame_rect(), Rect::new(32, 16, 64, 32));
        anim.advance(DELAY);
        assert_eq!(anim.frame_rect(), Rect::new(32, 32, 64, 48));
    }

    #[test]
    fn test_wraparound_for_any_count() {
        for count in 1..=12 {
            let mut anim =
                Animation::new(Frame::new(0, 0, 8, 8), count, DELAY, Direction::Horizontal)
                    .unwrap();
            for _ in 0..count {
                anim.advance(DELAY);
            }
            assert_eq!(anim.frame_index(), 0, "count {count}");
        }
    }

    #[test]
    fn test_sub_delay_accumulates() {
        let mut anim = idle();
        anim.advance(Duration::from_millis(100));
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.accumulated(), Duration::from_millis(100));
        anim.advance(Duration::from_millis(40));
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.accumulated(), Duration::from_millis(140));
        anim.advance(Duration::from_millis(10));
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn test_overshoot_resets_to_zero() {
        let mut anim = idle();
        anim.advance(Duration::from_millis(100));
        anim.advance(Duration::from_millis(100));
        assert_eq!(anim.frame_index(), 1);
        assert_eq!(anim.accumulated(), Duration::ZERO);

        // A large delta only steps a single frame.
        anim.advance(DELAY * 3);
        assert_eq!(anim.frame_index(), 2);
        assert_eq!(anim.accumulated(), Duration::ZERO);
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut anim = idle();
        anim.advance(Duration::from_millis(100));
        anim.pause();
        for _ in 0..10 {
            anim.advance(DELAY);
        }
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.accumulated(), Duration::from_millis(100));

        anim.resume();
        anim.advance(Duration::from_millis(50));
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn test_reset_keeps_pause_state() {
        let mut anim = idle();
        anim.advance(DELAY);
        anim.advance(DELAY);
        anim.pause();
        anim.reset();
        assert_eq!(anim.frame_index(), 0);
        assert!(anim.is_paused());
        assert_eq!(anim.frame_rect(), Rect::new(0, 0, 32, 32));
    }

    #[test]
    fn test_cycle_duration() {
        assert_eq!(idle().cycle_duration(), Duration::from_millis(750));
    }

    #[test]
    fn test_direction_deserializes_snake_case() {
        let d: Direction = serde_json::from_str("\"vertical\"").unwrap();
        assert_eq!(d, Direction::Vertical);
    }
}
