//! Named animation registry with playback controls.
//!
//! The [`Animator`] owns every [`Animation`] a sprite can show and remembers
//! which one was played last. Call sites should depend on the
//! [`AnimationControl`] trait so tests can substitute their own controller.
//!
//! # Time
//!
//! The animator never reads a clock. The host feeds it the frame delta with
//! [`Animator::tick`], which advances a monotonic local clock. Each animation
//! records the clock value at which it was last played, and
//! [`AnimationControl::play`] advances it by the time passed since then. An
//! animation that was not played for a while therefore catches up on its next
//! play, and playing the same name twice in one tick only advances it once.
//!
//! A routine may play several names in one tick before settling on one, so
//! a change of animation is reported at the next tick boundary rather than
//! on every intermediate `play`.

use std::time::Duration;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::components::animation::Animation;
use crate::error::AnimationError;

/// Behaviour of an animation controller.
pub trait AnimationControl {
    /// Register `animation` under `name`.
    ///
    /// Fails with [`AnimationError::AlreadyExists`] if the name is taken; the
    /// registered animation is left untouched.
    fn add(&mut self, name: &str, animation: Animation) -> Result<(), AnimationError>;

    /// Make `name` the active animation and advance it for this tick.
    ///
    /// Switching does not rewind the target; call [`reset`](Self::reset) for
    /// that. Fails with [`AnimationError::NotFound`] without touching state.
    fn play(&mut self, name: &str) -> Result<(), AnimationError>;

    /// Freeze the active animation until [`resume`](Self::resume).
    fn pause(&mut self) -> Result<(), AnimationError>;

    /// Unfreeze the active animation. It still only advances through `play`.
    fn resume(&mut self) -> Result<(), AnimationError>;

    /// Rewind the active animation to its first frame.
    fn reset(&mut self) -> Result<(), AnimationError>;

    /// The active animation, if any was played.
    fn current(&self) -> Option<&Animation>;

    /// Whether the active animation is paused. False when nothing is active.
    fn is_paused(&self) -> bool;

    /// Time for one full loop of the active animation. Zero when nothing is active.
    fn total_cycle_duration(&self) -> Duration;
}

#[derive(Debug, Clone)]
struct Entry {
    animation: Animation,
    last_played: Option<Duration>,
}

/// Default [`AnimationControl`] implementation.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    entries: FxHashMap<String, Entry>,
    active: Option<String>,
    /// Active name as of the last tick boundary.
    settled: Option<String>,
    clock: Duration,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the local clock forward by the host's frame delta.
    pub fn tick(&mut self, delta: Duration) {
        if self.settled != self.active {
            debug!("Animation changed {:?} -> {:?}", self.settled, self.active);
            self.settled.clone_from(&self.active);
        }
        self.clock = self.clock.saturating_add(delta);
    }

    /// Total time fed through [`tick`](Self::tick).
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn get(&self, name: &str) -> Option<&Animation> {
        self.entries.get(name).map(|e| &e.animation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name of the active animation.
    pub fn current_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Name the animator had settled on when the last tick started.
    pub fn settled_name(&self) -> Option<&str> {
        self.settled.as_deref()
    }

    fn active_mut(&mut self) -> Result<&mut Animation, AnimationError> {
        let name = self
            .active
            .as_deref()
            .ok_or(AnimationError::NoActiveAnimation)?;
        self.entries
            .get_mut(name)
            .map(|e| &mut e.animation)
            .ok_or(AnimationError::NoActiveAnimation)
    }
}

impl AnimationControl for Animator {
    fn add(&mut self, name: &str, animation: Animation) -> Result<(), AnimationError> {
        if self.entries.contains_key(name) {
            return Err(AnimationError::AlreadyExists(name.to_string()));
        }
        debug!(
            "Registering animation '{}' ({} frames, {:?} delay)",
            name,
            animation.frame_count(),
            animation.delay()
        );
        self.entries.insert(
            name.to_string(),
            Entry {
                animation,
                last_played: None,
            },
        );
        Ok(())
    }

    fn play(&mut self, name: &str) -> Result<(), AnimationError> {
        let clock = self.clock;
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| AnimationError::NotFound(name.to_string()))?;

        let elapsed = entry
            .last_played
            .map_or(Duration::ZERO, |last| clock.saturating_sub(last));
        entry.last_played = Some(clock);
        entry.animation.advance(elapsed);

        if self.active.as_deref() != Some(name) {
            trace!("Switching animation {:?} -> '{}'", self.active, name);
            self.active = Some(name.to_string());
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AnimationError> {
        self.active_mut()?.pause();
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AnimationError> {
        self.active_mut()?.resume();
        Ok(())
    }

    fn reset(&mut self) -> Result<(), AnimationError> {
        self.active_mut()?.reset();
        Ok(())
    }

    fn current(&self) -> Option<&Animation> {
        self.active.as_deref().and_then(|name| self.get(name))
    }

    fn is_paused(&self) -> bool {
        self.current().is_some_and(Animation::is_paused)
    }

    fn total_cycle_duration(&self) -> Duration {
        self.current()
            .map_or(Duration::ZERO, Animation::cycle_duration)
    }
}
