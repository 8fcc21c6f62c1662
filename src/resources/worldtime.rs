use std::time::Duration;

use bevy_ecs::prelude::Resource;

/// Simulation clock, in seconds.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// The last delta as a [`Duration`]. Negative or NaN deltas become zero.
    pub fn delta_duration(&self) -> Duration {
        seconds_to_duration(self.delta)
    }

    pub fn elapsed_duration(&self) -> Duration {
        seconds_to_duration(self.elapsed)
    }
}

fn seconds_to_duration(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
}
