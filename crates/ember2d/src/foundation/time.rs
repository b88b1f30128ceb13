//! Frame timing utilities
//!
//! `Timer` is owned by the host loop; every frame it produces an immutable
//! `GameTime` snapshot that flows unchanged through the update pipeline.

use std::time::{Duration, Instant};

/// Immutable per-frame timing snapshot consumed by update systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTime {
    delta: Duration,
    total: Duration,
    frame: u64,
}

impl GameTime {
    /// Create a timing snapshot from raw durations
    pub fn new(delta: Duration, total: Duration, frame: u64) -> Self {
        Self { delta, total, frame }
    }

    /// Convenience constructor from fractional seconds
    pub fn from_seconds(delta_seconds: f32, total_seconds: f32) -> Self {
        Self {
            delta: Duration::from_secs_f32(delta_seconds.max(0.0)),
            total: Duration::from_secs_f32(total_seconds.max(0.0)),
            frame: 0,
        }
    }

    /// Time since the last frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time since the last frame in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total elapsed time since the timer started
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Total elapsed time in seconds
    pub fn total_seconds(&self) -> f32 {
        self.total.as_secs_f32()
    }

    /// Index of the current frame (0 for the first tick)
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// High-precision frame timer for the host loop
pub struct Timer {
    last_frame: Instant,
    total: Duration,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            total: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance the timer and produce the snapshot for this frame
    ///
    /// Should be called exactly once per frame, before driving the pipelines.
    pub fn tick(&mut self) -> GameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.total += delta;
        let time = GameTime::new(delta, self.total, self.frame_count);
        self.frame_count += 1;
        time
    }

    /// Number of completed ticks
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f32 {
        let total = self.total.as_secs_f32();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}
