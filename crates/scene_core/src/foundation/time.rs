//! Frame timing for scene passes

use std::time::Instant;

/// Timing information handed to every pass for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Total seconds elapsed since the clock started
    pub elapsed: f64,
    /// Seconds since the previous frame
    pub delta: f64,
    /// Zero-based frame number
    pub frame: u64,
}

impl FrameTime {
    /// Build a frame time by hand (useful when a caller drives the scene directly)
    pub fn new(elapsed: f64, delta: f64, frame: u64) -> Self {
        Self { elapsed, delta, frame }
    }
}

/// Frame clock, either wall-clock driven or stepping by a fixed delta
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    fixed_delta: Option<f64>,
    elapsed: f64,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a wall-clock driven frame clock
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_delta: None,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Create a clock that advances by `delta` seconds every tick regardless of real time
    pub fn fixed(delta: f64) -> Self {
        Self {
            fixed_delta: Some(delta),
            ..Self::new()
        }
    }

    /// Advance the clock by one frame
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = self
            .fixed_delta
            .unwrap_or_else(|| now.duration_since(self.last_frame).as_secs_f64());
        self.last_frame = now;
        self.elapsed += delta;

        let frame = FrameTime::new(self.elapsed, delta, self.frame_count);
        self.frame_count += 1;
        frame
    }

    /// Total elapsed time in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since the clock started
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f64 {
        if self.elapsed > 0.0 {
            self.frame_count as f64 / self.elapsed
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_clock_accumulates() {
        let mut clock = FrameClock::fixed(0.016);
        let first = clock.tick();
        let second = clock.tick();

        assert_eq!(first.frame, 0);
        assert_eq!(second.frame, 1);
        assert_relative_eq!(second.elapsed, 0.032);
        assert_relative_eq!(second.delta, 0.016);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_average_fps_before_first_tick() {
        let clock = FrameClock::fixed(0.5);
        assert_relative_eq!(clock.average_fps(), 0.0);
    }
}
