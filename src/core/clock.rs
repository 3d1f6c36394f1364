use std::time::Instant;

/// Seconds between FPS readings
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Minimal frame clock - just tracks delta time
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames-per-second averaged over fixed intervals
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    /// Record one frame; returns the new reading when an interval completes
    pub fn frame(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009);
    }

    #[test]
    fn fps_reading_after_full_interval() {
        let mut counter = FpsCounter::default();
        for _ in 0..59 {
            assert_eq!(counter.frame(1.0 / 60.0), None);
        }
        let fps = counter.frame(1.0 / 60.0 + 0.001).expect("interval complete");
        assert!((fps - 60.0).abs() < 0.5);
        assert_eq!(counter.fps(), fps);
    }

    #[test]
    fn fps_stays_zero_before_first_interval() {
        let mut counter = FpsCounter::default();
        counter.frame(0.1);
        assert_eq!(counter.fps(), 0.0);
    }
}
