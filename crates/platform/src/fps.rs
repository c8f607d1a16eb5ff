use std::time::{Duration, Instant};

/// Frames-per-second counter reporting once per elapsed second.
#[derive(Clone, Copy, Debug)]
pub struct FrameCounter {
    window_start: Instant,
    frames: u32,
}

impl FrameCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
        }
    }

    /// Count one presented frame. Returns the rate when at least a second has
    /// passed since the last report.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        let fps = (self.frames as f64 / elapsed.as_secs_f64()).round() as u32;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}
