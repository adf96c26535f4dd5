//! Frame timing.
//!
//! The effect is frame-based rather than time-based, so the timer's job is
//! bookkeeping: frame counting, an FPS readout for the window title, and
//! the pause toggle that freezes the scene for inspection.

use std::time::{Duration, Instant};

/// Per-frame timing and the pause switch.
#[derive(Debug)]
pub struct FrameTimer {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update the FPS calculation.
    fps_update_interval: Duration,
    /// Whether the effect is paused.
    paused: bool,
}

impl FrameTimer {
    /// Create a timer starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
        }
    }

    /// Advance one frame. Call once per rendered frame.
    ///
    /// Returns the delta time in seconds; while paused this is 0 and the
    /// frame count does not advance.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Seconds since the timer was created, pauses included.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Whether the effect is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze the effect. While paused, `tick()` returns 0 and the frame
    /// count stops.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause without a catch-up delta.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_timer_new() {
        let timer = FrameTimer::new();
        assert_eq!(timer.frame(), 0);
        assert!(!timer.is_paused());
    }

    #[test]
    fn test_tick_advances() {
        let mut timer = FrameTimer::new();
        thread::sleep(Duration::from_millis(10));
        let delta = timer.tick();

        assert!(delta > 0.0);
        assert_eq!(timer.frame(), 1);
    }

    #[test]
    fn test_pause_freezes_frames() {
        let mut timer = FrameTimer::new();
        timer.tick();
        timer.pause();
        assert!(timer.is_paused());

        thread::sleep(Duration::from_millis(10));
        let delta = timer.tick();
        assert_eq!(delta, 0.0);
        assert_eq!(timer.frame(), 1);
    }

    #[test]
    fn test_resume_skips_the_paused_gap() {
        let mut timer = FrameTimer::new();
        timer.tick();
        timer.pause();
        thread::sleep(Duration::from_millis(50));
        timer.resume();

        let delta = timer.tick();
        // The 50 ms spent paused must not appear in the delta.
        assert!(delta < 0.05);
        assert_eq!(timer.frame(), 2);
    }

    #[test]
    fn test_toggle() {
        let mut timer = FrameTimer::new();
        timer.toggle_pause();
        assert!(timer.is_paused());
        timer.toggle_pause();
        assert!(!timer.is_paused());
    }
}
