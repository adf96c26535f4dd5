//! Pointer tracking.
//!
//! The effect only spawns while the pointer is moving. Movement is detected
//! with a quiet-period debounce: every pointer-move event re-arms a deadline
//! (100 ms by default), and once a sample observes the deadline passed the
//! moving flag drops. The pointer leaving the window clears the flag
//! immediately.
//!
//! Sampling takes an explicit [`Instant`] so tests can step time without
//! sleeping.

use glam::Vec2;
use std::time::{Duration, Instant};
use winit::event::WindowEvent;

/// Snapshot of the pointer for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Last known position in physical pixels, window-relative.
    pub position: Vec2,
    /// Whether the pointer moved within the quiet period.
    pub moving: bool,
}

/// Tracks pointer position and the movement flag.
#[derive(Debug)]
pub struct PointerTracker {
    position: Vec2,
    moving: bool,
    deadline: Option<Instant>,
    quiet: Duration,
}

impl PointerTracker {
    /// Create a tracker with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            position: Vec2::ZERO,
            moving: false,
            deadline: None,
            quiet,
        }
    }

    /// Record a pointer move: store the position, set the moving flag, and
    /// re-arm the quiet-period deadline.
    pub fn pointer_moved(&mut self, position: Vec2, now: Instant) {
        self.position = position;
        self.moving = true;
        self.deadline = Some(now + self.quiet);
    }

    /// The pointer left the window; stop spawning immediately.
    pub fn pointer_left(&mut self) {
        self.moving = false;
        self.deadline = None;
    }

    /// Take a snapshot for this frame, dropping the moving flag if the
    /// quiet period has elapsed.
    pub fn sample(&mut self, now: Instant) -> PointerState {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.moving = false;
                self.deadline = None;
            }
        }
        PointerState {
            position: self.position,
            moving: self.moving,
        }
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(
                    Vec2::new(position.x as f32, position.y as f32),
                    Instant::now(),
                );
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer_left();
            }
            _ => {}
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(100);

    #[test]
    fn test_starts_idle() {
        let mut tracker = PointerTracker::new(QUIET);
        let state = tracker.sample(Instant::now());
        assert!(!state.moving);
        assert_eq!(state.position, Vec2::ZERO);
    }

    #[test]
    fn test_move_sets_flag_and_position() {
        let mut tracker = PointerTracker::new(QUIET);
        let t0 = Instant::now();
        tracker.pointer_moved(Vec2::new(100.0, 100.0), t0);

        let state = tracker.sample(t0);
        assert!(state.moving);
        assert_eq!(state.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_flag_drops_after_quiet_period() {
        let mut tracker = PointerTracker::new(QUIET);
        let t0 = Instant::now();
        tracker.pointer_moved(Vec2::new(5.0, 5.0), t0);

        assert!(tracker.sample(t0 + Duration::from_millis(99)).moving);
        assert!(!tracker.sample(t0 + Duration::from_millis(100)).moving);

        // Position survives the flag dropping.
        assert_eq!(
            tracker.sample(t0 + Duration::from_millis(200)).position,
            Vec2::new(5.0, 5.0)
        );
    }

    #[test]
    fn test_each_move_rearms_the_deadline() {
        let mut tracker = PointerTracker::new(QUIET);
        let t0 = Instant::now();
        tracker.pointer_moved(Vec2::new(1.0, 1.0), t0);
        tracker.pointer_moved(Vec2::new(2.0, 2.0), t0 + Duration::from_millis(90));

        // 150 ms after the first move but only 60 ms after the second.
        assert!(tracker.sample(t0 + Duration::from_millis(150)).moving);
        assert!(!tracker.sample(t0 + Duration::from_millis(190)).moving);
    }

    #[test]
    fn test_cursor_leaving_clears_immediately() {
        let mut tracker = PointerTracker::new(QUIET);
        let t0 = Instant::now();
        tracker.pointer_moved(Vec2::new(1.0, 1.0), t0);
        tracker.pointer_left();

        assert!(!tracker.sample(t0).moving);
    }

    #[test]
    fn test_moving_again_after_idle() {
        let mut tracker = PointerTracker::new(QUIET);
        let t0 = Instant::now();
        tracker.pointer_moved(Vec2::new(1.0, 1.0), t0);
        assert!(!tracker.sample(t0 + Duration::from_millis(500)).moving);

        tracker.pointer_moved(Vec2::new(9.0, 9.0), t0 + Duration::from_millis(600));
        let state = tracker.sample(t0 + Duration::from_millis(601));
        assert!(state.moving);
        assert_eq!(state.position, Vec2::new(9.0, 9.0));
    }
}
