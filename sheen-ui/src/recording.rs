//! Recording progress carried by a logical button
//!
//! A recording plays a short, scripted hover over a button: the cursor
//! glides in, rests, and glides out again while frames are captured. The
//! progress lives on the identity so it survives the per-frame rebuild.

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Length of each of the three phases, in seconds
pub const PHASE_SECONDS: f32 = 0.5;
/// Whole recording, in seconds
pub const RECORDING_SECONDS: f32 = 3.0 * PHASE_SECONDS;
/// Frames captured over the whole recording
pub const RECORDING_FRAMES: u32 = 30;

/// Where the scripted cursor is in its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingPhase {
    Entering,
    Holding,
    Leaving,
}

/// Per-identity recording clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingProgress {
    started_at: f32,
    capture_index: Option<u32>,
}

impl RecordingProgress {
    /// Start recording at `now` (seconds on the host clock)
    pub fn start(now: f32) -> Self {
        Self {
            started_at: now,
            capture_index: None,
        }
    }

    pub fn elapsed(&self, now: f32) -> f32 {
        (now - self.started_at).max(0.0)
    }

    /// Current phase, or `None` once the recording is over
    pub fn phase(&self, now: f32) -> Option<RecordingPhase> {
        let elapsed = self.elapsed(now);
        if elapsed < PHASE_SECONDS {
            Some(RecordingPhase::Entering)
        } else if elapsed < 2.0 * PHASE_SECONDS {
            Some(RecordingPhase::Holding)
        } else if elapsed < RECORDING_SECONDS {
            Some(RecordingPhase::Leaving)
        } else {
            None
        }
    }

    pub fn is_finished(&self, now: f32) -> bool {
        self.phase(now).is_none()
    }

    /// How far along the cursor path we are: 0.0 outside, 1.0 on the button
    pub fn cursor_t(&self, now: f32) -> f32 {
        let elapsed = self.elapsed(now);
        match self.phase(now) {
            Some(RecordingPhase::Entering) => (elapsed / PHASE_SECONDS).min(1.0),
            Some(RecordingPhase::Holding) => 1.0,
            Some(RecordingPhase::Leaving) => 1.0 - (elapsed - 2.0 * PHASE_SECONDS) / PHASE_SECONDS,
            None => 0.0,
        }
    }

    /// Frame number to capture now, if it has not been captured yet
    pub fn due_frame(&mut self, now: f32) -> Option<u32> {
        if self.is_finished(now) {
            return None;
        }
        let frame = (RECORDING_FRAMES as f32 * (self.elapsed(now) / RECORDING_SECONDS)) as u32;
        match self.capture_index {
            Some(last) if last >= frame => None,
            _ => {
                self.capture_index = Some(frame);
                Some(frame)
            }
        }
    }

    /// Last captured frame number
    pub fn captured(&self) -> Option<u32> {
        self.capture_index
    }
}

/// Off-screen stage a recorded button is drawn onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingSurface {
    pub size: (i32, i32),
    pub padding: (i32, i32),
    pub background: Color,
    pub cursor_outline: u32,
    pub cursor_inline: u32,
    pub cursor_color: Color,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            size: (300, 150),
            padding: (100, 100),
            background: Color::DARK_GRAY,
            cursor_outline: 15,
            cursor_inline: 5,
            cursor_color: Color::rgba(0, 0, 0, 50),
        }
    }
}

impl RecordingSurface {
    /// Area the button occupies on the surface
    pub fn button_area(&self) -> Rect {
        Rect::new(
            self.padding.0 / 2,
            self.padding.1 / 2,
            self.size.0 - self.padding.0,
            self.size.1 - self.padding.1,
        )
    }

    /// Scripted cursor position for `t` in 0.0..=1.0
    pub fn cursor(&self, t: f32) -> Point {
        let outside = Point::new(
            self.size.0 - self.padding.0 / 4,
            self.size.1 - self.padding.1 / 4,
        );
        let center = Point::new(self.size.0 / 2, self.size.1 / 2);
        Point::lerp(outside, center, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let progress = RecordingProgress::start(10.0);
        assert_eq!(progress.phase(10.1), Some(RecordingPhase::Entering));
        assert_eq!(progress.phase(10.6), Some(RecordingPhase::Holding));
        assert_eq!(progress.phase(11.2), Some(RecordingPhase::Leaving));
        assert_eq!(progress.phase(11.5), None);
        assert!(progress.is_finished(12.0));
    }

    #[test]
    fn test_cursor_t_goes_in_and_out() {
        let progress = RecordingProgress::start(0.0);
        assert!((progress.cursor_t(0.25) - 0.5).abs() < 1e-5);
        assert_eq!(progress.cursor_t(0.75), 1.0);
        assert!((progress.cursor_t(1.25) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_due_frame_captures_each_frame_once() {
        let mut progress = RecordingProgress::start(0.0);
        assert_eq!(progress.due_frame(0.0), Some(0));
        assert_eq!(progress.due_frame(0.01), None);
        assert_eq!(progress.due_frame(0.06), Some(1));
        assert_eq!(progress.due_frame(0.5), Some(10));
        assert_eq!(progress.captured(), Some(10));
        assert_eq!(progress.due_frame(1.6), None);
    }

    #[test]
    fn test_surface_layout() {
        let surface = RecordingSurface::default();
        assert_eq!(surface.button_area(), Rect::new(50, 50, 200, 50));
        assert_eq!(surface.cursor(0.0), Point::new(275, 125));
        assert_eq!(surface.cursor(1.0), Point::new(150, 75));
        assert!(surface.button_area().contains(surface.cursor(1.0)));
        assert!(!surface.button_area().contains(surface.cursor(0.0)));
    }
}
