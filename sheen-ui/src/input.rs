//! Mouse input as seen by one frame

use serde::Deserialize;

use crate::geometry::Point;

/// Mouse buttons the layer can query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl MouseButton {
    fn index(self) -> usize {
        match self {
            MouseButton::Primary => 0,
            MouseButton::Middle => 1,
            MouseButton::Secondary => 2,
        }
    }
}

/// Host-provided mouse state
pub trait InputSource {
    /// Cursor position in screen coordinates
    fn mouse_position(&self) -> Point;

    /// Whether `button` is currently held
    fn mouse_button_down(&self, button: MouseButton) -> bool;
}

/// Frozen copy of the input for the duration of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub position: Point,
    pub buttons: [bool; 3],
}

impl InputSnapshot {
    /// Cursor at `(x, y)` with nothing held
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            position: Point::new(x, y),
            buttons: [false; 3],
        }
    }

    pub fn with_button(mut self, button: MouseButton, down: bool) -> Self {
        self.buttons[button.index()] = down;
        self
    }

    /// Capture the current state of any input source
    pub fn capture(source: &dyn InputSource) -> Self {
        let mut snapshot = Self::at(0, 0);
        snapshot.position = source.mouse_position();
        for button in [MouseButton::Primary, MouseButton::Middle, MouseButton::Secondary] {
            snapshot.buttons[button.index()] = source.mouse_button_down(button);
        }
        snapshot
    }
}

impl InputSource for InputSnapshot {
    fn mouse_position(&self) -> Point {
        self.position
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }
}
