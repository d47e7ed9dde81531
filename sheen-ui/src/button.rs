//! Arguments of one button call and what it reports back

use crate::color::{ColorSpec, Disabled};
use crate::geometry::Rect;
use crate::render::{ImageResource, ShapeKind};
use crate::state::InteractionState;
use crate::style::{Corner, StyleArgs};

/// A button as built by one frame's call
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonArgs {
    pub area: Rect,
    /// Identity key; unnamed buttons are matched by position
    pub name: Option<String>,
    pub text: Option<String>,
    pub shape: ShapeKind,
    /// Style stored on the instance
    pub style: StyleArgs,
}

impl ButtonArgs {
    pub fn new(area: impl Into<Rect>) -> Self {
        Self {
            area: area.into(),
            name: None,
            text: None,
            shape: ShapeKind::Rect,
            style: StyleArgs::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_images(mut self, inactive: ImageResource, active: ImageResource) -> Self {
        self.shape = ShapeKind::Image { inactive, active };
        self
    }

    pub fn with_inactive(mut self, color: impl Into<ColorSpec>) -> Self {
        self.style = self.style.with_inactive(color);
        self
    }

    pub fn with_active(mut self, color: impl Into<ColorSpec>) -> Self {
        self.style = self.style.with_active(color);
        self
    }

    pub fn with_disabled(mut self, disabled: impl Into<Disabled>) -> Self {
        self.style = self.style.with_disabled(disabled);
        self
    }

    pub fn with_disabled_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.style = self.style.with_disabled_color(color);
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.style = self.style.with_shadow(shadow);
        self
    }

    pub fn with_shadow_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.style = self.style.with_shadow_color(color);
        self
    }

    pub fn with_shadow_offset(mut self, dx: i32, dy: i32) -> Self {
        self.style = self.style.with_shadow_offset(dx, dy);
        self
    }

    pub fn with_rounding(mut self, radius: i32) -> Self {
        self.style = self.style.with_rounding(radius);
        self
    }

    pub fn with_corner(mut self, corner: Corner, radius: i32) -> Self {
        self.style = self.style.with_corner(corner, radius);
        self
    }
}

/// Result of a button call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonResponse {
    pub state: InteractionState,
    pub hovered: bool,
    /// Primary button held over the button
    pub pressed: bool,
    /// Released over the button after being pressed on it
    pub clicked: bool,
    /// Construction index this frame; `None` when the call was a no-op
    pub index: Option<usize>,
    /// Area the body was drawn at
    pub drawn_area: Option<Rect>,
}
