//! Style resolution
//!
//! A button's look comes from three layers, highest priority first:
//!
//! 1. the per-call overrides passed to [`crate::ButtonContext::button_with`],
//! 2. the style stored on the instance when it was constructed,
//! 3. the process-wide [`Settings`].
//!
//! [`StyleResolver::resolve`] merges them into a [`StyleRecord`] that holds
//! nothing but concrete values.

use serde::Deserialize;

use crate::color::{Color, ColorSpec, Disabled, DisabledState};
use crate::geometry::Offset;
use crate::settings::Settings;
use crate::unique::{ColorGenerator, ColorMemo, StyleSlot, UniqueColorAssigner};

/// Rounding value meaning "defer to the next layer"
pub const UNSET: i32 = -1;

/// Corner of a rounded rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Unresolved edge rounding; every field may be [`UNSET`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EdgeRounding {
    pub radius: i32,
    pub top_left: i32,
    pub top_right: i32,
    pub bottom_left: i32,
    pub bottom_right: i32,
}

impl Default for EdgeRounding {
    fn default() -> Self {
        Self {
            radius: UNSET,
            top_left: UNSET,
            top_right: UNSET,
            bottom_left: UNSET,
            bottom_right: UNSET,
        }
    }
}

impl EdgeRounding {
    /// Same radius on every corner
    pub fn uniform(radius: i32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    /// Per-field fallback: keep `self` where set, else take `fallback`
    pub fn or(self, fallback: EdgeRounding) -> EdgeRounding {
        let pick = |value: i32, fallback: i32| if value != UNSET { value } else { fallback };
        EdgeRounding {
            radius: pick(self.radius, fallback.radius),
            top_left: pick(self.top_left, fallback.top_left),
            top_right: pick(self.top_right, fallback.top_right),
            bottom_left: pick(self.bottom_left, fallback.bottom_left),
            bottom_right: pick(self.bottom_right, fallback.bottom_right),
        }
    }

    /// Drop the sentinel; whatever is still unset becomes the primitive's default
    pub fn finish(self) -> Rounding {
        let concrete = |value: i32| u32::try_from(value).ok();
        Rounding {
            radius: concrete(self.radius),
            top_left: concrete(self.top_left),
            top_right: concrete(self.top_right),
            bottom_left: concrete(self.bottom_left),
            bottom_right: concrete(self.bottom_right),
        }
    }
}

/// Resolved rounding handed to the drawing primitive.
///
/// `None` leaves the choice to the primitive: a corner without a value uses
/// `radius`, and a missing `radius` means square corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rounding {
    pub radius: Option<u32>,
    pub top_left: Option<u32>,
    pub top_right: Option<u32>,
    pub bottom_left: Option<u32>,
    pub bottom_right: Option<u32>,
}

impl Rounding {
    /// Effective radius of one corner
    pub fn corner(&self, corner: Corner) -> u32 {
        let value = match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        };
        value.or(self.radius).unwrap_or(0)
    }
}

/// One layer of style arguments; every field is optional
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleArgs {
    pub inactive: Option<ColorSpec>,
    pub active: Option<ColorSpec>,
    pub disabled: Disabled,
    pub shadow: Option<bool>,
    pub shadow_color: Option<ColorSpec>,
    pub shadow_offset: Option<Offset>,
    pub rounding: EdgeRounding,
}

impl StyleArgs {
    pub fn with_inactive(mut self, color: impl Into<ColorSpec>) -> Self {
        self.inactive = Some(color.into());
        self
    }

    pub fn with_active(mut self, color: impl Into<ColorSpec>) -> Self {
        self.active = Some(color.into());
        self
    }

    pub fn with_disabled(mut self, disabled: impl Into<Disabled>) -> Self {
        self.disabled = disabled.into();
        self
    }

    pub fn with_disabled_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.disabled = Disabled::Color(color.into());
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_shadow_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.shadow_color = Some(color.into());
        self
    }

    pub fn with_shadow_offset(mut self, dx: i32, dy: i32) -> Self {
        self.shadow_offset = Some(Offset::new(dx, dy));
        self
    }

    pub fn with_rounding(mut self, radius: i32) -> Self {
        self.rounding.radius = radius;
        self
    }

    pub fn with_corner(mut self, corner: Corner, radius: i32) -> Self {
        match corner {
            Corner::TopLeft => self.rounding.top_left = radius,
            Corner::TopRight => self.rounding.top_right = radius,
            Corner::BottomLeft => self.rounding.bottom_left = radius,
            Corner::BottomRight => self.rounding.bottom_right = radius,
        }
        self
    }
}

/// Fully resolved style for one draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRecord {
    pub inactive: Color,
    pub active: Color,
    pub disabled: DisabledState,
    pub shadow: bool,
    pub shadow_color: Color,
    pub shadow_offset: Offset,
    pub rounding: Rounding,
}

impl StyleRecord {
    /// Fill colour for the given activity
    pub fn fill_color(&self, active: bool) -> Color {
        if active && !self.disabled.is_disabled() {
            self.active
        } else if let Some(color) = self.disabled.override_color() {
            color
        } else {
            self.inactive
        }
    }
}

/// Merges per-call, instance and global style layers
pub struct StyleResolver<'a> {
    settings: &'a Settings,
}

impl<'a> StyleResolver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn resolve(
        &self,
        per_call: &StyleArgs,
        instance: &StyleArgs,
        memo: &mut ColorMemo,
        generator: &mut ColorGenerator,
    ) -> StyleRecord {
        let mut colors = UniqueColorAssigner::new(generator, memo);
        let settings = self.settings;

        let mut layered = |call: &Option<ColorSpec>,
                           stored: &Option<ColorSpec>,
                           slots: (StyleSlot, StyleSlot),
                           fallback: Color| {
            match (call, stored) {
                (Some(spec), _) => colors.color_for(slots.0, spec),
                (None, Some(spec)) => colors.color_for(slots.1, spec),
                (None, None) => fallback,
            }
        };

        let inactive = layered(
            &per_call.inactive,
            &instance.inactive,
            (StyleSlot::Inactive, StyleSlot::SelfInactive),
            settings.inactive_color,
        );
        let active = layered(
            &per_call.active,
            &instance.active,
            (StyleSlot::Active, StyleSlot::SelfActive),
            settings.active_color,
        );

        let shadow = per_call.shadow == Some(true) || instance.shadow.unwrap_or(settings.shadow);
        // Shadow colours are only allocated for buttons that draw a shadow
        let shadow_color = if shadow {
            layered(
                &per_call.shadow_color,
                &instance.shadow_color,
                (StyleSlot::Shadow, StyleSlot::SelfShadow),
                settings.shadow_color,
            )
        } else {
            settings.shadow_color
        };

        let (disabled_arg, disabled_slot) = if per_call.disabled.is_set() {
            (&per_call.disabled, StyleSlot::Disabled)
        } else {
            (&instance.disabled, StyleSlot::SelfDisabled)
        };
        let disabled = match disabled_arg {
            Disabled::Enabled => DisabledState::Enabled,
            Disabled::Disabled => DisabledState::Disabled,
            Disabled::Color(spec) => DisabledState::Color(colors.color_for(disabled_slot, spec)),
        };

        let shadow_offset = per_call
            .shadow_offset
            .or(instance.shadow_offset)
            .unwrap_or(settings.shadow_offset);

        let rounding = per_call
            .rounding
            .or(instance.rounding)
            .or(settings.rounding)
            .finish();

        StyleRecord {
            inactive,
            active,
            disabled,
            shadow,
            shadow_color,
            shadow_offset,
            rounding,
        }
    }
}
