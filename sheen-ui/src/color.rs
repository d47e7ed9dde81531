//! Colours and the colour arguments a button call can carry

use serde::Deserialize;

use crate::unique::UniqueColor;

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const DARK_AQUA: Color = Color::rgb(0, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from HSV components, each in 0.0..=1.0
    pub fn from_hsv(hue: f32, saturation: f32, value: f32, alpha: u8) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        let channel = |c: f32| (c * 255.0).round() as u8;
        Self::rgba(channel(r), channel(g), channel(b), alpha)
    }
}

/// TOML accepts `[r, g, b]` or `[r, g, b, a]`
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Rgb([r, g, b]) => Color::rgb(r, g, b),
            ColorRepr::Rgba([r, g, b, a]) => Color::rgba(r, g, b, a),
        }
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color::rgba(r, g, b, a)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

/// A colour argument: either a literal or a request for a unique colour
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Literal(Color),
    Unique(UniqueColor),
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Literal(color)
    }
}

impl From<UniqueColor> for ColorSpec {
    fn from(unique: UniqueColor) -> Self {
        ColorSpec::Unique(unique)
    }
}

/// The `disabled` argument of a button call
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Disabled {
    /// Not supplied; defers to the instance value
    #[default]
    Enabled,
    /// Disabled without a dedicated colour
    Disabled,
    /// Disabled and drawn with this colour
    Color(ColorSpec),
}

impl Disabled {
    pub fn is_set(&self) -> bool {
        !matches!(self, Disabled::Enabled)
    }
}

impl From<bool> for Disabled {
    fn from(disabled: bool) -> Self {
        if disabled {
            Disabled::Disabled
        } else {
            Disabled::Enabled
        }
    }
}

/// Disabled state after unique colours have been resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisabledState {
    #[default]
    Enabled,
    Disabled,
    Color(Color),
}

impl DisabledState {
    pub fn is_disabled(&self) -> bool {
        !matches!(self, DisabledState::Enabled)
    }

    pub fn override_color(&self) -> Option<Color> {
        match self {
            DisabledState::Color(color) => Some(*color),
            _ => None,
        }
    }
}
