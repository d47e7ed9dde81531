//! Process-wide defaults, loaded once before the first button is drawn

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::color::Color;
use crate::geometry::Offset;
use crate::input::MouseButton;
use crate::style::EdgeRounding;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Defaults every button falls back to
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default edge rounding; `-1` leaves the corner to the drawing primitive
    pub rounding: EdgeRounding,
    pub inactive_color: Color,
    pub active_color: Color,
    /// Whether buttons draw a shadow unless told otherwise
    pub shadow: bool,
    pub shadow_color: Color,
    pub shadow_offset: Offset,
    /// First index handed out by the unique colour generator
    pub color_seed: u32,
    /// Let unnamed buttons react to hover and clicks
    pub interactive_unnamed: bool,
    /// Button that presses a button
    pub primary_button: MouseButton,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rounding: EdgeRounding::default(),
            inactive_color: Color::GRAY,
            active_color: Color::rgb(170, 170, 170),
            shadow: false,
            shadow_color: Color::rgba(0, 0, 0, 50),
            shadow_offset: Offset::new(2, 2),
            color_seed: 0,
            interactive_unnamed: false,
            primary_button: MouseButton::Primary,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_rounding(mut self, rounding: EdgeRounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_color_seed(mut self, seed: u32) -> Self {
        self.color_seed = seed;
        self
    }

    pub fn with_interactive_unnamed(mut self, interactive: bool) -> Self {
        self.interactive_unnamed = interactive;
        self
    }
}
