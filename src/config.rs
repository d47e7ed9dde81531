//! Configuration loading from sheen.toml

use serde::Deserialize;
use sheen_ui::{Color, ColorError, ColorSpec, EdgeRounding, InputSnapshot, MouseButton, Point, Settings, UniqueColor};
use std::path::Path;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Process-wide button defaults
    pub settings: Settings,
    pub grid: GridConfig,
    pub buttons: Vec<ButtonConfig>,
    pub script: ScriptConfig,
    pub recording: RecordingConfig,
}

/// Canvas the tester renders onto
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub size: [u32; 2],
    pub background: Color,
    /// Frames per second of the scripted session
    pub fps: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: [800, 500],
            background: Color::GRAY,
            fps: 60.0,
        }
    }
}

/// Automatic button placement, column by column
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub button_size: [i32; 2],
    pub padding: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            button_size: [120, 30],
            padding: 10,
        }
    }
}

impl GridConfig {
    /// Top-left corners of the grid slots inside a `width` x `height` canvas
    pub fn positions(&self, width: i32, height: i32) -> impl Iterator<Item = [i32; 2]> {
        let step_x = self.button_size[0] + self.padding;
        let step_y = self.button_size[1] + self.padding;
        let padding = self.padding;
        let xs = (padding..width - step_x).step_by(step_x.max(1) as usize);
        xs.flat_map(move |x| {
            (padding..height - step_y)
                .step_by(step_y.max(1) as usize)
                .map(move |y| [x, y])
        })
    }
}

/// A colour in the config file: `[r, g, b(, a)]`, a name, or a unique request
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorConfig {
    Literal(Color),
    Named(String),
    Palette { palette: Vec<Color> },
    Variant { base: Color, spread: u8 },
}

impl ColorConfig {
    pub fn to_spec(&self) -> Result<ColorSpec, ConfigError> {
        Ok(match self {
            Self::Literal(color) => ColorSpec::Literal(*color),
            Self::Named(name) => named_color(name),
            Self::Palette { palette } => ColorSpec::Unique(UniqueColor::palette(palette.clone())?),
            Self::Variant { base, spread } => ColorSpec::Unique(UniqueColor::variant(*base, *spread)),
        })
    }
}

fn named_color(name: &str) -> ColorSpec {
    match name.to_lowercase().as_str() {
        "unique" | "hue" => ColorSpec::Unique(UniqueColor::hue()),
        "black" => Color::BLACK.into(),
        "white" => Color::WHITE.into(),
        "gray" | "grey" => Color::GRAY.into(),
        "darkgray" | "darkgrey" => Color::DARK_GRAY.into(),
        "blue" => Color::BLUE.into(),
        "purple" => Color::PURPLE.into(),
        "darkaqua" => Color::DARK_AQUA.into(),
        _ => {
            log::warn!("Unknown colour '{}', defaulting to gray", name);
            Color::GRAY.into()
        }
    }
}

/// `disabled = true` or `disabled = <colour>`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DisabledConfig {
    Flag(bool),
    Color(ColorConfig),
}

/// Button configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ButtonConfig {
    /// Identity key; leave out to match by position
    pub name: Option<String>,
    pub text: Option<String>,
    /// Top-left corner; defaults to the next grid slot
    pub position: Option<[i32; 2]>,
    /// Defaults to the grid button size
    pub size: Option<[i32; 2]>,
    pub inactive: Option<ColorConfig>,
    pub active: Option<ColorConfig>,
    pub disabled: Option<DisabledConfig>,
    pub shadow: Option<bool>,
    pub shadow_color: Option<ColorConfig>,
    pub shadow_offset: Option<[i32; 2]>,
    #[serde(default)]
    pub rounding: EdgeRounding,
    /// Image paths `[inactive, active]`; turns the button into an image button
    pub images: Option<[String; 2]>,
}

/// One leg of the scripted cursor path
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    /// Where the cursor ends up
    pub to: [i32; 2],
    /// How many frames the move takes
    #[serde(default = "default_step_frames")]
    pub frames: u32,
    /// Primary button held during the move
    #[serde(default)]
    pub down: bool,
}

fn default_step_frames() -> u32 {
    30
}

/// Scripted mouse input
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    pub start: [i32; 2],
    pub steps: Vec<ScriptStep>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            start: [790, 490],
            steps: vec![
                ScriptStep {
                    to: [70, 25],
                    frames: 40,
                    down: false,
                },
                ScriptStep {
                    to: [70, 25],
                    frames: 20,
                    down: true,
                },
                ScriptStep {
                    to: [70, 65],
                    frames: 30,
                    down: false,
                },
                ScriptStep {
                    to: [70, 105],
                    frames: 30,
                    down: true,
                },
                ScriptStep {
                    to: [790, 490],
                    frames: 40,
                    down: false,
                },
            ],
        }
    }
}

impl ScriptConfig {
    /// One input snapshot per frame, gliding the cursor along the steps
    pub fn inputs(&self) -> Vec<InputSnapshot> {
        let mut from = Point::new(self.start[0], self.start[1]);
        let mut inputs = Vec::new();
        for step in &self.steps {
            let to = Point::new(step.to[0], step.to[1]);
            let frames = step.frames.max(1);
            for frame in 1..=frames {
                let at = Point::lerp(from, to, frame as f32 / frames as f32);
                inputs.push(InputSnapshot::at(at.x, at.y).with_button(MouseButton::Primary, step.down));
            }
            from = to;
        }
        inputs
    }

    pub fn frame_count(&self) -> usize {
        self.steps.iter().map(|step| step.frames.max(1) as usize).sum()
    }
}

/// When to record the hovered button
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Frame at which the hovered button starts recording
    pub at_frame: Option<u32>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path`, falling back to the built-in demo when it is missing
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("{} not found, using the built-in demo", path.display());
            return Ok(Self::demo());
        }
        Self::load(path)
    }

    /// A handful of buttons showing off each effect
    pub fn demo() -> Self {
        let button = |name: &str| ButtonConfig {
            name: Some(name.to_string()),
            text: Some(name.to_string()),
            position: None,
            size: None,
            inactive: None,
            active: None,
            disabled: None,
            shadow: None,
            shadow_color: None,
            shadow_offset: None,
            rounding: EdgeRounding::default(),
            images: None,
        };

        Self {
            buttons: vec![
                ButtonConfig {
                    inactive: Some(ColorConfig::Literal(Color::PURPLE)),
                    active: Some(ColorConfig::Literal(Color::DARK_AQUA)),
                    rounding: EdgeRounding::uniform(8),
                    ..button("rect")
                },
                ButtonConfig {
                    inactive: Some(ColorConfig::Named("unique".into())),
                    active: Some(ColorConfig::Variant {
                        base: Color::DARK_AQUA,
                        spread: 40,
                    }),
                    shadow: Some(true),
                    ..button("unique")
                },
                ButtonConfig {
                    inactive: Some(ColorConfig::Literal(Color::GRAY)),
                    active: Some(ColorConfig::Literal(Color::BLUE)),
                    shadow: Some(true),
                    shadow_offset: Some([3, 3]),
                    rounding: EdgeRounding {
                        top_left: 12,
                        bottom_right: 12,
                        ..EdgeRounding::uniform(2)
                    },
                    ..button("save")
                },
                ButtonConfig {
                    active: Some(ColorConfig::Literal(Color::BLUE)),
                    disabled: Some(DisabledConfig::Color(ColorConfig::Literal(Color::DARK_GRAY))),
                    ..button("disabled")
                },
            ],
            ..Default::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Color(ColorError),
}

impl From<ColorError> for ConfigError {
    fn from(e: ColorError) -> Self {
        Self::Color(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::Color(e) => write!(f, "Colour error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use sheen_ui::UNSET;

    #[test]
    fn test_grid_positions_column_major() {
        let grid = GridConfig::default();
        let positions: Vec<_> = grid.positions(800, 500).take(3).collect();
        assert_eq!(positions, vec![[10, 10], [10, 50], [10, 90]]);

        let per_column = grid.positions(800, 500).filter(|p| p[0] == 10).count();
        assert_eq!(per_column, 12);
        assert!(grid.positions(800, 500).all(|[x, y]| x + 120 < 800 && y + 30 < 500));
    }

    #[test]
    fn test_parse_buttons() {
        let config = Config::from_toml_str(
            r#"
            [window]
            size = [400, 300]

            [settings.rounding]
            radius = 4

            [[buttons]]
            name = "save"
            inactive = [128, 128, 128]
            active = "unique"
            disabled = true
            shadow = true
            shadow_offset = [1, 2]

            [buttons.rounding]
            top_left = 9

            [[buttons]]
            inactive = { palette = [[1, 2, 3], [4, 5, 6, 7]] }
            active = { base = [0, 128, 128], spread = 20 }
            disabled = "darkgray"

            [[script.steps]]
            to = [10, 10]
            "#,
        )
        .unwrap();

        assert_eq!(config.window.size, [400, 300]);
        assert_eq!(config.window.fps, 60.0);
        assert_eq!(config.settings.rounding.radius, 4);
        assert_eq!(config.buttons.len(), 2);

        let save = &config.buttons[0];
        assert_eq!(save.name.as_deref(), Some("save"));
        assert!(matches!(save.inactive, Some(ColorConfig::Literal(c)) if c == Color::GRAY));
        assert!(matches!(
            save.active.as_ref().unwrap().to_spec().unwrap(),
            ColorSpec::Unique(_)
        ));
        assert!(matches!(save.disabled, Some(DisabledConfig::Flag(true))));
        assert_eq!(save.rounding.top_left, 9);
        assert_eq!(save.rounding.radius, UNSET);

        let unnamed = &config.buttons[1];
        assert!(unnamed.name.is_none());
        assert!(matches!(unnamed.inactive, Some(ColorConfig::Palette { .. })));
        assert!(matches!(unnamed.active, Some(ColorConfig::Variant { spread: 20, .. })));
        assert!(matches!(unnamed.disabled, Some(DisabledConfig::Color(ColorConfig::Named(_)))));

        assert_eq!(config.script.steps[0].frames, 30);
        assert!(!config.script.steps[0].down);
    }

    #[test]
    fn test_script_inputs() {
        let script = ScriptConfig {
            start: [0, 0],
            steps: vec![
                ScriptStep {
                    to: [10, 0],
                    frames: 2,
                    down: false,
                },
                ScriptStep {
                    to: [10, 10],
                    frames: 1,
                    down: true,
                },
            ],
        };

        let inputs = script.inputs();
        assert_eq!(inputs.len(), script.frame_count());
        assert_eq!(inputs[0], InputSnapshot::at(5, 0));
        assert_eq!(inputs[1], InputSnapshot::at(10, 0));
        assert_eq!(
            inputs[2],
            InputSnapshot::at(10, 10).with_button(MouseButton::Primary, true)
        );
        assert_eq!(ScriptConfig::default().inputs().len(), 160);
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        let color = ColorConfig::Palette { palette: vec![] };
        assert!(matches!(color.to_spec(), Err(ConfigError::Color(ColorError::EmptyPalette))));
    }

    #[test]
    fn test_unknown_name_defaults_to_gray() {
        let spec = ColorConfig::Named("chartreuse".into()).to_spec().unwrap();
        assert_eq!(spec, ColorSpec::Literal(Color::GRAY));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheen.toml");
        std::fs::write(&path, "[[buttons]]\nname = \"ok\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.buttons[0].name.as_deref(), Some("ok"));

        let missing = Config::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert_eq!(missing.buttons.len(), Config::demo().buttons.len());
        assert!(matches!(Config::load(dir.path().join("missing.toml")), Err(ConfigError::Io(_))));
    }
}
