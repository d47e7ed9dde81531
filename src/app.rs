//! Application state - runs the scripted session frame by frame

use std::path::{Path, PathBuf};

use sheen_ui::{ButtonArgs, ButtonContext, Canvas, Color, InputSnapshot, TempCaptureDirs};

use crate::canvas::SoftwareCanvas;
use crate::config::{Config, ConfigError};
use crate::recorder::{RecordError, Recorder};
use crate::ui;

/// Frames allowed past the end of the script for a recording to finish
const RECORDING_GRACE_FRAMES: u32 = 240;

/// Command line knobs layered over the config file
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Save every Nth frame as a PNG
    pub snapshot_every: Option<u32>,
    /// Overrides `recording.at_frame`
    pub record_at: Option<u32>,
}

/// What happened during a run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub frames: u32,
    /// `(frame, button name)` of every click
    pub clicks: Vec<(u32, String)>,
    pub snapshots: Vec<PathBuf>,
    pub recordings: Vec<PathBuf>,
}

/// Main application state
pub struct App {
    config: Config,
    buttons: Vec<ButtonArgs>,
    ctx: ButtonContext,
    canvas: SoftwareCanvas,
    recorder: Recorder,
    out_dir: PathBuf,
    options: RunOptions,
}

impl App {
    /// Create new app from configuration
    pub fn new(config: Config, out_dir: impl Into<PathBuf>, options: RunOptions) -> Result<Self, AppError> {
        let out_dir = out_dir.into();
        let buttons = ui::create_buttons_from_config(&config.buttons, &config.grid, config.window.size)?;
        let [width, height] = config.window.size;

        Ok(Self {
            ctx: ButtonContext::new(config.settings.clone()).with_captures(TempCaptureDirs::new()),
            canvas: SoftwareCanvas::new(width, height, config.window.background),
            recorder: Recorder::new(out_dir.join("recording")),
            buttons,
            out_dir,
            options,
            config,
        })
    }

    fn record_at(&self) -> Option<u32> {
        self.options.record_at.or(self.config.recording.at_frame)
    }

    /// Run the whole script, plus whatever it takes a started recording to finish
    pub fn run(&mut self) -> Result<RunSummary, AppError> {
        let inputs = self.config.script.inputs();
        let mut summary = RunSummary::default();
        log::info!(
            "Running {} frames over {} buttons",
            inputs.len(),
            self.buttons.len()
        );

        let mut index = 0;
        let mut recording = false;
        for input in &inputs {
            recording = self.frame(index, input, &mut summary)?;
            index += 1;
        }

        let last = inputs.last().copied().unwrap_or_default();
        let limit = index + RECORDING_GRACE_FRAMES;
        while recording && index < limit {
            recording = self.frame(index, &last, &mut summary)?;
            index += 1;
        }
        if recording {
            log::warn!("Recording still running after {} frames, giving up", index);
        }

        std::fs::create_dir_all(&self.out_dir)?;
        let last_frame = self.out_dir.join("last.png");
        self.canvas.save(&last_frame)?;
        summary.snapshots.push(last_frame);
        summary.frames = index;
        Ok(summary)
    }

    /// Build one frame. Returns whether a button is still recording.
    pub fn frame(
        &mut self,
        index: u32,
        input: &InputSnapshot,
        summary: &mut RunSummary,
    ) -> Result<bool, AppError> {
        let now = index as f32 / self.config.window.fps.max(1.0);

        self.canvas.clear(self.config.window.background);
        self.ctx.begin_frame(input);

        for args in &self.buttons {
            let response = self.ctx.button(&mut self.canvas, args);
            if response.clicked {
                let name = args.name.clone().unwrap_or_default();
                log::info!("Frame {}: clicked '{}'", index, name);
                summary.clicks.push((index, name));
            }
        }

        if self.record_at() == Some(index) {
            match self.ctx.hovered_name().map(str::to_string) {
                Some(name) => {
                    self.ctx.start_recording(&name, now);
                }
                None => log::warn!("Frame {}: nothing hovered to record", index),
            }
        }

        let recorded = self.recorder.step(&mut self.ctx, &self.buttons, now);
        let recording = self.ctx.recording_name().is_some();
        self.ctx.end_frame();
        if let Some(path) = recorded? {
            summary.recordings.push(path);
        }

        self.canvas
            .draw_circle(Color::rgba(0, 0, 0, 120), input.position, 4, 0);

        if let Some(every) = self.options.snapshot_every.filter(|every| *every > 0) {
            if index % every == 0 {
                summary.snapshots.push(self.snapshot(index)?);
            }
        }

        Ok(recording)
    }

    fn snapshot(&self, index: u32) -> Result<PathBuf, AppError> {
        let dir = self.out_dir.join("frames");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{:04}.png", index));
        self.canvas.save(&path)?;
        log::debug!("Saved {}", path.display());
        Ok(path)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Record(RecordError),
    Image(image::ImageError),
    Io(String),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RecordError> for AppError {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{}", e),
            Self::Record(e) => write!(f, "{}", e),
            Self::Image(e) => write!(f, "Image error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_script_clicks_on_release() {
        let out = tempfile::tempdir().unwrap();
        let mut app = App::new(Config::demo(), out.path(), RunOptions::default()).unwrap();

        let summary = app.run().unwrap();
        assert_eq!(summary.frames, 160);
        // Released over "rect" after the first press, then over "save" after
        // the drag that ends on it
        assert_eq!(
            summary.clicks,
            vec![(60, "rect".to_string()), (120, "save".to_string())]
        );
        assert!(summary.recordings.is_empty());
        assert!(out.path().join("last.png").exists());
    }

    #[test]
    fn test_snapshots_every_nth_frame() {
        let out = tempfile::tempdir().unwrap();
        let options = RunOptions {
            snapshot_every: Some(50),
            ..Default::default()
        };
        let mut app = App::new(Config::demo(), out.path(), options).unwrap();

        let summary = app.run().unwrap();
        // Frames 0, 50, 100, 150 plus the final frame
        assert_eq!(summary.snapshots.len(), 5);
        assert!(out.path().join("frames").join("0050.png").exists());
    }

    #[test]
    fn test_recording_hovered_button() {
        let out = tempfile::tempdir().unwrap();
        let options = RunOptions {
            record_at: Some(45),
            ..Default::default()
        };
        let mut app = App::new(Config::demo(), out.path(), options).unwrap();

        let summary = app.run().unwrap();
        assert_eq!(summary.recordings, vec![app.out_dir().join("recording").join("rect")]);
        assert!(summary.recordings[0].join("00.png").exists());
    }

    #[test]
    fn test_recording_runs_past_the_script() {
        let out = tempfile::tempdir().unwrap();
        let mut config = Config::demo();
        config.script.steps.truncate(2);
        config.recording.at_frame = Some(50);
        let mut app = App::new(config, out.path(), RunOptions::default()).unwrap();

        let summary = app.run().unwrap();
        assert!(summary.frames > 60);
        assert_eq!(summary.recordings.len(), 1);
    }
}
