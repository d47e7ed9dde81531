//! Records a scripted hover over one button into a numbered frame sequence

use std::path::{Path, PathBuf};

use glob::glob;
use sheen_ui::{ButtonArgs, ButtonContext, Canvas, CaptureError, InputSnapshot, RecordingSurface};

use crate::canvas::SoftwareCanvas;

/// Label shown on a button while it is being recorded
pub const RECORDING_TEXT: &str = "Hello, sheen!";

#[derive(Debug)]
pub enum RecordError {
    Capture(CaptureError),
    Image(image::ImageError),
    Io(String),
    Pattern(String),
    NoFrames(String),
}

impl From<CaptureError> for RecordError {
    fn from(e: CaptureError) -> Self {
        Self::Capture(e)
    }
}

impl From<image::ImageError> for RecordError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capture(e) => write!(f, "Capture error: {}", e),
            Self::Image(e) => write!(f, "Image error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Pattern(e) => write!(f, "Bad frame pattern: {}", e),
            Self::NoFrames(name) => write!(f, "No frames captured for '{}'", name),
        }
    }
}

impl std::error::Error for RecordError {}

pub struct Recorder {
    surface: RecordingSurface,
    canvas: SoftwareCanvas,
    /// Finished recordings land in `<out_dir>/<name>/`
    out_dir: PathBuf,
}

impl Recorder {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        let surface = RecordingSurface::default();
        Self {
            canvas: SoftwareCanvas::new(surface.size.0 as u32, surface.size.1 as u32, surface.background),
            surface,
            out_dir: out_dir.into(),
        }
    }

    /// Advance whichever button is recording. Must run inside the frame,
    /// after the buttons have been drawn. Returns the frame directory once
    /// a recording completes.
    pub fn step(
        &mut self,
        ctx: &mut ButtonContext,
        buttons: &[ButtonArgs],
        now: f32,
    ) -> Result<Option<PathBuf>, RecordError> {
        let Some(name) = ctx.recording_name().map(str::to_string) else {
            return Ok(None);
        };
        let Some(args) = buttons.iter().find(|b| b.name.as_deref() == Some(name.as_str())) else {
            log::warn!("Recording button '{}' is gone, dropping the recording", name);
            ctx.stop_recording(&name);
            return Ok(None);
        };
        let Some(progress) = ctx.recording_mut(&name) else {
            return Ok(None);
        };

        if progress.is_finished(now) {
            ctx.stop_recording(&name);
            let dir = capture_dir(ctx, &name)?;
            return self.export(&name, &dir).map(Some);
        }

        let fresh = progress.captured().is_none();
        let t = progress.cursor_t(now);
        let Some(frame) = progress.due_frame(now) else {
            return Ok(None);
        };
        let dir = capture_dir(ctx, &name)?;
        if fresh {
            clear_frames(&dir)?;
        }
        self.capture(ctx, &name, args, t, &dir.join(format!("{}.png", frame)))?;
        Ok(None)
    }

    fn capture(
        &mut self,
        ctx: &mut ButtonContext,
        name: &str,
        args: &ButtonArgs,
        t: f32,
        path: &Path,
    ) -> Result<(), RecordError> {
        self.canvas.clear(self.surface.background);

        let staged = ButtonArgs {
            area: self.surface.button_area(),
            text: Some(RECORDING_TEXT.to_string()),
            ..args.clone()
        };
        let cursor = self.surface.cursor(t);
        ctx.preview(&mut self.canvas, name, &staged, &InputSnapshot::at(cursor.x, cursor.y));

        let color = self.surface.cursor_color;
        self.canvas.draw_circle(color, cursor, self.surface.cursor_outline, 3);
        self.canvas.draw_circle(color, cursor, self.surface.cursor_inline, 0);

        self.canvas.save(path)?;
        log::debug!("Captured {}", path.display());
        Ok(())
    }

    /// Copy the numbered frames in `dir` to `<out_dir>/<name>/`, renumbered
    /// from zero
    fn export(&self, name: &str, dir: &Path) -> Result<PathBuf, RecordError> {
        let frames = numbered_frames(dir)?;

        if frames.is_empty() {
            return Err(RecordError::NoFrames(name.to_string()));
        }

        let target = self.out_dir.join(name);
        if target.exists() {
            std::fs::remove_dir_all(&target)?;
        }
        std::fs::create_dir_all(&target)?;
        for (position, (_, frame_path)) in frames.iter().enumerate() {
            std::fs::copy(frame_path, target.join(format!("{:02}.png", position)))?;
        }

        log::info!("Saved {} frames of '{}' to {}", frames.len(), name, target.display());
        Ok(target)
    }
}

/// `<index>.png` files in `dir`, in frame order
fn numbered_frames(dir: &Path) -> Result<Vec<(u32, PathBuf)>, RecordError> {
    let dir = dir.to_string_lossy();
    let pattern = format!("{}/*.png", dir.trim_end_matches('/'));

    let mut frames: Vec<(u32, PathBuf)> = glob(&pattern)
        .map_err(|e| RecordError::Pattern(e.to_string()))?
        .filter_map(Result::ok)
        .filter_map(|path| {
            let index = path.file_stem()?.to_str()?.parse().ok()?;
            Some((index, path))
        })
        .collect();
    frames.sort_by_key(|(index, _)| *index);
    Ok(frames)
}

/// Drop frames left in a capture directory by an earlier recording
fn clear_frames(dir: &Path) -> Result<(), RecordError> {
    let stale = numbered_frames(dir)?;
    if !stale.is_empty() {
        log::debug!("Removing {} old frames from {}", stale.len(), dir.display());
    }
    for (_, path) in stale {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

fn capture_dir(ctx: &ButtonContext, name: &str) -> Result<PathBuf, CaptureError> {
    ctx.identity(name)
        .and_then(|identity| identity.capture_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| CaptureError::MissingDirectory(name.to_string()))
}
