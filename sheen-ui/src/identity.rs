//! Logical button identity carried from frame to frame

use std::path::{Path, PathBuf};

use crate::geometry::Rect;
use crate::recording::RecordingProgress;
use crate::registry::Keyed;
use crate::state::{InteractionState, ShadowAreaCache};
use crate::unique::ColorMemo;

/// State that belongs to a button rather than to one frame's instance of it
#[derive(Debug, Clone, Default)]
pub struct LogicalButtonIdentity {
    name: Option<String>,
    /// Unique colour assignments per style slot
    pub infos: ColorMemo,
    /// Hover result of the last evaluated frame
    pub hovered: bool,
    /// Whether the primary button was held over this button last frame
    pub pressed: bool,
    pub state: InteractionState,
    pub shadow_cache: ShadowAreaCache,
    pub recording: Option<RecordingProgress>,
    capture_dir: Option<PathBuf>,
}

impl LogicalButtonIdentity {
    /// Fresh identity for a name seen for the first time
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Fresh positional identity
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    pub fn capture_dir(&self) -> Option<&Path> {
        self.capture_dir.as_deref()
    }

    pub(crate) fn set_capture_dir(&mut self, dir: PathBuf) {
        self.capture_dir = Some(dir);
    }

    /// Copy the state a positional successor inherits: interaction state
    /// and colour memo
    pub(crate) fn inherit_positional(&mut self, previous: &LogicalButtonIdentity) {
        self.hovered = previous.hovered;
        self.pressed = previous.pressed;
        self.state = previous.state;
        self.infos = previous.infos.clone();
    }
}

/// One frame's transient button, bound to its logical identity
#[derive(Debug, Clone)]
pub struct BoundButton {
    pub identity: LogicalButtonIdentity,
    pub area: Rect,
}

impl Keyed for BoundButton {
    fn key(&self) -> Option<&str> {
        self.identity.name()
    }
}
