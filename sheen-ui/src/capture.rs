//! Per-name capture directories for recordings

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to create capture directory: {0}")]
    IoError(#[from] std::io::Error),
    #[error("No capture directory for button '{0}'")]
    MissingDirectory(String),
}

/// Hands out one scratch directory per button name
pub trait CaptureAllocator {
    /// Directory for `name`; the same name always gets the same directory
    fn allocate(&mut self, name: &str) -> Result<PathBuf, CaptureError>;
}

/// Temporary directories removed when the allocator is dropped
#[derive(Debug, Default)]
pub struct TempCaptureDirs {
    root: Option<PathBuf>,
    dirs: HashMap<String, TempDir>,
}

impl TempCaptureDirs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create directories under `root` instead of the system temp dir
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            dirs: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.dirs.get(name).map(|dir| dir.path())
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl CaptureAllocator for TempCaptureDirs {
    fn allocate(&mut self, name: &str) -> Result<PathBuf, CaptureError> {
        if let Some(dir) = self.dirs.get(name) {
            return Ok(dir.path().to_path_buf());
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("sheen-capture-");
        let dir = match &self.root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        let path = dir.path().to_path_buf();
        log::debug!("Capture directory for '{}': {}", name, path.display());
        self.dirs.insert(name.to_string(), dir);
        Ok(path)
    }
}

impl Drop for TempCaptureDirs {
    fn drop(&mut self) {
        if !self.dirs.is_empty() {
            log::debug!("Removing {} capture directories", self.dirs.len());
        }
    }
}
