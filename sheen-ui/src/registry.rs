//! Double-buffered list of the buttons built this frame and the last

use std::collections::HashMap;

/// Items that may carry a name to be found by
pub trait Keyed {
    fn key(&self) -> Option<&str>;
}

/// `current` grows while a frame is built; `previous` is the frozen last frame
#[derive(Debug)]
pub struct FrameButtonRegistry<T> {
    current: Vec<T>,
    previous: Vec<T>,
    /// First index of each name in `previous`
    previous_names: HashMap<String, usize>,
    frame: u64,
}

impl<T> Default for FrameButtonRegistry<T> {
    fn default() -> Self {
        Self {
            current: Vec::new(),
            previous: Vec::new(),
            previous_names: HashMap::new(),
            frame: 0,
        }
    }
}

impl<T: Keyed> FrameButtonRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to this frame, returning the construction index
    pub fn register(&mut self, item: T) -> usize {
        self.current.push(item);
        self.current.len() - 1
    }

    pub fn previous_at(&self, index: usize) -> Option<&T> {
        self.previous.get(index)
    }

    /// First entry of the last frame with this name
    pub fn previous_named(&self, name: &str) -> Option<&T> {
        self.previous_names
            .get(name)
            .and_then(|&index| self.previous.get(index))
    }

    pub fn current_at(&self, index: usize) -> Option<&T> {
        self.current.get(index)
    }

    pub fn current_mut(&mut self, index: usize) -> Option<&mut T> {
        self.current.get_mut(index)
    }

    /// First entry of this frame with this name
    pub fn current_named(&self, name: &str) -> Option<&T> {
        self.current.iter().find(|item| item.key() == Some(name))
    }

    pub fn current_named_mut(&mut self, name: &str) -> Option<&mut T> {
        self.current.iter_mut().find(|item| item.key() == Some(name))
    }

    pub fn current(&self) -> &[T] {
        &self.current
    }

    pub fn previous(&self) -> &[T] {
        &self.previous
    }

    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    pub fn previous_len(&self) -> usize {
        self.previous.len()
    }

    /// Frames completed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frame boundary: this frame becomes the previous one
    pub fn swap(&mut self) {
        self.previous = std::mem::take(&mut self.current);
        self.previous_names.clear();
        for (index, item) in self.previous.iter().enumerate() {
            if let Some(name) = item.key() {
                self.previous_names.entry(name.to_string()).or_insert(index);
            }
        }
        self.frame += 1;
        log::trace!(
            "Frame {} closed with {} buttons",
            self.frame,
            self.previous.len()
        );
    }
}
