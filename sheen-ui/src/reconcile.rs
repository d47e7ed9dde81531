//! Binding each frame's transient buttons to their logical identities
//!
//! Named buttons are found again by name among last frame's buttons. Buttons
//! without a name fall back to their position in construction order: the
//! Nth button of this frame inherits from the Nth button of the last frame.
//! Positional matching breaks as soon as the construction order shifts, so
//! interactive buttons should always be named.

use std::fmt;

use crate::capture::CaptureAllocator;
use crate::geometry::Rect;
use crate::identity::{BoundButton, LogicalButtonIdentity};
use crate::registry::FrameButtonRegistry;

#[derive(Default)]
pub struct IdentityReconciler {
    captures: Option<Box<dyn CaptureAllocator>>,
}

impl fmt::Debug for IdentityReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityReconciler")
            .field("captures", &self.captures.is_some())
            .finish()
    }
}

impl IdentityReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give new named identities a capture directory
    pub fn with_captures(mut self, captures: impl CaptureAllocator + 'static) -> Self {
        self.captures = Some(Box::new(captures));
        self
    }

    pub fn has_captures(&self) -> bool {
        self.captures.is_some()
    }

    /// Bind a button built this frame and register it; returns its index
    pub fn bind(
        &mut self,
        registry: &mut FrameButtonRegistry<BoundButton>,
        name: Option<&str>,
        area: Rect,
    ) -> usize {
        let identity = match name {
            Some(name) => self.bind_named(registry, name),
            None => Self::bind_positional(registry),
        };
        registry.register(BoundButton { identity, area })
    }

    fn bind_named(
        &mut self,
        registry: &FrameButtonRegistry<BoundButton>,
        name: &str,
    ) -> LogicalButtonIdentity {
        if let Some(previous) = registry.previous_named(name) {
            return previous.identity.clone();
        }

        log::debug!("New button identity '{}'", name);
        let mut identity = LogicalButtonIdentity::named(name);
        if let Some(captures) = self.captures.as_mut() {
            match captures.allocate(name) {
                Ok(dir) => identity.set_capture_dir(dir),
                Err(e) => log::warn!("No capture directory for '{}': {}", name, e),
            }
        }
        identity
    }

    fn bind_positional(registry: &FrameButtonRegistry<BoundButton>) -> LogicalButtonIdentity {
        let mut identity = LogicalButtonIdentity::unnamed();
        if let Some(previous) = registry.previous_at(registry.current_len()) {
            identity.inherit_positional(&previous.identity);
        }
        identity
    }
}
