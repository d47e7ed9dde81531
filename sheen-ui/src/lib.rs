//! # sheen-ui
//!
//! Shadows, rounded corners, unique colours and hover continuity for
//! immediate-mode buttons.
//!
//! Immediate-mode hosts rebuild every button each frame, so nothing about a
//! button survives on its own. This crate keeps a logical identity per button
//! (found again by name, or by construction order for unnamed buttons) and
//! carries a small state bag across frames: the hover flag, the unique colour
//! assignments and the recording progress.
//!
//! ## Features
//! - Style layering: per-call overrides, instance style, global [`Settings`]
//! - Per-corner edge rounding with `-1` deferral
//! - Drop shadows; pressed buttons sink into their shadow
//! - Reproducible per-button unique colours
//! - Image-backed buttons
//! - Per-button capture directories for recordings
//!
//! Drawing and input stay with the host through the [`Canvas`] and
//! [`InputSource`] traits.

pub mod button;
pub mod capture;
pub mod color;
mod context;
pub mod geometry;
pub mod identity;
pub mod input;
pub mod reconcile;
pub mod recording;
pub mod registry;
pub mod render;
mod settings;
pub mod state;
pub mod style;
pub mod unique;

// Frame entry point
pub use context::ButtonContext;
pub use settings::{Settings, SettingsError};

// Button calls
pub use button::{ButtonArgs, ButtonResponse};

// Colours
pub use color::{Color, ColorSpec, Disabled, DisabledState};
pub use unique::{ColorAssignment, ColorError, ColorGenerator, ColorMemo, StyleSlot, UniqueColor, UniqueColorAssigner};

// Geometry and input
pub use geometry::{Offset, Point, Rect};
pub use input::{InputSnapshot, InputSource, MouseButton};

// Style
pub use style::{Corner, EdgeRounding, Rounding, StyleArgs, StyleRecord, StyleResolver, UNSET};

// Identity and reconciliation
pub use identity::{BoundButton, LogicalButtonIdentity};
pub use reconcile::IdentityReconciler;
pub use registry::{FrameButtonRegistry, Keyed};
pub use state::{InteractionState, ShadowAreaCache};

// Rendering
pub use render::{Canvas, CommandList, DrawCommand, ImageResource, RenderDispatcher, RenderRequest, ShapeKind};

// Recording
pub use capture::{CaptureAllocator, CaptureError, TempCaptureDirs};
pub use recording::{RecordingPhase, RecordingProgress, RecordingSurface};
