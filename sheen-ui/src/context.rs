//! The per-frame entry point
//!
//! A [`ButtonContext`] owns everything that outlives a single frame: the
//! settings, the frame registry, the colour generator and the capture
//! directories. The host drives it once per frame:
//!
//! ```
//! use sheen_ui::{ButtonArgs, ButtonContext, Color, CommandList, InputSnapshot, Settings};
//!
//! let mut ctx = ButtonContext::new(Settings::default());
//! let mut canvas = CommandList::new();
//!
//! ctx.begin_frame(&InputSnapshot::at(20, 20));
//! let response = ctx.button(
//!     &mut canvas,
//!     &ButtonArgs::new((10, 10, 80, 24))
//!         .with_name("save")
//!         .with_inactive(Color::GRAY)
//!         .with_active(Color::BLUE),
//! );
//! ctx.end_frame();
//!
//! assert!(response.hovered);
//! ```

use crate::button::{ButtonArgs, ButtonResponse};
use crate::capture::CaptureAllocator;
use crate::geometry::Rect;
use crate::identity::{BoundButton, LogicalButtonIdentity};
use crate::input::{InputSnapshot, InputSource};
use crate::recording::RecordingProgress;
use crate::reconcile::IdentityReconciler;
use crate::registry::FrameButtonRegistry;
use crate::render::{Canvas, RenderDispatcher, RenderRequest};
use crate::settings::Settings;
use crate::state::InteractionState;
use crate::style::{StyleArgs, StyleResolver};
use crate::unique::ColorGenerator;

/// One-shot warning flags
#[derive(Debug, Default)]
struct Warnings {
    button_outside_frame: bool,
    end_without_begin: bool,
}

#[derive(Debug)]
pub struct ButtonContext {
    settings: Settings,
    registry: FrameButtonRegistry<BoundButton>,
    reconciler: IdentityReconciler,
    generator: ColorGenerator,
    /// Input of the open frame; `None` between frames
    frame: Option<InputSnapshot>,
    warnings: Warnings,
}

impl ButtonContext {
    pub fn new(settings: Settings) -> Self {
        let generator = ColorGenerator::new(settings.color_seed);
        Self {
            settings,
            registry: FrameButtonRegistry::new(),
            reconciler: IdentityReconciler::new(),
            generator,
            frame: None,
            warnings: Warnings::default(),
        }
    }

    /// Allocate a capture directory for every new named button
    pub fn with_captures(mut self, captures: impl CaptureAllocator + 'static) -> Self {
        self.reconciler = self.reconciler.with_captures(captures);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &FrameButtonRegistry<BoundButton> {
        &self.registry
    }

    pub fn in_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub fn frame_input(&self) -> Option<InputSnapshot> {
        self.frame
    }

    /// Open a frame with the input it will be evaluated against
    pub fn begin_frame(&mut self, input: &dyn InputSource) {
        if self.frame.is_some() {
            log::warn!("begin_frame called with a frame still open; closing it first");
            self.end_frame();
        }
        self.frame = Some(InputSnapshot::capture(input));
    }

    /// Close the frame; its buttons become the reference for the next one
    pub fn end_frame(&mut self) {
        if self.frame.take().is_none() {
            if !self.warnings.end_without_begin {
                log::warn!("end_frame called without begin_frame");
                self.warnings.end_without_begin = true;
            }
            return;
        }
        self.registry.swap();
    }

    /// Draw a button with its own stored style
    pub fn button<C: Canvas + ?Sized>(&mut self, canvas: &mut C, args: &ButtonArgs) -> ButtonResponse {
        self.button_with(canvas, args, &StyleArgs::default())
    }

    /// Draw a button, letting `overrides` win over its stored style
    pub fn button_with<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        args: &ButtonArgs,
        overrides: &StyleArgs,
    ) -> ButtonResponse {
        let Some(input) = self.frame else {
            if !self.warnings.button_outside_frame {
                log::warn!("Buttons drawn outside begin_frame/end_frame will not work properly");
                self.warnings.button_outside_frame = true;
            }
            return ButtonResponse::default();
        };

        let index = self
            .reconciler
            .bind(&mut self.registry, args.name.as_deref(), args.area);
        let Some(bound) = self.registry.current_mut(index) else {
            return ButtonResponse::default();
        };
        let identity = &mut bound.identity;

        let style = StyleResolver::new(&self.settings).resolve(
            overrides,
            &args.style,
            &mut identity.infos,
            &mut self.generator,
        );

        let interactive = identity.is_named() || self.settings.interactive_unnamed;
        let primary_down = input.mouse_button_down(self.settings.primary_button);
        let hovered = interactive && args.area.contains(input.mouse_position());
        let state = identity.state.next(hovered, primary_down, style.shadow);
        let shadow_area = identity.shadow_cache.get(args.area, style.shadow_offset);

        let drawn = RenderDispatcher::draw(
            canvas,
            &RenderRequest {
                style: &style,
                state,
                shape: &args.shape,
                area: args.area,
                shadow_area,
                text: args.text.as_deref(),
            },
        );

        let pressed = hovered && primary_down;
        let clicked = hovered && !primary_down && identity.pressed;
        if clicked {
            log::debug!("Button {:?} clicked", identity.name());
        }
        identity.hovered = hovered;
        identity.pressed = pressed;
        identity.state = state;

        ButtonResponse {
            state,
            hovered,
            pressed,
            clicked,
            index: Some(index),
            drawn_area: Some(drawn),
        }
    }

    /// Draw a button already bound this frame somewhere else (e.g. an
    /// off-screen recording surface) against different input. Nothing is
    /// registered and the identity's interaction state is left alone.
    pub fn preview<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        name: &str,
        args: &ButtonArgs,
        input: &dyn InputSource,
    ) -> Option<Rect> {
        let bound = self.registry.current_named_mut(name)?;
        let identity = &mut bound.identity;

        let style = StyleResolver::new(&self.settings).resolve(
            &StyleArgs::default(),
            &args.style,
            &mut identity.infos,
            &mut self.generator,
        );
        let hovered = args.area.contains(input.mouse_position());
        let primary_down = input.mouse_button_down(self.settings.primary_button);
        let state = InteractionState::Idle.next(hovered, primary_down, style.shadow);

        Some(RenderDispatcher::draw(
            canvas,
            &RenderRequest {
                style: &style,
                state,
                shape: &args.shape,
                area: args.area,
                shadow_area: args.area.translate(style.shadow_offset),
                text: args.text.as_deref(),
            },
        ))
    }

    /// Identity bound this frame under `name`, else last frame's
    pub fn identity(&self, name: &str) -> Option<&LogicalButtonIdentity> {
        self.registry
            .current_named(name)
            .or_else(|| self.registry.previous_named(name))
            .map(|bound| &bound.identity)
    }

    /// First named button hovered this frame
    pub fn hovered_name(&self) -> Option<&str> {
        self.registry
            .current()
            .iter()
            .filter(|bound| bound.identity.hovered)
            .find_map(|bound| bound.identity.name())
    }

    /// Start recording the button bound this frame as `name`.
    /// Only one button records at a time.
    pub fn start_recording(&mut self, name: &str, now: f32) -> bool {
        if let Some(busy) = self.recording_name() {
            log::debug!("Not recording '{}': '{}' is still recording", name, busy);
            return false;
        }
        match self.registry.current_named_mut(name) {
            Some(bound) => {
                bound.identity.recording = Some(RecordingProgress::start(now));
                log::info!("Recording '{}'", name);
                true
            }
            None => false,
        }
    }

    /// Name of the button currently recording, if any
    pub fn recording_name(&self) -> Option<&str> {
        self.registry
            .current()
            .iter()
            .find(|bound| bound.identity.recording.is_some())
            .and_then(|bound| bound.identity.name())
    }

    pub fn recording_mut(&mut self, name: &str) -> Option<&mut RecordingProgress> {
        self.registry
            .current_named_mut(name)
            .and_then(|bound| bound.identity.recording.as_mut())
    }

    pub fn stop_recording(&mut self, name: &str) -> Option<RecordingProgress> {
        self.registry
            .current_named_mut(name)
            .and_then(|bound| bound.identity.recording.take())
    }
}
