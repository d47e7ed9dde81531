//! Turning a resolved style and state into draw calls

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::state::InteractionState;
use crate::style::{Rounding, StyleRecord};

/// Handle to an image the host knows how to blit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageResource(pub String);

impl ImageResource {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

/// What the button's body is drawn with
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ShapeKind {
    /// Rounded rectangle filled with the style colours
    #[default]
    Rect,
    /// Image per state; rounding does not apply
    Image {
        inactive: ImageResource,
        active: ImageResource,
    },
}

/// Drawing primitives the host provides
pub trait Canvas {
    fn draw_rounded_rect(&mut self, color: Color, area: Rect, rounding: &Rounding);

    /// `stroke_width == 0` fills the circle
    fn draw_circle(&mut self, color: Color, center: Point, radius: u32, stroke_width: u32);

    fn blit(&mut self, image: &ImageResource, area: Rect);

    fn draw_text(&mut self, text: &str, area: Rect);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RoundedRect {
        color: Color,
        area: Rect,
        rounding: Rounding,
    },
    Circle {
        color: Color,
        center: Point,
        radius: u32,
        stroke_width: u32,
    },
    Blit {
        image: ImageResource,
        area: Rect,
    },
    Text {
        text: String,
        area: Rect,
    },
}

/// Canvas that records calls instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Replay onto another canvas
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::RoundedRect {
                    color,
                    area,
                    rounding,
                } => canvas.draw_rounded_rect(*color, *area, rounding),
                DrawCommand::Circle {
                    color,
                    center,
                    radius,
                    stroke_width,
                } => canvas.draw_circle(*color, *center, *radius, *stroke_width),
                DrawCommand::Blit { image, area } => canvas.blit(image, *area),
                DrawCommand::Text { text, area } => canvas.draw_text(text, *area),
            }
        }
    }
}

impl Canvas for CommandList {
    fn draw_rounded_rect(&mut self, color: Color, area: Rect, rounding: &Rounding) {
        self.commands.push(DrawCommand::RoundedRect {
            color,
            area,
            rounding: *rounding,
        });
    }

    fn draw_circle(&mut self, color: Color, center: Point, radius: u32, stroke_width: u32) {
        self.commands.push(DrawCommand::Circle {
            color,
            center,
            radius,
            stroke_width,
        });
    }

    fn blit(&mut self, image: &ImageResource, area: Rect) {
        self.commands.push(DrawCommand::Blit {
            image: image.clone(),
            area,
        });
    }

    fn draw_text(&mut self, text: &str, area: Rect) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            area,
        });
    }
}

/// Everything one button draw needs
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub style: &'a StyleRecord,
    pub state: InteractionState,
    pub shape: &'a ShapeKind,
    /// Nominal area
    pub area: Rect,
    /// `area` moved by the shadow offset
    pub shadow_area: Rect,
    pub text: Option<&'a str>,
}

/// Issues shadow, body and text in that order
pub struct RenderDispatcher;

impl RenderDispatcher {
    /// Returns the area the body and text were drawn at
    pub fn draw<C: Canvas + ?Sized>(canvas: &mut C, request: &RenderRequest<'_>) -> Rect {
        let style = request.style;

        if style.shadow {
            canvas.draw_rounded_rect(style.shadow_color, request.shadow_area, &style.rounding);
        }

        let body = if request.state.is_shifted() {
            request.shadow_area
        } else {
            request.area
        };

        match request.shape {
            ShapeKind::Rect => {
                let color = style.fill_color(request.state.is_active());
                canvas.draw_rounded_rect(color, body, &style.rounding);
            }
            ShapeKind::Image { inactive, active } => {
                let image = if request.state.is_active() && !style.disabled.is_disabled() {
                    active
                } else {
                    inactive
                };
                canvas.blit(image, body);
            }
        }

        if let Some(text) = request.text {
            canvas.draw_text(text, body);
        }

        log::trace!("Drew button at {:?} ({:?})", body, request.state);
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DisabledState;
    use crate::geometry::Offset;

    fn style(shadow: bool) -> StyleRecord {
        StyleRecord {
            inactive: Color::GRAY,
            active: Color::BLUE,
            disabled: DisabledState::Enabled,
            shadow,
            shadow_color: Color::rgba(0, 0, 0, 50),
            shadow_offset: Offset::new(2, 2),
            rounding: Rounding {
                radius: Some(4),
                ..Default::default()
            },
        }
    }

    fn draw(style: &StyleRecord, state: InteractionState, shape: &ShapeKind) -> Vec<DrawCommand> {
        let area = Rect::new(10, 10, 80, 24);
        let mut canvas = CommandList::new();
        RenderDispatcher::draw(
            &mut canvas,
            &RenderRequest {
                style,
                state,
                shape,
                area,
                shadow_area: area.translate(style.shadow_offset),
                text: Some("Save"),
            },
        );
        canvas.take()
    }

    #[test]
    fn test_shadow_then_body_then_text() {
        let style = style(true);
        let commands = draw(&style, InteractionState::Hovered, &ShapeKind::Rect);

        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            DrawCommand::RoundedRect {
                color: style.shadow_color,
                area: Rect::new(12, 12, 80, 24),
                rounding: style.rounding,
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::RoundedRect {
                color: Color::BLUE,
                area: Rect::new(10, 10, 80, 24),
                rounding: style.rounding,
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::Text {
                text: "Save".into(),
                area: Rect::new(10, 10, 80, 24),
            }
        );
    }

    #[test]
    fn test_pressed_body_and_text_shift() {
        let commands = draw(&style(true), InteractionState::PressedShadowShifted, &ShapeKind::Rect);
        let shifted = Rect::new(12, 12, 80, 24);

        assert!(matches!(commands[0], DrawCommand::RoundedRect { area, .. } if area == shifted));
        assert!(matches!(commands[1], DrawCommand::RoundedRect { area, color, .. }
            if area == shifted && color == Color::BLUE));
        assert!(matches!(&commands[2], DrawCommand::Text { area, .. } if *area == shifted));
    }

    #[test]
    fn test_idle_without_shadow() {
        let commands = draw(&style(false), InteractionState::Idle, &ShapeKind::Rect);
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::RoundedRect { color, area, .. }
            if color == Color::GRAY && area == Rect::new(10, 10, 80, 24)));
    }

    #[test]
    fn test_idle_still_draws_enabled_shadow() {
        let commands = draw(&style(true), InteractionState::Idle, &ShapeKind::Rect);
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[1], DrawCommand::RoundedRect { area, .. }
            if area == Rect::new(10, 10, 80, 24)));
    }

    #[test]
    fn test_image_shape_picks_resource() {
        let shape = ShapeKind::Image {
            inactive: ImageResource::new("idle.png"),
            active: ImageResource::new("hover.png"),
        };
        let commands = draw(&style(false), InteractionState::Hovered, &shape);
        assert_eq!(
            commands[0],
            DrawCommand::Blit {
                image: ImageResource::new("hover.png"),
                area: Rect::new(10, 10, 80, 24),
            }
        );

        let mut disabled = style(false);
        disabled.disabled = DisabledState::Disabled;
        let commands = draw(&disabled, InteractionState::Hovered, &shape);
        assert!(matches!(&commands[0], DrawCommand::Blit { image, .. } if image.key() == "idle.png"));
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let commands = draw(&style(true), InteractionState::Hovered, &ShapeKind::Rect);
        let mut source = CommandList::new();
        for command in &commands {
            if let DrawCommand::RoundedRect { color, area, rounding } = command {
                source.draw_rounded_rect(*color, *area, rounding);
            }
        }
        let mut target = CommandList::new();
        source.replay(&mut target);
        assert_eq!(target.commands(), source.commands());
    }
}
