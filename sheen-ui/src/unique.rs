//! Unique colour requests and their per-identity memo
//!
//! A [`UniqueColor`] is a *request*: "give this button a colour of its own".
//! The first time a logical button asks for one in a given [`StyleSlot`], the
//! shared [`ColorGenerator`] hands out a [`ColorAssignment`]; the assignment is
//! stored in the identity's [`ColorMemo`] so every later frame gets the same
//! colour back.

use std::collections::HashMap;

use thiserror::Error;

use crate::color::{Color, ColorSpec};

/// Conjugate of the golden ratio; stepping hues by it keeps neighbours apart
const GOLDEN_RATIO_CONJUGATE: f32 = 0.618_034;

#[derive(Error, Debug, PartialEq)]
pub enum ColorError {
    #[error("Unique colour palette must contain at least one colour")]
    EmptyPalette,
}

/// Style slot a colour assignment is remembered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSlot {
    Inactive,
    Active,
    Disabled,
    Shadow,
    SelfInactive,
    SelfActive,
    SelfDisabled,
    SelfShadow,
}

/// Opaque token handed out by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAssignment {
    sequence: u32,
}

impl ColorAssignment {
    /// Position in the generator's sequence, as a hue in 0.0..1.0
    fn hue(&self) -> f32 {
        (self.sequence as f32 * GOLDEN_RATIO_CONJUGATE).fract()
    }

    /// Stable pseudo-random bits for this assignment (splitmix32)
    fn bits(&self, salt: u32) -> u32 {
        let mut z = self
            .sequence
            .wrapping_mul(0x9E37_79B9)
            .wrapping_add(salt.wrapping_mul(0x85EB_CA6B));
        z = (z ^ (z >> 16)).wrapping_mul(0x7FEB_352D);
        z = (z ^ (z >> 15)).wrapping_mul(0x846C_A68B);
        z ^ (z >> 16)
    }
}

/// A request for a colour unique to one button
#[derive(Debug, Clone, PartialEq)]
pub enum UniqueColor {
    /// Evenly spread hues at a fixed saturation and value
    Hue {
        saturation: f32,
        value: f32,
        alpha: u8,
    },
    /// Cycle through a fixed palette
    Palette(Vec<Color>),
    /// Jitter each channel of `base` by up to `spread`
    Variant { base: Color, spread: u8 },
}

impl UniqueColor {
    /// Bright, saturated hues
    pub fn hue() -> Self {
        Self::Hue {
            saturation: 0.65,
            value: 0.9,
            alpha: 255,
        }
    }

    /// Palette request; an empty palette is rejected up front
    pub fn palette(colors: Vec<Color>) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        Ok(Self::Palette(colors))
    }

    pub fn variant(base: Color, spread: u8) -> Self {
        Self::Variant { base, spread }
    }

    /// Concrete colour for an assignment
    pub fn resolve(&self, assignment: &ColorAssignment) -> Color {
        match self {
            Self::Hue {
                saturation,
                value,
                alpha,
            } => Color::from_hsv(assignment.hue(), *saturation, *value, *alpha),
            Self::Palette(colors) => {
                // Constructed through `palette`, but the variant is public
                if colors.is_empty() {
                    return Color::BLACK;
                }
                colors[assignment.sequence as usize % colors.len()]
            }
            Self::Variant { base, spread } => {
                let jitter = |channel: u8, salt: u32| {
                    let range = 2 * *spread as u32 + 1;
                    let delta = (assignment.bits(salt) % range) as i32 - *spread as i32;
                    (channel as i32 + delta).clamp(0, 255) as u8
                };
                Color::rgba(jitter(base.r, 1), jitter(base.g, 2), jitter(base.b, 3), base.a)
            }
        }
    }
}

/// Shared, reproducible source of colour assignments
#[derive(Debug, Clone, Default)]
pub struct ColorGenerator {
    seed: u32,
    next: u32,
}

impl ColorGenerator {
    /// Start the sequence at `seed`; equal seeds give equal runs
    pub fn new(seed: u32) -> Self {
        Self { seed, next: seed }
    }

    pub fn allocate(&mut self) -> ColorAssignment {
        let assignment = ColorAssignment {
            sequence: self.next,
        };
        self.next = self.next.wrapping_add(1);
        assignment
    }

    /// Number of assignments handed out so far
    pub fn allocated(&self) -> u32 {
        self.next.wrapping_sub(self.seed)
    }
}

/// Per-identity memo of colour assignments
pub type ColorMemo = HashMap<StyleSlot, ColorAssignment>;

/// Turns colour arguments into concrete colours for one identity
pub struct UniqueColorAssigner<'a> {
    generator: &'a mut ColorGenerator,
    memo: &'a mut ColorMemo,
}

impl<'a> UniqueColorAssigner<'a> {
    pub fn new(generator: &'a mut ColorGenerator, memo: &'a mut ColorMemo) -> Self {
        Self { generator, memo }
    }

    /// Literal colours pass through; unique requests allocate at most once per slot
    pub fn color_for(&mut self, slot: StyleSlot, spec: &ColorSpec) -> Color {
        match spec {
            ColorSpec::Literal(color) => *color,
            ColorSpec::Unique(unique) => {
                let generator = &mut *self.generator;
                let assignment = *self.memo.entry(slot).or_insert_with(|| {
                    let assignment = generator.allocate();
                    log::trace!("Allocated unique colour {:?} for slot {:?}", assignment, slot);
                    assignment
                });
                unique.resolve(&assignment)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_passes_through() {
        let mut generator = ColorGenerator::default();
        let mut memo = ColorMemo::new();
        let mut assigner = UniqueColorAssigner::new(&mut generator, &mut memo);

        let color = assigner.color_for(StyleSlot::Inactive, &ColorSpec::Literal(Color::GRAY));
        assert_eq!(color, Color::GRAY);
        assert!(memo.is_empty());
        assert_eq!(generator.allocated(), 0);
    }

    #[test]
    fn test_unique_is_idempotent() {
        let mut generator = ColorGenerator::default();
        let mut memo = ColorMemo::new();
        let spec = ColorSpec::Unique(UniqueColor::hue());

        let mut assigner = UniqueColorAssigner::new(&mut generator, &mut memo);
        let first = assigner.color_for(StyleSlot::Active, &spec);
        let second = assigner.color_for(StyleSlot::Active, &spec);

        assert_eq!(first, second);
        assert_eq!(generator.allocated(), 1);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_slots_allocate_separately() {
        let mut generator = ColorGenerator::default();
        let mut memo = ColorMemo::new();
        let spec = ColorSpec::Unique(UniqueColor::hue());

        let mut assigner = UniqueColorAssigner::new(&mut generator, &mut memo);
        let inactive = assigner.color_for(StyleSlot::Inactive, &spec);
        let active = assigner.color_for(StyleSlot::Active, &spec);

        assert_ne!(inactive, active);
        assert_eq!(generator.allocated(), 2);
    }

    #[test]
    fn test_memo_survives_generator_progress() {
        let mut generator = ColorGenerator::new(7);
        let mut memo = ColorMemo::new();
        let spec = ColorSpec::Unique(UniqueColor::hue());

        let first = UniqueColorAssigner::new(&mut generator, &mut memo).color_for(StyleSlot::Shadow, &spec);
        for _ in 0..10 {
            generator.allocate();
        }
        let again = UniqueColorAssigner::new(&mut generator, &mut memo).color_for(StyleSlot::Shadow, &spec);
        assert_eq!(first, again);
    }

    #[test]
    fn test_allocated_counts_from_seed() {
        let mut generator = ColorGenerator::new(7);
        assert_eq!(generator.allocated(), 0);
        generator.allocate();
        generator.allocate();
        assert_eq!(generator.allocated(), 2);

        let mut wrapping = ColorGenerator::new(u32::MAX);
        wrapping.allocate();
        assert_eq!(wrapping.allocated(), 1);
    }

    #[test]
    fn test_same_seed_reproduces() {
        let spec = ColorSpec::Unique(UniqueColor::hue());
        let run = |seed| {
            let mut generator = ColorGenerator::new(seed);
            let mut memo = ColorMemo::new();
            UniqueColorAssigner::new(&mut generator, &mut memo).color_for(StyleSlot::Inactive, &spec)
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(UniqueColor::palette(vec![]), Err(ColorError::EmptyPalette));
    }

    #[test]
    fn test_palette_cycles() {
        let palette = UniqueColor::palette(vec![Color::BLACK, Color::WHITE]).unwrap();
        let mut generator = ColorGenerator::default();
        let a = palette.resolve(&generator.allocate());
        let b = palette.resolve(&generator.allocate());
        let c = palette.resolve(&generator.allocate());
        assert_eq!((a, b, c), (Color::BLACK, Color::WHITE, Color::BLACK));
    }

    #[test]
    fn test_variant_stays_within_spread() {
        let base = Color::rgba(100, 150, 200, 42);
        let variant = UniqueColor::variant(base, 10);
        let mut generator = ColorGenerator::default();
        for _ in 0..50 {
            let color = variant.resolve(&generator.allocate());
            assert!((90..=110).contains(&color.r));
            assert!((140..=160).contains(&color.g));
            assert!((190..=210).contains(&color.b));
            assert_eq!(color.a, 42);
        }
    }
}
