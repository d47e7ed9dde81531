//! Per-button interaction state

use crate::geometry::{Offset, Rect};

/// Visual interaction state of a logical button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovered,
    /// Hovered with the primary button held; the fill sinks into its shadow
    PressedShadowShifted,
}

impl InteractionState {
    /// State for this frame. Only the current inputs matter, so a button
    /// can go from `Idle` to `PressedShadowShifted` in a single frame.
    pub fn next(self, hovered: bool, primary_down: bool, shadow: bool) -> Self {
        let next = match (hovered, primary_down && shadow) {
            (false, _) => InteractionState::Idle,
            (true, true) => InteractionState::PressedShadowShifted,
            (true, false) => InteractionState::Hovered,
        };
        if next != self {
            log::trace!("Interaction {:?} -> {:?}", self, next);
        }
        next
    }

    /// Whether the active colour / resource applies
    pub fn is_active(self) -> bool {
        !matches!(self, InteractionState::Idle)
    }

    pub fn is_shifted(self) -> bool {
        matches!(self, InteractionState::PressedShadowShifted)
    }
}

/// Single-entry memo of `area + offset`, invalidated when either changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowAreaCache {
    entry: Option<(Rect, Offset, Rect)>,
}

impl ShadowAreaCache {
    pub fn get(&mut self, area: Rect, offset: Offset) -> Rect {
        match self.entry {
            Some((cached_area, cached_offset, shifted))
                if cached_area == area && cached_offset == offset =>
            {
                shifted
            }
            _ => {
                let shifted = area.translate(offset);
                self.entry = Some((area, offset, shifted));
                shifted
            }
        }
    }

    /// Whether the cache currently holds `(area, offset)`
    pub fn holds(&self, area: Rect, offset: Offset) -> bool {
        matches!(self.entry, Some((a, o, _)) if a == area && o == offset)
    }
}
