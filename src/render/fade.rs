//! Persistence compositor: phosphor-style trails.
//!
//! Every frame the persistent buffer keeps `decay` of its own ink and takes
//! `1 - decay` from the new rendering, channel by channel:
//!
//! ```text
//! result = previous * decay + new * (1 - decay)
//! ```
//!
//! A cell shows the new glyph wherever the new frame has ink. Where it has
//! none the old glyph stays on screen in its fading color, which is what
//! draws the trail.

use crate::buffer::{Buffer, Cell};

/// Blends each new frame into the persistent buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeCompositor {
    decay: f32,
}

impl FadeCompositor {
    /// Create a compositor keeping `decay` of the previous buffer.
    pub const fn new(decay: f32) -> Self {
        Self { decay }
    }

    /// The share of the previous buffer kept each frame.
    pub const fn decay(&self) -> f32 {
        self.decay
    }

    /// Blend `next` into `persistent` in place.
    ///
    /// Both buffers must have the same dimensions.
    pub fn composite(&self, persistent: &mut Buffer, next: &Buffer) {
        debug_assert_eq!(persistent.width(), next.width());
        debug_assert_eq!(persistent.height(), next.height());

        for (prev, new) in persistent.cells_mut().iter_mut().zip(next.cells()) {
            *prev = self.blend_cell(prev, new);
        }
    }

    /// Blend a single cell.
    pub fn blend_cell(&self, prev: &Cell, new: &Cell) -> Cell {
        let ink = prev.ink().weighted(new.ink(), self.decay);
        if ink.is_black() {
            return Cell::EMPTY;
        }

        let shape = if new.is_blank() { prev } else { new };
        shape
            .with_fg(ink)
            .with_bg(prev.bg().weighted(new.bg(), self.decay))
    }
}
