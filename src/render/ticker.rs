//! News ticker overlay.
//!
//! The ticker scrolls in pixel units: each glyph is `char_width` pixels
//! wide and the text enters from the right edge of the grid. Drawing maps a
//! pixel position back to the cell column that contains it.

use crate::buffer::{Buffer, Modifiers, Rgb};
use crate::config::MatrixConfig;
use unicode_segmentation::UnicodeSegmentation;

/// Scrolling headline strip in the bottom rows of the grid.
#[derive(Debug, Clone)]
pub struct TickerOverlay {
    /// Scroll offset in pixels, always below `text_width + width_px`.
    scroll: u32,
    step: u32,
    char_width: u32,
    width_px: u32,
    row: u16,
    color: Rgb,
    shadow_color: Rgb,
}

impl TickerOverlay {
    /// Create a ticker for the grid described by `config`.
    pub const fn new(config: &MatrixConfig) -> Self {
        Self {
            scroll: 0,
            step: config.scroll_step,
            char_width: config.char_width,
            width_px: config.width_px(),
            row: config.picture_rows(),
            color: config.ticker_color,
            shadow_color: config.ticker_shadow_color,
        }
    }

    /// Current scroll offset in pixels.
    pub const fn scroll_position(&self) -> u32 {
        self.scroll
    }

    /// Draw `text` into `buffer` at the current offset, then advance.
    ///
    /// Each visible glyph is drawn bold on the first ticker row and dim on
    /// the row below it, when that row exists. Returns the number of glyphs
    /// drawn on the first row.
    pub fn overlay(&mut self, buffer: &mut Buffer, text: &str) -> usize {
        let mut drawn = 0;
        let mut glyphs = 0u32;
        let start_x = i64::from(self.width_px) - i64::from(self.scroll);

        for (i, grapheme) in text.graphemes(true).enumerate() {
            glyphs += 1;
            let x = start_x + i as i64 * i64::from(self.char_width);
            if x < 0 {
                continue;
            }
            if x >= i64::from(self.width_px) {
                // Everything after this is off the right edge; just count it.
                continue;
            }

            let col = (x / i64::from(self.char_width)) as u16;
            if buffer.set_grapheme(col, self.row, grapheme, self.color, Modifiers::BOLD) {
                drawn += 1;
            }
            buffer.set_grapheme(
                col,
                self.row.saturating_add(1),
                grapheme,
                self.shadow_color,
                Modifiers::DIM,
            );
        }

        self.advance(glyphs.saturating_mul(self.char_width));
        drawn
    }

    /// Step the scroll offset, wrapping at `text_width + width_px`.
    fn advance(&mut self, text_width: u32) {
        let period = u64::from(text_width) + u64::from(self.width_px);
        self.scroll = ((u64::from(self.scroll) + u64::from(self.step)) % period) as u32;
    }
}
