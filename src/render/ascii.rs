//! Frame renderer: camera frame to a grid of green glyphs.

use super::frame::GrayFrame;
use super::ramp::Ramp;
use crate::buffer::{Buffer, Cell, Rgb};
use crate::config::{ConfigError, MatrixConfig};
use image::RgbImage;

/// Turns camera frames into cell buffers the size of the persistent grid.
///
/// The bottom `ticker_rows` rows are left empty for the ticker overlay.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    ramp: Ramp,
    /// One pre-styled cell per ramp entry.
    palette: Vec<Cell>,
    columns: u16,
    rows: u16,
    picture_rows: u16,
}

impl FrameRenderer {
    /// Build a renderer from the grid settings in `config`.
    pub fn new(config: &MatrixConfig) -> Result<Self, ConfigError> {
        let ramp = Ramp::new(&config.ramp).ok_or(ConfigError::EmptyRamp)?;
        let palette = config
            .ramp
            .chars()
            .map(|c| glyph_cell(c, config.glyph_color))
            .collect();

        Ok(Self {
            ramp,
            palette,
            columns: config.columns,
            rows: config.rows,
            picture_rows: config.picture_rows(),
        })
    }

    /// The ramp used for brightness mapping.
    pub const fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    /// Render a camera frame with brightness multiplier `brightness`.
    pub fn render(&self, frame: &RgbImage, brightness: f32) -> Buffer {
        let mut gray = GrayFrame::from_rgb(frame, self.columns, self.picture_rows);
        gray.scale(brightness);
        self.render_gray(&gray)
    }

    /// Render an already downsampled frame.
    ///
    /// Samples outside the picture area are ignored.
    pub fn render_gray(&self, gray: &GrayFrame) -> Buffer {
        let mut buffer = Buffer::new(self.columns, self.rows);
        for y in 0..self.picture_rows.min(gray.height()) {
            for x in 0..self.columns.min(gray.width()) {
                if let Some(sample) = gray.get(x, y) {
                    buffer.set(x, y, self.palette[self.ramp.index_of(sample)]);
                }
            }
        }
        buffer
    }
}

/// A ramp character as a cell. Spaces stay empty so they carry no ink.
fn glyph_cell(c: char, color: Rgb) -> Cell {
    if c == ' ' {
        return Cell::EMPTY;
    }
    let mut utf8 = [0u8; 4];
    Cell::from_grapheme(c.encode_utf8(&mut utf8))
        .unwrap_or_else(|| Cell::new('?'))
        .with_fg(color)
}
