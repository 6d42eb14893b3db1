//! Buffer: A grid of cells.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use super::cell::{Cell, Modifiers, Rgb};

/// A grid of cells.
///
/// The same type backs the persistent ASCII image, each freshly rendered
/// frame, the control panel row and the renderer's screen copies.
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to [`Cell::EMPTY`].
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a mutable reference to the underlying cell slice.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub const fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Set a grapheme at (x, y) with the given style.
    ///
    /// Graphemes that do not fit a single column are drawn as `?`.
    /// Returns `false` if coordinates are out of bounds.
    pub fn set_grapheme(
        &mut self,
        x: u16,
        y: u16,
        grapheme: &str,
        fg: Rgb,
        modifiers: Modifiers,
    ) -> bool {
        let cell = Cell::from_grapheme(grapheme)
            .unwrap_or_else(|| Cell::new('?'))
            .with_fg(fg)
            .with_modifiers(modifiers);
        self.set(x, y, cell)
    }

    /// Write a string starting at (x, y), one grapheme per column,
    /// clipped at the right edge.
    ///
    /// Returns the number of columns written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb) -> u16 {
        let mut col = x;
        for grapheme in unicode_segmentation::UnicodeSegmentation::graphemes(text, true) {
            if col >= self.width {
                break;
            }
            let cell = Cell::from_grapheme(grapheme)
                .unwrap_or_else(|| Cell::new('?'))
                .with_fg(fg)
                .with_bg(bg);
            self.set(col, y, cell);
            col += 1;
        }
        col - x
    }

    /// Fill a rectangular region with a cell.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                if let Some(idx) = self.index_of(col, row) {
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Clear the entire buffer (fill with empty cells).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Copy `src` into this buffer with its top-left corner at (x, y).
    ///
    /// Whatever falls outside this buffer is clipped.
    pub fn blit(&mut self, src: &Self, x: u16, y: u16) {
        if x >= self.width || y >= self.height {
            return;
        }
        let copy_width = src.width.min(self.width - x) as usize;
        let copy_height = src.height.min(self.height - y) as usize;

        for row in 0..copy_height {
            let src_start = row * (src.width as usize);
            let dst_start = (y as usize + row) * (self.width as usize) + x as usize;
            self.cells[dst_start..dst_start + copy_width]
                .copy_from_slice(&src.cells[src_start..src_start + copy_width]);
        }
    }

    /// Resize the buffer, preserving content where possible.
    ///
    /// New cells are initialized to empty.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut resized = Self::new(new_width, new_height);
        resized.blit(self, 0, 0);
        *self = resized;
    }

    /// Copy content from another buffer of the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Render one row as plain text (no colors).
    pub fn row_text(&self, y: u16) -> String {
        self.rows()
            .nth(y as usize)
            .map(|row| row.iter().map(Cell::grapheme).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
