//! Cell: One character of the ASCII grid.
//!
//! # Memory Layout
//!
//! A cell is 12 bytes and holds exactly one single-column grapheme:
//!
//! ```text
//! ┌─────────────┬─────┬───────────┬───────────┬─────┐
//! │  grapheme   │ len │    fg     │    bg     │ mod │
//! │  [u8; 4]    │ u8  │  [u8; 3]  │  [u8; 3]  │ u8  │
//! └─────────────┴─────┴───────────┴───────────┴─────┘
//! ```
//!
//! Graphemes that need more than four UTF-8 bytes, or that do not occupy
//! exactly one terminal column, are rejected by [`Cell::from_grapheme`].
//! The grid is addressed one cell per column, so anything wider would
//! shift every glyph to its right.

use bitflags::bitflags;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure green, the default glyph ink.
    pub const GREEN: Self = Self::new(0, 255, 0);

    /// Whether every channel is zero.
    #[inline]
    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Weighted sum `self * keep + other * (1 - keep)`, per channel.
    ///
    /// Each channel is rounded to the nearest integer and saturated to
    /// `0..=255`.
    #[inline]
    #[must_use]
    pub fn weighted(self, other: Self, keep: f32) -> Self {
        let mix = |a: u8, b: u8| -> u8 {
            let v = f32::from(a).mul_add(keep, f32::from(b) * (1.0 - keep));
            v.round().clamp(0.0, 255.0) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// The ticker draws its bright line bold and its shadow line dim.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single grid cell: one glyph plus its colors and style.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Inline grapheme storage (UTF-8 bytes).
    grapheme: [u8; 4],
    /// Byte length of the grapheme (1-4).
    grapheme_len: u8,
    /// Foreground color.
    fg: Rgb,
    /// Background color.
    bg: Rgb,
    /// Text modifiers.
    modifiers: Modifiers,
}

const _: () = assert!(
    std::mem::size_of::<Cell>() == 12,
    "Cell must stay 12 bytes"
);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell: a space, black ink on black.
    pub const EMPTY: Self = Self {
        grapheme: [b' ', 0, 0, 0],
        grapheme_len: 1,
        fg: Rgb::BLACK,
        bg: Rgb::BLACK,
        modifiers: Modifiers::empty(),
    };

    /// Create a new cell with a single ASCII character and white ink.
    ///
    /// Non-ASCII input is replaced by `?`; use [`Cell::from_grapheme`]
    /// for anything else.
    #[inline]
    pub const fn new(c: char) -> Self {
        let byte = if c.is_ascii() { c as u8 } else { b'?' };
        Self {
            grapheme: [byte, 0, 0, 0],
            grapheme_len: 1,
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            modifiers: Modifiers::empty(),
        }
    }

    /// Create a cell from a grapheme string.
    ///
    /// Returns `None` if the grapheme is longer than four bytes or does not
    /// occupy exactly one terminal column.
    pub fn from_grapheme(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 {
            return None;
        }
        if unicode_width::UnicodeWidthStr::width(s) != 1 {
            return None;
        }

        let mut grapheme = [0u8; 4];
        grapheme[..bytes.len()].copy_from_slice(bytes);

        Some(Self {
            grapheme,
            grapheme_len: bytes.len() as u8,
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            modifiers: Modifiers::empty(),
        })
    }

    /// Get the grapheme as a string slice.
    #[inline]
    pub fn grapheme(&self) -> &str {
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).unwrap_or(" ")
    }

    /// Whether the cell draws nothing visible.
    ///
    /// A space, or any glyph inked in black on black.
    #[inline]
    pub fn is_blank(&self) -> bool {
        (self.grapheme_len == 1 && self.grapheme[0] == b' ') || self.fg.is_black()
    }

    /// The color this cell contributes to the picture: its foreground, or
    /// black when it is blank.
    #[inline]
    pub fn ink(&self) -> Rgb {
        if self.is_blank() { Rgb::BLACK } else { self.fg }
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Get the modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("grapheme", &self.grapheme())
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 12);
    }

    #[test]
    fn test_rgb_weighted_matches_fade_formula() {
        // 0.8 * 0 + 0.2 * 255 = 51
        let out = Rgb::BLACK.weighted(Rgb::GREEN, 0.8);
        assert_eq!(out, Rgb::new(0, 51, 0));

        let out = Rgb::new(100, 200, 50).weighted(Rgb::new(0, 0, 250), 0.5);
        assert_eq!(out, Rgb::new(50, 100, 150));
    }

    #[test]
    fn test_rgb_weighted_extremes() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.weighted(b, 1.0), a);
        assert_eq!(a.weighted(b, 0.0), b);
    }

    #[test]
    fn test_cell_new_ascii() {
        let cell = Cell::new('A');
        assert_eq!(cell.grapheme(), "A");
        assert!(!cell.is_blank());
    }

    #[test]
    fn test_cell_new_non_ascii_is_replaced() {
        assert_eq!(Cell::new('é').grapheme(), "?");
    }

    #[test]
    fn test_cell_from_grapheme() {
        assert_eq!(Cell::from_grapheme("é").map(|c| c.grapheme().to_string()), Some("é".into()));
        // Double-width CJK does not fit one column
        assert!(Cell::from_grapheme("日").is_none());
        // ZWJ sequence is longer than four bytes
        assert!(Cell::from_grapheme("👨‍👩‍👧").is_none());
        assert!(Cell::from_grapheme("").is_none());
    }

    #[test]
    fn test_cell_blank_and_ink() {
        assert!(Cell::EMPTY.is_blank());
        assert_eq!(Cell::EMPTY.ink(), Rgb::BLACK);

        let black_ink = Cell::new('#').with_fg(Rgb::BLACK);
        assert!(black_ink.is_blank());

        let green = Cell::new('#').with_fg(Rgb::GREEN);
        assert_eq!(green.ink(), Rgb::GREEN);

        let space = Cell::new(' ').with_fg(Rgb::GREEN);
        assert_eq!(space.ink(), Rgb::BLACK);
    }

    #[test]
    fn test_cell_equality() {
        let a = Cell::new('A').with_fg(Rgb::new(255, 0, 0));
        let b = Cell::new('A').with_fg(Rgb::new(255, 0, 0));
        let c = Cell::new('A').with_fg(Rgb::new(0, 255, 0));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cell_builder_pattern() {
        let cell = Cell::new('X')
            .with_fg(Rgb::new(255, 0, 0))
            .with_bg(Rgb::new(0, 0, 255))
            .with_modifiers(Modifiers::BOLD);

        assert_eq!(cell.fg(), Rgb::new(255, 0, 0));
        assert_eq!(cell.bg(), Rgb::new(0, 0, 255));
        assert!(cell.modifiers().contains(Modifiers::BOLD));
        assert!(!cell.modifiers().contains(Modifiers::DIM));
    }
}
