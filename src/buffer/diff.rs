//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the displayed and next screen buffers row by row
//! 2. Emit escape sequences for changed cells only
//! 3. Skip cursor moves between adjacent writes
//! 4. Track color/modifier state to avoid redundant SGR sequences
//!
//! All output is accumulated in a single buffer and flushed with one syscall.
//! A full-screen ASCII feed changes most cells every frame, so color
//! tracking does most of the saving here: neighbouring glyphs of one
//! brightness share an ink.

use super::{Buffer, Cell, Modifiers, Rgb};
use std::io::Write;

/// Terminal state as last written by the diff.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    /// Where the terminal cursor is, if known.
    cursor: Option<(u16, u16)>,
    /// Last emitted foreground color.
    fg: Option<Rgb>,
    /// Last emitted background color.
    bg: Option<Rgb>,
    /// Last emitted modifiers.
    modifiers: Option<Modifiers>,
}

impl DiffState {
    /// A state that assumes nothing about the terminal.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything (e.g., after a full screen clear).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Forget colors and modifiers after an SGR reset.
    const fn forget_style(&mut self) {
        self.fg = None;
        self.bg = None;
        self.modifiers = None;
    }
}

/// Counters from one diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Append the sequences that turn `current` into `next` to `output`.
///
/// Both buffers must have the same dimensions.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    for (y, (old_row, new_row)) in current.rows().zip(next.rows()).enumerate() {
        if old_row == new_row {
            continue;
        }
        let y = y as u16;
        for (x, (old, new)) in old_row.iter().zip(new_row).enumerate() {
            if old == new {
                continue;
            }
            let x = x as u16;
            result.cells_changed += 1;

            if state.cursor != Some((x, y)) {
                emit_cursor_move(output, x, y);
                result.cursor_moves += 1;
            }
            result.color_changes += emit_style(output, new, state);
            output.extend_from_slice(new.grapheme().as_bytes());
            state.cursor = Some((x.saturating_add(1), y));
        }
    }
    result
}

/// Generate a full redraw sequence (no diffing).
///
/// Used for the first frame and after a resize, when the terminal contents
/// are unknown. Leaves the cursor hidden and the style reset.
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>) {
    output.extend_from_slice(b"\x1b[?25l\x1b[2J\x1b[H");

    let mut state = DiffState::new();
    for (y, row) in buffer.rows().enumerate() {
        if y > 0 {
            output.extend_from_slice(b"\r\n");
        }
        for cell in row {
            emit_style(output, cell, &mut state);
            output.extend_from_slice(cell.grapheme().as_bytes());
        }
    }

    output.extend_from_slice(b"\x1b[0m");
}

/// Bring the terminal's SGR state in line with `cell`. Returns the number
/// of color sequences written.
///
/// Dropping a modifier needs a full reset, which also forgets colors.
fn emit_style(output: &mut Vec<u8>, cell: &Cell, state: &mut DiffState) -> usize {
    let mods = cell.modifiers();
    let active = state.modifiers.unwrap_or_default();
    if !active.difference(mods).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.forget_style();
    }

    let mut colors = 0;
    if state.fg != Some(cell.fg()) {
        emit_color(output, 38, cell.fg());
        state.fg = Some(cell.fg());
        colors += 1;
    }
    if state.bg != Some(cell.bg()) {
        emit_color(output, 48, cell.bg());
        state.bg = Some(cell.bg());
        colors += 1;
    }
    if state.modifiers != Some(mods) {
        let added = mods.difference(state.modifiers.unwrap_or_default());
        if added.contains(Modifiers::BOLD) {
            output.extend_from_slice(b"\x1b[1m");
        }
        if added.contains(Modifiers::DIM) {
            output.extend_from_slice(b"\x1b[2m");
        }
        state.modifiers = Some(mods);
    }
    colors
}

/// Emit a cursor move sequence.
///
/// - `\x1b[H` for home (1,1)
/// - `\x1b[{row}H` for column 1
/// - `\x1b[{row};{col}H` otherwise
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    // ANSI uses 1-indexed positions
    let row = y + 1;
    let col = x + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

/// Emit a true-color sequence; `layer` is 38 for foreground, 48 for
/// background.
#[inline]
fn emit_color(output: &mut Vec<u8>, layer: u8, color: Rgb) {
    let _ = write!(output, "\x1b[{layer};2;{};{};{}m", color.r, color.g, color.b);
}
