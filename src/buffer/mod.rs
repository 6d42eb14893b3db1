//! Buffer module: Core data structures for the cell grid.
//!
//! This module contains:
//! - [`Cell`]: One glyph with its colors and style
//! - [`Buffer`]: A row-major grid of cells
//! - [`Rgb`]: True-color representation
//! - [`Modifiers`]: Text style bitflags
//! - [`diff`]: Diffing engine for generating minimal ANSI sequences

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Cell, Modifiers, Rgb};
pub use buffer::Buffer;
