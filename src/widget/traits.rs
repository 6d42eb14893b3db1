//! The `Widget` trait.

use crate::actor::InputEvent;
use crate::buffer::Buffer;
use crate::layout::Rect;

/// A keyboard-driven component drawn into its own region of the screen.
///
/// The main loop feeds it input events and sends its buffer to the
/// renderer whenever it reports a pending redraw.
pub trait Widget {
    /// Region the widget draws into.
    fn bounds(&self) -> Rect;

    /// Draw into `buffer`, touching only cells inside [`Widget::bounds`].
    fn render(&self, buffer: &mut Buffer);

    /// Offer an input event. Returns `true` if the widget used it.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Whether the last render is stale.
    fn needs_redraw(&self) -> bool;

    /// Mark the current state as drawn.
    fn clear_redraw(&mut self);
}
