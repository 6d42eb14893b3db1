//! Render pipeline: everything that turns a camera frame into the picture.
//!
//! - [`Ramp`]: brightness to character
//! - [`GrayFrame`]: grayscale samples at grid resolution
//! - [`FrameRenderer`]: frame to a buffer of glyphs
//! - [`FadeCompositor`]: blends each frame into the persistent buffer
//! - [`TickerOverlay`]: the scrolling headline strip
//! - [`FeedbackIntensity`]: decaying brightness boost

mod ascii;
mod fade;
mod feedback;
mod frame;
mod ramp;
mod ticker;

pub use ascii::FrameRenderer;
pub use fade::FadeCompositor;
pub use feedback::FeedbackIntensity;
pub use frame::GrayFrame;
pub use ramp::Ramp;
pub use ticker::TickerOverlay;
