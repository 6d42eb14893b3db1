//! Frame sources: where the display loop gets its pictures.
//!
//! A [`FrameSource`] hands out color frames until it cannot. Any error is
//! final: the display loop stops and releases the source.
//!
//! Capture handles are not always `Send`, so sources are described by a
//! [`SourceSpec`] and opened on the display thread itself.

#[cfg(feature = "camera")]
mod camera;
mod pattern;

#[cfg(feature = "camera")]
pub use camera::CameraSource;
pub use pattern::PatternSource;

use image::RgbImage;
use thiserror::Error;

/// Why a source stopped producing frames.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The device could not be opened.
    #[error("failed to open camera {index}: {reason}")]
    Open {
        /// Camera index that was requested.
        index: u32,
        /// Backend message.
        reason: String,
    },
    /// Reading or decoding a frame failed.
    #[error("failed to read frame: {0}")]
    Read(String),
    /// The source has no more frames.
    #[error("end of stream")]
    EndOfStream,
    /// Webcam capture was not compiled in.
    #[error("camera capture is not available in this build (enable the `camera` feature)")]
    Unsupported,
}

/// A producer of color frames.
pub trait FrameSource {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<RgbImage, CaptureError>;

    /// Give the device back. Called once when the display loop stops.
    fn release(&mut self) {}
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_frame(&mut self) -> Result<RgbImage, CaptureError> {
        (**self).next_frame()
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// Which source to open, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A local camera by index; 0 is the first camera.
    Camera {
        /// Device index.
        index: u32,
    },
    /// The synthetic test pattern.
    Pattern {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
        /// Delivery rate.
        fps: u32,
        /// Stop after this many frames.
        limit: Option<u64>,
    },
}

impl SourceSpec {
    /// Whether this build can open a camera.
    pub const CAMERA_AVAILABLE: bool = cfg!(feature = "camera");

    /// Open the source. Must be called on the thread that will read it.
    pub fn open(&self) -> Result<Box<dyn FrameSource>, CaptureError> {
        match *self {
            #[cfg(feature = "camera")]
            Self::Camera { index } => Ok(Box::new(CameraSource::open(index)?)),
            #[cfg(not(feature = "camera"))]
            Self::Camera { .. } => Err(CaptureError::Unsupported),
            Self::Pattern {
                width,
                height,
                fps,
                limit,
            } => {
                let source = PatternSource::new(width, height, fps);
                Ok(Box::new(match limit {
                    Some(frames) => source.with_limit(frames),
                    None => source,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_pattern_spec() {
        let spec = SourceSpec::Pattern {
            width: 16,
            height: 8,
            fps: 0,
            limit: Some(1),
        };
        let mut source = spec.open().unwrap();
        assert_eq!(source.next_frame().unwrap().dimensions(), (16, 8));
        assert!(matches!(source.next_frame(), Err(CaptureError::EndOfStream)));
    }

    #[cfg(not(feature = "camera"))]
    #[test]
    fn test_camera_without_feature_is_unsupported() {
        let result = SourceSpec::Camera { index: 0 }.open();
        assert!(matches!(result, Err(CaptureError::Unsupported)));
    }
}
