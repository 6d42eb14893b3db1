//! Webcam capture through `nokhwa`.

use super::{CaptureError, FrameSource};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::{debug, info, warn};

/// A local camera, streaming from the moment it is opened.
pub struct CameraSource {
    camera: Camera,
    label: String,
    streaming: bool,
}

impl CameraSource {
    /// Open camera `index` at its highest frame rate and start streaming.
    pub fn open(index: u32) -> Result<Self, CaptureError> {
        let open_err = |e: nokhwa::NokhwaError| CaptureError::Open {
            index,
            reason: e.to_string(),
        };

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(open_err)?;
        camera.open_stream().map_err(open_err)?;

        let format = camera.camera_format();
        info!(
            index,
            name = %camera.info().human_name(),
            width = format.width(),
            height = format.height(),
            fps = format.frame_rate(),
            "capture:camera opened"
        );

        Ok(Self {
            label: format!("camera{index}"),
            camera,
            streaming: true,
        })
    }
}

impl FrameSource for CameraSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn next_frame(&mut self) -> Result<RgbImage, CaptureError> {
        if !self.streaming {
            return Err(CaptureError::EndOfStream);
        }
        let raw = self
            .camera
            .frame()
            .map_err(|e| CaptureError::Read(e.to_string()))?;
        let decoded = raw
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::Read(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        RgbImage::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| CaptureError::Read(format!("short frame buffer for {width}x{height}")))
    }

    fn release(&mut self) {
        if !self.streaming {
            return;
        }
        self.streaming = false;
        match self.camera.stop_stream() {
            Ok(()) => debug!(camera = %self.label, "capture:camera released"),
            Err(e) => warn!(camera = %self.label, error = %e, "capture:failed to stop stream"),
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.release();
    }
}
