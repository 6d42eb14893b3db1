//! Synthetic test pattern: a bright disc orbiting over moving diagonal
//! bands.

use super::{CaptureError, FrameSource};
use image::{Rgb, RgbImage};
use std::f32::consts::TAU;
use std::thread;
use std::time::{Duration, Instant};

/// Generated frames, paced like a camera.
#[derive(Debug)]
pub struct PatternSource {
    width: u32,
    height: u32,
    frame: u64,
    limit: Option<u64>,
    interval: Duration,
    last: Option<Instant>,
}

impl PatternSource {
    /// A `width x height` pattern delivered at `fps` frames per second.
    /// An `fps` of zero delivers frames as fast as they are asked for.
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        let interval = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / fps
        };
        Self {
            width: width.max(1),
            height: height.max(1),
            frame: 0,
            limit: None,
            interval,
            last: None,
        }
    }

    /// End the stream after `frames` frames.
    #[must_use]
    pub const fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    /// Frames delivered so far.
    pub const fn frames_delivered(&self) -> u64 {
        self.frame
    }

    fn draw(&self) -> RgbImage {
        let t = self.frame as f32 / 30.0;
        let (w, h) = (self.width as f32, self.height as f32);
        let cx = w * 0.5 + (t * 0.7 * TAU / 4.0).cos() * w * 0.3;
        let cy = h * 0.5 + (t * 0.7 * TAU / 4.0).sin() * h * 0.3;
        let radius = h.min(w) * 0.2;
        let shift = self.frame as f32 * 2.0;

        RgbImage::from_fn(self.width, self.height, |x, y| {
            let (fx, fy) = (x as f32, y as f32);
            let band = ((fx + fy + shift) / 24.0 * TAU).sin().mul_add(60.0, 70.0);
            let dist = (fx - cx).hypot(fy - cy);
            let disc = if dist < radius { 255.0 * (1.0 - dist / radius * 0.4) } else { 0.0 };
            let v = band.max(disc).clamp(0.0, 255.0) as u8;
            Rgb([v, v, v])
        })
    }
}

impl FrameSource for PatternSource {
    fn name(&self) -> &str {
        "pattern"
    }

    fn next_frame(&mut self) -> Result<RgbImage, CaptureError> {
        if self.limit.is_some_and(|limit| self.frame >= limit) {
            return Err(CaptureError::EndOfStream);
        }

        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());

        let image = self.draw();
        self.frame += 1;
        Ok(image)
    }
}
