//! Grayscale frames at grid resolution.

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

/// A grid of brightness samples, one per character cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayFrame {
    width: u16,
    height: u16,
    samples: Vec<u8>,
}

impl GrayFrame {
    /// Wrap raw row-major samples.
    ///
    /// Returns `None` if `samples` does not hold `width * height` values.
    pub fn from_samples(width: u16, height: u16, samples: Vec<u8>) -> Option<Self> {
        (samples.len() == usize::from(width) * usize::from(height)).then_some(Self {
            width,
            height,
            samples,
        })
    }

    /// Convert a color camera frame to grayscale and shrink it to
    /// `columns x rows` by averaging every source pixel that falls into
    /// each cell.
    pub fn from_rgb(frame: &RgbImage, columns: u16, rows: u16) -> Self {
        let gray = imageops::grayscale(frame);
        Self::downsample(&gray, columns, rows)
    }

    /// Resize a grayscale image to `columns x rows`.
    ///
    /// Shrinking averages every source pixel under each cell. When the
    /// source is smaller than the grid in either direction a cell takes the
    /// nearest pixel instead.
    pub fn downsample(gray: &GrayImage, columns: u16, rows: u16) -> Self {
        let (src_w, src_h) = gray.dimensions();
        let (dst_w, dst_h) = (u32::from(columns), u32::from(rows));

        let samples = if src_w == 0 || src_h == 0 {
            vec![0; usize::from(columns) * usize::from(rows)]
        } else if dst_w <= src_w && dst_h <= src_h {
            imageops::thumbnail(gray, dst_w, dst_h).into_raw()
        } else {
            imageops::resize(gray, dst_w, dst_h, FilterType::Nearest).into_raw()
        };

        Self {
            width: columns,
            height: rows,
            samples,
        }
    }

    /// Multiply every sample by `factor`, rounding and saturating to
    /// `0..=255`. Negative factors use their absolute value.
    pub fn scale(&mut self, factor: f32) {
        for sample in &mut self.samples {
            let v = (f32::from(*sample) * factor).abs().round();
            *sample = v.min(255.0) as u8;
        }
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Sample at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.samples[usize::from(y) * usize::from(self.width) + usize::from(x)])
        } else {
            None
        }
    }

    /// All samples in row-major order.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn test_downsample_averages_blocks() {
        // 4x2 image: left half 0, right half 200
        let gray = GrayImage::from_fn(4, 2, |x, _| if x < 2 { Luma([0]) } else { Luma([200]) });
        let frame = GrayFrame::downsample(&gray, 2, 1);
        assert_eq!(frame.samples(), &[0, 200]);
    }

    #[test]
    fn test_downsample_mixed_block() {
        let gray = GrayImage::from_fn(2, 2, |x, y| Luma([if (x + y) % 2 == 0 { 100 } else { 50 }]));
        let frame = GrayFrame::downsample(&gray, 1, 1);
        assert_eq!(frame.samples(), &[75]);
    }

    #[test]
    fn test_upsample_repeats_pixels() {
        let gray = GrayImage::from_pixel(1, 1, Luma([42]));
        let frame = GrayFrame::downsample(&gray, 3, 2);
        assert_eq!(frame.samples(), &[42; 6]);
    }

    #[test]
    fn test_downsample_camera_sized_frame() {
        // 640x480 with a bright right half onto a 4x2 grid
        let gray = GrayImage::from_fn(640, 480, |x, _| Luma([if x < 320 { 20 } else { 220 }]));
        let frame = GrayFrame::downsample(&gray, 4, 2);
        assert_eq!(frame.samples(), &[20, 20, 220, 220, 20, 20, 220, 220]);
    }

    #[test]
    fn test_empty_source_is_black() {
        let frame = GrayFrame::downsample(&GrayImage::new(0, 0), 2, 2);
        assert_eq!(frame.samples(), &[0; 4]);
    }

    #[test]
    fn test_from_rgb_white_and_black() {
        let rgb = RgbImage::from_fn(8, 8, |x, _| {
            if x < 4 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        let frame = GrayFrame::from_rgb(&rgb, 2, 2);
        assert_eq!(frame.samples(), &[0, 255, 0, 255]);
    }

    #[test]
    fn test_scale_saturates_and_rounds() {
        let mut frame = GrayFrame::from_samples(3, 1, vec![100, 200, 250]).unwrap();
        frame.scale(0.7);
        assert_eq!(frame.samples(), &[70, 140, 175]);

        frame.scale(3.0);
        assert_eq!(frame.samples(), &[210, 255, 255]);
    }

    #[test]
    fn test_from_samples_checks_length() {
        assert!(GrayFrame::from_samples(2, 2, vec![0; 3]).is_none());
        let frame = GrayFrame::from_samples(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(frame.get(1, 1), Some(4));
        assert_eq!(frame.get(2, 0), None);
    }
}
