//! Frame data structures for captured screen content

use anyhow::{Context, Result};
use image::RgbaImage;
use std::time::Instant;

/// A captured frame from the screen
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Create a new captured frame
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height)
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// View the pixels as an image buffer
    pub fn to_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).with_context(|| {
            format!(
                "Frame data ({} bytes) does not fit {}x{} RGBA",
                self.data.len(),
                self.width,
                self.height
            )
        })
    }

    /// Copy out the region `(left, top, right, bottom)`.
    ///
    /// The region is clamped to the frame. The timestamp is kept.
    pub fn crop(&self, bounds: (u32, u32, u32, u32)) -> Result<CapturedFrame> {
        let (left, top, right, bottom) = bounds;
        let left = left.min(self.width);
        let top = top.min(self.height);
        let width = right.min(self.width).saturating_sub(left);
        let height = bottom.min(self.height).saturating_sub(top);

        let image = self.to_image()?;
        let cropped = image::imageops::crop_imm(&image, left, top, width, height).to_image();

        Ok(CapturedFrame {
            timestamp: self.timestamp,
            ..Self::from_image(cropped)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> CapturedFrame {
        let image = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        CapturedFrame::from_image(image)
    }

    #[test]
    fn test_dimensions() {
        let frame = gradient(8, 4);
        assert_eq!(frame.dimensions(), (8, 4));
        assert_eq!(frame.data.len(), 8 * 4 * 4);
    }

    #[test]
    fn test_crop() {
        let frame = gradient(10, 10);
        let cropped = frame.crop((2, 3, 6, 8)).unwrap();
        assert_eq!(cropped.dimensions(), (4, 5));
        assert_eq!(cropped.timestamp, frame.timestamp);

        let image = cropped.to_image().unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([2, 3, 0, 255]));
    }

    #[test]
    fn test_crop_clamped_to_frame() {
        let frame = gradient(10, 10);
        let cropped = frame.crop((5, 5, 50, 50)).unwrap();
        assert_eq!(cropped.dimensions(), (5, 5));
    }

    #[test]
    fn test_mismatched_data_is_an_error() {
        let frame = CapturedFrame::new(vec![0; 7], 2, 2);
        assert!(frame.to_image().is_err());
    }
}
