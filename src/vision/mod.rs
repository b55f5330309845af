//! Vision/OCR Layer
//!
//! Runs an OCR backend over captured frames and maps the recognized words
//! back to screen coordinates. The OCR engine itself lives outside this
//! crate behind the `OcrBackend` trait.

pub mod frame;
pub mod ocr;

pub use frame::CapturedFrame;
pub use ocr::{OcrLine, OcrResult, OcrWord};

use anyhow::Result;
use std::time::Instant;
use tracing::debug;

use crate::config::{LocatorConfig, ReaderConfig};
use crate::matching::{Matcher, Point, ScreenContents};

/// An OCR engine: turns a frame into lines of positioned words.
///
/// Word geometry is reported in the coordinates of the image the engine
/// worked on; `ReaderConfig::margin` and `ReaderConfig::resize_factor`
/// describe how that image relates to the frame it was given.
pub trait OcrBackend: Send + Sync {
    fn run_ocr(&self, frame: &CapturedFrame) -> Result<OcrResult>;
}

/// Square region of `radius` around `point`, clamped to the screen.
///
/// Returned as `(left, top, right, bottom)`.
pub fn nearby_bounds(point: Point, radius: u32, screen_size: (u32, u32)) -> (u32, u32, u32, u32) {
    let radius = i64::from(radius);
    let (x, y) = (i64::from(point.x), i64::from(point.y));
    let (width, height) = (i64::from(screen_size.0), i64::from(screen_size.1));

    let clamp = |value: i64, max: i64| value.clamp(0, max) as u32;
    (
        clamp(x - radius, width),
        clamp(y - radius, height),
        clamp(x + radius, width),
        clamp(y + radius, height),
    )
}

/// Reads on-screen text with one OCR backend.
pub struct Reader<B> {
    backend: B,
    config: ReaderConfig,
    matcher: Matcher,
}

impl<B: OcrBackend> Reader<B> {
    /// Create a reader from a validated configuration
    pub fn new(backend: B, config: &LocatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backend,
            config: config.reader.clone(),
            matcher: config.matcher()?,
        })
    }

    pub fn with_matcher(backend: B, config: ReaderConfig, matcher: Matcher) -> Self {
        Self {
            backend,
            config,
            matcher,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// OCR a frame whose top-left corner sits at `offset` on screen.
    pub fn read_frame(
        &self,
        frame: &CapturedFrame,
        offset: Point,
        screen_coordinates: Point,
    ) -> Result<ScreenContents> {
        let start = Instant::now();

        let raw = self.backend.run_ocr(frame)?;
        let result = raw.adjusted(
            f64::from(self.config.margin),
            f64::from(self.config.resize_factor),
            offset,
        );

        debug!(
            "OCR of {}x{} frame complete in {:?}: {} lines, {} words",
            frame.width,
            frame.height,
            start.elapsed(),
            result.lines.len(),
            result.word_count()
        );

        Ok(ScreenContents::new(
            result,
            screen_coordinates,
            self.matcher.clone(),
        ))
    }

    /// OCR the part of a full-screen capture around `screen_coordinates`.
    pub fn read_nearby(
        &self,
        screenshot: &CapturedFrame,
        screen_coordinates: Point,
    ) -> Result<ScreenContents> {
        let bounds = nearby_bounds(
            screen_coordinates,
            self.config.radius,
            screenshot.dimensions(),
        );
        let region = screenshot.crop(bounds)?;
        let offset = Point::new(bounds.0 as i32, bounds.1 as i32);
        self.read_frame(&region, offset, screen_coordinates)
    }
}
