//! OCR result data model
//!
//! Produced by an OCR backend, consumed read-only by the matcher.

use serde::{Deserialize, Serialize};

use crate::matching::Point;

/// A recognized word and its bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    /// Recognized text
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl OcrWord {
    pub fn new(text: impl Into<String>, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            width,
            height,
        }
    }
}

/// Words of one line, left to right
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    pub words: Vec<OcrWord>,
}

impl OcrLine {
    pub fn new(words: Vec<OcrWord>) -> Self {
        Self { words }
    }
}

/// Lines of recognized text, top to bottom
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    pub lines: Vec<OcrLine>,
}

impl OcrResult {
    pub fn new(lines: Vec<OcrLine>) -> Self {
        Self { lines }
    }

    /// Total number of recognized words
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| line.words.len()).sum()
    }

    /// Plain text: words separated by spaces, one line per OCR line.
    pub fn as_string(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            let words: Vec<&str> = line.words.iter().map(|w| w.text.as_str()).collect();
            text.push_str(&words.join(" "));
            text.push('\n');
        }
        text
    }

    /// Map geometry from preprocessed-image space back to screen space.
    ///
    /// Undoes a white `margin` padded around the image and an upscaling by
    /// `resize_factor`, then shifts by `offset` (the origin of the captured
    /// region on screen).
    pub fn adjusted(&self, margin: f64, resize_factor: f64, offset: Point) -> OcrResult {
        let lines = self
            .lines
            .iter()
            .map(|line| OcrLine {
                words: line
                    .words
                    .iter()
                    .map(|word| OcrWord {
                        text: word.text.clone(),
                        left: (word.left - margin) / resize_factor + f64::from(offset.x),
                        top: (word.top - margin) / resize_factor + f64::from(offset.y),
                        width: word.width / resize_factor,
                        height: word.height / resize_factor,
                    })
                    .collect(),
            })
            .collect();

        OcrResult { lines }
    }
}
