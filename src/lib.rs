//! screen-locate - find words on screen from OCR output
//!
//! Locates a word or phrase in OCR-recognized screen text, tolerating
//! misrecognitions, homophones and words OCR split or glued together, and
//! returns the screen geometry of the occurrence nearest a reference point.

pub mod config;
pub mod error;
pub mod matching;
pub mod vision;

pub use config::LocatorConfig;
pub use error::{LocateError, LocateResult};
pub use matching::{
    Anchor, HomophoneTable, Matcher, Point, ScoredMatch, ScreenContents, WordLocation, WordMatch,
};
pub use vision::{CapturedFrame, OcrBackend, OcrLine, OcrResult, OcrWord, Reader};
