//! OCR'd contents of a portion of the screen

use super::location::{Anchor, Point, WordLocation};
use super::{Matcher, ScoredMatch, WordMatch};
use crate::error::LocateResult;
use crate::vision::OcrResult;

/// One OCR read together with the point it was taken around.
///
/// Lookups prefer matches near `screen_coordinates`, typically where the
/// cursor or gaze was when the screen was read.
#[derive(Debug, Clone)]
pub struct ScreenContents {
    screen_coordinates: Point,
    result: OcrResult,
    matcher: Matcher,
}

impl ScreenContents {
    pub fn new(result: OcrResult, screen_coordinates: Point, matcher: Matcher) -> Self {
        Self {
            screen_coordinates,
            result,
            matcher,
        }
    }

    pub fn result(&self) -> &OcrResult {
        &self.result
    }

    pub fn screen_coordinates(&self) -> Point {
        self.screen_coordinates
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Contents as plain text, one line per OCR line.
    pub fn as_string(&self) -> String {
        self.result.as_string()
    }

    /// All best-scoring matches, nearest first.
    pub fn find_matches(&self, target: &str) -> LocateResult<Vec<ScoredMatch>> {
        self.matcher
            .find_matches(&self.result, target, self.screen_coordinates)
    }

    /// Location of the nearest instance of the provided words.
    pub fn find_nearest_words(&self, target: &str) -> LocateResult<Option<Vec<WordLocation>>> {
        self.find_nearest_words_near(target, self.screen_coordinates)
    }

    /// Same as `find_nearest_words`, measured from another point.
    pub fn find_nearest_words_near(
        &self,
        target: &str,
        reference: Point,
    ) -> LocateResult<Option<Vec<WordLocation>>> {
        self.matcher.find_nearest_words(&self.result, target, reference)
    }

    /// Location of the nearest instance of the provided word.
    pub fn find_nearest_word(&self, target: &str) -> LocateResult<WordMatch> {
        self.matcher
            .find_nearest_word(&self.result, target, self.screen_coordinates)
    }

    /// Cursor coordinates of the nearest instance of the provided word.
    pub fn find_nearest_word_coordinates(
        &self,
        target: &str,
        anchor: Anchor,
    ) -> LocateResult<Option<Point>> {
        self.find_nearest_word_coordinates_near(target, self.screen_coordinates, anchor)
    }

    /// Same as `find_nearest_word_coordinates`, measured from another point.
    pub fn find_nearest_word_coordinates_near(
        &self,
        target: &str,
        reference: Point,
        anchor: Anchor,
    ) -> LocateResult<Option<Point>> {
        self.matcher
            .find_nearest_word_coordinates(&self.result, target, reference, anchor)
    }
}
