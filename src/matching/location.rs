//! On-screen locations of matched words

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LocateError;

/// A screen point in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Where to place the cursor relative to a matched word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Left edge, vertically centered
    Before,
    /// Center of the bounding box
    Middle,
    /// Right edge, vertically centered
    After,
}

impl FromStr for Anchor {
    type Err = LocateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(Anchor::Before),
            "middle" => Ok(Anchor::Middle),
            "after" => Ok(Anchor::After),
            other => Err(LocateError::InvalidAnchor(other.to_string())),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Anchor::Before => "before",
            Anchor::Middle => "middle",
            Anchor::After => "after",
        };
        f.write_str(name)
    }
}

/// Location of a subword on screen.
///
/// The box is the one of the recognized word the subword was cut from;
/// OCR engines report geometry per word, not per glyph. The char offsets
/// record where in that word the subword sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLocation {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub left_char_offset: usize,
    pub right_char_offset: usize,
    pub text: String,
}

impl WordLocation {
    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    pub fn middle_x(&self) -> i32 {
        (f64::from(self.left) + f64::from(self.width) / 2.0) as i32
    }

    pub fn middle_y(&self) -> i32 {
        (f64::from(self.top) + f64::from(self.height) / 2.0) as i32
    }

    pub fn start_coordinates(&self) -> Point {
        Point::new(self.left, self.middle_y())
    }

    pub fn middle_coordinates(&self) -> Point {
        Point::new(self.middle_x(), self.middle_y())
    }

    pub fn end_coordinates(&self) -> Point {
        Point::new(self.right(), self.middle_y())
    }

    /// Anchor point for cursor placement
    pub fn coordinates(&self, anchor: Anchor) -> Point {
        match anchor {
            Anchor::Before => self.start_coordinates(),
            Anchor::Middle => self.middle_coordinates(),
            Anchor::After => self.end_coordinates(),
        }
    }
}
