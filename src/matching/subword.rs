//! Subword segmentation
//!
//! OCR engines frequently glue short words together ("to2", "HelloWorld") or
//! misread "OK" as "0K". Splitting each recognized word into subwords lets the
//! scorer compare those pieces individually. The same segmentation is applied
//! to the target phrase so both sides line up.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // First matching alternative wins at each position:
    // "0k" as a whole word, an uppercase run, a capitalized or lowercase word
    // (apostrophes included), then any single character.
    static ref SUBWORD_PATTERN: Regex =
        Regex::new(r"(?s)\b0[Kk]\b|[A-Z][A-Z]+|[A-Za-z'][a-z']*|.").unwrap();
}

/// A piece of a recognized word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subword<'a> {
    /// Text of this piece, borrowed from the parent word
    pub text: &'a str,
    /// Characters of the parent word preceding this piece
    pub left_char_offset: usize,
    /// Characters of the parent word following this piece
    pub right_char_offset: usize,
}

/// Lazy iterator over the subwords of one word, in reading order.
pub struct Subwords<'a> {
    matches: regex::Matches<'static, 'a>,
    consumed: usize,
    total: usize,
}

impl<'a> Iterator for Subwords<'a> {
    type Item = Subword<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.matches.next()?.as_str();
        let len = text.chars().count();
        let left_char_offset = self.consumed;
        self.consumed += len;

        Some(Subword {
            text,
            left_char_offset,
            right_char_offset: self.total - self.consumed,
        })
    }
}

/// Split a word into subwords.
///
/// The pieces never overlap and concatenate back to `word` exactly.
pub fn subwords(word: &str) -> Subwords<'_> {
    Subwords {
        matches: SUBWORD_PATTERN.find_iter(word),
        consumed: 0,
        total: word.chars().count(),
    }
}
