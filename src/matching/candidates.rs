//! Candidate generation
//!
//! Every subword of a line is a candidate on its own, since OCR may have
//! glued a multi-word target into one token. For multi-word targets every
//! run of consecutive subwords of the target's length is a candidate too.
//! Runs never cross line boundaries.

use std::ops::{Deref, Range};
use std::sync::Arc;

use super::location::WordLocation;
use super::subword::subwords;
use crate::vision::{OcrLine, OcrResult};

/// A contiguous run of subwords within one line
#[derive(Debug, Clone)]
pub struct Candidate {
    line: Arc<[WordLocation]>,
    range: Range<usize>,
}

impl Candidate {
    pub fn words(&self) -> &[WordLocation] {
        &self.line[self.range.clone()]
    }

    pub fn into_vec(self) -> Vec<WordLocation> {
        self.words().to_vec()
    }
}

impl Deref for Candidate {
    type Target = [WordLocation];

    fn deref(&self) -> &Self::Target {
        self.words()
    }
}

/// Subword locations of a line, in reading order
pub fn line_locations(line: &OcrLine) -> impl Iterator<Item = WordLocation> + '_ {
    line.words.iter().flat_map(|word| {
        subwords(&word.text).map(move |subword| WordLocation {
            left: word.left as i32,
            top: word.top as i32,
            width: word.width as i32,
            height: word.height as i32,
            left_char_offset: subword.left_char_offset,
            right_char_offset: subword.right_char_offset,
            text: subword.text.to_string(),
        })
    })
}

/// Lazy candidate stream over a whole OCR result.
///
/// Per line: all single subwords first, then the sliding windows.
pub struct Candidates<'a> {
    lines: std::slice::Iter<'a, OcrLine>,
    length: usize,
    line: Arc<[WordLocation]>,
    next_single: usize,
    next_window: usize,
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.next_single < self.line.len() {
                let start = self.next_single;
                self.next_single += 1;
                return Some(Candidate {
                    line: Arc::clone(&self.line),
                    range: start..start + 1,
                });
            }

            if self.length > 1 && self.next_window + self.length <= self.line.len() {
                let start = self.next_window;
                self.next_window += 1;
                return Some(Candidate {
                    line: Arc::clone(&self.line),
                    range: start..start + self.length,
                });
            }

            let line = self.lines.next()?;
            self.line = line_locations(line).collect();
            self.next_single = 0;
            self.next_window = 0;
        }
    }
}

/// Generate candidates for a target of `length` subwords.
pub fn generate_candidates(result: &OcrResult, length: usize) -> Candidates<'_> {
    Candidates {
        lines: result.lines.iter(),
        length,
        line: Arc::from(Vec::new()),
        next_single: 0,
        next_window: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::OcrWord;

    fn line(texts: &[&str], top: f64) -> OcrLine {
        OcrLine::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, text)| OcrWord::new(*text, i as f64 * 50.0, top, 40.0, 20.0))
                .collect(),
        )
    }

    fn texts(candidates: Candidates<'_>) -> Vec<Vec<String>> {
        candidates
            .map(|c| c.iter().map(|w| w.text.clone()).collect())
            .collect()
    }

    #[test]
    fn test_single_length_yields_subwords_only() {
        let result = OcrResult::new(vec![line(&["A", "B"], 0.0)]);
        assert_eq!(
            texts(generate_candidates(&result, 1)),
            vec![vec!["A"], vec!["B"]]
        );
    }

    #[test]
    fn test_sliding_windows() {
        let result = OcrResult::new(vec![line(&["A", "B", "C", "D"], 0.0)]);
        let all = texts(generate_candidates(&result, 2));
        assert_eq!(
            all,
            vec![
                vec!["A"],
                vec!["B"],
                vec!["C"],
                vec!["D"],
                vec!["A", "B"],
                vec!["B", "C"],
                vec!["C", "D"],
            ]
        );
    }

    #[test]
    fn test_windows_do_not_cross_lines() {
        let result = OcrResult::new(vec![line(&["A", "B"], 0.0), line(&["C", "D"], 30.0)]);
        let windows: Vec<_> = texts(generate_candidates(&result, 2))
            .into_iter()
            .filter(|c| c.len() == 2)
            .collect();
        assert_eq!(windows, vec![vec!["A", "B"], vec!["C", "D"]]);
    }

    #[test]
    fn test_window_longer_than_line() {
        let result = OcrResult::new(vec![line(&["A", "B"], 0.0)]);
        assert_eq!(generate_candidates(&result, 3).count(), 2);
    }

    #[test]
    fn test_glued_words_are_split() {
        let result = OcrResult::new(vec![line(&["to2", "Save"], 0.0)]);
        let all = texts(generate_candidates(&result, 2));
        assert!(all.contains(&vec!["to".to_string(), "2".to_string()]));
        assert!(all.contains(&vec!["2".to_string(), "Save".to_string()]));
    }

    #[test]
    fn test_subwords_inherit_parent_box() {
        let result = OcrResult::new(vec![OcrLine::new(vec![OcrWord::new(
            "HelloWorld",
            12.7,
            8.2,
            100.9,
            20.0,
        )])]);
        let locations: Vec<_> = line_locations(&result.lines[0]).collect();
        assert_eq!(locations.len(), 2);
        for loc in &locations {
            assert_eq!((loc.left, loc.top, loc.width, loc.height), (12, 8, 100, 20));
        }
        assert_eq!(locations[0].text, "Hello");
        assert_eq!(locations[0].right_char_offset, 5);
        assert_eq!(locations[1].left_char_offset, 5);
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let result = OcrResult::new(vec![OcrLine::default(), line(&["A"], 30.0)]);
        assert_eq!(texts(generate_candidates(&result, 2)), vec![vec!["A"]]);
    }

    #[test]
    fn test_restartable() {
        let result = OcrResult::new(vec![line(&["A", "B", "C"], 0.0)]);
        assert_eq!(
            texts(generate_candidates(&result, 2)),
            texts(generate_candidates(&result, 2))
        );
    }
}
