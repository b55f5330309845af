//! Homophone table
//!
//! Maps a normalized token to the group of tokens treated as interchangeable
//! with it. Built once and shared read-only between queries.

use std::collections::HashMap;
use tracing::debug;

/// Groups included in the default table.
pub const DEFAULT_HOMOPHONES: &[&[&str]] = &[
    // "0k" is no homophone, but OCR produces it for "OK" all the time.
    &["ok", "okay", "0k"],
    &["close", "clothes"],
    &["0", "zero"],
    &["1", "one"],
    &["2", "two", "too", "to"],
    &["3", "three"],
    &["4", "four", "for"],
    &["5", "five"],
    &["6", "six"],
    &["7", "seven"],
    &["8", "eight"],
    &["9", "nine"],
    &[".", "period"],
];

/// Lower-case a token and unify apostrophe styles.
///
/// Never changes the character count: characters whose lowercase form is
/// longer than one character are kept as-is.
pub fn normalize(token: &str) -> String {
    token
        .chars()
        .map(|c| {
            if c == '\u{2019}' {
                return '\'';
            }
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

/// Immutable token -> homophone group index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomophoneTable {
    groups: HashMap<String, Vec<String>>,
}

impl HomophoneTable {
    /// Build a table from equivalence groups of surface forms.
    ///
    /// Every member is normalized and indexed to its whole group. A token
    /// listed in several groups keeps the last one.
    pub fn new<I, G, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = HashMap::new();
        let mut group_count = 0;

        for group in groups {
            let mut members: Vec<String> = Vec::new();
            for member in group {
                let member = normalize(member.as_ref());
                if !members.contains(&member) {
                    members.push(member);
                }
            }
            for member in &members {
                index.insert(member.clone(), members.clone());
            }
            group_count += 1;
        }

        debug!(
            "Built homophone table: {} groups, {} tokens",
            group_count,
            index.len()
        );

        Self { groups: index }
    }

    /// Table with no groups; every token only matches itself.
    pub fn empty() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Homophones of a normalized token, the token itself included.
    pub fn expand<'a>(&'a self, token: &'a str) -> Vec<&'a str> {
        match self.groups.get(token) {
            Some(group) => group.iter().map(String::as_str).collect(),
            None => vec![token],
        }
    }

    /// Number of indexed tokens
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for HomophoneTable {
    fn default() -> Self {
        Self::new(DEFAULT_HOMOPHONES.iter().map(|group| group.iter()))
    }
}
