//! Plain data types shared by the parser, the merge and the orchestrator.

use std::cmp::Ordering;
use std::path::PathBuf;

use serde::Serialize;

/// A single `"key" = "value";` entry of a `.strings` file.
///
/// `value` holds the raw bytes found between the value quotes. Escape
/// sequences such as `\"` or `\n` are kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Literal {
    /// The key, as written between the first pair of quotes.
    pub key: String,
    /// The raw value, as written between the second pair of quotes.
    pub value: String,
}

impl Literal {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Literal {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"=\"{}\";", self.key, self.value)
    }
}

/// A destination file paired with the update file it is refreshed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilePair {
    pub destination: PathBuf,
    pub update: PathBuf,
}

impl FilePair {
    pub fn new(destination: impl Into<PathBuf>, update: impl Into<PathBuf>) -> Self {
        FilePair {
            destination: destination.into(),
            update: update.into(),
        }
    }
}

/// Case-insensitive key ordering used for every sorted output.
///
/// Keys differing only by case compare equal, so a stable sort keeps their
/// original relative order.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sorts an unordered key collection for reporting.
///
/// Ties under [`compare_keys`] fall back to byte order so the result does not
/// depend on hash iteration order.
pub fn sorted_keys<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut keys = keys.into_iter().cloned().collect::<Vec<_>>();
    keys.sort_by(|a, b| compare_keys(a, b).then_with(|| a.cmp(b)));
    keys
}
