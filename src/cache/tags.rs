//! Tag Set Module
//!
//! Normalizes the tags an entry is stored under and derives its storage key.

use std::collections::BTreeSet;

/// Separator between tags in a composite key.
const KEY_SEPARATOR: char = '_';
const ESCAPE: char = '\\';

// == Tag Set ==
/// A sorted, deduplicated set of tags.
///
/// Any permutation of the same tags yields an equal `TagSet`, and therefore
/// the same composite key and the same signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Normalizes an arbitrary collection of tags.
    pub fn new<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let unique: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        Self(unique.into_iter().collect())
    }

    /// Returns the tags in normalized order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    // == Composite Key ==
    /// Derives the storage key: escaped tags joined by `_`, then the
    /// cardinality, so `["ab"]` and `["a", "b"]` never share a key.
    pub fn storage_key(&self) -> String {
        let mut key = String::new();
        for tag in &self.0 {
            for ch in tag.chars() {
                if ch == KEY_SEPARATOR || ch == ESCAPE {
                    key.push(ESCAPE);
                }
                key.push(ch);
            }
            key.push(KEY_SEPARATOR);
        }
        key.push_str(&self.0.len().to_string());
        key
    }

    /// Returns true if any tag is shared with `other`.
    pub fn intersects(&self, other: &TagSet) -> bool {
        self.0
            .iter()
            .any(|tag| other.0.binary_search(tag).is_ok())
    }
}

impl<T: Into<String>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<&str> for TagSet {
    fn from(tag: &str) -> Self {
        Self::new([tag])
    }
}

impl From<String> for TagSet {
    fn from(tag: String) -> Self {
        Self::new([tag])
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<Vec<&str>> for TagSet {
    fn from(tags: Vec<&str>) -> Self {
        Self::new(tags)
    }
}

impl From<&[&str]> for TagSet {
    fn from(tags: &[&str]) -> Self {
        Self::new(tags.iter().copied())
    }
}

impl From<&[String]> for TagSet {
    fn from(tags: &[String]) -> Self {
        Self::new(tags.iter().cloned())
    }
}

impl<const N: usize> From<[&str; N]> for TagSet {
    fn from(tags: [&str; N]) -> Self {
        Self::new(tags)
    }
}

impl From<&TagSet> for TagSet {
    fn from(tags: &TagSet) -> Self {
        tags.clone()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
