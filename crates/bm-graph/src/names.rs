//! Location-name search index.
//!
//! Keys are **normalized** names (see [`normalize`]); each key maps to the
//! node ids registered under it, in insertion order.  Keys live in a
//! `BTreeMap`, so prefix enumeration is a single range scan and every
//! enumeration yields keys in ascending lexicographic order.

use std::collections::BTreeMap;
use std::ops::Bound;

use bm_core::NodeId;

/// Reduce a display name to its index key: keep ASCII letters and spaces,
/// drop everything else, lower-case the rest.
///
/// `"Peet's Coffee & Tea"` → `"peets coffee  tea"`.
///
/// The same rule must be applied when building and when querying the index.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Behavioural switches for [`NameIndex`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameIndexConfig {
    /// When `true`, registering an id that is already listed under the same
    /// key is a no-op.  When `false` (the default) the id is appended again
    /// and shows up twice in search results.
    pub dedup_ids: bool,
}

/// Sorted map from normalized name to the nodes carrying it.
#[derive(Clone, Debug, Default)]
pub struct NameIndex {
    keys:   BTreeMap<String, Vec<NodeId>>,
    config: NameIndexConfig,
}

impl NameIndex {
    pub fn new(config: NameIndexConfig) -> Self {
        Self { keys: BTreeMap::new(), config }
    }

    pub fn config(&self) -> NameIndexConfig {
        self.config
    }

    /// Register `id` under an already-normalized `key`.
    ///
    /// Returns `false` when nothing was recorded: the key is empty, or the
    /// index deduplicates and `id` is already listed.
    pub fn insert(&mut self, key: String, id: NodeId) -> bool {
        if key.is_empty() {
            return false;
        }
        let ids = self.keys.entry(key).or_default();
        if self.config.dedup_ids && ids.contains(&id) {
            return false;
        }
        ids.push(id);
        true
    }

    /// Node ids registered under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&[NodeId]> {
        self.keys.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys starting with `prefix`, ascending.  The prefix is matched
    /// literally (it is not normalized).
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.range_from(prefix).map(|(k, _)| k)
    }

    /// All keys matching `pattern`, ascending.  `.` in the pattern matches
    /// any single character; every other character must match exactly, and
    /// the key must have the same length as the pattern.
    pub fn keys_that_match<'a>(&'a self, pattern: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let literal = pattern.find('.').map_or(pattern, |i| &pattern[..i]);
        self.range_from(literal)
            .map(|(k, _)| k)
            .filter(move |k| matches_pattern(k, pattern))
    }

    /// `(key, ids)` pairs whose key starts with `prefix`, ascending.
    pub fn entries_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [NodeId])> + 'a {
        self.range_from(prefix)
    }

    fn range_from<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [NodeId])> + 'a {
        self.keys
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, ids)| (k.as_str(), ids.as_slice()))
    }
}

fn matches_pattern(key: &str, pattern: &str) -> bool {
    let mut key_chars = key.chars();
    for p in pattern.chars() {
        match key_chars.next() {
            Some(k) if p == '.' || p == k => {}
            _ => return false,
        }
    }
    key_chars.next().is_none()
}
