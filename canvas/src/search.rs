//! Search: text normalization, the SKU lookup table, and the match cursor.
//!
//! Each object's searchable text is built once at load time (label, assigned
//! SKU codes, and the name/category/tags of every code found in the SKU
//! table) and folded with [`normalize_text`]. A query matches an object when
//! every whitespace-separated term is a substring of that text. Matches keep
//! scene order; there is no ranking.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

use crate::doc::{ObjectId, SceneObject, SkuRef};
use crate::layout::SkuRecord;

/// Combining diacritical marks removed after canonical decomposition.
const COMBINING_DIACRITICS: RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Fold text for matching: decompose, drop combining diacritics, lowercase.
///
/// `"Café"` and `"CAFE"` both become `"cafe"`.
#[must_use]
pub fn normalize_text(s: &str) -> String {
    s.nfd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// SKU metadata keyed by code. Built once per layout and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SkuTable {
    records: HashMap<String, SkuRecord>,
}

impl SkuTable {
    /// Index records by code. A later record with the same code wins.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = SkuRecord>) -> Self {
        Self { records: records.into_iter().map(|r| (r.sku.clone(), r)).collect() }
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&SkuRecord> {
        self.records.get(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Build the normalized searchable text for one object.
#[must_use]
pub fn build_search_text(label: Option<&str>, skus: &[SkuRef], table: &SkuTable) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(label) = label {
        parts.push(label);
    }
    for sku in skus {
        parts.push(&sku.code);
        if let Some(rec) = table.get(&sku.code) {
            parts.extend([rec.name.as_str(), rec.category.as_str(), rec.tags.as_str()]);
        }
    }
    normalize_text(&parts.join(" "))
}

/// Split a raw query into normalized terms.
#[must_use]
pub fn query_terms(query: &str) -> Vec<String> {
    normalize_text(query.trim())
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Whether `text` contains every term. An empty term list matches nothing.
#[must_use]
pub fn matches_all(text: &str, terms: &[String]) -> bool {
    !terms.is_empty() && terms.iter().all(|term| text.contains(term.as_str()))
}

/// Position of the cursor within the match list, for "k of n" displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStatus {
    /// 1-based position of the current match, `None` when there are no matches.
    pub position: Option<usize>,
    pub total: usize,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(k) if self.total > 0 => write!(f, "{k} of {}", self.total),
            _ => f.write_str("0 of 0"),
        }
    }
}

/// The current query's matches and the cyclic cursor over them.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    matches: Vec<ObjectId>,
    cursor: Option<usize>,
    highlighted: Option<ObjectId>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the match set with the objects matching `query`.
    ///
    /// The cursor moves to the first match (which becomes highlighted), or
    /// to none when nothing matches. Returns the match count.
    pub fn run<'a>(&mut self, query: &str, objects: impl IntoIterator<Item = &'a SceneObject>) -> usize {
        let terms = query_terms(query);
        self.matches = objects
            .into_iter()
            .filter(|obj| matches_all(&obj.search_text, &terms))
            .map(|obj| obj.id.clone())
            .collect();
        self.cursor = if self.matches.is_empty() { None } else { Some(0) };
        self.highlighted = self.current().cloned();
        self.matches.len()
    }

    /// Advance the cursor cyclically and highlight the new current match.
    pub fn advance(&mut self) -> Option<&ObjectId> {
        if self.matches.is_empty() {
            return None;
        }
        let next = self.cursor.map_or(0, |i| (i + 1) % self.matches.len());
        self.cursor = Some(next);
        self.highlighted = Some(self.matches[next].clone());
        self.matches.get(next)
    }

    /// The match under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&ObjectId> {
        self.cursor.and_then(|i| self.matches.get(i))
    }

    /// Id of the highlighted object, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<&ObjectId> {
        self.highlighted.as_ref()
    }

    #[must_use]
    pub fn matches(&self) -> &[ObjectId] {
        &self.matches
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        SearchStatus { position: self.cursor.map(|i| i + 1), total: self.matches.len() }
    }

    /// Drop matches, cursor, and highlight.
    pub fn clear(&mut self) {
        self.matches.clear();
        self.cursor = None;
        self.highlighted = None;
    }
}
