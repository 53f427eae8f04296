//! Title index: ordered unique titles mapped to matrix positions.

use std::collections::HashMap;

use crate::types::{RecError, RecResult};

/// Ordered, unique list of catalog titles. A title's position is the row
/// and column it occupies in the similarity store.
#[derive(Debug, Clone)]
pub struct TitleIndex {
    titles: Vec<String>,
    /// Lowercased titles, parallel to `titles`.
    folded: Vec<String>,
    positions: HashMap<String, usize>,
}

impl TitleIndex {
    /// Build an index from titles in position order. Rejects duplicates.
    pub fn from_titles(titles: Vec<String>) -> RecResult<Self> {
        let mut positions = HashMap::with_capacity(titles.len());
        for (pos, title) in titles.iter().enumerate() {
            if positions.insert(title.clone(), pos).is_some() {
                return Err(RecError::DuplicateTitle(title.clone()));
            }
        }
        let folded = titles.iter().map(|t| t.to_lowercase()).collect();
        Ok(Self {
            titles,
            folded,
            positions,
        })
    }

    /// Position of a title, by exact string equality.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    /// Title stored at a position.
    pub fn title(&self, position: usize) -> Option<&str> {
        self.titles.get(position).map(|s| s.as_str())
    }

    /// Whether the title is in the index.
    pub fn contains(&self, title: &str) -> bool {
        self.positions.contains_key(title)
    }

    /// All titles in position order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Iterate `(title, lowercased title)` pairs in position order.
    pub fn iter_folded(&self) -> impl Iterator<Item = (&str, &str)> {
        self.titles
            .iter()
            .zip(self.folded.iter())
            .map(|(t, f)| (t.as_str(), f.as_str()))
    }

    /// Number of titles.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
