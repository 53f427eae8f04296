//! Read-only lookup structures loaded once at startup.

pub mod catalog;
pub mod similarity_store;
pub mod title_index;

pub use catalog::Catalog;
pub use similarity_store::SimilarityStore;
pub use title_index::TitleIndex;

use crate::types::{RecError, RecResult};

/// A title index paired with its similarity store. Row `i` of the store
/// belongs to the title at position `i`.
#[derive(Debug, Clone)]
pub struct Model {
    titles: TitleIndex,
    similarity: SimilarityStore,
}

impl Model {
    /// Pair an index with a store of matching dimension.
    pub fn new(titles: TitleIndex, similarity: SimilarityStore) -> RecResult<Self> {
        if titles.len() != similarity.dimension() {
            return Err(RecError::DimensionMismatch {
                expected: titles.len(),
                got: similarity.dimension(),
            });
        }
        Ok(Self { titles, similarity })
    }

    /// Build directly from titles and nested score rows.
    pub fn from_parts(titles: Vec<String>, rows: Vec<Vec<f32>>) -> RecResult<Self> {
        Self::new(
            TitleIndex::from_titles(titles)?,
            SimilarityStore::from_rows(rows)?,
        )
    }

    pub fn titles(&self) -> &TitleIndex {
        &self.titles
    }

    pub fn similarity(&self) -> &SimilarityStore {
        &self.similarity
    }

    /// Number of titles.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the model has no titles.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
