//! Similarity store: square matrix of precomputed item-item scores.

use crate::types::{RecError, RecResult};

/// Immutable N×N score matrix, stored row-major. Cell (i, j) is the
/// similarity of title i to title j.
#[derive(Debug, Clone)]
pub struct SimilarityStore {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityStore {
    /// Build from a flat row-major buffer of `dimension * dimension` scores.
    pub fn from_flat(dimension: usize, scores: Vec<f32>) -> RecResult<Self> {
        if scores.len() != dimension * dimension {
            return Err(RecError::DimensionMismatch {
                expected: dimension * dimension,
                got: scores.len(),
            });
        }
        if let Some(i) = scores.iter().position(|s| !s.is_finite()) {
            return Err(RecError::InvalidScore {
                row: i / dimension,
                col: i % dimension,
            });
        }
        Ok(Self { dimension, scores })
    }

    /// Build from nested rows. Every row must be as long as the row count.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> RecResult<Self> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);
        for row in rows {
            if row.len() != dimension {
                return Err(RecError::DimensionMismatch {
                    expected: dimension,
                    got: row.len(),
                });
            }
            scores.extend(row);
        }
        Self::from_flat(dimension, scores)
    }

    /// Row `i`: the similarity of title `i` to every title.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.dimension {
            return None;
        }
        let start = i * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }

    /// Single cell lookup.
    pub fn score(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i).and_then(|r| r.get(j).copied())
    }

    /// Matrix side length.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Flat row-major scores (for serialization).
    pub fn as_flat(&self) -> &[f32] {
        &self.scores
    }
}
