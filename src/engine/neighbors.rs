//! Top-k neighbor selection from the similarity store.

use crate::index::Model;
use crate::types::{Neighbor, RecError, RecResult, DEFAULT_TOP_K};

/// Ranks a title's similarity row and returns its closest other titles.
#[derive(Debug, Clone, Copy)]
pub struct NeighborSelector {
    top_k: usize,
}

impl NeighborSelector {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Neighbors of `title`, highest score first, ties by lower position.
    /// The title itself is never returned.
    pub fn select(&self, model: &Model, title: &str) -> RecResult<Vec<Neighbor>> {
        let position = model.titles().position(title).ok_or_else(|| {
            log::error!("Resolved title {:?} not found in title index", title);
            RecError::ResolutionConsistency(title.to_string())
        })?;
        let row = model
            .similarity()
            .row(position)
            .ok_or(RecError::PositionOutOfRange(position))?;

        let mut ranked: Vec<Neighbor> = row
            .iter()
            .enumerate()
            .map(|(col, &score)| Neighbor {
                position: col,
                score,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.position.cmp(&b.position))
        });

        if let Some(first) = ranked.first() {
            if first.position != position {
                log::warn!(
                    "Self-similarity of {:?} is not its top score ({} outranks it)",
                    title,
                    first.position
                );
            }
        }

        Ok(ranked
            .into_iter()
            .filter(|n| n.position != position)
            .take(self.top_k)
            .collect())
    }
}

impl Default for NeighborSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::from_parts(
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec![
                vec![1.0, 0.5, 0.5, 0.9],
                vec![0.5, 1.0, 0.2, 0.1],
                vec![0.5, 0.2, 1.0, 0.3],
                vec![0.9, 0.1, 0.3, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn ties_resolve_to_lower_position() {
        let got = NeighborSelector::new(3).select(&model(), "A").unwrap();
        let positions: Vec<usize> = got.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![3, 1, 2]);
    }

    #[test]
    fn k_larger_than_catalog() {
        let got = NeighborSelector::new(10).select(&model(), "B").unwrap();
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn unknown_title_is_consistency_error() {
        let err = NeighborSelector::default().select(&model(), "Z").unwrap_err();
        assert!(matches!(err, RecError::ResolutionConsistency(t) if t == "Z"));
    }

    #[test]
    fn self_excluded_even_when_outranked() {
        let m = Model::from_parts(
            vec!["A".into(), "B".into()],
            vec![vec![0.5, 0.9], vec![0.9, 1.0]],
        )
        .unwrap();
        let got = NeighborSelector::new(4).select(&m, "A").unwrap();
        assert_eq!(got, vec![Neighbor { position: 1, score: 0.9 }]);
    }

    #[test]
    fn single_title_has_no_neighbors() {
        let m = Model::from_parts(vec!["Only".into()], vec![vec![1.0]]).unwrap();
        assert!(NeighborSelector::default().select(&m, "Only").unwrap().is_empty());
    }
}
