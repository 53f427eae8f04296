//! JSON hand-off from the offline pipeline: titles plus a score matrix.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::index::Model;
use crate::types::error::RecResult;

/// Titles and score rows as exported by the offline pipeline, e.g.
/// `{"titles": ["A", "B"], "scores": [[1.0, 0.2], [0.2, 1.0]]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSource {
    pub titles: Vec<String>,
    pub scores: Vec<Vec<f32>>,
}

impl ModelSource {
    /// Parse a source file.
    pub fn read_from_file(path: &Path) -> RecResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Validate into a model.
    pub fn into_model(self) -> RecResult<Model> {
        Model::from_parts(self.titles, self.scores)
    }
}
