//! Per-request values produced by the pipeline.

use serde::Serialize;

/// A title the fuzzy resolver accepted, with its 0-100 match score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTitle {
    pub title: String,
    pub score: u8,
}

/// Outcome of fuzzy title resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// A catalog title scored above the acceptance threshold.
    Resolved(ResolvedTitle),
    /// Nothing scored above the threshold; carries the input verbatim.
    NoMatch { input: String },
}

impl Resolution {
    /// The resolved title, if any.
    pub fn resolved(&self) -> Option<&ResolvedTitle> {
        match self {
            Self::Resolved(r) => Some(r),
            Self::NoMatch { .. } => None,
        }
    }
}

/// A ranked neighbor: a title position and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub position: usize,
    pub score: f32,
}

/// Purchase and free-ebook links derived for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLinks {
    pub purchase: String,
    pub free_ebook: String,
}

impl ExternalLinks {
    /// Both links set to the same placeholder.
    pub fn placeholder(placeholder: &str) -> Self {
        Self {
            purchase: placeholder.to_string(),
            free_ebook: placeholder.to_string(),
        }
    }
}

/// A presentation-ready record for one neighbor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationItem {
    /// Position of the neighbor in the title index.
    pub position: usize,
    /// Similarity of the neighbor to the resolved title.
    pub score: f32,
    pub title: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub isbn: Option<String>,
    pub purchase_link: String,
    pub free_ebook_link: String,
}

/// Result of a full recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendOutcome {
    /// The input resolved; items are in descending similarity order.
    Recommendations {
        /// The catalog title actually matched.
        search_term: String,
        /// Fuzzy score of the match.
        score: u8,
        items: Vec<RecommendationItem>,
    },
    /// The input did not resolve to any title.
    NoMatch { input: String },
}

impl RecommendOutcome {
    /// User-facing message for a no-match outcome.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::NoMatch { input } => Some(format!(
                "Sorry, no book found matching '{}'. Please check the spelling or try a different title.",
                input
            )),
            Self::Recommendations { .. } => None,
        }
    }

    /// JSON form of the outcome. A no-match also carries its user-facing
    /// `message`.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let (Some(message), Some(obj)) = (self.message(), value.as_object_mut()) {
            obj.insert("message".to_string(), serde_json::Value::String(message));
        }
        Ok(value)
    }

    /// Recommended items, empty for a no-match outcome.
    pub fn items(&self) -> &[RecommendationItem] {
        match self {
            Self::Recommendations { items, .. } => items,
            Self::NoMatch { .. } => &[],
        }
    }

    /// Whether the input failed to resolve.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}
