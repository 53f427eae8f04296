//! Book recommender: fuzzy title resolution over a catalog, followed by
//! nearest-neighbor lookup in a precomputed item-item similarity matrix.
//!
//! Artifacts (the `.bsim` model and the catalog CSV tables) are loaded once
//! into a [`Recommender`], which then answers requests from shared,
//! read-only state.

pub mod cli;
pub mod config;
pub mod engine;
pub mod format;
pub mod index;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::RecommenderConfig;
pub use engine::{ratio, FuzzyResolver, MetadataAssembler, NeighborSelector, Recommender};
pub use format::{MmapReader, ModelReader, ModelSource, ModelWriter};
pub use index::{Catalog, Model, SimilarityStore, TitleIndex};
pub use types::{
    now_micros, CatalogRecord, ExternalLinks, FileHeader, Neighbor, PopularBook, RecError,
    RecResult, RecommendOutcome, RecommendationItem, Resolution, ResolvedTitle,
    DEFAULT_THRESHOLD, DEFAULT_TOP_K,
};
