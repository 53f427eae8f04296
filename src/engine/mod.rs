//! Request-time operations: resolve, select neighbors, assemble metadata.

pub mod assemble;
pub mod neighbors;
pub mod recommender;
pub mod resolve;

pub use assemble::MetadataAssembler;
pub use neighbors::NeighborSelector;
pub use recommender::Recommender;
pub use resolve::{ratio, FuzzyResolver};
