//! All data types for the book-recommender library.

pub mod book;
pub mod error;
pub mod header;
pub mod recommendation;

pub use book::{CatalogRecord, PopularBook};
pub use error::{RecError, RecResult};
pub use header::{FileHeader, HEADER_SIZE};
pub use recommendation::{
    ExternalLinks, Neighbor, RecommendOutcome, RecommendationItem, Resolution, ResolvedTitle,
};

/// Magic bytes at the start of every .bsim file.
pub const BSIM_MAGIC: [u8; 4] = [0x42, 0x53, 0x49, 0x4D]; // "BSIM"

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// Fuzzy scores must be strictly greater than this to be accepted.
pub const DEFAULT_THRESHOLD: u8 = 75;

/// Neighbors returned per recommendation.
pub const DEFAULT_TOP_K: usize = 4;

/// Returns the current time as Unix epoch microseconds.
pub fn now_micros() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}
