//! Error types for the book-recommender library.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur in the book-recommender library.
#[derive(Error, Debug)]
pub enum RecError {
    /// Invalid magic bytes in file header.
    #[error("Invalid magic bytes in file header")]
    InvalidMagic,

    /// Unsupported format version.
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u32),

    /// A title appears more than once in the title index.
    #[error("Duplicate title in index: {0:?}")]
    DuplicateTitle(String),

    /// Similarity matrix shape does not match the title index.
    #[error("Similarity matrix dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A similarity score is NaN or infinite.
    #[error("Non-finite similarity score at ({row}, {col})")]
    InvalidScore { row: usize, col: usize },

    /// Acceptance threshold outside the 0-100 scale.
    #[error("Acceptance threshold out of range [0, 100]: {0}")]
    InvalidThreshold(u32),

    /// A resolved title is not present in the title index.
    #[error("Resolved title {0:?} is missing from the title index")]
    ResolutionConsistency(String),

    /// Position outside the title index.
    #[error("Title position {0} out of range")]
    PositionOutOfRange(usize),

    /// A startup artifact could not be loaded.
    #[error("Failed to load {artifact} from {}: {source}", .path.display())]
    ArtifactLoad {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: Box<RecError>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Compression error.
    #[error("Compression error: {0}")]
    Compression(String),

    /// CSV parse error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config parse error.
    #[error("Config error: {0}")]
    Config(String),

    /// File is empty or truncated.
    #[error("File is empty or truncated")]
    Truncated,

    /// Corrupt data at a given offset.
    #[error("Corrupt data at offset {0}")]
    Corrupt(u64),
}

impl RecError {
    /// Wrap this error as a startup failure for the named artifact.
    pub fn loading(self, artifact: &'static str, path: impl Into<PathBuf>) -> Self {
        RecError::ArtifactLoad {
            artifact,
            path: path.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for RecError {
    fn from(e: toml::de::Error) -> Self {
        RecError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for RecError {
    fn from(e: toml::ser::Error) -> Self {
        RecError::Config(e.to_string())
    }
}

/// Convenience result type for book-recommender operations.
pub type RecResult<T> = Result<T, RecError>;
