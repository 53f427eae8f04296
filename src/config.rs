//! Recommender configuration with TOML persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{RecError, RecResult, DEFAULT_THRESHOLD, DEFAULT_TOP_K};

/// Complete recommender configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Artifact locations
    pub artifacts: ArtifactConfig,

    /// Fuzzy matching and neighbor selection
    pub matching: MatchingConfig,

    /// External link derivation
    pub links: LinkConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// .bsim model (title index + similarity matrix)
    pub model: PathBuf,

    /// Catalog metadata CSV
    pub catalog: PathBuf,

    /// Popular books CSV (optional)
    pub popular: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Fuzzy scores must be strictly above this (0-100)
    pub threshold: u32,

    /// Neighbors per recommendation
    pub top_k: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Purchase search URL; `{isbn}` is replaced by the raw ISBN
    pub purchase_template: String,

    /// Free-ebook search URL; `{title}` is replaced by the joined title
    pub free_ebook_template: String,

    /// Replaces spaces in the title
    pub title_separator: String,

    /// Used for both links when they cannot be derived
    pub placeholder: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("artifacts/model.bsim"),
            catalog: PathBuf::from("artifacts/books.csv"),
            popular: None,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD as u32,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            purchase_template: "https://www.amazon.com/s?k={isbn}".to_string(),
            free_ebook_template: "https://www.gutenberg.org/ebooks/search/?query={title}"
                .to_string(),
            title_separator: "+".to_string(),
            placeholder: "#".to_string(),
        }
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactConfig::default(),
            matching: MatchingConfig::default(),
            links: LinkConfig::default(),
        }
    }
}

impl RecommenderConfig {
    /// Load from TOML file
    pub fn load(path: &Path) -> RecResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to TOML file
    pub fn save(&self, path: &Path) -> RecResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bookrec")
            .join("config.toml")
    }

    /// Load from the default location, or use defaults when no file exists there
    pub fn load_or_default() -> RecResult<Self> {
        Self::load_or_default_from(&Self::default_path())
    }

    /// Load `path`, falling back to defaults only when the file is absent.
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default_from(path: &Path) -> RecResult<Self> {
        match Self::load(path) {
            Err(RecError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => {
                log::warn!("Rejecting config at {}: {}", path.display(), e);
                Err(e)
            }
            ok => ok,
        }
    }

    /// Reject values outside their valid ranges
    pub fn validate(&self) -> RecResult<()> {
        if self.matching.threshold > 100 {
            return Err(RecError::InvalidThreshold(self.matching.threshold));
        }
        Ok(())
    }

    /// Threshold on the 0-100 scale, validated
    pub fn threshold(&self) -> RecResult<u8> {
        self.validate()?;
        Ok(self.matching.threshold as u8)
    }
}
