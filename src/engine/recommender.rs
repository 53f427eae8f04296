//! The recommendation pipeline over read-only, load-once artifacts.

use crate::config::RecommenderConfig;
use crate::format::{read_catalog_file, read_popular_file, ModelReader};
use crate::index::{Catalog, Model};
use crate::types::{
    Neighbor, PopularBook, RecResult, RecommendOutcome, RecommendationItem, Resolution,
};

use super::assemble::MetadataAssembler;
use super::neighbors::NeighborSelector;
use super::resolve::FuzzyResolver;

/// Process-wide recommendation state. Built once at startup and shared by
/// reference; every method takes `&self`.
pub struct Recommender {
    model: Model,
    catalog: Catalog,
    popular: Vec<PopularBook>,
    resolver: FuzzyResolver,
    selector: NeighborSelector,
    assembler: MetadataAssembler,
}

impl Recommender {
    /// Build from already-loaded artifacts.
    pub fn new(model: Model, catalog: Catalog, config: &RecommenderConfig) -> RecResult<Self> {
        let uncovered = model
            .titles()
            .titles()
            .iter()
            .filter(|t| catalog.representative(t).is_none())
            .count();
        if uncovered > 0 {
            log::warn!(
                "{} of {} indexed titles have no catalog metadata",
                uncovered,
                model.len()
            );
        }

        Ok(Self {
            model,
            catalog,
            popular: Vec::new(),
            resolver: FuzzyResolver::new(config.threshold()?)?,
            selector: NeighborSelector::new(config.matching.top_k),
            assembler: MetadataAssembler::new(config.links.clone()),
        })
    }

    /// Attach the popular-books listing.
    pub fn with_popular(mut self, popular: Vec<PopularBook>) -> Self {
        self.popular = popular;
        self
    }

    /// Load every configured artifact. Any failure is an `ArtifactLoad`
    /// error naming the artifact and path.
    pub fn load(config: &RecommenderConfig) -> RecResult<Self> {
        config.validate()?;
        let paths = &config.artifacts;

        let model = ModelReader::read_from_file(&paths.model)
            .map_err(|e| e.loading("model", &paths.model))?;
        log::info!(
            "Loaded model {}: {} titles",
            paths.model.display(),
            model.len()
        );

        let catalog = read_catalog_file(&paths.catalog)
            .map_err(|e| e.loading("catalog", &paths.catalog))?;
        log::info!(
            "Loaded catalog {}: {} rows",
            paths.catalog.display(),
            catalog.len()
        );

        let popular = match &paths.popular {
            Some(path) => {
                let books = read_popular_file(path).map_err(|e| e.loading("popular", path))?;
                log::info!("Loaded popular list {}: {} books", path.display(), books.len());
                books
            }
            None => Vec::new(),
        };

        Ok(Self::new(model, catalog, config)?.with_popular(popular))
    }

    /// Fuzzy-resolve free text to a catalog title.
    pub fn resolve(&self, input: &str) -> Resolution {
        self.resolver.resolve(input, self.model.titles())
    }

    /// Ranked neighbors of an exact catalog title.
    pub fn neighbors(&self, title: &str) -> RecResult<Vec<Neighbor>> {
        self.selector.select(&self.model, title)
    }

    /// Assemble the item for one neighbor.
    pub fn assemble(&self, neighbor: Neighbor) -> RecResult<RecommendationItem> {
        self.assembler
            .assemble(self.model.titles(), &self.catalog, neighbor)
    }

    /// Resolve, select, assemble. A no-match is a normal outcome; an `Err`
    /// means the loaded artifacts disagree with each other.
    pub fn recommend(&self, input: &str) -> RecResult<RecommendOutcome> {
        let resolved = match self.resolve(input) {
            Resolution::Resolved(r) => r,
            Resolution::NoMatch { input } => return Ok(RecommendOutcome::NoMatch { input }),
        };

        let neighbors = self.neighbors(&resolved.title)?;
        let items = self
            .assembler
            .assemble_all(self.model.titles(), &self.catalog, &neighbors)?;

        Ok(RecommendOutcome::Recommendations {
            search_term: resolved.title,
            score: resolved.score,
            items,
        })
    }

    /// The first `limit` popular books in file order, or all of them.
    pub fn popular(&self, limit: Option<usize>) -> &[PopularBook] {
        let n = limit.unwrap_or(self.popular.len()).min(self.popular.len());
        &self.popular[..n]
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn threshold(&self) -> u8 {
        self.resolver.threshold()
    }

    pub fn top_k(&self) -> usize {
        self.selector.top_k()
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("titles", &self.model.len())
            .field("catalog_rows", &self.catalog.len())
            .field("popular", &self.popular.len())
            .field("threshold", &self.resolver.threshold())
            .field("top_k", &self.selector.top_k())
            .finish()
    }
}

