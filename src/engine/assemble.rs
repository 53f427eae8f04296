//! Metadata assembly and external link derivation.

use crate::config::LinkConfig;
use crate::index::{Catalog, TitleIndex};
use crate::types::{
    CatalogRecord, ExternalLinks, Neighbor, RecError, RecResult, RecommendationItem,
};

/// Builds recommendation items from catalog rows.
#[derive(Debug, Clone, Default)]
pub struct MetadataAssembler {
    links: LinkConfig,
}

impl MetadataAssembler {
    pub fn new(links: LinkConfig) -> Self {
        Self { links }
    }

    /// Purchase link from the raw ISBN, free-ebook link from the title with
    /// spaces replaced. `None` when the ISBN is missing or malformed or the
    /// title is blank.
    pub fn derive_links(&self, record: &CatalogRecord) -> Option<ExternalLinks> {
        let isbn = record.isbn.as_deref().filter(|i| is_well_formed_isbn(i))?;
        if record.title.trim().is_empty() {
            return None;
        }
        let query = record.title.replace(' ', &self.links.title_separator);
        Some(ExternalLinks {
            purchase: self.links.purchase_template.replace("{isbn}", isbn),
            free_ebook: self.links.free_ebook_template.replace("{title}", &query),
        })
    }

    /// Assemble one item for a neighbor. Link failures fall back to the
    /// placeholder pair; only an out-of-range position is an error.
    pub fn assemble(
        &self,
        titles: &TitleIndex,
        catalog: &Catalog,
        neighbor: Neighbor,
    ) -> RecResult<RecommendationItem> {
        let title = titles
            .title(neighbor.position)
            .ok_or(RecError::PositionOutOfRange(neighbor.position))?;

        let record = catalog.representative(title);
        let links = record.and_then(|r| self.derive_links(r)).unwrap_or_else(|| {
            log::debug!("Using placeholder links for {:?}", title);
            ExternalLinks::placeholder(&self.links.placeholder)
        });

        Ok(RecommendationItem {
            position: neighbor.position,
            score: neighbor.score,
            title: record.map_or(title, |r| r.title.as_str()).to_string(),
            author: record.and_then(|r| r.author.clone()),
            image_url: record.and_then(|r| r.image_url.clone()),
            isbn: record.and_then(|r| r.isbn.clone()),
            purchase_link: links.purchase,
            free_ebook_link: links.free_ebook,
        })
    }

    /// Assemble every neighbor, keeping their order.
    pub fn assemble_all(
        &self,
        titles: &TitleIndex,
        catalog: &Catalog,
        neighbors: &[Neighbor],
    ) -> RecResult<Vec<RecommendationItem>> {
        neighbors
            .iter()
            .map(|&n| self.assemble(titles, catalog, n))
            .collect()
    }
}

/// Non-empty and only ASCII letters, digits or `-`, so it can go into a
/// URL unescaped.
fn is_well_formed_isbn(isbn: &str) -> bool {
    !isbn.is_empty() && isbn.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isbn_shapes() {
        assert!(is_well_formed_isbn("0061122416"));
        assert!(is_well_formed_isbn("080652121X"));
        assert!(is_well_formed_isbn("978-0-06-112241-5"));
        assert!(!is_well_formed_isbn(""));
        assert!(!is_well_formed_isbn("0061 122416"));
        assert!(!is_well_formed_isbn("00611&k=x"));
    }

    #[test]
    fn custom_templates() {
        let assembler = MetadataAssembler::new(LinkConfig {
            purchase_template: "https://shop.example/isbn/{isbn}".into(),
            free_ebook_template: "https://books.example/?q={title}".into(),
            title_separator: "%20".into(),
            placeholder: "about:blank".into(),
        });
        let links = assembler
            .derive_links(&CatalogRecord::new("War and Peace").isbn("123"))
            .unwrap();
        assert_eq!(links.purchase, "https://shop.example/isbn/123");
        assert_eq!(links.free_ebook, "https://books.example/?q=War%20and%20Peace");
    }

    #[test]
    fn blank_title_has_no_links() {
        let assembler = MetadataAssembler::default();
        assert!(assembler
            .derive_links(&CatalogRecord::new("  ").isbn("123"))
            .is_none());
    }
}
