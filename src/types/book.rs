//! Catalog metadata rows and popular-book entries.

use serde::{Deserialize, Serialize};

/// One row of catalog metadata. Several rows may share a title
/// (different editions or ISBNs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Title, matched against the title index by exact equality.
    #[serde(rename = "Book-Title")]
    pub title: String,
    /// Author name.
    #[serde(rename = "Book-Author", default)]
    pub author: Option<String>,
    /// Medium-size cover image URL.
    #[serde(rename = "Image-URL-M", default)]
    pub image_url: Option<String>,
    /// ISBN as found in the source table (not validated on load).
    #[serde(rename = "ISBN", default)]
    pub isbn: Option<String>,
}

impl CatalogRecord {
    /// Create a record with only the title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            image_url: None,
            isbn: None,
        }
    }

    /// Set the author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the cover image URL.
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the ISBN.
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Trim optional fields and turn blank ones into `None`. The title is
    /// kept as-is for exact-equality lookups.
    pub(crate) fn normalized(self) -> Self {
        Self {
            title: self.title,
            author: non_blank(self.author),
            image_url: non_blank(self.image_url),
            isbn: non_blank(self.isbn),
        }
    }
}

/// An entry of the most-rated books listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularBook {
    #[serde(rename = "Book-Title")]
    pub title: String,
    #[serde(rename = "Book-Author", default)]
    pub author: Option<String>,
    #[serde(rename = "Image-URL-M", default)]
    pub image_url: Option<String>,
    /// Number of ratings the book received.
    pub num_ratings: u32,
    /// Mean rating.
    pub avg_rating: f32,
}

fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_optional_fields_only() {
        let record = CatalogRecord::new(" Life of Pi ")
            .author("  Yann Martel ")
            .isbn("   ")
            .normalized();
        assert_eq!(record.title, " Life of Pi ");
        assert_eq!(record.author.as_deref(), Some("Yann Martel"));
        assert_eq!(record.isbn, None);
        assert_eq!(record.image_url, None);
    }
}
