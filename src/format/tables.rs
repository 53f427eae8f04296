//! CSV readers for the catalog metadata and popular-books tables.

use std::io::Read;
use std::path::Path;

use crate::index::Catalog;
use crate::types::error::RecResult;
use crate::types::{CatalogRecord, PopularBook};

/// Read the catalog metadata table (`ISBN`, `Book-Title`, `Book-Author`,
/// `Image-URL-M`; other columns ignored).
pub fn read_catalog_file(path: &Path) -> RecResult<Catalog> {
    let file = std::fs::File::open(path)?;
    read_catalog(file)
}

/// Read the catalog metadata table from any reader.
pub fn read_catalog(reader: impl Read) -> RecResult<Catalog> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut catalog = Catalog::new();
    for row in rdr.deserialize::<CatalogRecord>() {
        catalog.add_record(row?.normalized());
    }
    log::debug!(
        "Read catalog: {} rows, {} titles",
        catalog.len(),
        catalog.title_count()
    );
    Ok(catalog)
}

/// Read the popular-books table (`Book-Title`, `Book-Author`,
/// `Image-URL-M`, `num_ratings`, `avg_rating`), keeping file order.
pub fn read_popular_file(path: &Path) -> RecResult<Vec<PopularBook>> {
    let file = std::fs::File::open(path)?;
    read_popular(file)
}

/// Read the popular-books table from any reader.
pub fn read_popular(reader: impl Read) -> RecResult<Vec<PopularBook>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut books = Vec::new();
    for row in rdr.deserialize::<PopularBook>() {
        books.push(row?);
    }
    Ok(books)
}
