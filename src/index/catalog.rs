//! Catalog metadata: maps each title to its metadata rows.

use std::collections::HashMap;

use crate::types::CatalogRecord;

/// Maps each title to the metadata rows carrying it, in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    index: HashMap<String, Vec<CatalogRecord>>,
    row_count: usize,
}

impl Catalog {
    /// Create a new, empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rows, preserving their order per title.
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.add_record(record);
        }
        catalog
    }

    /// Append a row.
    pub fn add_record(&mut self, record: CatalogRecord) {
        self.index
            .entry(record.title.clone())
            .or_default()
            .push(record);
        self.row_count += 1;
    }

    /// All rows whose title matches exactly.
    pub fn records(&self, title: &str) -> &[CatalogRecord] {
        self.index
            .get(title)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The row standing in for a title after dedup: the first one seen.
    pub fn representative(&self, title: &str) -> Option<&CatalogRecord> {
        self.records(title).first()
    }

    /// Number of distinct titles.
    pub fn title_count(&self) -> usize {
        self.index.len()
    }

    /// Number of rows, duplicates included.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Whether the catalog has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}
