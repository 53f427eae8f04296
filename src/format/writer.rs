//! Writes .bsim model artifacts.

use std::io::Write;
use std::path::Path;

use crate::index::Model;
use crate::types::error::RecResult;
use crate::types::header::{FileHeader, HEADER_SIZE};
use crate::types::now_micros;

use super::compression::compress_titles;

/// Writer for .bsim binary files.
pub struct ModelWriter {
    created_at: u64,
}

impl ModelWriter {
    /// Create a writer that stamps artifacts with the current time.
    pub fn new() -> Self {
        Self {
            created_at: now_micros(),
        }
    }

    /// Override the creation timestamp (Unix epoch microseconds).
    pub fn created_at(mut self, ts: u64) -> Self {
        self.created_at = ts;
        self
    }

    /// Write a model to a .bsim file.
    pub fn write_to_file(&self, model: &Model, path: &Path) -> RecResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(model, &mut writer)
    }

    /// Write a model to any writer.
    pub fn write_to(&self, model: &Model, writer: &mut impl Write) -> RecResult<()> {
        let title_block = compress_titles(model.titles().titles())?;
        let scores = model.similarity().as_flat();

        let title_block_offset = HEADER_SIZE;
        let title_block_length = title_block.len() as u64;
        let matrix_offset = title_block_offset + title_block_length;

        let mut header = FileHeader::new(model.len() as u32, self.created_at);
        header.title_block_offset = title_block_offset;
        header.title_block_length = title_block_length;
        header.matrix_offset = matrix_offset;
        header.matrix_length = (scores.len() * 4) as u64;
        header.write_to(writer)?;

        writer.write_all(&title_block)?;
        for &score in scores {
            writer.write_all(&score.to_le_bytes())?;
        }

        writer.flush()?;
        log::debug!(
            "Wrote model: {} titles, {} byte title block",
            model.len(),
            title_block_length
        );
        Ok(())
    }
}

impl Default for ModelWriter {
    fn default() -> Self {
        Self::new()
    }
}
