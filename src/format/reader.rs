//! Reads .bsim model artifacts into memory.

use std::io::Read;
use std::path::Path;

use crate::index::{Model, SimilarityStore, TitleIndex};
use crate::types::error::{RecError, RecResult};
use crate::types::header::{le_f32, FileHeader, HEADER_SIZE};

use super::compression::decompress_titles;

/// Reader for .bsim binary files.
pub struct ModelReader;

impl ModelReader {
    /// Read a .bsim file into a Model.
    pub fn read_from_file(path: &Path) -> RecResult<Model> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    /// Read from any reader into a Model.
    pub fn read_from(reader: &mut impl Read) -> RecResult<Model> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::parse(&data)
    }

    /// Parse a complete .bsim image.
    pub fn parse(data: &[u8]) -> RecResult<Model> {
        if (data.len() as u64) < HEADER_SIZE {
            return Err(RecError::Truncated);
        }
        let header = FileHeader::read_from(&mut std::io::Cursor::new(&data[..64]))?;

        let titles = read_title_block(&header, data)?;

        let n = header.title_count as usize;
        let matrix = section(data, header.matrix_offset, header.matrix_length)?;
        let scores: Vec<f32> = matrix.chunks_exact(4).map(le_f32).collect();

        Model::new(
            TitleIndex::from_titles(titles)?,
            SimilarityStore::from_flat(n, scores)?,
        )
    }
}

/// Decode the title block and check it against the header.
pub(crate) fn read_title_block(header: &FileHeader, data: &[u8]) -> RecResult<Vec<String>> {
    // Offset 8 is the title count field.
    let expected = header
        .expected_matrix_length()
        .ok_or(RecError::Corrupt(8))?;
    if header.matrix_length != expected {
        return Err(RecError::DimensionMismatch {
            expected: expected as usize,
            got: header.matrix_length as usize,
        });
    }

    let block = section(data, header.title_block_offset, header.title_block_length)?;
    let titles = decompress_titles(block)?;
    if titles.len() != header.title_count as usize {
        return Err(RecError::Corrupt(header.title_block_offset));
    }
    Ok(titles)
}

/// Bounds-checked slice of `len` bytes at `offset`.
pub(crate) fn section(data: &[u8], offset: u64, len: u64) -> RecResult<&[u8]> {
    let start = usize::try_from(offset).map_err(|_| RecError::Corrupt(offset))?;
    let len = usize::try_from(len).map_err(|_| RecError::Corrupt(offset))?;
    let end = start.checked_add(len).ok_or(RecError::Corrupt(offset))?;
    if end > data.len() {
        return Err(RecError::Truncated);
    }
    Ok(&data[start..end])
}
