//! Memory-mapped file access for .bsim files.

use std::path::Path;

use memmap2::Mmap;

use crate::index::{Model, SimilarityStore, TitleIndex};
use crate::types::error::{RecError, RecResult};
use crate::types::header::{le_f32, FileHeader, HEADER_SIZE};

use super::reader::{read_title_block, section};

/// Read-only memory-mapped access to a .bsim file. Titles are decoded on
/// open; score rows are read from the mapping on demand.
pub struct MmapReader {
    mmap: Mmap,
    header: FileHeader,
    titles: TitleIndex,
}

impl MmapReader {
    /// Open a .bsim file for memory-mapped read access.
    pub fn open(path: &Path) -> RecResult<Self> {
        let file = std::fs::File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if (mmap.len() as u64) < HEADER_SIZE {
            return Err(RecError::Truncated);
        }

        let header = FileHeader::read_from(&mut std::io::Cursor::new(&mmap[..64]))?;
        let titles = TitleIndex::from_titles(read_title_block(&header, &mmap)?)?;

        // Fail on open rather than on the first row read.
        section(&mmap, header.matrix_offset, header.matrix_length)?;

        Ok(Self {
            mmap,
            header,
            titles,
        })
    }

    /// Get the file header.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// The decoded title index.
    pub fn titles(&self) -> &TitleIndex {
        &self.titles
    }

    /// Read one score row (O(N) bytes, no full load).
    pub fn read_row(&self, position: usize) -> RecResult<Vec<f32>> {
        let n = self.header.title_count as usize;
        if position >= n {
            return Err(RecError::PositionOutOfRange(position));
        }
        let row_bytes = (n * 4) as u64;
        let offset = self.header.matrix_offset + position as u64 * row_bytes;
        let bytes = section(&self.mmap, offset, row_bytes)?;
        Ok(bytes.chunks_exact(4).map(le_f32).collect())
    }

    /// Read the full model into memory.
    pub fn read_model(&self) -> RecResult<Model> {
        let matrix = section(&self.mmap, self.header.matrix_offset, self.header.matrix_length)?;
        let scores: Vec<f32> = matrix.chunks_exact(4).map(le_f32).collect();
        Model::new(
            self.titles.clone(),
            SimilarityStore::from_flat(self.titles.len(), scores)?,
        )
    }

    /// Size of the mapped file in bytes.
    pub fn file_size(&self) -> usize {
        self.mmap.len()
    }
}
