//! File header for .bsim model artifacts.

use std::io::{Read, Write};

use crate::types::error::{RecError, RecResult};
use crate::types::{BSIM_MAGIC, FORMAT_VERSION};

/// Header of a .bsim file. Fixed size: 64 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileHeader {
    /// Magic bytes: [0x42, 0x53, 0x49, 0x4D] ("BSIM").
    pub magic: [u8; 4],
    /// Format version (currently 1).
    pub version: u32,
    /// Number of titles, which is also the matrix side length.
    pub title_count: u32,
    /// When the artifact was packed (Unix epoch microseconds).
    pub created_at: u64,
    /// Byte offset where the compressed title block starts.
    pub title_block_offset: u64,
    /// Length of the compressed title block in bytes.
    pub title_block_length: u64,
    /// Byte offset where the score matrix starts.
    pub matrix_offset: u64,
    /// Length of the score matrix in bytes.
    pub matrix_length: u64,
}

/// The fixed size of a FileHeader on disk: 64 bytes.
pub const HEADER_SIZE: u64 = 64;

impl FileHeader {
    /// Create a new header for `title_count` titles with default magic and version.
    pub fn new(title_count: u32, created_at: u64) -> Self {
        Self {
            magic: BSIM_MAGIC,
            version: FORMAT_VERSION,
            title_count,
            created_at,
            title_block_offset: HEADER_SIZE,
            title_block_length: 0,
            matrix_offset: HEADER_SIZE,
            matrix_length: 0,
        }
    }

    /// Expected matrix length in bytes for this header's title count, or
    /// `None` when it does not fit in a `u64`.
    pub fn expected_matrix_length(&self) -> Option<u64> {
        let n = self.title_count as u64;
        n.checked_mul(n)?.checked_mul(4)
    }

    /// Write this header to the given writer. Writes exactly 64 bytes.
    ///
    /// Layout (all little-endian):
    /// - 0x00..0x04: magic (4 bytes)
    /// - 0x04..0x08: version (u32)
    /// - 0x08..0x0C: title_count (u32)
    /// - 0x0C..0x10: _reserved (u32, written as 0)
    /// - 0x10..0x18: created_at (u64)
    /// - 0x18..0x20: title_block_offset (u64)
    /// - 0x20..0x28: title_block_length (u64)
    /// - 0x28..0x30: matrix_offset (u64)
    /// - 0x30..0x38: matrix_length (u64)
    /// - 0x38..0x40: _reserved (u64, written as 0)
    pub fn write_to(&self, writer: &mut impl Write) -> RecResult<()> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.title_count.to_le_bytes())?;
        writer.write_all(&0u32.to_le_bytes())?; // _reserved
        writer.write_all(&self.created_at.to_le_bytes())?;
        writer.write_all(&self.title_block_offset.to_le_bytes())?;
        writer.write_all(&self.title_block_length.to_le_bytes())?;
        writer.write_all(&self.matrix_offset.to_le_bytes())?;
        writer.write_all(&self.matrix_length.to_le_bytes())?;
        writer.write_all(&0u64.to_le_bytes())?; // _reserved
        Ok(())
    }

    /// Read a header from the given reader. Reads exactly 64 bytes.
    pub fn read_from(reader: &mut impl Read) -> RecResult<Self> {
        let mut buf = [0u8; 64];
        reader.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                RecError::Truncated
            } else {
                RecError::Io(e)
            }
        })?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != BSIM_MAGIC {
            return Err(RecError::InvalidMagic);
        }

        let version = le_u32(&buf[4..8]);
        if version != FORMAT_VERSION {
            return Err(RecError::UnsupportedVersion(version));
        }

        Ok(Self {
            magic,
            version,
            title_count: le_u32(&buf[8..12]),
            // bytes 12..16 are reserved
            created_at: le_u64(&buf[16..24]),
            title_block_offset: le_u64(&buf[24..32]),
            title_block_length: le_u64(&buf[32..40]),
            matrix_offset: le_u64(&buf[40..48]),
            matrix_length: le_u64(&buf[48..56]),
            // bytes 56..64 are reserved
        })
    }
}

pub(crate) fn le_u32(bytes: &[u8]) -> u32 {
    let mut arr = [0u8; 4];
    arr.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(arr)
}

pub(crate) fn le_u64(bytes: &[u8]) -> u64 {
    let mut arr = [0u8; 8];
    arr.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(arr)
}

pub(crate) fn le_f32(bytes: &[u8]) -> f32 {
    let mut arr = [0u8; 4];
    arr.copy_from_slice(&bytes[..4]);
    f32::from_le_bytes(arr)
}
