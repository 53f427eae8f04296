//! LZ4 compression of the title block.

use crate::types::error::{RecError, RecResult};

/// Encode titles as `u32 length + UTF-8 bytes` each, then LZ4-compress
/// (size prepended).
pub fn compress_titles(titles: &[String]) -> RecResult<Vec<u8>> {
    let mut raw = Vec::with_capacity(titles.iter().map(|t| t.len() + 4).sum());
    for title in titles {
        let len = u32::try_from(title.len())
            .map_err(|_| RecError::Compression(format!("title too long: {} bytes", title.len())))?;
        raw.extend_from_slice(&len.to_le_bytes());
        raw.extend_from_slice(title.as_bytes());
    }
    Ok(lz4_flex::compress_prepend_size(&raw))
}

/// Decompress a title block back into titles.
pub fn decompress_titles(data: &[u8]) -> RecResult<Vec<String>> {
    let raw = lz4_flex::decompress_size_prepended(data)
        .map_err(|e| RecError::Compression(e.to_string()))?;

    let mut titles = Vec::new();
    let mut pos = 0usize;
    while pos < raw.len() {
        if pos + 4 > raw.len() {
            return Err(RecError::Corrupt(pos as u64));
        }
        let len = crate::types::header::le_u32(&raw[pos..pos + 4]) as usize;
        pos += 4;
        if pos + len > raw.len() {
            return Err(RecError::Corrupt(pos as u64));
        }
        let title = std::str::from_utf8(&raw[pos..pos + len])
            .map_err(|e| RecError::Compression(e.to_string()))?;
        titles.push(title.to_string());
        pos += len;
    }
    Ok(titles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_survive_compression() {
        let titles = vec![
            "Life of Pi".to_string(),
            String::new(),
            "Cien años de soledad".to_string(),
        ];
        let packed = compress_titles(&titles).unwrap();
        assert_eq!(decompress_titles(&packed).unwrap(), titles);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decompress_titles(&[10, 0, 0, 0, 0xF0]).is_err());
    }
}
