//! Phase 1 tests: data structures + artifact formats.

use book_recommender::format::{read_catalog_file, MmapReader, ModelReader, ModelSource, ModelWriter};
use book_recommender::index::{Model, SimilarityStore, TitleIndex};
use book_recommender::types::error::RecError;
use book_recommender::types::header::{FileHeader, HEADER_SIZE};
use book_recommender::types::{BSIM_MAGIC, FORMAT_VERSION};

use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

// ==================== Helpers ====================

fn sample_model() -> Model {
    Model::from_parts(
        vec![
            "Life of Pi".to_string(),
            "The Alchemist".to_string(),
            "1984".to_string(),
        ],
        vec![
            vec![1.0, 0.8, 0.3],
            vec![0.8, 1.0, 0.1],
            vec![0.3, 0.1, 1.0],
        ],
    )
    .unwrap()
}

fn write_bytes(model: &Model) -> Vec<u8> {
    let mut buf = Vec::new();
    ModelWriter::new()
        .created_at(1_700_000_000_000_000)
        .write_to(model, &mut buf)
        .unwrap();
    buf
}

// ==================== Model Tests ====================

#[test]
fn test_model_dimension_must_match_titles() {
    let titles = TitleIndex::from_titles(vec!["A".into(), "B".into()]).unwrap();
    let store = SimilarityStore::from_rows(vec![vec![1.0]]).unwrap();
    match Model::new(titles, store) {
        Err(RecError::DimensionMismatch { expected, got }) => {
            assert_eq!(expected, 2);
            assert_eq!(got, 1);
        }
        other => panic!("Expected DimensionMismatch, got {:?}", other.map(|m| m.len())),
    }
}

#[test]
fn test_model_rejects_duplicate_titles() {
    let result = Model::from_parts(
        vec!["Dune".into(), "Dune".into()],
        vec![vec![1.0, 0.5], vec![0.5, 1.0]],
    );
    assert!(matches!(result, Err(RecError::DuplicateTitle(_))));
}

#[test]
fn test_store_rows_line_up_with_titles() {
    let model = sample_model();
    let pos = model.titles().position("The Alchemist").unwrap();
    assert_eq!(pos, 1);
    assert_eq!(model.similarity().row(pos), Some(&[0.8f32, 1.0, 0.1][..]));
}

// ==================== File Header Tests ====================

#[test]
fn test_header_write_read_roundtrip() {
    let header = FileHeader {
        magic: BSIM_MAGIC,
        version: FORMAT_VERSION,
        title_count: 42,
        created_at: 123_456,
        title_block_offset: 64,
        title_block_length: 900,
        matrix_offset: 964,
        matrix_length: 42 * 42 * 4,
    };

    let mut buf = Vec::new();
    header.write_to(&mut buf).unwrap();
    assert_eq!(buf.len() as u64, HEADER_SIZE);

    let read = FileHeader::read_from(&mut Cursor::new(&buf)).unwrap();
    assert_eq!(read, header);
}

#[test]
fn test_header_bad_magic() {
    let mut buf = vec![0u8; 64];
    buf[..4].copy_from_slice(b"AMEM");
    let result = FileHeader::read_from(&mut Cursor::new(&buf));
    assert!(matches!(result, Err(RecError::InvalidMagic)));
}

#[test]
fn test_header_unsupported_version() {
    let mut buf = Vec::new();
    FileHeader::new(0, 0).write_to(&mut buf).unwrap();
    buf[4..8].copy_from_slice(&99u32.to_le_bytes());
    let result = FileHeader::read_from(&mut Cursor::new(&buf));
    assert!(matches!(result, Err(RecError::UnsupportedVersion(99))));
}

// ==================== Writer / Reader Tests ====================

#[test]
fn test_write_read_preserves_titles_and_scores() {
    let model = sample_model();
    let bytes = write_bytes(&model);

    let read = ModelReader::read_from(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(read.titles().titles(), model.titles().titles());
    assert_eq!(read.similarity().as_flat(), model.similarity().as_flat());
}

#[test]
fn test_written_header_describes_layout() {
    let bytes = write_bytes(&sample_model());
    let header = FileHeader::read_from(&mut Cursor::new(&bytes[..64])).unwrap();
    assert_eq!(header.title_count, 3);
    assert_eq!(header.created_at, 1_700_000_000_000_000);
    assert_eq!(header.title_block_offset, HEADER_SIZE);
    assert_eq!(
        header.matrix_offset,
        header.title_block_offset + header.title_block_length
    );
    assert_eq!(header.matrix_length, 3 * 3 * 4);
    assert_eq!(bytes.len() as u64, header.matrix_offset + header.matrix_length);
}

#[test]
fn test_empty_model_roundtrip() {
    let model = Model::from_parts(Vec::new(), Vec::new()).unwrap();
    let bytes = write_bytes(&model);
    let read = ModelReader::parse(&bytes).unwrap();
    assert!(read.is_empty());
}

#[test]
fn test_truncated_file() {
    let bytes = write_bytes(&sample_model());
    let result = ModelReader::parse(&bytes[..bytes.len() - 5]);
    assert!(matches!(result, Err(RecError::Truncated)));

    let result = ModelReader::parse(&bytes[..10]);
    assert!(matches!(result, Err(RecError::Truncated)));
}

#[test]
fn test_title_count_mismatch_is_corrupt() {
    let mut bytes = write_bytes(&sample_model());
    // Claim 2 titles while the block holds 3; keep the matrix length consistent.
    bytes[8..12].copy_from_slice(&2u32.to_le_bytes());
    bytes[48..56].copy_from_slice(&16u64.to_le_bytes());
    let result = ModelReader::parse(&bytes);
    assert!(matches!(result, Err(RecError::Corrupt(_))));
}

#[test]
fn test_matrix_length_mismatch() {
    let mut bytes = write_bytes(&sample_model());
    bytes[48..56].copy_from_slice(&8u64.to_le_bytes());
    let result = ModelReader::parse(&bytes);
    assert!(matches!(result, Err(RecError::DimensionMismatch { .. })));
}

#[test]
fn test_overflowing_title_count_is_corrupt() {
    let header = FileHeader::new(0x8000_0000, 0);
    let mut bytes = Vec::new();
    header.write_to(&mut bytes).unwrap();
    assert_eq!(header.expected_matrix_length(), None);

    let result = ModelReader::parse(&bytes);
    assert!(matches!(result, Err(RecError::Corrupt(8))));

    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&bytes).unwrap();
    tmp.flush().unwrap();
    assert!(matches!(
        MmapReader::open(tmp.path()),
        Err(RecError::Corrupt(8))
    ));
}

#[test]
fn test_nan_score_rejected_on_read() {
    let mut bytes = write_bytes(&sample_model());
    let header = FileHeader::read_from(&mut Cursor::new(&bytes[..64])).unwrap();
    let cell = header.matrix_offset as usize + 4; // (0, 1)
    bytes[cell..cell + 4].copy_from_slice(&f32::NAN.to_le_bytes());
    let result = ModelReader::parse(&bytes);
    assert!(matches!(result, Err(RecError::InvalidScore { row: 0, col: 1 })));
}

#[test]
fn test_file_roundtrip() {
    let model = sample_model();
    let tmp = NamedTempFile::new().unwrap();
    ModelWriter::new().write_to_file(&model, tmp.path()).unwrap();
    let read = ModelReader::read_from_file(tmp.path()).unwrap();
    assert_eq!(read.titles().titles(), model.titles().titles());
}

#[test]
fn test_missing_file_is_io_error() {
    let result = ModelReader::read_from_file(std::path::Path::new("/nonexistent/model.bsim"));
    assert!(matches!(result, Err(RecError::Io(_))));
}

// ==================== Mmap Reader Tests ====================

#[test]
fn test_mmap_rows_match_eager_reader() {
    let model = sample_model();
    let tmp = NamedTempFile::new().unwrap();
    ModelWriter::new().write_to_file(&model, tmp.path()).unwrap();

    let mmap = MmapReader::open(tmp.path()).unwrap();
    assert_eq!(mmap.header().title_count, 3);
    assert_eq!(mmap.titles().titles(), model.titles().titles());
    for i in 0..3 {
        assert_eq!(
            mmap.read_row(i).unwrap(),
            model.similarity().row(i).unwrap().to_vec()
        );
    }
    assert!(matches!(
        mmap.read_row(3),
        Err(RecError::PositionOutOfRange(3))
    ));

    let full = mmap.read_model().unwrap();
    assert_eq!(full.similarity().as_flat(), model.similarity().as_flat());
}

#[test]
fn test_mmap_rejects_short_file() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"BSIM").unwrap();
    tmp.flush().unwrap();
    assert!(matches!(
        MmapReader::open(tmp.path()),
        Err(RecError::Truncated)
    ));
}

// ==================== Pack Source Tests ====================

#[test]
fn test_model_source_from_json() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        r#"{{"titles": ["A", "B"], "scores": [[1.0, 0.25], [0.25, 1.0]]}}"#
    )
    .unwrap();
    tmp.flush().unwrap();

    let model = ModelSource::read_from_file(tmp.path())
        .unwrap()
        .into_model()
        .unwrap();
    assert_eq!(model.len(), 2);
    assert_eq!(model.similarity().score(0, 1), Some(0.25));
}

#[test]
fn test_model_source_non_square() {
    let source = ModelSource {
        titles: vec!["A".into(), "B".into()],
        scores: vec![vec![1.0, 0.5, 0.1], vec![0.5, 1.0, 0.1]],
    };
    assert!(matches!(
        source.into_model(),
        Err(RecError::DimensionMismatch { .. })
    ));
}

// ==================== Catalog Table Tests ====================

#[test]
fn test_catalog_file_keeps_duplicate_rows() {
    let mut tmp = NamedTempFile::new().unwrap();
    writeln!(tmp, "ISBN,Book-Title,Book-Author,Image-URL-M").unwrap();
    writeln!(tmp, "0061122416,The Alchemist,Paulo Coelho,http://img/a.jpg").unwrap();
    writeln!(tmp, "0062502174,The Alchemist,Paulo Coelho,http://img/b.jpg").unwrap();
    tmp.flush().unwrap();

    let catalog = read_catalog_file(tmp.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.title_count(), 1);
    assert_eq!(
        catalog
            .representative("The Alchemist")
            .and_then(|r| r.isbn.as_deref()),
        Some("0061122416")
    );
}
