//! Artifact I/O: the binary .bsim model file and the CSV catalog tables.

pub mod compression;
pub mod mmap;
pub mod reader;
pub mod source;
pub mod tables;
pub mod writer;

pub use mmap::MmapReader;
pub use reader::ModelReader;
pub use source::ModelSource;
pub use tables::{read_catalog, read_catalog_file, read_popular, read_popular_file};
pub use writer::ModelWriter;
