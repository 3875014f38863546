//! Output module for writing the mirror and reporting on the run
//!
//! This module handles:
//! - Mapping crawled URLs to files under the output directory
//! - Creating directories and writing fetched bytes
//! - Summarizing the run

mod path;
mod summary;
mod writer;

pub use path::{
    has_file_extension, output_path, relative_path, target_file, FILE_EXTENSIONS, INDEX_FILE,
};
pub use summary::CrawlSummary;
pub use writer::{ensure_dir, write_file};
