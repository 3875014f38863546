//! Configuration module for Site-Mirror
//!
//! This module holds the run configuration, loads it from TOML files, and
//! validates it before a crawl starts.
//!
//! # Example
//!
//! ```no_run
//! use site_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mirror.toml")).unwrap();
//! println!("Seeds: {:?}", config.seeds);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig};

pub use parser::{load_config, parse_config};
pub use validation::{validate, MAX_CONCURRENT_FETCHES};
