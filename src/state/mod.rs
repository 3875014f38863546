//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `UnitState`: lifecycle of a single URL (pending, fetching, persisted, failed, skipped)
//! - `CrawlState`: visited/failed sets and the frontier for one run

mod crawl_state;
mod unit_state;

// Re-export main types
pub use crawl_state::{CrawlState, FrontierEntry};
pub use unit_state::UnitState;
