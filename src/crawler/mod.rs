//! Crawler module for fetching, extracting and traversal control
//!
//! This module contains the core mirroring logic, including:
//! - HTTP fetching with a shared client
//! - Pattern-based link extraction from HTML and CSS
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, default_user_agent, fetch_url, media_type, FetchResult};
pub use parser::{
    extract_css_links, extract_html_links, extract_links, CSS_MEDIA_TYPE, HTML_MEDIA_TYPE,
};
