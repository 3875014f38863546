//! Run summary produced when the frontier is drained

use crate::state::CrawlState;
use std::fmt;
use std::time::Duration;

/// Outcome of a completed crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Number of URLs that reached a terminal state, failures included
    pub visited: usize,

    /// Number of URLs whose fetch failed
    pub failed: usize,

    /// Number of URLs skipped because their file already existed
    pub skipped: usize,

    /// Number of files written to the output directory
    pub written: usize,

    /// Every visited URL, sorted
    pub visited_urls: Vec<String>,

    /// Every failed URL, sorted
    pub failed_urls: Vec<String>,

    pub elapsed: Duration,
}

impl CrawlSummary {
    pub fn from_state(state: &CrawlState, written: usize, elapsed: Duration) -> Self {
        Self {
            visited: state.visited_count(),
            failed: state.failed_count(),
            skipped: state.skipped_count(),
            written,
            visited_urls: state.visited_urls(),
            failed_urls: state.failed_urls(),
            elapsed,
        }
    }

    /// True iff no URL failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Renders the visited set, one URL per line
    pub fn url_list(&self) -> String {
        let mut out = String::new();
        for url in &self.visited_urls {
            out.push_str(url);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done. Processed '{}' URLs. Failed '{}' URLs.",
            self.visited, self.failed
        )
    }
}
