//! Crawl unit state definitions
//!
//! Every URL taken from the frontier moves through these states exactly once.

use std::fmt;

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitState {
    // ===== Active States =====
    /// URL has been discovered and is waiting in the frontier
    Pending,

    /// URL is currently being fetched
    Fetching,

    // ===== Terminal States =====
    /// URL was fetched, written (unless in URL-list mode) and its links expanded
    Persisted,

    /// Fetch returned a non-200 status or a transport error
    Failed,

    /// Target file already existed and download-missing-only was set
    Skipped,
}

impl UnitState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if this is an active state
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Fetching)
    }

    /// Returns true if the unit completed without a failure
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Persisted | Self::Skipped)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Persisted => "persisted",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
