//! URL handling module for Site-Mirror
//!
//! This module turns raw link references into canonical absolute URLs (the
//! crawl's deduplication key) and decides which URLs belong to the mirrored
//! site.

mod normalize;
mod scope;

// Re-export main functions
pub use normalize::{canonicalize, parse_root, resolve, seed_url};
pub use scope::{in_scope, in_scope_strict};

use ::url::Url;

/// Scope rule applied to discovered links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeMode {
    /// Plain string-prefix match on the root URL
    #[default]
    Prefix,
    /// Prefix match that must end on a path-segment boundary
    Segment,
}

impl ScopeMode {
    /// Picks the mode from the `strict_scope` configuration flag
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Segment
        } else {
            Self::Prefix
        }
    }

    /// Returns true if `url` is in scope of `root` under this mode
    pub fn contains(&self, url: &Url, root: &Url) -> bool {
        match self {
            Self::Prefix => in_scope(url, root),
            Self::Segment => in_scope_strict(url, root),
        }
    }
}
