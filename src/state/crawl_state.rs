use crate::state::UnitState;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A frontier entry: the URL to fetch and the page it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub source: Option<Url>,
}

/// Mutable state of a single crawl run
///
/// Owned by the coordinator; nothing else mutates it. A URL is queued at most
/// once and reaches a terminal state at most once. Failed URLs are also
/// counted as visited, so `failed` is always a subset of `visited`.
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    failed: HashSet<String>,
    skipped: HashSet<String>,
    discovered: HashSet<String>,
    in_flight: HashSet<String>,
    frontier: VecDeque<FrontierEntry>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a URL unless it has already been queued, visited or failed
    ///
    /// Returns true if the URL was added to the frontier.
    pub fn enqueue(&mut self, url: Url, source: Option<Url>) -> bool {
        if !self.discovered.insert(url.as_str().to_string()) {
            return false;
        }
        self.frontier.push_back(FrontierEntry { url, source });
        true
    }

    /// Takes the next frontier entry that has not reached a terminal state
    /// and marks it as in flight
    pub fn next_pending(&mut self) -> Option<FrontierEntry> {
        while let Some(entry) = self.frontier.pop_front() {
            let key = entry.url.as_str();
            if !self.is_done(key) && self.in_flight.insert(key.to_string()) {
                return Some(entry);
            }
        }
        None
    }

    /// Records the terminal state of a unit
    ///
    /// Returns false if the URL had already been recorded.
    pub fn record(&mut self, url: &Url, state: UnitState) -> bool {
        debug_assert!(state.is_terminal(), "non-terminal state {state}");

        let key = url.as_str().to_string();
        self.in_flight.remove(&key);
        if !self.visited.insert(key.clone()) {
            return false;
        }
        self.discovered.insert(key.clone());
        if state.is_error() {
            self.failed.insert(key);
        } else if state == UnitState::Skipped {
            self.skipped.insert(key);
        }
        true
    }

    fn is_done(&self, url: &str) -> bool {
        self.visited.contains(url) || self.failed.contains(url)
    }

    /// Current state of a URL, or `None` if it was never queued
    pub fn state_of(&self, url: &Url) -> Option<UnitState> {
        let key = url.as_str();
        if self.failed.contains(key) {
            Some(UnitState::Failed)
        } else if self.skipped.contains(key) {
            Some(UnitState::Skipped)
        } else if self.visited.contains(key) {
            Some(UnitState::Persisted)
        } else if self.in_flight.contains(key) {
            Some(UnitState::Fetching)
        } else if self.discovered.contains(key) {
            Some(UnitState::Pending)
        } else {
            None
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Visited URLs in sorted order
    pub fn visited_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.visited.iter().cloned().collect();
        urls.sort();
        urls
    }

    /// Failed URLs in sorted order
    pub fn failed_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.failed.iter().cloned().collect();
        urls.sort();
        urls
    }
}
