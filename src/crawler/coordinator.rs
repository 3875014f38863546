//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the mirroring process, including:
//! - Preparing the root URL, HTTP client and output directory
//! - Seeding and draining the frontier
//! - Running fetch, persist and link extraction on a bounded worker pool
//! - Producing the final summary
//!
//! The coordinator is the only owner of [`CrawlState`]. Workers never touch
//! it: each one returns a [`UnitReport`] that the coordinator applies, so the
//! check-then-insert on a URL is atomic and no URL is fetched twice.

use crate::config::{validate, Config};
use crate::crawler::{build_http_client, extract_links, fetch_url, FetchResult};
use crate::output::{ensure_dir, output_path, write_file, CrawlSummary};
use crate::state::{CrawlState, FrontierEntry, UnitState};
use crate::url::{parse_root, resolve, seed_url, ScopeMode};
use crate::MirrorError;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// Everything a worker needs to process one unit, shared read-only
#[derive(Debug)]
struct UnitContext {
    client: Client,
    root: Url,
    scope: ScopeMode,
    output_dir: PathBuf,
    url_list_only: bool,
    download_missing_only: bool,
}

/// What a worker hands back to the coordinator
#[derive(Debug)]
struct UnitReport {
    url: Url,
    state: UnitState,
    written: bool,
    /// In-scope links found in the content, resolved and canonical
    links: Vec<Url>,
}

impl UnitReport {
    fn terminal(url: Url, state: UnitState) -> Self {
        Self {
            url,
            state,
            written: false,
            links: Vec::new(),
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    context: Arc<UnitContext>,
    state: CrawlState,
    written: usize,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Validates the configuration, parses the root URL, builds the HTTP
    /// client and, unless only URLs are collected, creates the output
    /// directory.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(MirrorError)` - Invalid configuration, client or output directory
    pub fn new(config: Config) -> Result<Self, MirrorError> {
        validate(&config)?;

        let root = parse_root(&config.root_url)?;
        let client = build_http_client(&config.fetch)?;

        if !config.url_list_only {
            ensure_dir(&config.output_dir).map_err(|source| MirrorError::OutputDir {
                path: config.output_dir.display().to_string(),
                source,
            })?;
        }

        let context = UnitContext {
            client,
            root,
            scope: ScopeMode::from_strict(config.strict_scope),
            output_dir: config.output_dir.clone(),
            url_list_only: config.url_list_only,
            download_missing_only: config.download_missing_only,
        };

        Ok(Self {
            config: Arc::new(config),
            context: Arc::new(context),
            state: CrawlState::new(),
            written: 0,
        })
    }

    /// Root URL of this crawl, in canonical form
    pub fn root(&self) -> &Url {
        &self.context.root
    }

    /// Current crawl state
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Runs the crawl until the frontier is drained
    ///
    /// Fetch failures never abort the run; they are recorded and reported in
    /// the summary. Only a failed worker task ends the run early.
    pub async fn run(&mut self) -> Result<CrawlSummary, MirrorError> {
        let start_time = Instant::now();
        tracing::info!("Crawling {}...", self.context.root);

        for seed in &self.config.seeds {
            let url = seed_url(&self.context.root, seed)?;
            tracing::debug!("Seeding frontier with {}", url);
            self.state.enqueue(url, None);
        }

        let limit = self.config.fetch.max_concurrent_fetches.max(1);
        let mut workers = JoinSet::new();

        loop {
            while workers.len() < limit {
                let Some(entry) = self.state.next_pending() else {
                    break;
                };
                workers.spawn(process_unit(Arc::clone(&self.context), entry));
            }

            match workers.join_next().await {
                Some(joined) => {
                    let report = joined?;
                    self.apply(report);
                }
                None => {
                    tracing::debug!("Frontier is empty, crawl complete");
                    break;
                }
            }
        }

        let summary = CrawlSummary::from_state(&self.state, self.written, start_time.elapsed());
        for url in &summary.failed_urls {
            tracing::warn!("Failed: {}", url);
        }
        tracing::info!("{}", summary);
        tracing::debug!(
            "{} files written, {} skipped, in {:?}",
            summary.written,
            summary.skipped,
            summary.elapsed
        );

        Ok(summary)
    }

    /// Folds a worker report into the crawl state
    fn apply(&mut self, report: UnitReport) {
        if !self.state.record(&report.url, report.state) {
            tracing::debug!("URL '{}' was already recorded", report.url);
            return;
        }
        if report.written {
            self.written += 1;
        }
        if !report.state.is_success() {
            tracing::debug!("URL '{}' ended as {}", report.url, report.state);
        }

        let mut queued = 0;
        for link in report.links {
            if self.state.enqueue(link, Some(report.url.clone())) {
                queued += 1;
            }
        }
        if queued > 0 {
            tracing::debug!(
                "Queued {} new URLs from '{}' ({} pending)",
                queued,
                report.url,
                self.state.frontier_size()
            );
        }
    }
}

/// Processes a single unit
///
/// 1. Computes the output path
/// 2. Skips the URL if its file already exists and only missing files are wanted
/// 3. Fetches the URL
/// 4. Writes the content, unless only URLs are collected
/// 5. Extracts, resolves and scope-filters the links
async fn process_unit(context: Arc<UnitContext>, entry: FrontierEntry) -> UnitReport {
    let url = entry.url;
    match &entry.source {
        Some(source) => tracing::info!("Processing URL '{}' (found on '{}').", url, source),
        None => tracing::info!("Processing URL '{}'.", url),
    }

    let target = output_path(&context.output_dir, &context.root, &url);

    if context.download_missing_only && target.exists() {
        tracing::info!("Skipping URL '{}', file '{}' exists.", url, target.display());
        return UnitReport::terminal(url, UnitState::Skipped);
    }

    let (media_type, body) = match fetch_url(&context.client, &url).await {
        FetchResult::Success {
            media_type, body, ..
        } => (media_type, body),
        FetchResult::HttpError { status_code } => {
            tracing::warn!("URL '{}' failed with status {}.", url, status_code);
            return UnitReport::terminal(url, UnitState::Failed);
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("URL '{}' failed: {}", url, error);
            return UnitReport::terminal(url, UnitState::Failed);
        }
    };

    let mut state = UnitState::Persisted;
    let mut written = false;
    if !context.url_list_only {
        match write_file(&target, &body) {
            Ok(()) => written = true,
            Err(e) => {
                tracing::error!("Writing file '{}' failed: {}", target.display(), e);
                state = UnitState::Failed;
            }
        }
    }

    let links = extract_links(&body, &media_type)
        .into_iter()
        .filter_map(|reference| match resolve(&url, &reference) {
            Ok(link) => Some(link),
            Err(e) => {
                tracing::debug!("Ignoring link '{}' on '{}': {}", reference, url, e);
                None
            }
        })
        .filter(|link| context.scope.contains(link, &context.root))
        .collect();

    UnitReport {
        url,
        state,
        written,
        links,
    }
}

/// Runs the main crawl operation
///
/// Builds a [`Coordinator`] from the configuration and drives it to
/// completion.
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::load_config;
/// use site_mirror::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("mirror.toml"))?;
/// let summary = run_crawl(config).await?;
/// println!("{}", summary);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, MirrorError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
