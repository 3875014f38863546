//! Site-Mirror main entry point
//!
//! This is the command-line interface for the Site-Mirror website mirroring
//! crawler.

use anyhow::{Context, Result};
use clap::Parser;
use site_mirror::config::{load_config, validate, Config};
use site_mirror::crawler::run_crawl;
use site_mirror::CrawlSummary;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code for configuration and other fatal errors
const EXIT_FATAL: u8 = 2;

/// Site-Mirror: a same-origin website mirroring crawler
///
/// Site-Mirror fetches a website starting from one or more seed paths,
/// follows the links it finds in HTML and CSS, and writes every reachable
/// page and asset under the root URL into a local directory.
#[derive(Parser, Debug)]
#[command(name = "site-mirror")]
#[command(version)]
#[command(about = "Mirror a website into a local directory", long_about = None)]
struct Cli {
    /// Root URL of the site; only URLs below it are followed
    #[arg(value_name = "ROOT_URL", required_unless_present = "config")]
    root_url: Option<String>,

    /// Directory the mirror is written into
    #[arg(value_name = "OUTPUT_DIR", required_unless_present = "config")]
    output_dir: Option<PathBuf>,

    /// Root-relative start paths; each may be a ';'-separated list [default: /]
    #[arg(value_name = "SEEDS")]
    seeds: Vec<String>,

    /// Load the configuration from a TOML file instead of the arguments
    #[arg(long, value_name = "FILE", conflicts_with_all = ["root_url", "output_dir", "seeds"])]
    config: Option<PathBuf>,

    /// Only collect URLs: write nothing and print the visited URLs
    #[arg(long)]
    url_list_only: bool,

    /// Skip URLs whose target file already exists
    #[arg(long)]
    download_missing_only: bool,

    /// Validate server certificates instead of trusting all of them
    #[arg(long)]
    verify_certificates: bool,

    /// Only follow URLs below the root on a path-segment boundary
    #[arg(long)]
    strict_scope: bool,

    /// Maximum number of concurrent fetches
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,

    /// User agent sent with every request
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Builds the run configuration from the file or the positional
    /// arguments, then applies the flags on top
    fn build_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => {
                let root_url = self.root_url.clone().context("ROOT_URL is required")?;
                let output_dir = self.output_dir.clone().context("OUTPUT_DIR is required")?;
                let mut config = Config::new(root_url, output_dir);
                let seeds = split_seeds(&self.seeds);
                if !seeds.is_empty() {
                    config.seeds = seeds;
                }
                config
            }
        };

        config.url_list_only |= self.url_list_only;
        config.download_missing_only |= self.download_missing_only;
        config.strict_scope |= self.strict_scope;
        if self.verify_certificates {
            config.fetch.trust_all_certificates = false;
        }
        if let Some(concurrency) = self.concurrency {
            config.fetch.max_concurrent_fetches = concurrency;
        }
        if let Some(user_agent) = &self.user_agent {
            config.fetch.user_agent = Some(user_agent.clone());
        }

        validate(&config).context("Invalid configuration")?;
        Ok(config)
    }
}

/// Flattens seed arguments, splitting each on ';' and dropping empty entries
fn split_seeds(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(';'))
        .map(str::trim)
        .filter(|seed| !seed.is_empty())
        .map(str::to_string)
        .collect()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.build_config();

    // A URL list on stdout must not be mixed with progress output
    let url_list_only = config
        .as_ref()
        .map(|c| c.url_list_only)
        .unwrap_or(cli.url_list_only);
    setup_logging(cli.verbose, cli.quiet || url_list_only);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    match handle_crawl(config).await {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(e) => {
            tracing::error!("Crawl failed: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mirror=info,warn"),
            1 => EnvFilter::new("site_mirror=debug,info"),
            2 => EnvFilter::new("site_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<CrawlSummary> {
    tracing::info!(
        "Mirroring {} into {} ({} seeds)",
        config.root_url,
        config.output_dir.display(),
        config.seeds.len()
    );

    let url_list_only = config.url_list_only;
    let summary = run_crawl(config).await.context("Mirroring aborted")?;

    if url_list_only {
        print!("{}", summary.url_list());
    }

    Ok(summary)
}
