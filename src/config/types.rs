use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Site-Mirror
///
/// Built either from command-line arguments or from a TOML file. It is
/// immutable for the lifetime of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root URL of the site; also the scope prefix for followed links
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Directory the mirror is written into
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,

    /// Root-relative paths the crawl starts from
    #[serde(default = "default_seeds")]
    pub seeds: Vec<String>,

    /// Only collect URLs: write nothing and print the visited set at the end
    #[serde(rename = "url-list-only", default)]
    pub url_list_only: bool,

    /// Skip URLs whose target file already exists on disk
    #[serde(rename = "download-missing-only", default)]
    pub download_missing_only: bool,

    /// Require in-scope URLs to match the root on a path-segment boundary
    #[serde(rename = "strict-scope", default)]
    pub strict_scope: bool,

    #[serde(default)]
    pub fetch: FetchConfig,
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Accept any server certificate, including self-signed ones
    #[serde(rename = "trust-all-certificates", default = "default_trust_all")]
    pub trust_all_certificates: bool,

    /// Maximum number of fetches in flight at once
    #[serde(
        rename = "max-concurrent-fetches",
        default = "default_max_concurrent_fetches"
    )]
    pub max_concurrent_fetches: usize,

    /// User agent override
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            trust_all_certificates: default_trust_all(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            user_agent: None,
        }
    }
}

impl Config {
    /// Creates a configuration with default seeds, flags and fetch settings
    pub fn new(root_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_url: root_url.into(),
            output_dir: output_dir.into(),
            seeds: default_seeds(),
            url_list_only: false,
            download_missing_only: false,
            strict_scope: false,
            fetch: FetchConfig::default(),
        }
    }
}

pub(crate) fn default_seeds() -> Vec<String> {
    vec!["/".to_string()]
}

fn default_trust_all() -> bool {
    true
}

fn default_max_concurrent_fetches() -> usize {
    1
}
