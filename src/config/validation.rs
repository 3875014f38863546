use crate::config::types::{Config, FetchConfig};
use crate::ConfigError;
use percent_encoding::percent_decode_str;
use url::Url;

/// Upper bound for concurrent fetches
pub const MAX_CONCURRENT_FETCHES: usize = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_root_url(&config.root_url)?;
    validate_output_dir(config)?;
    validate_seeds(&config.seeds)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates that the root URL is an absolute http(s) URL with a host
fn validate_root_url(root_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root URL '{}': {}", root_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Root URL '{}' must use http or https, got {}",
            root_url,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Root URL '{}' has no host",
            root_url
        )));
    }

    Ok(())
}

fn validate_output_dir(config: &Config) -> Result<(), ConfigError> {
    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates seed paths
///
/// Seeds are root-relative; an absolute URL here is almost always a mistake.
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed path is required".to_string(),
        ));
    }

    for seed in seeds {
        if seed.trim().is_empty() {
            return Err(ConfigError::Validation(
                "seed paths cannot be empty".to_string(),
            ));
        }
        if seed.contains("://") {
            return Err(ConfigError::Validation(format!(
                "seed '{}' must be a root-relative path, not an absolute URL",
                seed
            )));
        }
        if climbs_above_root(seed) {
            return Err(ConfigError::Validation(format!(
                "seed '{}' must not contain '..' segments",
                seed
            )));
        }
    }

    Ok(())
}

/// True if any path segment of the seed is `..`, literal or percent-encoded
fn climbs_above_root(seed: &str) -> bool {
    let path = seed
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    path.split(|c: char| c == '/' || c == '\\')
        .any(|segment| percent_decode_str(segment.trim()).decode_utf8_lossy() == "..")
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    if let Some(user_agent) = &config.user_agent {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent cannot be blank".to_string(),
            ));
        }
    }

    Ok(())
}
