//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client (TLS policy, user agent)
//! - GET requests returning raw bytes and the declared media type
//! - Classifying the outcome as success or failure
//!
//! There are no retries: a failed fetch is reported once and the crawl moves
//! on.

use crate::config::FetchConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{tls, Client, StatusCode};
use url::Url;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The server answered 200 OK
    Success {
        /// HTTP status code
        status_code: u16,
        /// MIME type from Content-Type, lowercased, parameters removed
        media_type: String,
        /// Raw response body
        body: Vec<u8>,
    },

    /// The server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request never produced a complete response
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Success { status_code, .. } | Self::HttpError { status_code } => {
                Some(*status_code)
            }
            Self::NetworkError { .. } => None,
        }
    }
}

/// Default user agent: `site-mirror/<version>`
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Builds the HTTP client shared by every fetch in a run
///
/// TLS 1.2 is the minimum protocol version. When
/// `trust_all_certificates` is set, server certificates are not validated at
/// all, which lets the crawler mirror internal or staging sites that use
/// self-signed certificates.
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::FetchConfig;
/// use site_mirror::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(default_user_agent);

    if config.trust_all_certificates {
        tracing::warn!(
            "TLS certificate validation is disabled; all server certificates are trusted"
        );
    }

    Client::builder()
        .user_agent(user_agent)
        .min_tls_version(tls::Version::TLS_1_2)
        .danger_accept_invalid_certs(config.trust_all_certificates)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Extracts the MIME type from a Content-Type header value
///
/// `"Text/HTML; charset=UTF-8"` becomes `"text/html"`.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Fetches a URL with a single GET
///
/// # Outcome Rules
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Success with body and media type |
/// | Any other status | HttpError |
/// | Connection, TLS or body read error | NetworkError |
///
/// Redirects are followed by the client itself; the status that counts is
/// the one of the final response.
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("URL '{}' could not be fetched: {}", url, e);
            return FetchResult::NetworkError {
                error: describe_error(&e),
            };
        }
    };

    let status = response.status();
    tracing::info!("URL '{}' returned with code '{}'.", url, status.as_u16());

    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let media_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(media_type)
        .unwrap_or_default();

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            media_type,
            body: body.to_vec(),
        },
        Err(e) => {
            tracing::warn!("Reading body of '{}' failed: {}", url, e);
            FetchResult::NetworkError {
                error: describe_error(&e),
            }
        }
    }
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else {
        e.to_string()
    }
}
