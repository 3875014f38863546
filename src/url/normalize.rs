use crate::UrlError;
use url::Url;

/// Resolves a link reference against a base URL into canonical form
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace from the reference
/// 2. Resolve it against `base` using standard URL resolution (absolute,
///    scheme-relative, root-relative and path-relative references)
/// 3. Remove the fragment
/// 4. Remove an empty query string (trailing `?`)
///
/// Scheme and host are left to the `url` crate's own normalization
/// (lowercased scheme and host, dot segments removed).
///
/// # Examples
///
/// ```
/// use site_mirror::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/index.html").unwrap();
/// let url = resolve(&base, "guide.html?#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/guide.html");
/// ```
pub fn resolve(base: &Url, reference: &str) -> Result<Url, UrlError> {
    let joined = base
        .join(reference.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))?;
    Ok(canonicalize(joined))
}

/// Strips the fragment and collapses an empty query to no query
pub fn canonicalize(mut url: Url) -> Url {
    url.set_fragment(None);
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

/// Parses and canonicalizes the crawl root
///
/// The root must be an absolute http(s) URL with a host.
pub fn parse_root(root_url: &str) -> Result<Url, UrlError> {
    let url = Url::parse(root_url.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(canonicalize(url))
}

/// Builds a seed URL from the root and a root-relative seed path
///
/// The seed is appended below the root's path rather than resolved against
/// the host, so a root of `https://x.com/docs` and a seed of `/a.html` give
/// `https://x.com/docs/a.html`.
pub fn seed_url(root: &Url, seed_path: &str) -> Result<Url, UrlError> {
    let mut base = root.clone();
    base.set_query(None);
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let relative = seed_path.trim().trim_start_matches('/');
    resolve(&base, &format!("./{}", relative))
}
