use url::Url;

/// Returns true if `url` falls under `root`
///
/// This is a plain string-prefix test on the canonical forms, so a root of
/// `https://x.com/docs` also matches `https://x.com/docs-archive`. Use
/// [`in_scope_strict`] to require a path-segment boundary.
pub fn in_scope(url: &Url, root: &Url) -> bool {
    url.as_str().starts_with(root.as_str())
}

/// Like [`in_scope`], but the match must end on a path-segment boundary
pub fn in_scope_strict(url: &Url, root: &Url) -> bool {
    let root_str = root.as_str();
    let Some(rest) = url.as_str().strip_prefix(root_str) else {
        return false;
    };

    root_str.ends_with('/') || rest.is_empty() || rest.starts_with(&['/', '?'][..])
}
