//! Pattern-based link extraction
//!
//! Links are found by scanning the raw text with regular expressions rather
//! than by building a DOM or CSS tree. Malformed markup is never rejected; it
//! is at worst under- or over-matched. Tags may span several lines.
//!
//! **HTML** (`text/html`) contributes, in document order:
//! - `<a href="...">` and `<a name="...">`
//! - `<img src="...">`
//! - `<script src="...">`
//! - `<link href="...">` when the target ends in `.css` (stylesheets)
//! - `<link href="...">` when the target ends in `.ico` (icons)
//!
//! **CSS** (`text/css`) contributes `url("...")` references.
//!
//! Every other media type is a leaf and yields no links.

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening tags of the elements that can carry links; a `>` inside a quoted
/// value does not end the tag
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<(a|img|script|link)\b((?:"[^"]*"|'[^']*'|[^'">])*)>"#)
        .expect("valid tag regex")
});

/// `name = value` pairs inside a tag; the value may be double, single or unquoted
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)(?:^|\s)([a-z][a-z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attribute regex")
});

static CSS_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)url\(\s*(?:"([^"]*)"|'([^']*)')\s*\)"#).expect("valid css url regex")
});

pub const HTML_MEDIA_TYPE: &str = "text/html";
pub const CSS_MEDIA_TYPE: &str = "text/css";

/// Extracts raw link references from a response body
///
/// Values are returned verbatim (not resolved), in document order, with
/// duplicates preserved.
///
/// # Example
///
/// ```
/// use site_mirror::crawler::extract_links;
///
/// let html = br#"<a href="/about">About</a><img src="logo.png">"#;
/// assert_eq!(extract_links(html, "text/html"), vec!["/about", "logo.png"]);
/// assert!(extract_links(html, "image/png").is_empty());
/// ```
pub fn extract_links(body: &[u8], media_type: &str) -> Vec<String> {
    if body.is_empty() {
        return Vec::new();
    }

    let media_type = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match media_type.as_str() {
        HTML_MEDIA_TYPE => extract_html_links(&String::from_utf8_lossy(body)),
        CSS_MEDIA_TYPE => extract_css_links(&String::from_utf8_lossy(body)),
        _ => Vec::new(),
    }
}

/// Extracts link references from HTML text
pub fn extract_html_links(html: &str) -> Vec<String> {
    let mut links = Vec::new();

    for tag in TAG_RE.captures_iter(html) {
        let name = tag[1].to_ascii_lowercase();
        let attrs = tag.get(2).map(|m| m.as_str()).unwrap_or_default();

        match name.as_str() {
            "a" => links.extend(attribute_values(attrs, &["href", "name"], false)),
            "img" | "script" => {
                links.extend(attribute_values(attrs, &["src"], true).into_iter().take(1))
            }
            "link" => {
                if let Some(href) = attribute_values(attrs, &["href"], true).into_iter().next() {
                    if is_stylesheet_or_icon(&href) {
                        links.push(href);
                    }
                }
            }
            _ => {}
        }
    }

    links
}

/// Extracts `url("...")` references from CSS text
pub fn extract_css_links(css: &str) -> Vec<String> {
    CSS_URL_RE
        .captures_iter(css)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Values of the wanted attributes, in the order they appear in the tag
///
/// With `self_closing` set, an unquoted value that runs into the closing
/// `/>` loses that slash: `<img src=a.png/>` yields `a.png`.
fn attribute_values(attrs: &str, wanted: &[&str], self_closing: bool) -> Vec<String> {
    ATTR_RE
        .captures_iter(attrs)
        .filter(|caps| wanted.iter().any(|w| caps[1].eq_ignore_ascii_case(w)))
        .filter_map(|caps| {
            if let Some(quoted) = caps.get(2).or_else(|| caps.get(3)) {
                return Some(quoted.as_str().to_string());
            }
            let bare = caps.get(4)?;
            let value = bare.as_str();
            if self_closing && bare.end() == attrs.len() && value.len() > 1 {
                Some(value.strip_suffix('/').unwrap_or(value).to_string())
            } else {
                Some(value.to_string())
            }
        })
        .collect()
}

/// `.css` or `.ico` suffix, ignoring any query or fragment and letter case
fn is_stylesheet_or_icon(href: &str) -> bool {
    let path = href.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let path = path.trim().to_ascii_lowercase();
    path.ends_with(".css") || path.ends_with(".ico")
}
