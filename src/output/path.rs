//! Mapping from crawled URLs to files under the output directory

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use url::Url;

/// Extensions that are written as files; any other path is treated as a
/// directory-style route and gets an `index.html`.
pub const FILE_EXTENSIONS: &[&str] = &[
    ".html", ".xml", ".js", ".css", ".jpg", ".png", ".ico", ".gif", ".svg", ".eot", ".ttf",
    ".woff",
];

/// File name used for directory-style routes
pub const INDEX_FILE: &str = "index.html";

/// Returns the URL's path relative to the root, without a leading separator
///
/// The root's own path is stripped first, so with a root of
/// `https://x.com/docs` the URL `https://x.com/docs/a/b.html` maps to
/// `a/b.html`. Query strings are not part of the result.
pub fn relative_path(root: &Url, url: &Url) -> String {
    let path = url.path();
    let relative = path.strip_prefix(root.path()).unwrap_or(path);
    relative
        .strip_prefix('/')
        .unwrap_or(relative)
        .to_string()
}

/// Returns true if the path ends in one of the recognized file extensions
pub fn has_file_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Maps a root-relative path to its target file under `output_dir`
///
/// Segments are percent-decoded, so `my%20page.html` is written as
/// `my page.html`. Empty, `.` and `..` segments are dropped after decoding,
/// and a decoded separator never splits a segment.
///
/// # Examples
///
/// ```
/// use site_mirror::output::target_file;
/// use std::path::Path;
///
/// let out = Path::new("/tmp/out");
/// assert_eq!(target_file(out, "about/team.html"), out.join("about").join("team.html"));
/// assert_eq!(target_file(out, "about/team"), out.join("about").join("team").join("index.html"));
/// assert_eq!(target_file(out, "my%20page.html"), out.join("my page.html"));
/// ```
pub fn target_file(output_dir: &Path, relative: &str) -> PathBuf {
    let relative = relative.strip_prefix('/').unwrap_or(relative);

    let mut target = output_dir.to_path_buf();
    for segment in relative.split('/') {
        let decoded = percent_decode_str(segment).decode_utf8_lossy();
        if decoded.is_empty() || decoded == "." || decoded == ".." {
            continue;
        }
        target.push(decoded.replace(|c: char| c == '/' || c == '\\', "_"));
    }

    if !has_file_extension(&percent_decode_str(relative).decode_utf8_lossy()) {
        target.push(INDEX_FILE);
    }
    target
}

/// Maps a URL to its target file under `output_dir`
pub fn output_path(output_dir: &Path, root: &Url, url: &Url) -> PathBuf {
    target_file(output_dir, &relative_path(root, url))
}
