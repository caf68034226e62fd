//! Link classification, resolution and broken-link detection.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in a URL path segment: everything but unreserved ones.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Which policy governs a broken link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A route link (`/docs/intro`) from the navbar, landing page or content
    Route,
    /// A markdown file link (`./intro.md`) that matches no document
    MarkdownFile,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route => f.write_str("Broken link"),
            Self::MarkdownFile => f.write_str("Broken markdown link"),
        }
    }
}

/// A link whose target does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Route (or file) the link was found on
    pub source: String,
    /// Target as resolved, without base URL
    pub target: String,
    pub kind: LinkKind,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}: {}", self.kind, self.source, self.target)
    }
}

/// Whether a destination leaves the site.
pub fn is_external(dest: &str) -> bool {
    if dest.starts_with("//") {
        return true;
    }
    let scheme_end = dest.find(':');
    let path_start = dest.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (Some(colon), Some(slash)) => colon < slash,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Split a link into its path and its `?query#fragment` suffix.
pub fn split_suffix(dest: &str) -> (&str, &str) {
    let split = dest.find(['?', '#']).unwrap_or(dest.len());
    dest.split_at(split)
}

/// Whether a link path points at a markdown source file.
pub fn is_markdown_file(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".md") || lower.ends_with(".mdx")
}

/// Percent-decode a link path (`%E5%8D%A1%E7%89%8C` to `卡牌`).
///
/// Input that does not decode to UTF-8 is returned as written.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path))
}

/// Percent-encode every segment of a decoded path for use in a full URL.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a route: drop query and fragment, decode percent escapes,
/// collapse `.`/`..` and slashes.
pub fn normalize_route(path: &str) -> String {
    let (path, _) = split_suffix(path);
    let mut segments: Vec<Cow<'_, str>> = Vec::new();
    for segment in path.split('/').map(decode_path) {
        match &*segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
                continue;
            }
            _ => {}
        }
        segments.push(segment);
    }
    format!("/{}", segments.join("/"))
}

/// Resolve a link relative to the route of the page it appears on.
///
/// Routes are treated like file paths: `guild` on `/docs/cards` resolves to `/docs/guild`.
pub fn resolve_relative(current_route: &str, dest: &str) -> String {
    let (path, suffix) = split_suffix(dest);
    if path.is_empty() {
        return format!("{}{}", current_route, suffix);
    }
    if path.starts_with('/') {
        return format!("{}{}", normalize_route(path), suffix);
    }
    let dir = current_route
        .rsplit_once('/')
        .map(|(dir, _)| dir)
        .unwrap_or("");
    format!("{}{}", normalize_route(&format!("{}/{}", dir, path)), suffix)
}

/// Prefix an absolute route with a base URL (`/ROL_Docs/`).
pub fn localize(base_url: &str, route: &str) -> String {
    format!("{}{}", base_url, route.trim_start_matches('/'))
}

/// Checks internal links against the set of generated routes and static files.
#[derive(Debug)]
pub struct LinkChecker {
    routes: HashSet<String>,
    static_dir: PathBuf,
}

impl LinkChecker {
    pub fn new(routes: impl IntoIterator<Item = String>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            routes: routes.into_iter().map(|r| normalize_route(&r)).collect(),
            static_dir: static_dir.into(),
        }
    }

    /// Whether an absolute route resolves to a page or a static file.
    pub fn resolves(&self, path: &str) -> bool {
        let route = normalize_route(path);
        if self.routes.contains(&route) {
            return true;
        }
        let relative = route.trim_start_matches('/');
        !relative.is_empty() && self.static_dir.join(relative).is_file()
    }

    /// Collect the targets on `source` that do not resolve.
    pub fn check<'a>(
        &self,
        source: &str,
        targets: impl IntoIterator<Item = &'a str>,
    ) -> Vec<BrokenLink> {
        targets
            .into_iter()
            .filter(|target| !self.resolves(target))
            .map(|target| BrokenLink {
                source: source.to_string(),
                target: split_suffix(target).0.to_string(),
                kind: LinkKind::Route,
            })
            .collect()
    }
}
