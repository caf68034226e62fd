//! Broken-link and trailing-slash policies.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to do when a link target cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Say nothing.
    Ignore,
    /// Report at info level, build continues.
    Log,
    /// Report as a warning, build continues.
    Warn,
    /// Abort the build.
    #[default]
    Throw,
}

impl BrokenLinkPolicy {
    /// Whether a broken link under this policy fails the build.
    pub fn is_fatal(self) -> bool {
        self == Self::Throw
    }

    /// Emit a diagnostic for a broken link according to the policy.
    ///
    /// `Throw` is reported by the caller as an error, so it is logged here
    /// at error level only to keep the full list visible.
    pub fn report(self, kind: &str, source: &str, target: &str) {
        match self {
            Self::Ignore => {}
            Self::Log => tracing::info!("{} on {}: {}", kind, source, target),
            Self::Warn => tracing::warn!("{} on {}: {}", kind, source, target),
            Self::Throw => tracing::error!("{} on {}: {}", kind, source, target),
        }
    }
}

/// Trailing slash handling for generated URLs and files.
///
/// Maps the optional `trailing_slash` boolean: `false` emits
/// `docs/intro.html`, `true` emits `docs/intro/index.html` with slash-suffixed
/// links, unset emits directories and leaves authored links alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingSlash {
    Always,
    Never,
    #[default]
    Preserve,
}

impl TrailingSlash {
    pub fn from_option(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Always,
            Some(false) => Self::Never,
            None => Self::Preserve,
        }
    }

    /// Apply the policy to a link path, keeping any query or fragment.
    pub fn apply(self, link: &str) -> String {
        let split = link.find(['?', '#']).unwrap_or(link.len());
        let (path, suffix) = link.split_at(split);

        if path.is_empty() || path == "/" {
            return link.to_string();
        }

        match self {
            Self::Preserve => link.to_string(),
            Self::Always if path.ends_with('/') => link.to_string(),
            Self::Always => format!("{}/{}", path, suffix),
            Self::Never => format!("{}{}", path.trim_end_matches('/'), suffix),
        }
    }

    /// Output file, relative to the output root, for a route such as `/docs/intro`.
    pub fn output_file(self, route: &str) -> PathBuf {
        let trimmed = route.trim_matches('/');
        if trimmed.is_empty() {
            return PathBuf::from("index.html");
        }

        match self {
            Self::Never => PathBuf::from(format!("{}.html", trimmed)),
            Self::Always | Self::Preserve => PathBuf::from(trimmed).join("index.html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: BrokenLinkPolicy,
        }

        let w: Wrapper = toml::from_str(r#"policy = "warn""#).unwrap();
        assert_eq!(w.policy, BrokenLinkPolicy::Warn);

        let w: Wrapper = toml::from_str(r#"policy = "throw""#).unwrap();
        assert!(w.policy.is_fatal());

        assert!(toml::from_str::<Wrapper>(r#"policy = "explode""#).is_err());
    }

    #[test]
    fn only_throw_is_fatal() {
        assert!(!BrokenLinkPolicy::Ignore.is_fatal());
        assert!(!BrokenLinkPolicy::Log.is_fatal());
        assert!(!BrokenLinkPolicy::Warn.is_fatal());
        assert!(BrokenLinkPolicy::Throw.is_fatal());
    }

    #[test]
    fn applies_trailing_slash() {
        assert_eq!(TrailingSlash::Always.apply("/docs/intro"), "/docs/intro/");
        assert_eq!(
            TrailingSlash::Always.apply("/docs/intro#setup"),
            "/docs/intro/#setup"
        );
        assert_eq!(TrailingSlash::Never.apply("/docs/intro/"), "/docs/intro");
        assert_eq!(TrailingSlash::Preserve.apply("/docs/intro/"), "/docs/intro/");
        assert_eq!(TrailingSlash::Never.apply("/"), "/");
    }

    #[test]
    fn computes_output_files() {
        assert_eq!(
            TrailingSlash::Never.output_file("/docs/intro"),
            PathBuf::from("docs/intro.html")
        );
        assert_eq!(
            TrailingSlash::Always.output_file("/docs/intro"),
            PathBuf::from("docs/intro/index.html")
        );
        assert_eq!(
            TrailingSlash::Preserve.output_file("/"),
            PathBuf::from("index.html")
        );
    }
}
