//! The `roldocs.toml` site configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::i18n::I18nConfig;
use crate::navbar::{NavItem, NavLink, NavbarConfig};
use crate::policy::{BrokenLinkPolicy, TrailingSlash};
use crate::theme::PrismConfig;

/// Configuration filename looked up by the CLI.
pub const CONFIG_FILENAME: &str = "roldocs.toml";

/// Errors raised while loading or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Default locale '{default}' is not in the locale list [{locales}]")]
    DefaultLocaleMissing { default: String, locales: String },

    #[error("Locale list must not be empty")]
    NoLocales,

    #[error("Locale '{0}' is declared more than once")]
    DuplicateLocale(String),

    #[error("Invalid locale code '{0}'")]
    InvalidLocale(String),

    #[error("Navbar dropdown '{0}' has no items")]
    EmptyDropdown(String),

    #[error("Navbar item '{label}' points to '{to}'; internal links must start with '/'")]
    RelativeNavLink { label: String, to: String },

    #[error("base_url must start with '/': {0}")]
    InvalidBaseUrl(String),

    #[error("url must be an absolute http(s) origin: {0}")]
    InvalidUrl(String),
}

/// Deployment metadata. Not used for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// GitHub user or organization
    #[serde(default)]
    pub organization: Option<String>,

    /// Repository name
    #[serde(default)]
    pub project: Option<String>,

    /// Branch the built site is pushed to
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "gh-pages".to_string()
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            organization: None,
            project: None,
            branch: default_branch(),
        }
    }
}

/// Footer colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Light,
    Dark,
}

/// The `[footer]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterConfig {
    #[serde(default)]
    pub style: FooterStyle,

    /// Copyright line; `{year}` is replaced at build time
    #[serde(default)]
    pub copyright: Option<String>,
}

impl FooterConfig {
    /// Copyright text with `{year}` substituted.
    pub fn copyright_for_year(&self, year: i32) -> Option<String> {
        self.copyright
            .as_ref()
            .map(|c| c.replace("{year}", &year.to_string()))
    }
}

/// The `[docs]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Source directory for markdown documents
    #[serde(default = "default_docs_dir")]
    pub dir: PathBuf,

    /// URL segment the docs are served under
    #[serde(default = "default_route_base_path")]
    pub route_base_path: String,

    /// Directory holding per-locale translations (`<dir>/<locale>/docs`)
    #[serde(default = "default_i18n_dir")]
    pub i18n_dir: PathBuf,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}
fn default_route_base_path() -> String {
    "docs".to_string()
}
fn default_i18n_dir() -> PathBuf {
    PathBuf::from("i18n")
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            route_base_path: default_route_base_path(),
            i18n_dir: default_i18n_dir(),
        }
    }
}

/// The `[build]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSettings {
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_minify")]
    pub minify: bool,

    /// Files copied verbatim to the output root
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("build")
}
fn default_minify() -> bool {
    true
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            minify: default_minify(),
            static_dir: default_static_dir(),
        }
    }
}

/// Raw file layout as parsed from TOML, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    deploy: DeployConfig,
    #[serde(default)]
    i18n: RawI18n,
    #[serde(default)]
    navbar: NavbarConfig,
    #[serde(default)]
    footer: FooterConfig,
    #[serde(default)]
    prism: PrismConfig,
    #[serde(default)]
    docs: DocsConfig,
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    title: String,
    #[serde(default)]
    tagline: String,
    #[serde(default)]
    favicon: Option<String>,
    url: String,
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default)]
    trailing_slash: Option<bool>,
    #[serde(default)]
    on_broken_links: BrokenLinkPolicy,
    #[serde(default = "default_markdown_link_policy")]
    on_broken_markdown_links: BrokenLinkPolicy,
}

fn default_base_url() -> String {
    "/".to_string()
}
fn default_markdown_link_policy() -> BrokenLinkPolicy {
    BrokenLinkPolicy::Warn
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawI18n {
    #[serde(default = "default_locale")]
    default_locale: String,
    #[serde(default)]
    locales: Option<Vec<String>>,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for RawI18n {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales: None,
        }
    }
}

/// Validated, immutable site configuration.
///
/// Built once per process with [`SiteConfig::load`] or
/// [`SiteConfig::from_toml_str`] and then shared read-only.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    title: String,
    tagline: String,
    favicon: Option<String>,
    url: String,
    base_url: String,
    trailing_slash: TrailingSlash,
    on_broken_links: BrokenLinkPolicy,
    on_broken_markdown_links: BrokenLinkPolicy,
    deploy: DeployConfig,
    i18n: I18nConfig,
    navbar: NavbarConfig,
    footer: FooterConfig,
    prism: PrismConfig,
    docs: DocsConfig,
    build: BuildSettings,
}

impl SiteConfig {
    /// Load and validate a config file.
    ///
    /// Relative directories in the file are resolved against the file's parent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&content)?;

        if let Some(root) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.rebase_paths(root);
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let i18n = validate_i18n(raw.i18n)?;
        validate_navbar(&raw.navbar)?;

        let url = raw.site.url.trim_end_matches('/').to_string();
        if !(url.starts_with("https://") || url.starts_with("http://"))
            || url.split("://").nth(1).map_or(true, str::is_empty)
        {
            return Err(ConfigError::InvalidUrl(raw.site.url));
        }

        if !raw.site.base_url.starts_with('/') {
            return Err(ConfigError::InvalidBaseUrl(raw.site.base_url));
        }
        let base_url = if raw.site.base_url.ends_with('/') {
            raw.site.base_url
        } else {
            format!("{}/", raw.site.base_url)
        };

        let mut docs = raw.docs;
        docs.route_base_path = docs.route_base_path.trim_matches('/').to_string();

        Ok(Self {
            title: raw.site.title,
            tagline: raw.site.tagline,
            favicon: raw.site.favicon,
            url,
            base_url,
            trailing_slash: TrailingSlash::from_option(raw.site.trailing_slash),
            on_broken_links: raw.site.on_broken_links,
            on_broken_markdown_links: raw.site.on_broken_markdown_links,
            deploy: raw.deploy,
            i18n,
            navbar: raw.navbar,
            footer: raw.footer,
            prism: raw.prism,
            docs,
            build: raw.build,
        })
    }

    fn rebase_paths(&mut self, root: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        };
        rebase(&mut self.docs.dir);
        rebase(&mut self.docs.i18n_dir);
        rebase(&mut self.build.output);
        rebase(&mut self.build.static_dir);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tagline(&self) -> &str {
        &self.tagline
    }

    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    /// Site origin without trailing slash, e.g. `https://example.github.io`
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path prefix, always starting and ending with `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path prefix for pages of a locale. Non-default locales live under `<base_url><locale>/`.
    pub fn locale_base_url(&self, locale: &str) -> String {
        if self.i18n.is_default(locale) {
            self.base_url.clone()
        } else {
            format!("{}{}/", self.base_url, locale)
        }
    }

    pub fn trailing_slash(&self) -> TrailingSlash {
        self.trailing_slash
    }

    pub fn on_broken_links(&self) -> BrokenLinkPolicy {
        self.on_broken_links
    }

    pub fn on_broken_markdown_links(&self) -> BrokenLinkPolicy {
        self.on_broken_markdown_links
    }

    pub fn deploy(&self) -> &DeployConfig {
        &self.deploy
    }

    pub fn i18n(&self) -> &I18nConfig {
        &self.i18n
    }

    pub fn navbar(&self) -> &NavbarConfig {
        &self.navbar
    }

    pub fn footer(&self) -> &FooterConfig {
        &self.footer
    }

    pub fn prism(&self) -> &PrismConfig {
        &self.prism
    }

    pub fn docs(&self) -> &DocsConfig {
        &self.docs
    }

    pub fn build(&self) -> &BuildSettings {
        &self.build
    }
}

fn validate_i18n(raw: RawI18n) -> Result<I18nConfig, ConfigError> {
    let locales = raw
        .locales
        .unwrap_or_else(|| vec![raw.default_locale.clone()]);

    if locales.is_empty() {
        return Err(ConfigError::NoLocales);
    }

    for (i, locale) in locales.iter().enumerate() {
        let valid = !locale.is_empty()
            && locale
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::InvalidLocale(locale.clone()));
        }
        if locales[..i].contains(locale) {
            return Err(ConfigError::DuplicateLocale(locale.clone()));
        }
    }

    if !locales.contains(&raw.default_locale) {
        return Err(ConfigError::DefaultLocaleMissing {
            default: raw.default_locale,
            locales: locales.join(", "),
        });
    }

    Ok(I18nConfig::new(raw.default_locale, locales))
}

fn validate_navbar(navbar: &NavbarConfig) -> Result<(), ConfigError> {
    let check_internal = |label: &str, to: &str| {
        if to.starts_with('/') {
            Ok(())
        } else {
            Err(ConfigError::RelativeNavLink {
                label: label.to_string(),
                to: to.to_string(),
            })
        }
    };

    for item in &navbar.items {
        match item {
            NavItem::Doc { label, to, .. } => check_internal(label, to)?,
            NavItem::Dropdown { label, items, .. } => {
                if items.is_empty() {
                    return Err(ConfigError::EmptyDropdown(label.clone()));
                }
                for child in items {
                    if let NavLink::Doc { label, to } = child {
                        check_internal(label, to)?;
                    }
                }
            }
            NavItem::DocSidebar { .. } | NavItem::Link { .. } => {}
        }
    }

    Ok(())
}
