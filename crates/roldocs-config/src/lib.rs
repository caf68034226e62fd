//! Site configuration for roldocs.
//!
//! Parses `roldocs.toml` with serde, validates it once and hands out an
//! immutable [`SiteConfig`]. Everything downstream (landing page, doc pages,
//! link checking) reads from that single value.

pub mod i18n;
pub mod navbar;
pub mod policy;
pub mod site;
pub mod theme;

pub use i18n::{text_direction, ui_strings, I18nConfig, TextDirection, UiStrings};
pub use navbar::{NavItem, NavKind, NavLink, NavPosition, NavbarConfig, NavbarLogo};
pub use policy::{BrokenLinkPolicy, TrailingSlash};
pub use site::{
    BuildSettings, ConfigError, DeployConfig, DocsConfig, FooterConfig, FooterStyle, SiteConfig,
    CONFIG_FILENAME,
};
pub use theme::{Palette, PrismConfig, PrismTheme};
