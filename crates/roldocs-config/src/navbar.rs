//! Top navigation bar entries.

use serde::{Deserialize, Serialize};

/// Which side of the navbar an item sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavPosition {
    #[default]
    Left,
    Right,
}

/// Coarse classification of a navbar entry; the navbar template branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKind {
    InternalDocLink,
    Dropdown,
    ExternalLink,
}

/// A top-level navbar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum NavItem {
    /// Link to the first document of the docs sidebar.
    DocSidebar {
        label: String,
        #[serde(default)]
        position: NavPosition,
    },

    /// Link to a site route such as `/docs/intro`.
    Doc {
        label: String,
        to: String,
        #[serde(default)]
        position: NavPosition,
    },

    /// Link to an outside URL.
    Link {
        label: String,
        href: String,
        #[serde(default)]
        position: NavPosition,
    },

    /// Nested menu of links.
    Dropdown {
        label: String,
        #[serde(default)]
        position: NavPosition,
        items: Vec<NavLink>,
    },
}

impl NavItem {
    pub fn label(&self) -> &str {
        match self {
            Self::DocSidebar { label, .. }
            | Self::Doc { label, .. }
            | Self::Link { label, .. }
            | Self::Dropdown { label, .. } => label,
        }
    }

    pub fn position(&self) -> NavPosition {
        match self {
            Self::DocSidebar { position, .. }
            | Self::Doc { position, .. }
            | Self::Link { position, .. }
            | Self::Dropdown { position, .. } => *position,
        }
    }

    pub fn kind(&self) -> NavKind {
        match self {
            Self::DocSidebar { .. } | Self::Doc { .. } => NavKind::InternalDocLink,
            Self::Link { .. } => NavKind::ExternalLink,
            Self::Dropdown { .. } => NavKind::Dropdown,
        }
    }
}

/// A dropdown child: either an internal route or an outside URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavLink {
    Doc { label: String, to: String },
    Link { label: String, href: String },
}

impl NavLink {
    pub fn label(&self) -> &str {
        match self {
            Self::Doc { label, .. } | Self::Link { label, .. } => label,
        }
    }

    pub fn kind(&self) -> NavKind {
        match self {
            Self::Doc { .. } => NavKind::InternalDocLink,
            Self::Link { .. } => NavKind::ExternalLink,
        }
    }
}

/// Navbar logo image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavbarLogo {
    pub alt: String,
    pub src: String,
}

/// The `[navbar]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavbarConfig {
    /// Brand text shown next to the logo
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub logo: Option<NavbarLogo>,

    /// Entries in declaration order
    #[serde(default)]
    pub items: Vec<NavItem>,
}
