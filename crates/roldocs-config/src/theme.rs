//! Code block highlight themes.

use serde::{Deserialize, Serialize};

/// Built-in highlight themes, named as in `prism-react-renderer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrismTheme {
    #[serde(rename = "github")]
    Github,
    #[serde(rename = "dracula")]
    Dracula,
    #[serde(rename = "vsDark")]
    VsDark,
    #[serde(rename = "oneDark")]
    OneDark,
    #[serde(rename = "oneLight")]
    OneLight,
    #[serde(rename = "nightOwl")]
    NightOwl,
}

/// Token colors for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub comment: &'static str,
    pub keyword: &'static str,
    pub string: &'static str,
    pub function: &'static str,
    pub number: &'static str,
}

impl PrismTheme {
    /// Theme name as written in the config file.
    pub fn name(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Dracula => "dracula",
            Self::VsDark => "vsDark",
            Self::OneDark => "oneDark",
            Self::OneLight => "oneLight",
            Self::NightOwl => "nightOwl",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Github => Palette {
                background: "#f6f8fa",
                foreground: "#393a34",
                comment: "#999988",
                keyword: "#00a4db",
                string: "#e3116c",
                function: "#d73a49",
                number: "#36acaa",
            },
            Self::Dracula => Palette {
                background: "#282a36",
                foreground: "#f8f8f2",
                comment: "#6272a4",
                keyword: "#ff79c6",
                string: "#f1fa8c",
                function: "#50fa7b",
                number: "#bd93f9",
            },
            Self::VsDark => Palette {
                background: "#1e1e1e",
                foreground: "#9cdcfe",
                comment: "#6a9955",
                keyword: "#569cd6",
                string: "#ce9178",
                function: "#dcdcaa",
                number: "#b5cea8",
            },
            Self::OneDark => Palette {
                background: "#282c34",
                foreground: "#abb2bf",
                comment: "#5c6370",
                keyword: "#c678dd",
                string: "#98c379",
                function: "#61afef",
                number: "#d19a66",
            },
            Self::OneLight => Palette {
                background: "#fafafa",
                foreground: "#383a42",
                comment: "#a0a1a7",
                keyword: "#a626a4",
                string: "#50a14f",
                function: "#4078f2",
                number: "#986801",
            },
            Self::NightOwl => Palette {
                background: "#011627",
                foreground: "#d6deeb",
                comment: "#637777",
                keyword: "#c792ea",
                string: "#ecc48d",
                function: "#82aaff",
                number: "#f78c6c",
            },
        }
    }
}

/// Light and dark highlight themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrismConfig {
    #[serde(default = "default_theme")]
    pub theme: PrismTheme,
    #[serde(default = "default_dark_theme")]
    pub dark_theme: PrismTheme,
}

fn default_theme() -> PrismTheme {
    PrismTheme::Github
}

fn default_dark_theme() -> PrismTheme {
    PrismTheme::Dracula
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            dark_theme: default_dark_theme(),
        }
    }
}
