//! Fenced code block metadata.

/// Language of a code block, from the first word of the fence info string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    CSharp,
    Lua,
    Hlsl,
    Cpp,
    Rust,
    Python,
    TypeScript,
    JavaScript,
    Json,
    Yaml,
    Toml,
    Xml,
    Html,
    Css,
    Bash,
    Sql,
    #[default]
    Unknown,
}

impl Language {
    /// Parse language from code fence info string.
    pub fn from_info(info: &str) -> Self {
        let lang = info.split_whitespace().next().unwrap_or("");
        match lang.to_lowercase().as_str() {
            "cs" | "csharp" | "c#" => Self::CSharp,
            "lua" => Self::Lua,
            "hlsl" | "shader" | "shaderlab" => Self::Hlsl,
            "cpp" | "c++" | "c" => Self::Cpp,
            "rs" | "rust" => Self::Rust,
            "py" | "python" => Self::Python,
            "ts" | "tsx" | "typescript" => Self::TypeScript,
            "js" | "jsx" | "javascript" => Self::JavaScript,
            "json" => Self::Json,
            "yml" | "yaml" => Self::Yaml,
            "toml" => Self::Toml,
            "xml" => Self::Xml,
            "html" => Self::Html,
            "css" => Self::Css,
            "bash" | "sh" | "shell" => Self::Bash,
            "sql" => Self::Sql,
            _ => Self::Unknown,
        }
    }

    /// Class suffix used on `<code class="language-...">`.
    pub fn class_name(&self) -> Option<&'static str> {
        Some(match self {
            Self::CSharp => "csharp",
            Self::Lua => "lua",
            Self::Hlsl => "hlsl",
            Self::Cpp => "cpp",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Css => "css",
            Self::Bash => "bash",
            Self::Sql => "sql",
            Self::Unknown => return None,
        })
    }
}

/// A fenced code block found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Programming language
    pub language: Language,

    /// First word of the fence info string, as written
    pub lang: Option<String>,

    /// Source code content
    pub source: String,

    /// Header shown above the block, from `title="..."`
    pub title: Option<String>,

    /// `showLineNumbers` flag from the info string
    pub show_line_numbers: bool,
}

impl CodeBlock {
    /// Create a code block from its fence info string.
    pub fn from_info(info: &str, source: String) -> Self {
        Self {
            language: Language::from_info(info),
            lang: info.split_whitespace().next().map(str::to_string),
            source,
            title: extract_title(info),
            show_line_numbers: info
                .split_whitespace()
                .any(|w| w.eq_ignore_ascii_case("showLineNumbers")),
        }
    }

    /// Class suffix for `language-...`. Languages without a canonical name
    /// keep the fence word, reduced to characters safe in a class attribute.
    pub fn class_name(&self) -> Option<String> {
        if let Some(name) = self.language.class_name() {
            return Some(name.to_string());
        }

        let raw: String = self
            .lang
            .as_deref()?
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '+' | '#'))
            .collect::<String>()
            .to_lowercase();
        (!raw.is_empty()).then_some(raw)
    }
}

/// Extract a title from a code fence info string if present.
///
/// Supports formats like:
/// - `cs title="PlayerController.cs"`
/// - `cs title=PlayerController.cs`
pub fn extract_title(info: &str) -> Option<String> {
    if let Some(start) = info.find("title=\"") {
        let rest = &info[start + 7..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    if let Some(start) = info.find("title=") {
        let rest = &info[start + 6..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let title = rest[..end].trim_matches('"');
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    None
}
