//! Front matter extraction and parsing.

use serde::Deserialize;

/// Parsed front matter of a document. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Frontmatter {
    /// Overrides the id derived from the file path
    pub id: Option<String>,

    /// Page title; falls back to the first `#` heading
    pub title: Option<String>,

    /// Page description for meta tags
    pub description: Option<String>,

    /// Label in the sidebar, when it should differ from the title
    pub sidebar_label: Option<String>,

    /// Order in the sidebar (lower = first)
    pub sidebar_position: Option<f64>,

    /// Custom route, absolute (`/guide`) or relative to the docs base path
    pub slug: Option<String>,

    /// Hide the "on this page" panel
    pub hide_table_of_contents: bool,

    /// Drafts are skipped by the build
    pub draft: bool,
}

/// Split a document into its front matter and the content after it.
///
/// The block must open on the first line and close with a line holding only
/// `---`. The returned content is always a suffix of `source`.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let Some(first_line_end) = source.find('\n') else {
        return Ok((None, source));
    };
    if source[..first_line_end].trim_end() != "---" {
        return Ok((None, source));
    }

    let block = &source[first_line_end + 1..];
    let mut offset = 0;
    for line in block.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &block[..offset];
            let content = block[offset + line.len()..].trim_start();

            if yaml.trim().is_empty() {
                return Ok((Some(Frontmatter::default()), content));
            }

            return serde_yaml::from_str(yaml)
                .map(|frontmatter| (Some(frontmatter), content))
                .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unclosed)
}

/// Errors that can occur when parsing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("front matter opened with --- but never closed")]
    Unclosed,

    #[error("front matter is not valid YAML: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_doc_fields() {
        let source = r#"---
title: 卡牌系统
description: 卡牌养成与抽卡规则
sidebar_position: 2
---

# 卡牌系统
"#;

        let (frontmatter, content) = extract_frontmatter(source).unwrap();
        let fm = frontmatter.unwrap();

        assert_eq!(fm.title.as_deref(), Some("卡牌系统"));
        assert_eq!(fm.description.as_deref(), Some("卡牌养成与抽卡规则"));
        assert_eq!(fm.sidebar_position, Some(2.0));
        assert!(!fm.draft);
        assert!(content.starts_with("# 卡牌系统"));
    }

    #[test]
    fn title_is_optional() {
        let source = "---\nslug: /guild\ndraft: true\n---\n# 工会";

        let (fm, _) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert!(fm.title.is_none());
        assert_eq!(fm.slug.as_deref(), Some("/guild"));
        assert!(fm.draft);
    }

    #[test]
    fn plain_markdown_has_none() {
        for source in ["# 开始\n\n正文", "正文 --- 分隔", "----\ntitle: x\n----\n"] {
            let (fm, content) = extract_frontmatter(source).unwrap();
            assert!(fm.is_none(), "{}", source);
            assert_eq!(content, source);
        }
    }

    #[test]
    fn closing_delimiter_must_be_its_own_line() {
        let source = "---\ntitle: a---b\n---\nBody";
        let (fm, content) = extract_frontmatter(source).unwrap();
        assert_eq!(fm.unwrap().title.as_deref(), Some("a---b"));
        assert_eq!(content, "Body");
    }

    #[test]
    fn handles_empty_block() {
        let (fm, content) = extract_frontmatter("---\n---\nBody").unwrap();
        assert_eq!(fm, Some(Frontmatter::default()));
        assert_eq!(content, "Body");
    }

    #[test]
    fn reports_unclosed_block() {
        let result = extract_frontmatter("---\ntitle: 工会\n# 工会");
        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn reports_bad_yaml() {
        let result = extract_frontmatter("---\nsidebar_position: [1\n---\n");
        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }
}
