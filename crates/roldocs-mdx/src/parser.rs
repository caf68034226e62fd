//! Markdown document parser.

use std::collections::HashMap;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// A parsed document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed front matter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without front matter)
    pub content: String,

    /// Text of the first level-1 heading
    pub heading: Option<String>,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,

    /// Link and image destinations in source order
    pub links: Vec<DocLink>,
}

impl ParsedDoc {
    /// Front matter title, else the first `#` heading.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.title.as_deref())
            .or(self.heading.as_deref())
    }
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// A link destination found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLink {
    /// Destination as written
    pub dest: String,
    /// Line in the original file (1-indexed)
    pub line: usize,
    /// Whether this came from an image
    pub image: bool,
}

/// Errors that can occur when parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Front matter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for both parsing and rendering.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Parse a markdown document.
///
/// Extracts front matter and links, and generates a table of contents.
pub fn parse_mdx(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    // `content` is always a suffix of `source`
    let frontmatter_lines = source[..source.len() - content.len()].matches('\n').count();
    let line_at = |offset: usize| content[..offset].matches('\n').count() + 1 + frontmatter_lines;

    let mut toc = Vec::new();
    let mut links = Vec::new();
    let mut heading = None;
    let mut ids = HeadingIds::default();

    let mut in_code_block = false;
    let mut current_heading: Option<(u8, String)> = None; // (level, text)

    for (event, range) in Parser::new_ext(content, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,

            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current_heading.take() {
                    let title = title.trim().to_string();
                    if level == 1 && heading.is_none() {
                        heading = Some(title.clone());
                    }
                    let id = ids.next(&title);
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::Start(Tag::Link { dest_url, .. }) => links.push(DocLink {
                dest: dest_url.to_string(),
                line: line_at(range.start),
                image: false,
            }),

            Event::Start(Tag::Image { dest_url, .. }) => links.push(DocLink {
                dest: dest_url.to_string(),
                line: line_at(range.start),
                image: true,
            }),

            Event::Text(text) | Event::Code(text) if !in_code_block => {
                if let Some((_, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        heading,
        toc,
        links,
    })
}

/// Convert a heading to a URL-safe anchor id. Non-ASCII letters are kept.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Hands out unique heading anchors, suffixing repeats with `-1`, `-2`, ...
#[derive(Debug, Default)]
pub struct HeadingIds {
    seen: HashMap<String, usize>,
}

impl HeadingIds {
    pub fn next(&mut self, title: &str) -> String {
        let slug = slugify(title);
        let count = self.seen.entry(slug.clone()).or_insert(0);
        let id = if *count == 0 {
            slug
        } else {
            format!("{}-{}", slug, count)
        };
        *count += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_document() {
        let source = r#"---
title: 英雄系统
description: 神话英雄的技能与装备
---

# Heroes

See the [card system](./卡牌.md) and [guilds](/docs/工会).

```cs title="HeroSkill.cs"
public class HeroSkill {}
```

## Skills

![icon](/img/skill.png)
"#;

        let doc = parse_mdx(source).unwrap();

        assert_eq!(doc.title(), Some("英雄系统"));
        assert_eq!(doc.heading.as_deref(), Some("Heroes"));

        let dests: Vec<_> = doc.links.iter().map(|l| l.dest.as_str()).collect();
        assert_eq!(dests, vec!["./卡牌.md", "/docs/工会", "/img/skill.png"]);
        assert_eq!(doc.links[0].line, 8);
        assert!(doc.links[2].image);

        assert_eq!(doc.toc.len(), 2);
        assert_eq!(doc.toc[1].title, "Skills");
        assert_eq!(doc.toc[1].level, 2);
        assert_eq!(doc.toc[1].id, "skills");
    }

    #[test]
    fn title_falls_back_to_heading() {
        let doc = parse_mdx("# 工会系统\n\nText.").unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.title(), Some("工会系统"));
    }

    #[test]
    fn inline_code_in_heading_is_kept() {
        let doc = parse_mdx("## The `Spawner` class").unwrap();
        assert_eq!(doc.toc[0].title, "The Spawner class");
        assert_eq!(doc.toc[0].id, "the-spawner-class");
    }

    #[test]
    fn repeated_headings_get_unique_ids() {
        let doc = parse_mdx("## Rewards\n\n## Rewards\n\n## Rewards").unwrap();
        let ids: Vec<_> = doc.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["rewards", "rewards-1", "rewards-2"]);
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Button (Primary)"), "button-primary");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("卡牌 系统"), "卡牌-系统");
    }
}
