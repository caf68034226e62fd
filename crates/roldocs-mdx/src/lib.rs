//! Markdown document parser for roldocs.
//!
//! Extracts YAML front matter, headings and links from `.md`/`.mdx`
//! documents so the site builder can route and check them, and reads fenced
//! code block info strings for rendering.

pub mod codeblock;
pub mod frontmatter;
pub mod parser;

pub use codeblock::{extract_title, CodeBlock, Language};
pub use frontmatter::{Frontmatter, FrontmatterError};
pub use parser::{
    markdown_options, parse_mdx, slugify, DocLink, HeadingIds, ParseError, ParsedDoc, TocEntry,
};
