//! Markdown to HTML rendering.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd};

use roldocs_mdx::{markdown_options, CodeBlock, HeadingIds};

/// Render document content to HTML.
///
/// Headings receive the same anchor ids as the table of contents, fenced code
/// blocks get a title bar and language class, and every link or image
/// destination is passed through `rewrite` (second argument: is image).
pub fn render_markdown(content: &str, mut rewrite: impl FnMut(&str, bool) -> String) -> String {
    let events: Vec<Event> = Parser::new_ext(content, markdown_options()).collect();

    let mut heading_ids = heading_ids(&events).into_iter();
    let mut output: Vec<Event> = Vec::with_capacity(events.len());
    let mut code_block: Option<(String, String)> = None; // (info, source)

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) => output.push(Event::Start(Tag::Heading {
                level,
                id: heading_ids.next().map(CowStr::from),
                classes,
                attrs,
            })),

            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_block = Some((info, String::new()));
            }

            Event::Text(text) if code_block.is_some() => {
                if let Some((_, ref mut source)) = code_block {
                    source.push_str(&text);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, source)) = code_block.take() {
                    let block = CodeBlock::from_info(&info, source);
                    output.push(Event::Html(code_block_html(&block).into()));
                }
            }

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => output.push(Event::Start(Tag::Link {
                link_type,
                dest_url: rewrite(&dest_url, false).into(),
                title,
                id,
            })),

            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => output.push(Event::Start(Tag::Image {
                link_type,
                dest_url: rewrite(&dest_url, true).into(),
                title,
                id,
            })),

            other => output.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, output.into_iter());
    html_output
}

/// Anchor ids for every heading, in document order.
fn heading_ids(events: &[Event]) -> Vec<String> {
    let mut ids = HeadingIds::default();
    let mut result = Vec::new();
    let mut current: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(ref mut title) = current {
                    title.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(title) = current.take() {
                    result.push(ids.next(title.trim()));
                }
            }
            _ => {}
        }
    }

    result
}

fn code_block_html(block: &CodeBlock) -> String {
    let class = block
        .class_name()
        .map(|lang| format!(" class=\"language-{}\"", lang))
        .unwrap_or_default();

    let mut html = String::from("<div class=\"code-block\">");

    if let Some(title) = &block.title {
        html.push_str("<div class=\"code-block__title\">");
        html.push_str(&escape_html(title));
        html.push_str("</div>");
    }

    html.push_str(&format!("<pre{}><code{}>", class, class));
    let source = block.source.strip_suffix('\n').unwrap_or(&block.source);
    if block.show_line_numbers {
        for line in source.lines() {
            html.push_str("<span class=\"code-line\">");
            html.push_str(&escape_html(line));
            html.push_str("</span>\n");
        }
    } else {
        html.push_str(&escape_html(source));
    }
    html.push_str("</code></pre></div>\n");

    html
}

/// Escape text for HTML content and attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(content: &str) -> String {
        render_markdown(content, |dest, _| dest.to_string())
    }

    #[test]
    fn renders_paragraphs_and_headings_with_ids() {
        let html = render("# 卡牌系统\n\n## Rarity Tiers\n\nText");

        assert!(html.contains(r#"<h1 id="卡牌系统">卡牌系统</h1>"#));
        assert!(html.contains(r#"<h2 id="rarity-tiers">Rarity Tiers</h2>"#));
        assert!(html.contains("<p>Text</p>"));
    }

    #[test]
    fn heading_ids_match_table_of_contents() {
        let source = "## Rewards\n\n## Rewards\n\n### `Drop` table";
        let doc = roldocs_mdx::parse_mdx(source).unwrap();
        let html = render(source);

        for entry in &doc.toc {
            assert!(html.contains(&format!("id=\"{}\"", entry.id)), "{}", entry.id);
        }
    }

    #[test]
    fn renders_code_block_with_title() {
        let html = render("```cs title=\"Hero.cs\"\nif (a < b) {}\n```");

        assert!(html.contains(r#"<div class="code-block__title">Hero.cs</div>"#));
        assert!(html.contains(r#"<pre class="language-csharp"><code class="language-csharp">"#));
        assert!(html.contains("if (a &lt; b) {}"));
    }

    #[test]
    fn unlisted_fence_language_still_gets_a_class() {
        let html = render("```gdscript\nfunc _ready():\n    pass\n```");
        assert!(html.contains(r#"<code class="language-gdscript">"#));
    }

    #[test]
    fn renders_line_numbers() {
        let html = render("```lua showLineNumbers\nlocal a = 1\nlocal b = 2\n```");
        assert_eq!(html.matches("<span class=\"code-line\">").count(), 2);
    }

    #[test]
    fn rewrites_link_and_image_destinations() {
        let html = render_markdown("[intro](/docs/intro) ![map](/img/map.png)", |dest, image| {
            if image {
                format!("/ROL_Docs{}", dest)
            } else {
                format!("/ROL_Docs{}/", dest)
            }
        });

        assert!(html.contains(r#"href="/ROL_Docs/docs/intro/""#));
        assert!(html.contains(r#"src="/ROL_Docs/img/map.png""#));
    }
}
