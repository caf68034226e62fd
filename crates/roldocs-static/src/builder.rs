//! Static site builder.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Datelike;
use rayon::prelude::*;

use roldocs_config::{text_direction, ui_strings, BrokenLinkPolicy, SiteConfig};

use crate::assets::AssetPipeline;
use crate::docs::{discover_docs, DocPage, DocTree};
use crate::landing::{LandingView, FEATURES, HERO};
use crate::links::{
    encode_path, is_external, is_markdown_file, localize, normalize_route, resolve_relative,
    split_suffix,
    BrokenLink, LinkChecker, LinkKind,
};
use crate::markdown::render_markdown;
use crate::navigation::{
    build_sidebar, internal_href, mark_active, navbar_targets, navbar_view, sidebar_route,
};
use crate::templates::{
    Alternate, DocView, FooterView, PageMeta, SidebarItem, SiteView, TemplateEngine, TocEntry,
};

const HOME_ROUTE: &str = "/";
const NOT_FOUND_ROUTE: &str = "/404";

/// Output settings for a build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Year substituted for `{year}` in the footer
    pub year: i32,
}

impl BuildConfig {
    /// Settings from the `[build]` section of a site config.
    pub fn from_site(site: &SiteConfig) -> Self {
        Self {
            output_dir: site.build().output.clone(),
            minify: site.build().minify,
            ..Default::default()
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build"),
            minify: true,
            year: chrono::Local::now().year(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of HTML pages written, across all locales
    pub pages: usize,

    /// Number of documents in each locale
    pub docs: usize,

    /// Number of locales built
    pub locales: usize,

    /// Number of static files copied, across all locales
    pub static_files: usize,

    /// Broken links whose policy let the build continue
    pub broken_links: Vec<BrokenLink>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Result of a link check without writing output.
#[derive(Debug)]
pub struct CheckReport {
    /// Number of pages rendered, across all locales
    pub pages: usize,

    pub broken_links: Vec<BrokenLink>,

    /// How many broken links a build would fail on
    pub fatal: usize,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to parse markdown: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Route {route} is produced by both {first} and {second}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },

    #[error("Found {count} broken link(s):\n{details}")]
    BrokenLinks { count: usize, details: String },
}

/// A rendered page, addressed by its route without base URL.
#[derive(Debug)]
struct RenderedPage {
    route: String,
    html: String,
    in_sitemap: bool,
}

/// All pages of one locale, rendered but not yet written.
#[derive(Debug)]
struct RenderedLocale {
    locale: String,
    base_url: String,
    pages: Vec<RenderedPage>,
    docs: usize,
    broken: Vec<BrokenLink>,
}

/// Per-locale state shared by every page render.
struct LocaleContext {
    base_url: String,
    tree: DocTree,
    checker: LinkChecker,
    site: SiteView,
    sidebar: Vec<SidebarItem>,
    /// Base URL of every locale, for hreflang alternates
    locale_bases: Vec<(String, String)>,
}

/// Where a link in a document points.
enum Resolved {
    External,
    /// Site route without base URL, query and fragment kept
    Internal(String),
    /// Markdown file link that matches no document
    MissingMarkdown(String),
}

/// Static site builder.
pub struct StaticBuilder {
    site: Arc<SiteConfig>,
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(site: Arc<SiteConfig>, config: BuildConfig) -> Self {
        Self {
            site,
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    ///
    /// Every page of every locale is rendered and link-checked before anything
    /// is written, so a fatal broken link leaves the output directory untouched.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let rendered = self.render_all()?;

        let broken: Vec<BrokenLink> = rendered
            .iter()
            .flat_map(|l| l.broken.iter().cloned())
            .collect();
        let fatal = self.apply_policies(&broken);
        if !fatal.is_empty() {
            return Err(BuildError::BrokenLinks {
                count: fatal.len(),
                details: fatal
                    .iter()
                    .map(|link| format!("  - {}", link))
                    .collect::<Vec<_>>()
                    .join("\n"),
            });
        }

        let output_dir = &self.config.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(write_error)?;

        let trailing = self.site.trailing_slash();
        let mut pages = 0;
        let mut static_files = 0;
        let mut sitemap_urls = Vec::new();

        let static_dir = &self.site.build().static_dir;

        for locale in &rendered {
            let locale_dir = self.locale_dir(&locale.locale);

            // Static files first, so generated pages win on collisions.
            static_files +=
                AssetPipeline::copy_static(static_dir, &locale_dir).map_err(write_error)?;

            for page in &locale.pages {
                let relative = self.output_file(&page.route);
                if static_dir.join(&relative).is_file() {
                    tracing::warn!(
                        "Static file {} is replaced by the generated page for {}",
                        relative.display(),
                        page.route
                    );
                }

                let path = locale_dir.join(&relative);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(write_error)?;
                }
                tokio::fs::write(&path, &page.html)
                    .await
                    .map_err(write_error)?;
                pages += 1;

                if page.in_sitemap {
                    let href = internal_href(&locale.base_url, &page.route, trailing);
                    sitemap_urls.push(format!("{}{}", self.site.url(), encode_path(&href)));
                }
            }
        }

        self.check_favicon();
        self.generate_assets().await?;
        self.generate_sitemap(&sitemap_urls).await?;

        Ok(BuildResult {
            pages,
            docs: rendered.first().map(|l| l.docs).unwrap_or(0),
            locales: rendered.len(),
            static_files,
            broken_links: broken,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: output_dir.clone(),
        })
    }

    /// Render and link-check every locale without writing anything.
    pub fn check(&self) -> Result<CheckReport, BuildError> {
        let rendered = self.render_all()?;

        let pages = rendered.iter().map(|l| l.pages.len()).sum();
        let broken_links: Vec<BrokenLink> =
            rendered.into_iter().flat_map(|l| l.broken).collect();
        let fatal = self.apply_policies(&broken_links).len();

        Ok(CheckReport {
            pages,
            broken_links,
            fatal,
        })
    }

    fn render_all(&self) -> Result<Vec<RenderedLocale>, BuildError> {
        self.site
            .i18n()
            .locales()
            .iter()
            .map(|locale| self.render_locale(locale))
            .collect()
    }

    /// Render the landing page, every document and the 404 page of a locale.
    fn render_locale(&self, locale: &str) -> Result<RenderedLocale, BuildError> {
        let site = &self.site;
        let docs_config = site.docs();

        let translations = (!site.i18n().is_default(locale))
            .then(|| docs_config.i18n_dir.join(locale).join("docs"));
        let tree = discover_docs(
            &docs_config.dir,
            &docs_config.route_base_path,
            translations.as_deref(),
        )?;
        check_duplicate_routes(&tree)?;

        tracing::info!("Rendering {} documents for locale {}", tree.docs.len(), locale);

        let base_url = site.locale_base_url(locale);
        let trailing = site.trailing_slash();
        let first_route = sidebar_route(&tree, &docs_config.route_base_path);

        let routes: Vec<String> = [HOME_ROUTE, NOT_FOUND_ROUTE]
            .into_iter()
            .chain(tree.routes())
            .map(str::to_string)
            .collect();
        let checker = LinkChecker::new(routes, &site.build().static_dir);

        let site_view = SiteView {
            lang: locale.to_string(),
            dir: text_direction(locale).as_str(),
            site_title: site.title().to_string(),
            base_url: base_url.clone(),
            assets_url: site.base_url().to_string(),
            favicon: site.favicon().map(|f| {
                if is_external(f) {
                    f.to_string()
                } else {
                    localize(&base_url, f)
                }
            }),
            navbar: navbar_view(site.navbar(), &base_url, trailing, &first_route),
            footer: self.footer_view(),
            strings: ui_strings(locale),
        };

        let ctx = LocaleContext {
            sidebar: build_sidebar(&tree, &base_url, trailing),
            base_url: base_url.clone(),
            tree,
            checker,
            site: site_view,
            locale_bases: site
                .i18n()
                .locales()
                .iter()
                .map(|l| (l.clone(), site.locale_base_url(l)))
                .collect(),
        };

        let navbar_links = navbar_targets(site.navbar(), &first_route);
        let mut broken = ctx
            .checker
            .check("navbar", navbar_links.iter().map(String::as_str));

        let mut pages = Vec::with_capacity(ctx.tree.docs.len() + 2);

        let (landing, landing_broken) = self.render_landing(&ctx)?;
        pages.push(landing);
        broken.extend(landing_broken);

        // Parallel over documents; collect keeps sidebar order.
        let docs: Vec<(RenderedPage, Vec<BrokenLink>)> = ctx
            .tree
            .docs
            .par_iter()
            .map(|doc| self.render_doc(doc, &ctx))
            .collect::<Result<_, _>>()?;

        for (page, doc_broken) in docs {
            pages.push(page);
            broken.extend(doc_broken);
        }

        pages.push(self.render_not_found(&ctx)?);

        Ok(RenderedLocale {
            locale: locale.to_string(),
            base_url,
            pages,
            docs: ctx.tree.docs.len(),
            broken,
        })
    }

    fn render_landing(
        &self,
        ctx: &LocaleContext,
    ) -> Result<(RenderedPage, Vec<BrokenLink>), BuildError> {
        let targets: Vec<String> = std::iter::once(HERO.cta_to.to_string())
            .chain(FEATURES.iter().map(|f| format!("/{}", f.icon)))
            .collect();
        let broken = ctx
            .checker
            .check(HOME_ROUTE, targets.iter().map(String::as_str));

        let view = LandingView::new(
            &ctx.base_url,
            internal_href(&ctx.base_url, HERO.cta_to, self.site.trailing_slash()),
        );
        let meta = self.page_meta(ctx, HOME_ROUTE, HERO.page_title, Some(HERO.description));

        let html = self
            .templates
            .render_landing(&ctx.site, &meta, &view)
            .map_err(template_error)?;

        Ok((
            RenderedPage {
                route: HOME_ROUTE.to_string(),
                html,
                in_sitemap: true,
            },
            broken,
        ))
    }

    /// Build a single documentation page.
    fn render_doc(
        &self,
        doc: &DocPage,
        ctx: &LocaleContext,
    ) -> Result<(RenderedPage, Vec<BrokenLink>), BuildError> {
        let trailing = self.site.trailing_slash();
        let frontmatter = doc.doc.frontmatter.clone().unwrap_or_default();

        let mut broken = Vec::new();
        for link in &doc.doc.links {
            match resolve_link(doc, &ctx.tree, &link.dest) {
                Resolved::External => {}
                Resolved::Internal(route) => {
                    if !ctx.checker.resolves(&route) {
                        broken.push(BrokenLink {
                            source: doc.route.clone(),
                            target: split_suffix(&route).0.to_string(),
                            kind: LinkKind::Route,
                        });
                    }
                }
                Resolved::MissingMarkdown(path) => broken.push(BrokenLink {
                    source: format!("{}:{}", doc.source_path.display(), link.line),
                    target: path,
                    kind: LinkKind::MarkdownFile,
                }),
            }
        }

        let content = render_markdown(&doc.doc.content, |dest, image| {
            if dest.starts_with('#') {
                return dest.to_string();
            }
            match resolve_link(doc, &ctx.tree, dest) {
                Resolved::Internal(route) if image => localize(&ctx.base_url, &route),
                Resolved::Internal(route) => internal_href(&ctx.base_url, &route, trailing),
                Resolved::External | Resolved::MissingMarkdown(_) => dest.to_string(),
            }
        });

        let toc = if frontmatter.hide_table_of_contents {
            Vec::new()
        } else {
            doc.doc
                .toc
                .iter()
                .filter(|e| (2..=4).contains(&e.level))
                .map(|e| TocEntry {
                    title: e.title.clone(),
                    id: e.id.clone(),
                    level: e.level,
                })
                .collect()
        };

        let mut sidebar = ctx.sidebar.clone();
        mark_active(
            &mut sidebar,
            &internal_href(&ctx.base_url, &doc.route, trailing),
        );

        let page = DocView {
            id: doc.id.clone(),
            title: doc.title.clone(),
            content,
            show_title: doc.doc.heading.is_none(),
            sidebar,
            toc,
        };
        let meta = self.page_meta(
            ctx,
            &doc.route,
            &doc.title,
            frontmatter.description.as_deref(),
        );

        let html = self
            .templates
            .render_doc(&ctx.site, &meta, &page)
            .map_err(template_error)?;

        Ok((
            RenderedPage {
                route: doc.route.clone(),
                html,
                in_sitemap: true,
            },
            broken,
        ))
    }

    fn render_not_found(&self, ctx: &LocaleContext) -> Result<RenderedPage, BuildError> {
        let meta = self.page_meta(
            ctx,
            NOT_FOUND_ROUTE,
            ctx.site.strings.not_found_title,
            None,
        );

        let html = self
            .templates
            .render_not_found(&ctx.site, &meta)
            .map_err(template_error)?;

        Ok(RenderedPage {
            route: NOT_FOUND_ROUTE.to_string(),
            html,
            in_sitemap: false,
        })
    }

    fn page_meta(
        &self,
        ctx: &LocaleContext,
        route: &str,
        title: &str,
        description: Option<&str>,
    ) -> PageMeta {
        let trailing = self.site.trailing_slash();
        let url = self.site.url();

        PageMeta {
            title: format!("{} | {}", title, self.site.title()),
            description: description.map(str::to_string),
            canonical: format!("{}{}", url, internal_href(&ctx.base_url, route, trailing)),
            alternates: ctx
                .locale_bases
                .iter()
                .map(|(locale, base)| Alternate {
                    locale: locale.clone(),
                    href: format!("{}{}", url, internal_href(base, route, trailing)),
                })
                .collect(),
        }
    }

    fn footer_view(&self) -> Option<FooterView> {
        let footer = self.site.footer();
        footer
            .copyright_for_year(self.config.year)
            .map(|copyright| FooterView {
                style: footer.style,
                copyright,
            })
    }

    /// Report every broken link under its policy and return the fatal ones.
    fn apply_policies<'a>(&self, broken: &'a [BrokenLink]) -> Vec<&'a BrokenLink> {
        let mut fatal = Vec::new();

        for link in broken {
            let policy = self.policy_for(link.kind);
            policy.report(&link.kind.to_string(), &link.source, &link.target);
            if policy.is_fatal() {
                fatal.push(link);
            }
        }

        fatal
    }

    fn policy_for(&self, kind: LinkKind) -> BrokenLinkPolicy {
        match kind {
            LinkKind::Route => self.site.on_broken_links(),
            LinkKind::MarkdownFile => self.site.on_broken_markdown_links(),
        }
    }

    /// Output root of a locale. Non-default locales get a subdirectory.
    fn locale_dir(&self, locale: &str) -> PathBuf {
        if self.site.i18n().is_default(locale) {
            self.config.output_dir.clone()
        } else {
            self.config.output_dir.join(locale)
        }
    }

    fn output_file(&self, route: &str) -> PathBuf {
        if route == NOT_FOUND_ROUTE {
            PathBuf::from("404.html")
        } else {
            self.site.trailing_slash().output_file(route)
        }
    }

    fn check_favicon(&self) {
        let Some(favicon) = self.site.favicon() else {
            return;
        };
        if is_external(favicon) {
            return;
        }

        let path = self
            .site
            .build()
            .static_dir
            .join(favicon.trim_start_matches('/'));
        if !path.is_file() {
            tracing::warn!("Favicon not found: {}", path.display());
        }
    }

    /// Generate static assets.
    async fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        tokio::fs::create_dir_all(&assets_dir)
            .await
            .map_err(write_error)?;

        let css = AssetPipeline::generate_css(self.site.prism());
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Skipping CSS minification: {}", e);
                css
            })
        } else {
            css
        };
        tokio::fs::write(assets_dir.join("main.css"), css)
            .await
            .map_err(write_error)?;

        tokio::fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .await
            .map_err(write_error)?;

        Ok(())
    }

    /// Generate sitemap and robots.txt.
    async fn generate_sitemap(&self, urls: &[String]) -> Result<(), BuildError> {
        let entries: Vec<String> = urls
            .iter()
            .map(|url| format!("  <url>\n    <loc>{}</loc>\n  </url>", escape_xml(url)))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            entries.join("\n")
        );

        tokio::fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .await
            .map_err(write_error)?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}{}sitemap.xml\n",
            self.site.url(),
            self.site.base_url()
        );
        tokio::fs::write(self.config.output_dir.join("robots.txt"), robots)
            .await
            .map_err(write_error)?;

        Ok(())
    }
}

fn resolve_link(doc: &DocPage, tree: &DocTree, dest: &str) -> Resolved {
    if is_external(dest) {
        return Resolved::External;
    }

    let (path, suffix) = split_suffix(dest);
    if is_markdown_file(path) {
        let file = resolve_doc_file(&doc.relative_path, path);
        return match tree.by_relative_path(&file) {
            Some(target) => Resolved::Internal(format!("{}{}", target.route, suffix)),
            None => Resolved::MissingMarkdown(path.to_string()),
        };
    }

    Resolved::Internal(resolve_relative(&doc.route, dest))
}

/// Path of a linked markdown file relative to the docs directory.
fn resolve_doc_file(current: &Path, link: &str) -> PathBuf {
    let joined = if link.starts_with('/') {
        link.to_string()
    } else {
        let dir = current
            .parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        format!("/{}/{}", dir, link)
    };

    PathBuf::from(normalize_route(&joined).trim_start_matches('/'))
}

fn check_duplicate_routes(tree: &DocTree) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, String> = HashMap::new();
    seen.insert(HOME_ROUTE, "the landing page".to_string());
    seen.insert(NOT_FOUND_ROUTE, "the 404 page".to_string());

    for doc in &tree.docs {
        let source = doc.relative_path.display().to_string();
        if let Some(first) = seen.insert(doc.route.as_str(), source.clone()) {
            return Err(BuildError::DuplicateRoute {
                route: doc.route.clone(),
                first,
                second: source,
            });
        }
    }

    Ok(())
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

fn template_error(e: minijinja::Error) -> BuildError {
    BuildError::TemplateError(e.to_string())
}

fn write_error(e: std::io::Error) -> BuildError {
    BuildError::WriteError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::{tempdir, TempDir};
    use walkdir::WalkDir;

    const NAVBAR: &str = r#"
[navbar]
title = "游戏文档"

[[navbar.items]]
type = "doc_sidebar"
label = "API文档"

[[navbar.items]]
type = "dropdown"
label = "系统文档"
items = [
  { label = "卡片系统", to = "/docs/cards" },
  { label = "工会系统", to = "/docs/guild" },
]

[[navbar.items]]
type = "link"
label = "GitHub"
href = "https://github.com/TimHuang1025/ROL_Docs"
position = "right"

[footer]
style = "dark"
copyright = "Copyright © {year} 游戏项目文档"
"#;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// A project with three docs and the landing images, configured by
    /// extra `[site]` keys and extra sections.
    fn project(site_extra: &str, sections: &str) -> (TempDir, Arc<SiteConfig>) {
        let temp = tempdir().unwrap();
        let root = temp.path();

        write(
            root,
            "roldocs.toml",
            &format!(
                "[site]\ntitle = \"游戏项目文档\"\nurl = \"https://example.com\"\n{}\n{}\n{}",
                site_extra, NAVBAR, sections
            ),
        );
        write(root, "docs/intro.md", "---\nsidebar_position: 1\n---\n# 开始\n\nSee [cards](./cards.md).");
        write(root, "docs/cards.md", "---\ntitle: 卡牌\nsidebar_position: 2\n---\n## Rarity\n\nBody");
        write(root, "docs/guild.md", "---\nsidebar_position: 3\n---\n# 工会\n\n[home](/)");
        for feature in FEATURES {
            write(&root.join("static"), feature.icon, "<svg/>");
        }

        let site = SiteConfig::load(&root.join("roldocs.toml")).unwrap();
        (temp, Arc::new(site))
    }

    fn builder(site: &Arc<SiteConfig>, out: &Path) -> StaticBuilder {
        StaticBuilder::new(
            site.clone(),
            BuildConfig {
                output_dir: out.to_path_buf(),
                minify: false,
                year: 2025,
            },
        )
    }

    fn files(root: &Path) -> BTreeSet<String> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect()
    }

    #[tokio::test]
    async fn builds_landing_docs_and_404() {
        let (temp, site) = project("", "");
        let out = temp.path().join("build");

        let result = builder(&site, &out).build().await.unwrap();

        assert_eq!(result.docs, 3);
        assert_eq!(result.locales, 1);
        assert_eq!(result.pages, 5);
        assert!(result.broken_links.is_empty());

        for file in [
            "index.html",
            "404.html",
            "docs/intro/index.html",
            "docs/cards/index.html",
            "docs/guild/index.html",
            "assets/main.css",
            "assets/main.js",
            "sitemap.xml",
            "robots.txt",
            "img/undraw_docusaurus_tree.svg",
        ] {
            assert!(out.join(file).is_file(), "missing {}", file);
        }

        let landing = fs::read_to_string(out.join("index.html")).unwrap();
        assert_eq!(landing.matches(r#"<div class="col col--4">"#).count(), 3);
        let positions: Vec<usize> = FEATURES
            .iter()
            .map(|f| landing.find(f.title).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(landing.contains("<title>Realm of Legends - 开发文档 | 游戏项目文档</title>"));
        assert!(landing.contains(r#"href="/docs/intro">开始探索 ⚔️</a>"#));
        assert!(landing.contains("Copyright © 2025 游戏项目文档"));

        let intro = fs::read_to_string(out.join("docs/intro/index.html")).unwrap();
        assert!(intro.contains(r#"href="/docs/cards""#));

        let cards = fs::read_to_string(out.join("docs/cards/index.html")).unwrap();
        assert!(cards.contains("<h1>卡牌</h1>"));
        assert!(cards.contains(r##"href="#rarity""##));

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/docs/intro</loc>"));
        assert!(!sitemap.contains("404"));
    }

    #[tokio::test]
    async fn broken_link_with_throw_fails_before_writing() {
        let (temp, site) = project("", "");
        write(temp.path(), "docs/guild.md", "# 工会\n\n[missing](/docs/missing)");
        let out = temp.path().join("build");

        let err = builder(&site, &out).build().await.unwrap_err();

        match err {
            BuildError::BrokenLinks { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("/docs/missing"));
                assert!(details.contains("/docs/guild"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!out.join("index.html").exists());
    }

    #[tokio::test]
    async fn broken_link_with_warn_still_builds() {
        let (temp, site) = project("on_broken_links = \"warn\"", "");
        write(temp.path(), "docs/guild.md", "# 工会\n\n[missing](/docs/missing)");
        let out = temp.path().join("build");

        let result = builder(&site, &out).build().await.unwrap();

        assert_eq!(
            result.broken_links,
            vec![BrokenLink {
                source: "/docs/guild".to_string(),
                target: "/docs/missing".to_string(),
                kind: LinkKind::Route,
            }]
        );
        assert!(out.join("docs/guild/index.html").is_file());
    }

    #[tokio::test]
    async fn navbar_targets_are_checked() {
        let (temp, site) = project("", "");
        fs::remove_file(temp.path().join("docs/guild.md")).unwrap();
        let out = temp.path().join("build");

        let err = builder(&site, &out).build().await.unwrap_err();

        assert!(err.to_string().contains("Broken link on navbar: /docs/guild"));
    }

    #[test]
    fn missing_markdown_file_uses_its_own_policy() {
        let (temp, site) = project("", "");
        write(temp.path(), "docs/guild.md", "# 工会\n\n[old](./old.md)");
        let out = temp.path().join("build");

        let report = builder(&site, &out).check().unwrap();

        assert_eq!(
            report.broken_links,
            vec![BrokenLink {
                source: format!("{}:3", temp.path().join("docs").join("guild.md").display()),
                target: "./old.md".to_string(),
                kind: LinkKind::MarkdownFile,
            }]
        );
        assert_eq!(report.fatal, 0);
        assert!(!out.exists());
    }

    #[test]
    fn translated_doc_reports_its_own_file() {
        let (temp, site) = project(
            "",
            "[i18n]\ndefault_locale = \"zh-Hans\"\nlocales = [\"zh-Hans\", \"en\"]\n",
        );
        write(temp.path(), "i18n/en/docs/guild.md", "# Guild\n\n\n[old](./old.md)");

        let report = builder(&site, &temp.path().join("build")).check().unwrap();

        let sources: Vec<_> = report.broken_links.iter().map(|l| l.source.clone()).collect();
        assert_eq!(
            sources,
            vec![format!(
                "{}:4",
                temp.path().join("i18n/en/docs/guild.md").display()
            )]
        );
    }

    #[test]
    fn percent_encoded_links_resolve() {
        let (temp, site) = project("", "");
        write(temp.path(), "docs/my guide.md", "# Guide");
        write(temp.path(), "docs/卡牌.md", "# 卡牌");
        write(
            temp.path(),
            "docs/intro.md",
            "# 开始\n\n[guide](./my%20guide.md) [cards](/docs/%E5%8D%A1%E7%89%8C) \
             [again](./%E5%8D%A1%E7%89%8C.md#rarity)",
        );

        let report = builder(&site, &temp.path().join("build")).check().unwrap();

        assert!(report.broken_links.is_empty(), "{:?}", report.broken_links);
        assert_eq!(report.fatal, 0);
    }

    #[tokio::test]
    async fn percent_encoded_links_render_encoded() {
        let (temp, site) = project("", "");
        write(temp.path(), "docs/my guide.md", "# Guide");
        write(temp.path(), "docs/intro.md", "# 开始\n\n[guide](./my%20guide.md)");
        let out = temp.path().join("build");

        builder(&site, &out).build().await.unwrap();

        let intro = fs::read_to_string(out.join("docs/intro/index.html")).unwrap();
        assert!(intro.contains(r#"href="/docs/my%20guide""#));
        assert!(out.join("docs/my guide/index.html").is_file());
    }

    #[tokio::test]
    async fn home_links_keep_base_url_slash() {
        let (temp, site) = project("base_url = \"/ROL_Docs/\"\ntrailing_slash = false", "");
        let out = temp.path().join("build");

        builder(&site, &out).build().await.unwrap();

        let landing = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(landing.contains(r#"<link rel="canonical" href="https://example.com/ROL_Docs/">"#));

        let guild = fs::read_to_string(out.join("docs/guild.html")).unwrap();
        assert!(guild.contains(r#"<a href="/ROL_Docs/">home</a>"#));
        assert!(guild.contains(r#"href="https://example.com/ROL_Docs/docs/guild""#));

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/ROL_Docs/</loc>"));
        assert!(!sitemap.contains("<loc>https://example.com/ROL_Docs</loc>"));
    }

    #[tokio::test]
    async fn sitemap_locations_are_encoded() {
        let (temp, site) = project("base_url = \"/ROL_Docs/\"\ntrailing_slash = false", "");
        write(temp.path(), "docs/my guide.md", "# Guide");
        write(temp.path(), "docs/卡牌.md", "# 卡牌");
        write(temp.path(), "docs/a&b.md", "# A and B");
        let out = temp.path().join("build");

        builder(&site, &out).build().await.unwrap();

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        for loc in [
            "https://example.com/ROL_Docs/docs/my%20guide",
            "https://example.com/ROL_Docs/docs/%E5%8D%A1%E7%89%8C",
            "https://example.com/ROL_Docs/docs/a%26b",
        ] {
            assert!(sitemap.contains(&format!("<loc>{}</loc>", loc)), "missing {}", loc);
        }
        assert!(!sitemap.contains("my guide"));
        assert!(!sitemap.contains("卡牌"));
    }

    #[tokio::test]
    async fn generated_pages_win_over_static_files() {
        let (temp, site) = project("", "");
        write(temp.path(), "static/index.html", "<p>old landing</p>");
        write(temp.path(), "static/404.html", "<p>old 404</p>");
        let out = temp.path().join("build");

        builder(&site, &out).build().await.unwrap();

        let landing = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(landing.contains("Realm of Legends"));
        assert!(!landing.contains("old landing"));

        let not_found = fs::read_to_string(out.join("404.html")).unwrap();
        assert!(!not_found.contains("old 404"));
    }

    #[test]
    fn escapes_sitemap_locations() {
        assert_eq!(escape_xml("https://example.com/a"), "https://example.com/a");
        assert_eq!(escape_xml("https://example.com/?a=1&b=<2>"), "https://example.com/?a=1&amp;b=&lt;2&gt;");
    }

    #[tokio::test]
    async fn base_url_changes_only_link_prefixes() {
        let (root_temp, root_site) = project("", "");
        let (sub_temp, sub_site) = project("base_url = \"/ROL_Docs/\"", "");
        let root_out = root_temp.path().join("build");
        let sub_out = sub_temp.path().join("build");

        builder(&root_site, &root_out).build().await.unwrap();
        builder(&sub_site, &sub_out).build().await.unwrap();

        assert_eq!(files(&root_out), files(&sub_out));

        let landing = fs::read_to_string(sub_out.join("index.html")).unwrap();
        assert!(landing.contains(r#"href="/ROL_Docs/docs/intro""#));
        assert!(landing.contains(r#"src="/ROL_Docs/img/undraw_docusaurus_mountain.svg""#));
        assert!(landing.contains(r#"href="/ROL_Docs/assets/main.css""#));

        let robots = fs::read_to_string(sub_out.join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: https://example.com/ROL_Docs/sitemap.xml"));
    }

    #[tokio::test]
    async fn navbar_renders_in_declaration_order() {
        let (temp, site) = project("", "");
        let out = temp.path().join("build");

        builder(&site, &out).build().await.unwrap();

        let html = fs::read_to_string(out.join("docs/intro/index.html")).unwrap();
        let order: Vec<usize> = ["API文档", "系统文档", "卡片系统", "工会系统", "GitHub"]
            .iter()
            .map(|label| html.find(label).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn builds_non_default_locale_under_prefix() {
        let (temp, site) = project(
            "",
            "[i18n]\ndefault_locale = \"zh-Hans\"\nlocales = [\"zh-Hans\", \"en\"]\n",
        );
        write(temp.path(), "i18n/en/docs/intro.md", "# Getting Started");
        let out = temp.path().join("build");

        let result = builder(&site, &out).build().await.unwrap();

        assert_eq!(result.locales, 2);
        assert_eq!(result.pages, 10);

        let zh = fs::read_to_string(out.join("docs/intro/index.html")).unwrap();
        assert!(zh.contains(r#"<html lang="zh-Hans""#));
        assert!(zh.contains("开始"));
        assert!(zh.contains(r#"hreflang="en""#));

        let en = fs::read_to_string(out.join("en/docs/intro/index.html")).unwrap();
        assert!(en.contains(r#"<html lang="en""#));
        assert!(en.contains("Getting Started"));
        assert!(en.contains(r#"href="/en/docs/cards""#));
        assert!(en.contains(r#"href="/assets/main.css""#));

        assert!(out.join("en/404.html").is_file());
        assert!(out.join("en/docs/guild/index.html").is_file());
    }

    #[tokio::test]
    async fn trailing_slash_false_writes_html_files() {
        let (temp, site) = project("trailing_slash = false", "");
        let out = temp.path().join("build");

        builder(&site, &out).build().await.unwrap();

        assert!(out.join("docs/intro.html").is_file());
        assert!(!out.join("docs/intro/index.html").exists());
    }

    #[tokio::test]
    async fn trailing_slash_true_suffixes_links() {
        let (temp, site) = project("trailing_slash = true", "");
        let out = temp.path().join("build");

        builder(&site, &out).build().await.unwrap();

        let landing = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(landing.contains(r#"href="/docs/intro/""#));
        assert!(out.join("docs/intro/index.html").is_file());
    }

    #[test]
    fn rejects_duplicate_routes() {
        let (temp, site) = project("", "");
        write(temp.path(), "docs/other.md", "---\nslug: /cards\n---\n# Other");

        let err = builder(&site, &temp.path().join("build"))
            .check()
            .unwrap_err();

        assert!(matches!(err, BuildError::DuplicateRoute { ref route, .. } if route == "/docs/cards"));
    }

    #[test]
    fn resolves_markdown_file_paths() {
        assert_eq!(
            resolve_doc_file(Path::new("guide/setup.md"), "../intro.md"),
            PathBuf::from("intro.md")
        );
        assert_eq!(
            resolve_doc_file(Path::new("intro.md"), "./guide/setup.md"),
            PathBuf::from("guide/setup.md")
        );
        assert_eq!(
            resolve_doc_file(Path::new("guide/setup.md"), "/intro.md"),
            PathBuf::from("intro.md")
        );
    }
}
