//! Documentation discovery: ids, routes and sidebar order.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use walkdir::WalkDir;

use roldocs_mdx::{parse_mdx, Frontmatter, ParsedDoc};

use crate::builder::BuildError;
use crate::links::normalize_route;

/// A document to be rendered.
#[derive(Debug, Clone)]
pub struct DocPage {
    /// Document id, e.g. `guide/setup`
    pub id: String,

    /// Route without base URL, e.g. `/docs/guide/setup`
    pub route: String,

    /// Path relative to the docs directory
    pub relative_path: PathBuf,

    /// File actually read (a translation when one exists)
    pub source_path: PathBuf,

    /// Parsed document
    pub doc: ParsedDoc,

    pub title: String,
    pub sidebar_label: String,
    pub position: Option<f64>,

    /// Directory the document lives in, relative to the docs directory
    /// (`guide/advanced`); `None` at the root
    pub category: Option<String>,
}

/// Sidebar category metadata from `_category_.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Directory path as on disk, relative to the docs directory
    pub dir: String,
    pub label: String,
    pub position: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryFile {
    label: Option<String>,
    position: Option<f64>,
}

/// All documents of one locale, in sidebar order.
#[derive(Debug, Clone, Default)]
pub struct DocTree {
    pub docs: Vec<DocPage>,
    pub categories: Vec<Category>,
}

impl DocTree {
    pub fn category(&self, dir: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.dir == dir)
    }

    /// First document in sidebar order.
    pub fn first(&self) -> Option<&DocPage> {
        self.docs.first()
    }

    pub fn by_relative_path(&self, path: &Path) -> Option<&DocPage> {
        self.docs.iter().find(|d| d.relative_path == path)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|d| d.route.as_str())
    }
}

/// Strip ordering prefixes such as `01-` or `2_` from a file or directory name.
pub fn strip_number_prefix(name: &str) -> &str {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\d+[-_.\s]+").expect("valid number prefix pattern"));

    match RE.find(name) {
        Some(m) if m.end() < name.len() => &name[m.end()..],
        _ => name,
    }
}

/// A category directory and every parent category above it, outermost first:
/// `a/b/c` yields `a`, `a/b`, `a/b/c`.
pub fn category_chain(dir: &str) -> impl Iterator<Item = &str> {
    dir.match_indices('/')
        .map(move |(i, _)| &dir[..i])
        .chain(std::iter::once(dir))
}

/// Discover all documents under `docs_dir`.
///
/// When `translations` is given, a file at the same relative path there replaces
/// the default-locale file.
pub fn discover_docs(
    docs_dir: &Path,
    route_base_path: &str,
    translations: Option<&Path>,
) -> Result<DocTree, BuildError> {
    if !docs_dir.exists() {
        return Err(BuildError::ReadError(format!(
            "Docs directory not found: {}",
            docs_dir.display()
        )));
    }

    let mut docs = Vec::new();

    for entry in WalkDir::new(docs_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str().unwrap_or("")))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "md" && ext != "mdx" {
            continue;
        }

        let relative_path = path.strip_prefix(docs_dir).unwrap_or(path).to_path_buf();

        let source_path = translations
            .map(|dir| dir.join(&relative_path))
            .filter(|p| p.is_file())
            .unwrap_or_else(|| path.to_path_buf());

        let content = fs::read_to_string(&source_path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", source_path.display(), e)))?;

        let doc = parse_mdx(&content).map_err(|e| BuildError::ParseError {
            path: source_path.display().to_string(),
            message: e.to_string(),
        })?;

        let frontmatter = doc.frontmatter.clone().unwrap_or_default();
        if frontmatter.draft {
            tracing::debug!("Skipping draft {}", source_path.display());
            continue;
        }

        docs.push(page_info(relative_path, source_path, doc, &frontmatter, route_base_path));
    }

    let categories = load_categories(docs_dir, &docs);
    sort_for_sidebar(&mut docs, &categories);

    Ok(DocTree { docs, categories })
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

fn page_info(
    relative_path: PathBuf,
    source_path: PathBuf,
    doc: ParsedDoc,
    frontmatter: &Frontmatter,
    route_base_path: &str,
) -> DocPage {
    let dirs: Vec<String> = relative_path
        .parent()
        .map(|p| {
            p.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => s.to_str(),
                    _ => None,
                })
                .map(|s| strip_number_prefix(s).to_string())
                .collect()
        })
        .unwrap_or_default();

    let stem = relative_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    let name = frontmatter
        .id
        .clone()
        .unwrap_or_else(|| strip_number_prefix(stem).to_string());
    let is_index = frontmatter.id.is_none()
        && (stem.eq_ignore_ascii_case("index") || stem.eq_ignore_ascii_case("readme"));

    let id = dirs
        .iter()
        .cloned()
        .chain(std::iter::once(name.clone()))
        .collect::<Vec<_>>()
        .join("/");

    let dir_path = dirs.join("/");
    let route = normalize_route(&match frontmatter.slug.as_deref() {
        Some(slug) if slug.starts_with('/') => format!("/{}/{}", route_base_path, slug),
        Some(slug) => format!("/{}/{}/{}", route_base_path, dir_path, slug),
        None if is_index => format!("/{}/{}", route_base_path, dir_path),
        None => format!("/{}/{}", route_base_path, id),
    });

    let title = doc.title().map(str::to_string).unwrap_or_else(|| name.clone());
    let sidebar_label = frontmatter
        .sidebar_label
        .clone()
        .unwrap_or_else(|| title.clone());

    let category = relative_path
        .parent()
        .map(|p| {
            p.components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/")
        })
        .filter(|dir| !dir.is_empty());

    DocPage {
        id,
        route,
        relative_path,
        source_path,
        doc,
        title,
        sidebar_label,
        position: frontmatter.sidebar_position,
        category,
    }
}

fn load_categories(docs_dir: &Path, docs: &[DocPage]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    let dirs = docs
        .iter()
        .filter_map(|d| d.category.as_deref())
        .flat_map(category_chain);

    for dir in dirs {
        if categories.iter().any(|c| c.dir == dir) {
            continue;
        }

        let meta_path = docs_dir.join(dir).join("_category_.json");
        let meta = match fs::read_to_string(&meta_path) {
            Ok(json) => serde_json::from_str::<CategoryFile>(&json).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid {}: {}", meta_path.display(), e);
                CategoryFile::default()
            }),
            Err(_) => CategoryFile::default(),
        };

        let nested = format!("{}/", dir);
        let position = meta.position.or_else(|| {
            docs.iter()
                .filter(|d| {
                    d.category
                        .as_deref()
                        .is_some_and(|c| c == dir || c.starts_with(&nested))
                })
                .filter_map(|d| d.position)
                .min_by(f64::total_cmp)
        });

        let name = dir.rsplit('/').next().unwrap_or(dir);
        categories.push(Category {
            dir: dir.to_string(),
            label: meta
                .label
                .unwrap_or_else(|| capitalize(strip_number_prefix(name))),
            position,
        });
    }

    categories.sort_by(|a, b| {
        order_key(a.position)
            .total_cmp(&order_key(b.position))
            .then_with(|| a.dir.cmp(&b.dir))
    });

    categories
}

/// Sidebar order, applied at every directory level: the directory's own
/// documents first, then its subcategories. Documents sort by position, then
/// path; categories by position, then name.
fn sort_for_sidebar(docs: &mut [DocPage], categories: &[Category]) {
    let rank = |dir: &str| {
        categories
            .iter()
            .position(|c| c.dir == dir)
            .unwrap_or(categories.len())
    };
    let chain = |doc: &DocPage| -> Vec<usize> {
        doc.category
            .as_deref()
            .map(|dir| category_chain(dir).map(&rank).collect())
            .unwrap_or_default()
    };

    docs.sort_by(|a, b| {
        chain(a)
            .cmp(&chain(b))
            .then_with(|| order_key(a.position).total_cmp(&order_key(b.position)))
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });
}

fn order_key(position: Option<f64>) -> f64 {
    position.unwrap_or(f64::MAX)
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
