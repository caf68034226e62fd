//! Sidebar and navbar construction.

use roldocs_config::{NavItem, NavLink, NavPosition, NavbarConfig, TrailingSlash};

use crate::docs::{category_chain, DocTree};
use crate::links::{is_external, localize, split_suffix};
use crate::templates::{LogoView, NavEntryView, NavbarView, SidebarItem};

/// Href of a site route within a locale.
///
/// The locale home is always the base URL itself, whatever the trailing slash
/// policy says.
pub fn internal_href(base_url: &str, route: &str, trailing: TrailingSlash) -> String {
    let href = localize(base_url, route);
    if split_suffix(&href).0 == base_url {
        return href;
    }
    trailing.apply(&href)
}

/// Route the `doc_sidebar` navbar item points at: the first document, or the
/// docs root when there are none.
pub fn sidebar_route(tree: &DocTree, route_base_path: &str) -> String {
    tree.first()
        .map(|d| d.route.clone())
        .unwrap_or_else(|| format!("/{}", route_base_path))
}

/// Build the docs sidebar: root documents first, then one entry per category,
/// with subdirectories nested inside their parent category.
pub fn build_sidebar(tree: &DocTree, base_url: &str, trailing: TrailingSlash) -> Vec<SidebarItem> {
    let mut sidebar: Vec<SidebarItem> = Vec::new();
    // Categories currently open, outermost first; each is the last item of its level.
    let mut open: Vec<&str> = Vec::new();

    for doc in &tree.docs {
        let chain: Vec<&str> = doc
            .category
            .as_deref()
            .map(|dir| category_chain(dir).collect())
            .unwrap_or_default();

        let shared = open
            .iter()
            .zip(&chain)
            .take_while(|(a, b)| a == b)
            .count();
        open.truncate(shared);

        for &dir in &chain[shared..] {
            let label = tree
                .category(dir)
                .map(|c| c.label.clone())
                .unwrap_or_else(|| dir.to_string());

            level_mut(&mut sidebar, open.len()).push(SidebarItem {
                title: label,
                path: String::new(),
                children: Vec::new(),
                active: false,
            });
            open.push(dir);
        }

        level_mut(&mut sidebar, open.len()).push(SidebarItem {
            title: doc.sidebar_label.clone(),
            path: internal_href(base_url, &doc.route, trailing),
            children: Vec::new(),
            active: false,
        });
    }

    sidebar
}

/// Children list `depth` levels down, following the last item at each level.
fn level_mut(items: &mut Vec<SidebarItem>, depth: usize) -> &mut Vec<SidebarItem> {
    if depth == 0 || items.is_empty() {
        return items;
    }
    let last = items.len() - 1;
    level_mut(&mut items[last].children, depth - 1)
}

/// Mark the entry whose path equals `path` as active.
pub fn mark_active(items: &mut [SidebarItem], path: &str) {
    for item in items {
        item.active = !item.path.is_empty() && item.path == path;
        mark_active(&mut item.children, path);
    }
}

/// Resolve the configured navbar for one locale.
///
/// Items keep their declaration order within each side.
pub fn navbar_view(
    config: &NavbarConfig,
    base_url: &str,
    trailing: TrailingSlash,
    sidebar_route: &str,
) -> NavbarView {
    let entry = |item: &NavItem| {
        let (href, children) = match item {
            NavItem::DocSidebar { .. } => {
                (Some(internal_href(base_url, sidebar_route, trailing)), vec![])
            }
            NavItem::Doc { to, .. } => (Some(internal_href(base_url, to, trailing)), vec![]),
            NavItem::Link { href, .. } => (Some(href.clone()), vec![]),
            NavItem::Dropdown { items, .. } => (
                None,
                items
                    .iter()
                    .map(|link| link_entry(link, base_url, trailing))
                    .collect(),
            ),
        };

        NavEntryView {
            kind: item.kind(),
            label: item.label().to_string(),
            href,
            children,
        }
    };

    let side = |position: NavPosition| {
        config
            .items
            .iter()
            .filter(|item| item.position() == position)
            .map(entry)
            .collect()
    };

    NavbarView {
        title: config.title.clone(),
        logo: config.logo.as_ref().map(|logo| LogoView {
            alt: logo.alt.clone(),
            src: if is_external(&logo.src) {
                logo.src.clone()
            } else {
                localize(base_url, &logo.src)
            },
        }),
        left: side(NavPosition::Left),
        right: side(NavPosition::Right),
    }
}

fn link_entry(link: &NavLink, base_url: &str, trailing: TrailingSlash) -> NavEntryView {
    let href = match link {
        NavLink::Doc { to, .. } => internal_href(base_url, to, trailing),
        NavLink::Link { href, .. } => href.clone(),
    };

    NavEntryView {
        kind: link.kind(),
        label: link.label().to_string(),
        href: Some(href),
        children: vec![],
    }
}

/// Site routes the navbar links to, without base URL, for link checking.
pub fn navbar_targets(config: &NavbarConfig, sidebar_route: &str) -> Vec<String> {
    let mut targets = Vec::new();

    for item in &config.items {
        match item {
            NavItem::DocSidebar { .. } => targets.push(sidebar_route.to_string()),
            NavItem::Doc { to, .. } => targets.push(to.clone()),
            NavItem::Link { .. } => {}
            NavItem::Dropdown { items, .. } => {
                targets.extend(items.iter().filter_map(|link| match link {
                    NavLink::Doc { to, .. } => Some(to.clone()),
                    NavLink::Link { .. } => None,
                }));
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::discover_docs;
    use roldocs_config::NavKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn navbar() -> NavbarConfig {
        toml::from_str(
            r#"
title = "游戏文档"

[[items]]
type = "doc_sidebar"
label = "API文档"

[[items]]
type = "dropdown"
label = "系统文档"
items = [
  { label = "卡片系统", to = "/docs/卡牌" },
  { label = "工会系统", to = "/docs/工会" },
]

[[items]]
type = "link"
label = "GitHub"
href = "https://github.com/TimHuang1025/ROL_Docs"
position = "right"
"#,
        )
        .unwrap()
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn resolves_navbar_in_declaration_order() {
        let view = navbar_view(&navbar(), "/ROL_Docs/", TrailingSlash::Preserve, "/docs/intro");

        let left: Vec<_> = view.left.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(left, vec!["API文档", "系统文档"]);
        assert_eq!(view.left[0].href.as_deref(), Some("/ROL_Docs/docs/intro"));

        let children: Vec<_> = view.left[1]
            .children
            .iter()
            .map(|e| (e.label.as_str(), e.href.as_deref()))
            .collect();
        assert_eq!(
            children,
            vec![
                ("卡片系统", Some("/ROL_Docs/docs/卡牌")),
                ("工会系统", Some("/ROL_Docs/docs/工会")),
            ]
        );
        assert_eq!(view.left[1].href, None);

        assert_eq!(view.right.len(), 1);
        assert_eq!(view.right[0].kind, NavKind::ExternalLink);
        assert_eq!(view.left[1].kind, NavKind::Dropdown);
    }

    #[test]
    fn applies_trailing_slash_to_internal_links() {
        let view = navbar_view(&navbar(), "/", TrailingSlash::Always, "/docs/intro");
        assert_eq!(view.left[0].href.as_deref(), Some("/docs/intro/"));
        assert_eq!(
            view.right[0].href.as_deref(),
            Some("https://github.com/TimHuang1025/ROL_Docs")
        );
    }

    #[test]
    fn home_keeps_base_url_slash() {
        for trailing in [TrailingSlash::Never, TrailingSlash::Always, TrailingSlash::Preserve] {
            assert_eq!(internal_href("/ROL_Docs/", "/", trailing), "/ROL_Docs/");
            assert_eq!(internal_href("/ROL_Docs/en/", "/", trailing), "/ROL_Docs/en/");
            assert_eq!(internal_href("/", "/", trailing), "/");
        }
        assert_eq!(internal_href("/ROL_Docs/", "/#top", TrailingSlash::Never), "/ROL_Docs/#top");
        assert_eq!(
            internal_href("/ROL_Docs/", "/docs/intro/", TrailingSlash::Never),
            "/ROL_Docs/docs/intro"
        );
    }

    #[test]
    fn collects_internal_targets() {
        assert_eq!(
            navbar_targets(&navbar(), "/docs/intro"),
            vec!["/docs/intro", "/docs/卡牌", "/docs/工会"]
        );
    }

    #[test]
    fn groups_sidebar_by_category() {
        let temp = tempdir().unwrap();
        let docs = temp.path();
        write(docs, "intro.md", "# 开始");
        write(docs, "systems/guild.md", "---\nsidebar_label: 工会\n---\n# Guild");
        write(docs, "systems/cards.md", "# Cards");
        write(docs, "systems/_category_.json", r#"{ "label": "系统" }"#);

        let tree = discover_docs(docs, "docs", None).unwrap();
        let mut sidebar = build_sidebar(&tree, "/", TrailingSlash::Never);

        assert_eq!(sidebar.len(), 2);
        assert_eq!(sidebar[0].title, "开始");
        assert_eq!(sidebar[1].title, "系统");
        let children: Vec<_> = sidebar[1].children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(children, vec!["Cards", "工会"]);

        mark_active(&mut sidebar, "/docs/systems/guild");
        assert!(sidebar[1].children[1].active);
        assert!(!sidebar[0].active);
        assert!(!sidebar[1].active);
    }

    #[test]
    fn nests_subdirectories_under_their_category() {
        let temp = tempdir().unwrap();
        let docs = temp.path();
        write(docs, "intro.md", "# 开始");
        write(docs, "guide/setup.md", "---\nsidebar_position: 1\n---\n# Setup");
        write(docs, "guide/zz.md", "# Last");
        write(docs, "guide/advanced/raids.md", "# Raids");
        write(docs, "guide/advanced/sieges.md", "# Sieges");
        write(docs, "heroes/zeus.md", "# Zeus");

        let tree = discover_docs(docs, "docs", None).unwrap();
        let mut sidebar = build_sidebar(&tree, "/", TrailingSlash::Preserve);

        let top: Vec<_> = sidebar.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(top, vec!["开始", "Guide", "Heroes"]);

        let guide: Vec<_> = sidebar[1].children.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(guide, vec!["Setup", "Last", "Advanced"]);

        let advanced = &sidebar[1].children[2];
        assert_eq!(advanced.path, "");
        let raids: Vec<_> = advanced
            .children
            .iter()
            .map(|i| (i.title.as_str(), i.path.as_str()))
            .collect();
        assert_eq!(
            raids,
            vec![
                ("Raids", "/docs/guide/advanced/raids"),
                ("Sieges", "/docs/guide/advanced/sieges"),
            ]
        );

        mark_active(&mut sidebar, "/docs/guide/advanced/sieges");
        assert!(sidebar[1].children[2].children[1].active);
    }

    #[test]
    fn sidebar_route_falls_back_to_docs_root() {
        assert_eq!(sidebar_route(&DocTree::default(), "docs"), "/docs");
    }
}
