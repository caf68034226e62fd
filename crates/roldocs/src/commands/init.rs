//! Scaffold a documentation project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
///
/// Files land next to the config file. Existing files are kept unless `yes` is set.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing roldocs...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    write_file(config_path, DEFAULT_CONFIG, yes)?;

    let files = [
        ("docs/intro.md", DEFAULT_INTRO),
        ("docs/卡牌.md", DEFAULT_CARDS),
        ("docs/工会.md", DEFAULT_GUILD),
        ("static/img/favicon.svg", FAVICON_SVG),
        ("static/img/undraw_docusaurus_mountain.svg", MOUNTAIN_SVG),
        ("static/img/undraw_docusaurus_tree.svg", TREE_SVG),
        ("static/img/undraw_docusaurus_react.svg", REACT_SVG),
    ];

    for (relative, content) in files {
        write_file(&root.join(relative), content, yes)?;
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'roldocs build' to generate the site.");

    Ok(())
}

fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::debug!("Keeping {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# roldocs configuration

[site]
title = "游戏项目文档"
tagline = "Unity战略游戏技术文档"
favicon = "img/favicon.svg"
url = "https://timhuang1025.github.io"
base_url = "/ROL_Docs/"
trailing_slash = false
on_broken_links = "warn"
on_broken_markdown_links = "warn"

[deploy]
organization = "TimHuang1025"
project = "ROL_Docs"
branch = "gh-pages"

[i18n]
default_locale = "zh-Hans"
locales = ["zh-Hans"]

[navbar]
title = "游戏文档"

[[navbar.items]]
type = "doc_sidebar"
label = "API文档"

[[navbar.items]]
type = "dropdown"
label = "系统文档"
items = [
  { label = "卡片系统", to = "/docs/卡牌" },
  { label = "工会系统", to = "/docs/工会" },
]

[[navbar.items]]
type = "link"
label = "GitHub"
href = "https://github.com/TimHuang1025/ROL_Docs"
position = "right"

[footer]
style = "dark"
# {year} is replaced with the current year
copyright = "Copyright © {year} 游戏项目文档"

[prism]
theme = "github"
dark_theme = "dracula"

[docs]
dir = "docs"
route_base_path = "docs"

[build]
output = "build"
minify = true
static_dir = "static"
"#;

const DEFAULT_INTRO: &str = r#"---
sidebar_position: 1
---

# 开始

欢迎来到 Realm of Legends 开发文档。

## 系统文档

- [卡牌系统](./卡牌.md)
- [工会系统](./工会.md)

## 本地构建

```bash title="终端"
roldocs build
```
"#;

const DEFAULT_CARDS: &str = r#"---
sidebar_position: 2
---

# 卡牌

英雄卡牌的稀有度、升级与技能。

## 稀有度

| 稀有度 | 颜色 |
| --- | --- |
| 普通 | 白 |
| 稀有 | 蓝 |
| 传说 | 金 |

## 数据结构

```cs title="HeroCard.cs" showLineNumbers
public class HeroCard
{
    public int Id;
    public int Level;
}
```
"#;

const DEFAULT_GUILD: &str = r#"---
sidebar_position: 3
---

# 工会

工会的创建、成员管理与领地争夺。

返回 [开始](./intro.md)。
"#;

const FAVICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><rect width="32" height="32" rx="6" fill="#2e8555"/><path d="M9 23 16 7l7 16z" fill="#fff"/></svg>
"##;

const MOUNTAIN_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200"><path d="M10 170 80 60l40 55 25-30 45 85z" fill="#2e8555"/></svg>
"##;

const TREE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200"><circle cx="100" cy="80" r="55" fill="#2e8555"/><rect x="90" y="120" width="20" height="60" fill="#6b4f2a"/></svg>
"##;

const REACT_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200"><g fill="none" stroke="#2e8555" stroke-width="8"><ellipse cx="100" cy="100" rx="80" ry="30"/><ellipse cx="100" cy="100" rx="80" ry="30" transform="rotate(60 100 100)"/><ellipse cx="100" cy="100" rx="80" ry="30" transform="rotate(120 100 100)"/></g></svg>
"##;
