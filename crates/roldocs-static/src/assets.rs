//! Asset pipeline for CSS, JavaScript and static files.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use roldocs_config::{Palette, PrismConfig};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file with the code block colors of both themes.
    pub fn generate_css(prism: &PrismConfig) -> String {
        format!(
            "{}\n:root {{\n{}}}\n\n[data-theme='dark'] {{\n{}}}\n",
            DEFAULT_CSS,
            palette_vars(&prism.theme.palette()),
            palette_vars(&prism.dark_theme.palette()),
        )
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Copy every file under `static_dir` into `dest`, keeping relative paths.
    ///
    /// Returns the number of files copied. A missing directory copies nothing.
    pub fn copy_static(static_dir: &Path, dest: &Path) -> io::Result<usize> {
        if !static_dir.is_dir() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry.map_err(io::Error::other)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(static_dir)
                .unwrap_or(entry.path());
            let target = dest.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn palette_vars(palette: &Palette) -> String {
    format!(
        "  --code-background: {};\n  --code-foreground: {};\n  --token-comment: {};\n  --token-keyword: {};\n  --token-string: {};\n  --token-function: {};\n  --token-number: {};\n",
        palette.background,
        palette.foreground,
        palette.comment,
        palette.keyword,
        palette.string,
        palette.function,
        palette.number,
    )
}

const DEFAULT_CSS: &str = r#"/* roldocs theme */

:root {
  --primary: #2e8555;
  --primary-dark: #29784c;
  --background: #ffffff;
  --foreground: #1c1e21;
  --muted: #f5f6f7;
  --muted-foreground: #606770;
  --border: #dadde1;
  --navbar-height: 3.75rem;
  --sidebar-width: 280px;
  --toc-width: 220px;
  --content-max-width: 800px;
  --radius: 0.4rem;
}

[data-theme='dark'] {
  --primary: #25c2a0;
  --primary-dark: #21af90;
  --background: #1b1b1d;
  --foreground: #e3e3e3;
  --muted: #242526;
  --muted-foreground: #a8abb0;
  --border: #444950;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, "PingFang SC", "Microsoft YaHei", sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.65;
  display: flex;
  flex-direction: column;
  min-height: 100vh;
}

a {
  color: var(--primary);
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

.container {
  max-width: 1140px;
  margin: 0 auto;
  padding: 0 1rem;
}

.main-wrapper {
  flex: 1 0 auto;
}

/* Navbar */
.navbar {
  position: sticky;
  top: 0;
  z-index: 10;
  height: var(--navbar-height);
  background: var(--background);
  box-shadow: 0 1px 2px rgba(0, 0, 0, 0.1);
  padding: 0 1rem;
}

.navbar__inner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  height: 100%;
}

.navbar__items {
  display: flex;
  align-items: center;
  gap: 0.25rem;
}

.navbar__brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-right: 1rem;
  color: var(--foreground);
}

.navbar__logo {
  height: 2rem;
}

.navbar__link {
  padding: 0.25rem 0.75rem;
  color: var(--foreground);
  font-weight: 500;
}

.navbar__link:hover {
  color: var(--primary);
  text-decoration: none;
}

.dropdown {
  position: relative;
}

.dropdown__menu {
  display: none;
  position: absolute;
  top: 100%;
  left: 0;
  min-width: 10rem;
  margin: 0;
  padding: 0.5rem;
  list-style: none;
  background: var(--background);
  border-radius: var(--radius);
  box-shadow: 0 5px 40px rgba(0, 0, 0, 0.2);
}

.dropdown:hover .dropdown__menu,
.dropdown--open .dropdown__menu {
  display: block;
}

.dropdown__link {
  display: block;
  padding: 0.25rem 0.5rem;
  color: var(--foreground);
  border-radius: 0.25rem;
}

.dropdown__link:hover {
  background: var(--muted);
  text-decoration: none;
}

.color-mode-toggle {
  width: 2rem;
  height: 2rem;
  border: none;
  border-radius: 50%;
  background: transparent;
  color: var(--foreground);
  font-size: 1.1rem;
  cursor: pointer;
}

.color-mode-toggle:hover {
  background: var(--muted);
}

/* Hero */
.hero {
  padding: 4rem 0;
  text-align: center;
}

.hero--primary {
  background: var(--primary);
  color: #ffffff;
}

.hero__title {
  font-size: 3rem;
  margin: 0 0 0.5rem;
}

.hero__subtitle {
  font-size: 1.5rem;
  margin: 0 0 1.5rem;
}

.hero-buttons {
  display: flex;
  justify-content: center;
}

.button {
  display: inline-block;
  padding: 0.375rem 1.5rem;
  border-radius: var(--radius);
  font-weight: 700;
}

.button--lg {
  padding: 0.5rem 2rem;
  font-size: 1.2rem;
}

.button--secondary {
  background: #ebedf0;
  color: #1c1e21;
}

.button--secondary:hover {
  background: #dadde1;
  text-decoration: none;
}

/* Features */
.features {
  display: flex;
  align-items: center;
  padding: 2rem 0;
  width: 100%;
}

.row {
  display: flex;
  flex-wrap: wrap;
  margin: 0 -1rem;
}

.col {
  flex: 1 0;
  padding: 0 1rem;
}

.col--4 {
  flex: 0 0 33.333%;
  max-width: 33.333%;
}

.text--center {
  text-align: center;
}

.padding-horiz--md {
  padding-left: 1rem;
  padding-right: 1rem;
}

.feature-svg {
  height: 200px;
  width: 200px;
}

/* Docs layout */
.docs-wrapper {
  display: flex;
}

.sidebar {
  flex: 0 0 var(--sidebar-width);
  border-right: 1px solid var(--border);
  padding: 1rem 0.5rem;
  position: sticky;
  top: var(--navbar-height);
  height: calc(100vh - var(--navbar-height));
  overflow-y: auto;
}

.menu__list {
  list-style: none;
  margin: 0;
  padding-left: 0;
}

.menu__list .menu__list {
  padding-left: 1rem;
}

.menu__link,
.menu__category-label {
  display: block;
  padding: 0.375rem 0.75rem;
  border-radius: 0.25rem;
  color: var(--muted-foreground);
}

.menu__category-label {
  font-weight: 600;
  color: var(--foreground);
}

.menu__link:hover {
  background: var(--muted);
  text-decoration: none;
}

.menu__link--active {
  color: var(--primary);
  background: var(--muted);
  font-weight: 600;
}

.doc-main {
  flex: 1;
  display: flex;
  gap: 2rem;
  padding: 2rem;
  min-width: 0;
}

.doc {
  flex: 1;
  max-width: var(--content-max-width);
  min-width: 0;
}

.markdown h1 {
  font-size: 2.5rem;
  margin-top: 0;
}

.markdown table {
  border-collapse: collapse;
  margin-bottom: 1rem;
}

.markdown th,
.markdown td {
  border: 1px solid var(--border);
  padding: 0.5rem 0.75rem;
}

.markdown img {
  max-width: 100%;
}

.markdown code {
  font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
  font-size: 0.9em;
  background: var(--muted);
  padding: 0.1rem 0.3rem;
  border-radius: 0.25rem;
}

/* Code blocks */
.code-block {
  position: relative;
  margin-bottom: 1rem;
  border-radius: var(--radius);
  overflow: hidden;
  background: var(--code-background);
  color: var(--code-foreground);
}

.code-block__title {
  padding: 0.5rem 1rem;
  font-size: 0.85rem;
  font-weight: 500;
  border-bottom: 1px solid rgba(128, 128, 128, 0.3);
}

.code-block pre {
  margin: 0;
  padding: 1rem;
  overflow-x: auto;
}

.code-block pre code {
  background: none;
  padding: 0;
  color: inherit;
}

.code-block pre code {
  counter-reset: line;
}

.code-line::before {
  counter-increment: line;
  content: counter(line);
  display: inline-block;
  width: 2rem;
  margin-right: 1rem;
  text-align: right;
  color: var(--token-comment);
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.2rem 0.6rem;
  font-size: 0.75rem;
  border: 1px solid rgba(128, 128, 128, 0.4);
  border-radius: 0.25rem;
  background: transparent;
  color: inherit;
  cursor: pointer;
  opacity: 0;
  transition: opacity 0.15s;
}

.code-block:hover .copy-btn {
  opacity: 1;
}

/* Table of contents */
.toc {
  flex: 0 0 var(--toc-width);
  position: sticky;
  top: calc(var(--navbar-height) + 1rem);
  align-self: flex-start;
  font-size: 0.85rem;
}

.toc h2 {
  font-size: 0.8rem;
  text-transform: uppercase;
  color: var(--muted-foreground);
}

.toc ul {
  list-style: none;
  padding-left: 0;
}

.toc-level-3 {
  padding-left: 1rem;
}

.toc-level-4 {
  padding-left: 2rem;
}

/* Footer */
.footer {
  padding: 2rem 0;
  text-align: center;
}

.footer--light {
  background: var(--muted);
  color: var(--foreground);
}

.footer--dark {
  background: #303846;
  color: #ebedf0;
}

.not-found {
  padding: 4rem 1rem;
}

@media (max-width: 996px) {
  .col--4 {
    flex: 0 0 100%;
    max-width: 100%;
  }

  .sidebar,
  .toc {
    display: none;
  }

  .hero__title {
    font-size: 2rem;
  }
}
"#;

const DEFAULT_JS: &str = r#"// roldocs runtime
(function() {
  'use strict';

  const root = document.documentElement;
  const stored = localStorage.getItem('theme');
  const prefersDark = window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches;
  root.setAttribute('data-theme', stored || (prefersDark ? 'dark' : 'light'));

  // Color mode toggle
  document.querySelectorAll('.color-mode-toggle').forEach(btn => {
    btn.addEventListener('click', () => {
      const next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
      root.setAttribute('data-theme', next);
      localStorage.setItem('theme', next);
    });
  });

  // Dropdowns open on click for touch devices
  document.querySelectorAll('.dropdown > .navbar__link').forEach(link => {
    link.addEventListener('click', event => {
      event.preventDefault();
      link.parentElement.classList.toggle('dropdown--open');
    });
  });

  // Copy code button
  const copyLabel = document.body.getAttribute('data-copy-label') || 'Copy';
  document.querySelectorAll('.code-block').forEach(block => {
    if (block.querySelector('.copy-btn')) return;

    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.textContent = copyLabel;
    btn.setAttribute('type', 'button');

    btn.addEventListener('click', async () => {
      const code = block.querySelector('code');
      try {
        await navigator.clipboard.writeText(code ? code.textContent : '');
        btn.textContent = '✓';
      } catch (err) {
        btn.textContent = '✗';
      }
      setTimeout(() => { btn.textContent = copyLabel; }, 2000);
    });

    block.appendChild(btn);
  });
})();
"#;
