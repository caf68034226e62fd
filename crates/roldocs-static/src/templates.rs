//! Template engine for rendering site pages.

use std::fmt::Write as _;

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;

use roldocs_config::{FooterStyle, NavKind, UiStrings};

use crate::landing::LandingView;
use crate::markdown::escape_html;

/// A rendered navbar entry. Dropdowns have children and no href.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavEntryView {
    pub kind: NavKind,
    pub label: String,
    pub href: Option<String>,
    pub children: Vec<NavEntryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoView {
    pub alt: String,
    pub src: String,
}

/// The top navigation bar, split by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavbarView {
    pub title: Option<String>,
    pub logo: Option<LogoView>,
    pub left: Vec<NavEntryView>,
    pub right: Vec<NavEntryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterView {
    pub style: FooterStyle,
    pub copyright: String,
}

/// A sidebar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarItem {
    /// Display title
    pub title: String,
    /// URL path, empty for categories
    pub path: String,
    /// Child items
    pub children: Vec<SidebarItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Per-locale values shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    pub lang: String,
    pub dir: &'static str,
    pub site_title: String,
    /// Base URL of the locale, for links
    pub base_url: String,
    /// Base URL of the site root, for generated assets
    pub assets_url: String,
    pub favicon: Option<String>,
    pub navbar: NavbarView,
    pub footer: Option<FooterView>,
    pub strings: &'static UiStrings,
}

/// A link to the same page in another locale.
#[derive(Debug, Clone, Serialize)]
pub struct Alternate {
    pub locale: String,
    pub href: String,
}

/// Head metadata of one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    /// Full `<title>` text
    pub title: String,
    pub description: Option<String>,
    pub canonical: String,
    pub alternates: Vec<Alternate>,
}

/// Content of a documentation page.
#[derive(Debug, Clone, Serialize)]
pub struct DocView {
    /// Document id, e.g. `guide/setup`
    pub id: String,
    pub title: String,
    /// Rendered content HTML
    pub content: String,
    /// Emit the title as `<h1>` because the content has none
    pub show_title: bool,
    pub sidebar: Vec<SidebarItem>,
    pub toc: Vec<TocEntry>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Leave `/` unescaped so URLs stay readable in attributes.
        env.set_formatter(|out, state, value| match value.as_str() {
            Some(text) if !value.is_safe() && matches!(state.auto_escape(), AutoEscape::Html) => {
                out.write_str(&escape_html(text))?;
                Ok(())
            }
            _ => minijinja::escape_formatter(out, state, value),
        });

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("navbar.html", NAVBAR_TEMPLATE),
            ("nav_item.html", NAV_ITEM_TEMPLATE),
            ("footer.html", FOOTER_TEMPLATE),
            ("doc.html", DOC_TEMPLATE),
            ("landing.html", LANDING_TEMPLATE),
            ("404.html", NOT_FOUND_TEMPLATE),
        ] {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("built-in template must parse");
        }

        Self { env }
    }

    pub fn render_doc(
        &self,
        site: &SiteView,
        meta: &PageMeta,
        page: &DocView,
    ) -> Result<String, minijinja::Error> {
        self.render("doc.html", site, meta, page)
    }

    pub fn render_landing(
        &self,
        site: &SiteView,
        meta: &PageMeta,
        page: &LandingView,
    ) -> Result<String, minijinja::Error> {
        self.render("landing.html", site, meta, page)
    }

    pub fn render_not_found(
        &self,
        site: &SiteView,
        meta: &PageMeta,
    ) -> Result<String, minijinja::Error> {
        self.render("404.html", site, meta, ())
    }

    fn render(
        &self,
        template: &str,
        site: &SiteView,
        meta: &PageMeta,
        page: impl Serialize,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            site => site,
            meta => meta,
            page => page,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ site.lang }}" dir="{{ site.dir }}" data-theme="light">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="generator" content="roldocs">
  <title>{{ meta.title }}</title>
  {% if meta.description %}<meta name="description" content="{{ meta.description }}">
  {% endif %}<link rel="canonical" href="{{ meta.canonical }}">
  {% for alt in meta.alternates %}<link rel="alternate" href="{{ alt.href }}" hreflang="{{ alt.locale }}">
  {% endfor %}{% if site.favicon %}<link rel="icon" href="{{ site.favicon }}">
  {% endif %}<link rel="stylesheet" href="{{ site.assets_url }}assets/main.css">
</head>
<body data-copy-label="{{ site.strings.copy }}">
  {% include "navbar.html" %}
  <div class="main-wrapper">
    {% block content %}{% endblock %}
  </div>
  {% include "footer.html" %}
  <script src="{{ site.assets_url }}assets/main.js"></script>
</body>
</html>"##;

const NAVBAR_TEMPLATE: &str = r##"<nav class="navbar" aria-label="Main">
  <div class="navbar__inner">
    <div class="navbar__items">
      <a class="navbar__brand" href="{{ site.base_url }}">
        {% if site.navbar.logo %}<img class="navbar__logo" src="{{ site.navbar.logo.src }}" alt="{{ site.navbar.logo.alt }}">{% endif %}
        {% if site.navbar.title %}<b class="navbar__title">{{ site.navbar.title }}</b>{% endif %}
      </a>
      {% for item in site.navbar.left %}{% include "nav_item.html" %}{% endfor %}
    </div>
    <div class="navbar__items navbar__items--right">
      {% for item in site.navbar.right %}{% include "nav_item.html" %}{% endfor %}
      <button class="color-mode-toggle" type="button" title="{{ site.strings.toggle_theme }}" aria-label="{{ site.strings.toggle_theme }}">&#9680;</button>
    </div>
  </div>
</nav>"##;

const NAV_ITEM_TEMPLATE: &str = r##"{% if item.kind == "dropdown" %}
<div class="navbar__item dropdown">
  <a class="navbar__link" href="#" role="button" aria-haspopup="true">{{ item.label }}</a>
  <ul class="dropdown__menu">
    {% for child in item.children %}
    <li><a class="dropdown__link" href="{{ child.href }}"{% if child.kind == "external_link" %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ child.label }}</a></li>
    {% endfor %}
  </ul>
</div>
{% else %}
<a class="navbar__item navbar__link" href="{{ item.href }}"{% if item.kind == "external_link" %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ item.label }}</a>
{% endif %}"##;

const FOOTER_TEMPLATE: &str = r##"{% if site.footer %}
<footer class="footer footer--{{ site.footer.style }}">
  <div class="container">
    <div class="footer__copyright">{{ site.footer.copyright }}</div>
  </div>
</footer>
{% endif %}"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="docs-wrapper">
  <aside class="sidebar">
    <ul class="menu__list">
    {% for item in page.sidebar recursive %}
      {% if item.children %}
      <li class="menu__list-item menu__category">
        <span class="menu__category-label">{{ item.title }}</span>
        <ul class="menu__list">{{ loop(item.children) }}</ul>
      </li>
      {% else %}
      <li class="menu__list-item"><a class="menu__link{% if item.active %} menu__link--active{% endif %}" href="{{ item.path }}">{{ item.title }}</a></li>
      {% endif %}
    {% endfor %}
    </ul>
  </aside>
  <main class="doc-main">
    <article class="doc" data-doc-id="{{ page.id }}">
      <div class="markdown">
        {% if page.show_title %}<h1>{{ page.title }}</h1>{% endif %}
        {{ page.content | safe }}
      </div>
    </article>
    {% if page.toc %}
    <aside class="toc">
      <h2>{{ site.strings.on_this_page }}</h2>
      <ul>
      {% for entry in page.toc %}
        <li class="toc-level-{{ entry.level }}"><a href="#{{ entry.id }}">{{ entry.title }}</a></li>
      {% endfor %}
      </ul>
    </aside>
    {% endif %}
  </main>
</div>
{% endblock %}"##;

const LANDING_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<header class="hero hero--primary hero-banner">
  <div class="container">
    <h1 class="hero__title">{{ page.hero.title }}</h1>
    <p class="hero__subtitle">{{ page.hero.subtitle }}</p>
    <div class="hero-buttons">
      <a class="button button--secondary button--lg" href="{{ page.hero.cta_href }}">{{ page.hero.cta_label }}</a>
    </div>
  </div>
</header>
<main>
  <section class="features">
    <div class="container">
      <div class="row">
      {% for feature in page.features %}
        <div class="col col--4">
          <div class="text--center">
            <img class="feature-svg" src="{{ feature.icon_src }}" alt="{{ feature.title }}" role="img">
          </div>
          <div class="text--center padding-horiz--md">
            <h3>{{ feature.title }}</h3>
            <p>{{ feature.description }}</p>
          </div>
        </div>
      {% endfor %}
      </div>
    </div>
  </section>
</main>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<main class="container not-found">
  <h1 class="hero__title">{{ site.strings.not_found_title }}</h1>
  <p>{{ site.strings.not_found_message }}</p>
  <p><a href="{{ site.base_url }}">{{ site.strings.back_home }}</a></p>
</main>
{% endblock %}"##;
