//! Layout rendering.
//!
//! Feeds a fully linked [`Page`] into a named Tera layout and produces the
//! final HTML document. Layouts live in a directory of `*.html` templates;
//! a page's `layout` front matter field picks the template by stem, with
//! `default.html` used when unset.
//!
//! ## Context
//!
//! Every layout receives:
//!
//! | Variable    | Value                                                    |
//! |-------------|----------------------------------------------------------|
//! | `content`   | rendered HTML body (inject with `{{ content | safe }}`)  |
//! | `title`     | resolved page title                                      |
//! | `metadata`  | full front matter map                                    |
//! | `url`       | output-relative path of this page                        |
//! | `root`      | `../` prefix reaching the site root                      |
//! | `parent`    | `{title, url, path}` or null                             |
//! | `children`  | list of `{title, url, path}` in presentation order       |
//! | `ancestors` | root-to-self list of `{title, url, path}`                |
//! | `previous`  | `{title, url, path}` or null                             |
//! | `next`      | `{title, url, path}` or null                             |
//!
//! Tera escapes all interpolation by default; only the page body, which is
//! generator-produced HTML, goes through `safe`. Template lookup or
//! evaluation failures are fatal and name the source file, since a missing
//! layout means the page cannot ship.

use crate::tree::Site;
use crate::types::Page;
use serde::Serialize;
use std::path::Path;
use tera::Tera;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load layouts from {dir}: {source}")]
    Layouts {
        dir: String,
        #[source]
        source: tera::Error,
    },
    #[error("Failed to render {path} with layout \"{layout}\": {source}")]
    Template {
        path: String,
        layout: String,
        #[source]
        source: tera::Error,
    },
}

/// Navigation reference handed to layouts in place of a full page.
#[derive(Debug, Clone, Serialize)]
pub struct PageRef {
    pub title: String,
    pub url: String,
    pub path: String,
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Load every `*.html` template under `layouts_dir`.
    pub fn from_dir(layouts_dir: &Path) -> Result<Self, RenderError> {
        let glob = format!("{}/**/*.html", layouts_dir.display());
        let tera = Tera::new(&glob).map_err(|source| RenderError::Layouts {
            dir: layouts_dir.display().to_string(),
            source,
        })?;
        Ok(Renderer { tera })
    }

    /// Render one page through its layout.
    pub fn render_page(&self, site: &Site, page: &Page) -> Result<String, RenderError> {
        let mut context = tera::Context::new();
        context.insert("content", &page.content);
        context.insert("title", &page.title);
        context.insert("metadata", &page.metadata);
        context.insert("url", &page.url);
        context.insert("path", &page.path);
        context.insert("root", &page.root_prefix);
        context.insert("parent", &page.parent.as_deref().and_then(|k| page_ref(site, k)));
        context.insert("children", &page_refs(site, &page.children));
        context.insert("ancestors", &page_refs(site, &page.ancestors));
        context.insert("previous", &page.previous.as_deref().and_then(|k| page_ref(site, k)));
        context.insert("next", &page.next.as_deref().and_then(|k| page_ref(site, k)));

        let template = format!("{}.html", page.layout);
        self.tera
            .render(&template, &context)
            .map_err(|source| RenderError::Template {
                path: page.path.clone(),
                layout: page.layout.clone(),
                source,
            })
    }
}

fn page_ref(site: &Site, key: &str) -> Option<PageRef> {
    site.page(key).map(|p| PageRef {
        title: p.title.clone(),
        url: p.url.clone(),
        path: p.path.clone(),
    })
}

fn page_refs(site: &Site, keys: &[String]) -> Vec<PageRef> {
    keys.iter().filter_map(|k| page_ref(site, k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::extract;
    use crate::tree;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn layouts(templates: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (name, body) in templates {
            fs::write(tmp.path().join(name), body).unwrap();
        }
        tmp
    }

    fn site(files: &[(&str, &str)]) -> Site {
        let pages: BTreeMap<_, _> = files
            .iter()
            .map(|(path, raw)| ((*path).to_string(), extract(path, raw).unwrap()))
            .collect();
        tree::link(pages).unwrap()
    }

    #[test]
    fn renders_content_through_named_layout() {
        let tmp = layouts(&[(
            "default.html",
            "<title>{{ title }}</title><main>{{ content | safe }}</main>",
        )]);
        let renderer = Renderer::from_dir(tmp.path()).unwrap();
        let site = site(&[("index.md", "# Hello\n\nBody text.\n")]);

        let html = renderer.render_page(&site, site.root().unwrap()).unwrap();
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn layout_field_selects_template() {
        let tmp = layouts(&[
            ("default.html", "default"),
            ("guide.html", "guide: {{ title }}"),
        ]);
        let renderer = Renderer::from_dir(tmp.path()).unwrap();
        let site = site(&[("index.md", "---\nlayout: guide\ntitle: G\n---\n")]);

        let html = renderer.render_page(&site, site.root().unwrap()).unwrap();
        assert_eq!(html, "guide: G");
    }

    #[test]
    fn missing_layout_is_fatal_and_names_the_page() {
        let tmp = layouts(&[("default.html", "x")]);
        let renderer = Renderer::from_dir(tmp.path()).unwrap();
        let site = site(&[("docs/a.md", "---\nlayout: nope\n---\n")]);

        let err = renderer
            .render_page(&site, site.page("docs/a.md").unwrap())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("docs/a.md"));
        assert!(msg.contains("nope"));
    }

    #[test]
    fn navigation_refs_are_bound() {
        let tmp = layouts(&[(
            "default.html",
            "{% for c in children %}[{{ c.title }}->{{ c.url }}]{% endfor %}\
             {% if next %}next={{ next.url }}{% endif %}",
        )]);
        let renderer = Renderer::from_dir(tmp.path()).unwrap();
        let site = site(&[
            ("index.md", "# Home\n"),
            ("guide/index.md", "# Guide\n"),
            ("guide/setup.md", "# Setup\n"),
        ]);

        let html = renderer.render_page(&site, site.root().unwrap()).unwrap();
        assert!(html.contains("[Guide->guide/index.html]"));
        assert!(html.contains("next=guide/index.html"));
    }

    #[test]
    fn root_prefix_reaches_site_root_from_nested_pages() {
        let tmp = layouts(&[(
            "default.html",
            "<link href=\"{{ root }}stylesheets/main.css\">",
        )]);
        let renderer = Renderer::from_dir(tmp.path()).unwrap();
        let site = site(&[("index.md", ""), ("guide/index.md", ""), ("guide/setup.md", "")]);

        let html = renderer
            .render_page(&site, site.page("guide/setup.md").unwrap())
            .unwrap();
        assert!(html.contains("href=\"../stylesheets/main.css\""));
    }

    #[test]
    fn untrusted_metadata_is_escaped() {
        let tmp = layouts(&[("default.html", "<h1>{{ title }}</h1>")]);
        let renderer = Renderer::from_dir(tmp.path()).unwrap();
        let site = site(&[("index.md", "---\ntitle: \"<script>alert(1)</script>\"\n---\n")]);

        let html = renderer.render_page(&site, site.root().unwrap()).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
