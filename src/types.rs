//! Shared types for the build pipeline.
//!
//! The central record is [`Page`]: one per source Markdown file. Tree
//! relations (parent, children, previous/next) are stored as page-map keys,
//! never as live references. The page map owns every record and relations are
//! looked up by key, so the graph is acyclic in memory and serializes cleanly
//! for inspection and tests.
//!
//! A `Page` goes through exactly two mutations in its life: it is created by
//! the scan phase with its relation fields empty, filled in by the single
//! tree-linking pass, and read-only from then on.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Front matter key/value pairs, as parsed from the top of a Markdown file.
pub type Metadata = BTreeMap<String, Value>;

/// One source Markdown file and its place in the site tree.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Source-relative path, e.g. `guide/index.md`. Primary key.
    pub path: String,
    /// Front matter fields (title, layout, explicit `children` list, custom).
    pub metadata: Metadata,
    /// Display title: front matter `title`, else first heading, else the
    /// filename stem.
    pub title: String,
    /// Layout name; `"default"` when the front matter omits it.
    pub layout: String,
    /// Rendered HTML body.
    pub content: String,
    /// Output path: `path` with the trailing `.md` replaced by `.html`.
    pub url: String,
    /// `"../"` repeated once per directory level, for site-root-relative
    /// asset references from nested pages.
    pub root_prefix: String,
    /// Key of the parent page. `None` for the tree root and for orphans.
    pub parent: Option<String>,
    /// Child keys inferred from path structure, in sorted-key order.
    pub natural_children: Vec<String>,
    /// Child keys in presentation order: `natural_children`, or the
    /// permutation/subset declared by the `children` front matter list.
    pub children: Vec<String>,
    /// Keys from the tree root down to this page, inclusive.
    pub ancestors: Vec<String>,
    /// Previous page in the global depth-first reading sequence.
    pub previous: Option<String>,
    /// Next page in the global depth-first reading sequence.
    pub next: Option<String>,
}

impl Page {
    /// A freshly extracted page with no tree relations yet.
    pub fn new(
        path: String,
        metadata: Metadata,
        title: String,
        layout: String,
        content: String,
        url: String,
        root_prefix: String,
    ) -> Self {
        Page {
            path,
            metadata,
            title,
            layout,
            content,
            url,
            root_prefix,
            parent: None,
            natural_children: Vec::new(),
            children: Vec::new(),
            ancestors: Vec::new(),
            previous: None,
            next: None,
        }
    }
}
