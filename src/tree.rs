//! Site tree builder.
//!
//! Turns the flat page map produced by the scan phase into a fully linked
//! [`Site`]: parent/child structure inferred from path shape, explicit
//! child-order overrides applied, ancestor chains resolved, and a single
//! global previous/next reading sequence computed.
//!
//! This is a pure pass: it consumes the map, runs to completion, and hands
//! back a read-only structure. Rendering never observes a half-linked page.
//!
//! ## Key ordering
//!
//! Keys are sorted with any trailing `index.md` stripped before comparison,
//! so a directory's index page sorts immediately before its siblings and its
//! own subdirectory entries:
//!
//! ```text
//! index.md            ""
//! about.md            "about.md"
//! guide/index.md      "guide/"
//! guide/setup.md      "guide/setup.md"
//! guide/usage.md      "guide/usage.md"
//! ```
//!
//! The first sorted key is the tree root.
//!
//! ## Parent inference
//!
//! A key's parent is its containing directory's `index.md`; top-level pages
//! hang off the root `index.md`. A key whose computed parent is missing from
//! the map stays parentless and outside the reading sequence. That situation
//! is deliberate: reparenting an orphaned `a/b/deep.md` to the root would
//! invent structure the author never wrote.

use crate::types::Page;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Page {parent} lists unknown child \"{name}\" in its children ordering")]
    UnknownChild { parent: String, name: String },
    #[error("Page {parent} has a children ordering that is not a list of strings")]
    InvalidChildList { parent: String },
}

/// The fully linked page graph, read-only after construction.
#[derive(Debug)]
pub struct Site {
    pages: BTreeMap<String, Page>,
    root: Option<String>,
    sequence: Vec<String>,
}

impl Site {
    /// Look up a page by source path.
    pub fn page(&self, key: &str) -> Option<&Page> {
        self.pages.get(key)
    }

    /// The tree root, if the site has any pages.
    pub fn root(&self) -> Option<&Page> {
        self.root.as_deref().and_then(|key| self.pages.get(key))
    }

    /// All pages in key order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Keys in global reading order: the pre-order depth-first walk from the
    /// root through resolved `children`. Orphans are absent.
    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Comparison form of a key: trailing `index.md` stripped, slash kept.
fn sort_key(key: &str) -> &str {
    key.strip_suffix("index.md").unwrap_or(key)
}

/// Computed parent key. Equal to `key` itself only for the root `index.md`.
fn parent_key(key: &str) -> String {
    let stripped = key.strip_suffix("/index.md").unwrap_or(key);
    match stripped.rfind('/') {
        Some(pos) => format!("{}/index.md", &stripped[..pos]),
        None => "index.md".to_string(),
    }
}

/// Short-name used by explicit child orderings: filename without `.md`,
/// with `/index.md` resolving to the containing directory's name.
fn short_name(key: &str) -> &str {
    let stripped = key.strip_suffix("/index.md").unwrap_or(key);
    let last = stripped.rsplit('/').next().unwrap_or(stripped);
    last.strip_suffix(".md").unwrap_or(last)
}

/// Link the flat page map into a [`Site`].
///
/// Runs the whole linking pass in order: sorted keys, parents and natural
/// children, explicit orderings, ancestors, then the global previous/next
/// chain. Fails fast on the first unresolvable child ordering.
pub fn link(mut pages: BTreeMap<String, Page>) -> Result<Site, TreeError> {
    if pages.is_empty() {
        return Ok(Site {
            pages,
            root: None,
            sequence: Vec::new(),
        });
    }

    let mut keys: Vec<String> = pages.keys().cloned().collect();
    keys.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
    let root = keys[0].clone();

    // Parents and natural children. Iterating sorted keys means each
    // parent's natural_children ends up in sorted-key order for free.
    for key in &keys {
        let parent = parent_key(key);
        if parent == *key || *key == root || !pages.contains_key(&parent) {
            continue;
        }
        if let Some(page) = pages.get_mut(key) {
            page.parent = Some(parent.clone());
        }
        if let Some(page) = pages.get_mut(&parent) {
            page.natural_children.push(key.clone());
        }
    }

    // Resolve presentation order: explicit `children` metadata permutes or
    // subsets natural children; everyone else keeps them as-is.
    for key in &keys {
        let page = &pages[key];
        let resolved = match page.metadata.get("children") {
            None => page.natural_children.clone(),
            Some(value) => {
                let names = value.as_array().ok_or_else(|| TreeError::InvalidChildList {
                    parent: key.clone(),
                })?;
                let mut ordered = Vec::with_capacity(names.len());
                for name in names {
                    let name = name.as_str().ok_or_else(|| TreeError::InvalidChildList {
                        parent: key.clone(),
                    })?;
                    let child = page
                        .natural_children
                        .iter()
                        .find(|c| short_name(c) == name)
                        .ok_or_else(|| TreeError::UnknownChild {
                            parent: key.clone(),
                            name: name.to_string(),
                        })?;
                    ordered.push(child.clone());
                }
                ordered
            }
        };
        if let Some(page) = pages.get_mut(key) {
            page.children = resolved;
        }
    }

    // Ancestors: parent chain from self up, reversed to run root → self.
    for key in &keys {
        let mut chain = vec![key.clone()];
        let mut current = key.clone();
        while let Some(parent) = pages[&current].parent.clone() {
            chain.push(parent.clone());
            current = parent;
        }
        chain.reverse();
        if let Some(page) = pages.get_mut(key) {
            page.ancestors = chain;
        }
    }

    // Global reading order: one pre-order walk from the root through the
    // resolved children, then a doubly linked previous/next chain over it.
    let mut sequence = Vec::with_capacity(pages.len());
    preorder(&pages, &root, &mut sequence);
    for pair in sequence.windows(2) {
        if let Some(page) = pages.get_mut(&pair[0]) {
            page.next = Some(pair[1].clone());
        }
        if let Some(page) = pages.get_mut(&pair[1]) {
            page.previous = Some(pair[0].clone());
        }
    }

    Ok(Site {
        pages,
        root: Some(root),
        sequence,
    })
}

fn preorder(pages: &BTreeMap<String, Page>, key: &str, out: &mut Vec<String>) {
    out.push(key.to_string());
    for child in &pages[key].children {
        preorder(pages, child, out);
    }
}
