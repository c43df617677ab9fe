//! Phase 1: source tree walk and collection.
//!
//! Walks the source directory once, classifies every entry, and produces an
//! immutable [`ScanResult`]: the page map for tree linking plus the lists of
//! stylesheets and passthrough assets for the generate phase. The walk is
//! read-only; nothing is written until generation, and tree linking never
//! starts until the walk has seen every file (previous/next and ancestors
//! are global properties).
//!
//! Skipped during the walk, beyond the classifier's ignore rules: the
//! `site.toml` config file and the layouts directory, neither of which is
//! site content.

use crate::classify::{self, Transform};
use crate::config::{self, SiteConfig};
use crate::markdown::{self, ExtractError};
use crate::types::Page;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Everything phase 1 learned about the source tree.
///
/// Paths are source-relative with `/` separators, matching page keys.
#[derive(Debug)]
pub struct ScanResult {
    /// One entry per Markdown file, keyed by source-relative path.
    pub pages: BTreeMap<String, Page>,
    /// Stylesheet sources to compile (`.scss`/`.sass`, partials excluded).
    pub stylesheets: Vec<String>,
    /// Everything else, copied verbatim.
    pub assets: Vec<String>,
}

/// Walk the source tree and collect pages, stylesheets, and assets.
pub fn scan(root: &Path, site_config: &SiteConfig) -> Result<ScanResult, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    let layouts_dir = root.join(&site_config.layouts);

    let mut pages = BTreeMap::new();
    let mut stylesheets = Vec::new();
    let mut assets = Vec::new();

    // sort_by_file_name makes the walk order deterministic, which keeps
    // repeated builds byte-identical.
    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name().into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry?;
        let rel = rel_path(entry.path(), root);

        if classify::is_ignored(&rel) || entry.path() == layouts_dir {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }
        if !entry.file_type().is_file() || rel == config::CONFIG_FILE {
            continue;
        }

        match classify::transform_for(&rel) {
            Transform::Markdown => {
                let raw = fs::read_to_string(entry.path())?;
                let page = markdown::extract(&rel, &raw)?;
                pages.insert(rel, page);
            }
            Transform::Stylesheet => stylesheets.push(rel),
            Transform::Copy => assets.push(rel),
        }
    }

    Ok(ScanResult {
        pages,
        stylesheets,
        assets,
    })
}

/// Source-relative path with forward slashes, usable as a page key.
fn rel_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let text = rel.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
