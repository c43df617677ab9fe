//! Phase 2: output generation.
//!
//! Consumes the linked [`Site`] plus the stylesheet/asset lists from the
//! scan and writes the mirrored output tree:
//!
//! - the output root is removed entirely and recreated, so no stale file
//!   from a previous run can survive;
//! - assets are exact byte copies at their source-relative paths;
//! - stylesheets compile to CSS with imports resolved next to the source
//!   file, `.scss`/`.sass` becoming `.css`;
//! - every page renders through its layout to its `.html` path, in reading
//!   order first and orphans after.
//!
//! All writes are deterministic functions of the source tree, so two runs
//! over unchanged input produce byte-identical output.

use crate::render::{RenderError, Renderer};
use crate::tree::Site;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Stylesheet compile failed for {path}: {source}")]
    Stylesheet {
        path: String,
        #[source]
        source: Box<grass::Error>,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What a run produced, for display.
#[derive(Debug, Default)]
pub struct Summary {
    /// `(source path, output path)` per rendered page, in write order.
    pub pages: Vec<(String, String)>,
    /// `(source path, output path)` per compiled stylesheet.
    pub stylesheets: Vec<(String, String)>,
    /// Copied asset count.
    pub assets: usize,
}

/// Write the whole site under `output_root`, wiping it first.
pub fn generate(
    source_root: &Path,
    output_root: &Path,
    site: &Site,
    renderer: &Renderer,
    stylesheets: &[String],
    assets: &[String],
) -> Result<Summary, GenerateError> {
    if output_root.exists() {
        fs::remove_dir_all(output_root)?;
    }
    fs::create_dir_all(output_root)?;

    let mut summary = Summary::default();

    for rel in assets {
        let dest = output_root.join(rel);
        ensure_parent(&dest)?;
        fs::copy(source_root.join(rel), &dest)?;
        summary.assets += 1;
    }

    for rel in stylesheets {
        let src = source_root.join(rel);
        let options = match src.parent() {
            Some(dir) => grass::Options::default().load_path(dir),
            None => grass::Options::default(),
        };
        let css = grass::from_path(&src, &options).map_err(|source| {
            GenerateError::Stylesheet {
                path: rel.clone(),
                source,
            }
        })?;
        let out_rel = css_path(rel);
        let dest = output_root.join(&out_rel);
        ensure_parent(&dest)?;
        fs::write(&dest, css)?;
        summary.stylesheets.push((rel.clone(), out_rel));
    }

    // Reading order first, then orphans in key order, so output listings
    // match the site's navigation.
    let in_sequence: HashSet<&str> = site.sequence().iter().map(String::as_str).collect();
    let orphans = site
        .pages()
        .filter(|p| !in_sequence.contains(p.path.as_str()))
        .map(|p| p.path.clone());
    for key in site.sequence().iter().cloned().chain(orphans) {
        let Some(page) = site.page(&key) else { continue };
        let html = renderer.render_page(site, page)?;
        let dest = output_root.join(&page.url);
        ensure_parent(&dest)?;
        fs::write(&dest, html)?;
        summary.pages.push((page.path.clone(), page.url.clone()));
    }

    Ok(summary)
}

/// Stylesheet output path: extension replaced with `.css`.
fn css_path(rel: &str) -> String {
    match rel.rsplit_once('.') {
        Some((stem, _)) => format!("{stem}.css"),
        None => format!("{rel}.css"),
    }
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_path_replaces_extension() {
        assert_eq!(css_path("stylesheets/main.scss"), "stylesheets/main.css");
        assert_eq!(css_path("main.sass"), "main.css");
    }

    #[test]
    fn css_path_without_extension_appends() {
        assert_eq!(css_path("main"), "main.css");
    }
}
