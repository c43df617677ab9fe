//! Path classification and transform dispatch.
//!
//! Two small pure decisions applied to every source-relative path during the
//! walk:
//!
//! 1. **Ignore or allow**: dotfiles, underscore-prefixed entries, and
//!    dependency directories are skipped. The rule applies to every path
//!    segment, so `notes/_drafts/todo.md` is ignored even though the file
//!    itself has a plain name. A default output directory of `_site` needs
//!    no special casing — the underscore rule already excludes it.
//!
//! 2. **Transform selection**: `.md` files become HTML pages, `.scss`/`.sass`
//!    files compile to CSS, everything else is copied verbatim.
//!
//! Both decisions are pure functions of the path string; no filesystem access.

use std::path::Path;

/// Directories that hold dependency trees, never site content.
const DEPENDENCY_DIRS: &[&str] = &["node_modules", "target"];

/// Whether a source-relative path should be skipped entirely.
///
/// A path is ignored when any of its segments starts with `.` or `_`, or
/// names a dependency directory.
pub fn is_ignored(rel_path: &str) -> bool {
    rel_path.split('/').any(|segment| {
        segment.starts_with('.') || segment.starts_with('_') || DEPENDENCY_DIRS.contains(&segment)
    })
}

/// How a source file is turned into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Markdown page: metadata extraction, HTML conversion, layout rendering.
    Markdown,
    /// Stylesheet: compiled to CSS with imports resolved next to the file.
    Stylesheet,
    /// Static asset: exact byte copy.
    Copy,
}

/// Select the transform for a source-relative path by extension.
pub fn transform_for(rel_path: &str) -> Transform {
    let ext = Path::new(rel_path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "md" => Transform::Markdown,
        "scss" | "sass" => Transform::Stylesheet,
        _ => Transform::Copy,
    }
}
