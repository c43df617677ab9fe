//! CLI output formatting.
//!
//! Information-first display: each page leads with its source path and `→`
//! the output path it produced, indented to its depth in the site tree so
//! the listing reads as a table of contents. Stylesheets and assets follow
//! as flat sections.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::generate::Summary;
use crate::tree::Site;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Depth of a page in the tree: ancestors minus itself.
fn depth_of(site: &Site, key: &str) -> usize {
    site.page(key)
        .map(|p| p.ancestors.len().saturating_sub(1))
        .unwrap_or(0)
}

/// Format the linked site as an indented tree, one page per line.
///
/// ```text
/// Pages
///     index.md → index.html
///         guide/index.md → guide/index.html
///             guide/setup.md → guide/setup.html
/// ```
pub fn format_site_tree(site: &Site) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for key in site.sequence() {
        if let Some(page) = site.page(key) {
            lines.push(format!(
                "    {}{} \u{2192} {}",
                indent(depth_of(site, key)),
                page.path,
                page.url
            ));
        }
    }
    let in_sequence: std::collections::HashSet<&str> =
        site.sequence().iter().map(String::as_str).collect();
    for page in site.pages() {
        if !in_sequence.contains(page.path.as_str()) {
            lines.push(format!("    {} \u{2192} {} (unreachable)", page.path, page.url));
        }
    }
    lines
}

/// Format a build summary: stylesheet and asset sections plus totals.
pub fn format_build_output(site: &Site, summary: &Summary) -> Vec<String> {
    let mut lines = format_site_tree(site);

    if !summary.stylesheets.is_empty() {
        lines.push(String::new());
        lines.push("Stylesheets".to_string());
        for (src, out) in &summary.stylesheets {
            lines.push(format!("    {src} \u{2192} {out}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} stylesheets, {} assets",
        summary.pages.len(),
        summary.stylesheets.len(),
        summary.assets
    ));
    lines
}

/// Print check output to stdout.
pub fn print_site_tree(site: &Site) {
    for line in format_site_tree(site) {
        println!("{}", line);
    }
}

/// Print build output to stdout.
pub fn print_build_output(site: &Site, summary: &Summary) {
    for line in format_build_output(site, summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::extract;
    use crate::tree;
    use std::collections::BTreeMap;

    fn site(files: &[(&str, &str)]) -> Site {
        let pages: BTreeMap<_, _> = files
            .iter()
            .map(|(path, raw)| ((*path).to_string(), extract(path, raw).unwrap()))
            .collect();
        tree::link(pages).unwrap()
    }

    #[test]
    fn tree_lines_are_indented_by_depth() {
        let site = site(&[
            ("index.md", ""),
            ("guide/index.md", ""),
            ("guide/setup.md", ""),
        ]);
        let lines = format_site_tree(&site);
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "    index.md \u{2192} index.html");
        assert_eq!(lines[2], "        guide/index.md \u{2192} guide/index.html");
        assert_eq!(lines[3], "            guide/setup.md \u{2192} guide/setup.html");
    }

    #[test]
    fn orphans_are_flagged() {
        let site = site(&[("index.md", ""), ("a/b/deep.md", "")]);
        let lines = format_site_tree(&site);
        assert!(lines.iter().any(|l| l.contains("a/b/deep.md") && l.contains("unreachable")));
    }

    #[test]
    fn build_output_reports_totals() {
        let site = site(&[("index.md", "")]);
        let summary = Summary {
            pages: vec![("index.md".into(), "index.html".into())],
            stylesheets: vec![("main.scss".into(), "main.css".into())],
            assets: 3,
        };
        let lines = format_build_output(&site, &summary);
        assert_eq!(lines.last().unwrap(), "Generated 1 pages, 1 stylesheets, 3 assets");
        assert!(lines.iter().any(|l| l.contains("main.scss \u{2192} main.css")));
    }
}
