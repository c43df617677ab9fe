//! End-to-end pipeline tests: scan → link → generate against real temp
//! directories, asserting on the bytes that land in the output root.

use mdsite::config::SiteConfig;
use mdsite::render::Renderer;
use mdsite::tree::TreeError;
use mdsite::{generate, scan, tree};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DEFAULT_LAYOUT: &str = "\
<title>{{ title }}</title>
<nav>{% if previous %}<a href=\"{{ root }}{{ previous.url }}\">prev</a>{% endif %}\
{% if next %}<a href=\"{{ root }}{{ next.url }}\">next</a>{% endif %}</nav>
<main>{{ content | safe }}</main>
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A source tree with a default layout plus the given files.
fn source_tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "layouts/default.html", DEFAULT_LAYOUT);
    for (rel, content) in files {
        write(tmp.path(), rel, content);
    }
    tmp
}

/// Run the full pipeline into `output`, returning the generate summary.
fn build(source: &Path, output: &Path) -> Result<generate::Summary, Box<dyn std::error::Error>> {
    let config = SiteConfig::default();
    let scan::ScanResult {
        pages,
        stylesheets,
        assets,
    } = scan::scan(source, &config)?;
    let site = tree::link(pages)?;
    let renderer = Renderer::from_dir(&source.join(&config.layouts))?;
    let summary = generate::generate(source, output, &site, &renderer, &stylesheets, &assets)?;
    Ok(summary)
}

#[test]
fn guide_scenario_builds_the_expected_tree() {
    let tmp = source_tree(&[
        ("index.md", "# Home\n"),
        ("guide/index.md", "# Guide\n"),
        ("guide/setup.md", "# Setup\n"),
    ]);
    let out = TempDir::new().unwrap();

    let summary = build(tmp.path(), out.path()).unwrap();

    // Reading order and output paths.
    assert_eq!(
        summary.pages,
        vec![
            ("index.md".to_string(), "index.html".to_string()),
            ("guide/index.md".to_string(), "guide/index.html".to_string()),
            ("guide/setup.md".to_string(), "guide/setup.html".to_string()),
        ]
    );

    // Mirrored structure on disk.
    assert!(out.path().join("index.html").is_file());
    assert!(out.path().join("guide/index.html").is_file());
    assert!(out.path().join("guide/setup.html").is_file());

    // The chain crosses from the guide index down into its children.
    let guide = fs::read_to_string(out.path().join("guide/index.html")).unwrap();
    assert!(guide.contains("href=\"../index.html\">prev"));
    assert!(guide.contains("href=\"../guide/setup.html\">next"));

    let setup = fs::read_to_string(out.path().join("guide/setup.html")).unwrap();
    assert!(setup.contains("href=\"../guide/index.html\">prev"));
    assert!(!setup.contains(">next"));
}

#[test]
fn stylesheets_compile_and_assets_copy() {
    let tmp = source_tree(&[
        ("index.md", "# Home\n"),
        (
            "stylesheets/main.scss",
            "@import \"palette\";\nbody { color: $ink; }\n",
        ),
        ("stylesheets/_palette.scss", "$ink: #222;\n"),
        ("images/logo.png", "png bytes"),
    ]);
    let out = TempDir::new().unwrap();

    let summary = build(tmp.path(), out.path()).unwrap();

    let css = fs::read_to_string(out.path().join("stylesheets/main.css")).unwrap();
    assert!(css.contains("color: #222"));
    // The partial is an import source, not an output.
    assert!(!out.path().join("stylesheets/_palette.css").exists());
    assert!(!out.path().join("stylesheets/main.scss").exists());

    assert_eq!(
        fs::read(out.path().join("images/logo.png")).unwrap(),
        b"png bytes"
    );
    assert_eq!(summary.assets, 1);
}

#[test]
fn broken_stylesheet_fails_the_build_with_the_path() {
    let tmp = source_tree(&[
        ("index.md", ""),
        ("stylesheets/main.scss", "body { color: $undefined; }\n"),
    ]);
    let out = TempDir::new().unwrap();

    let err = build(tmp.path(), out.path()).unwrap_err();
    assert!(err.to_string().contains("stylesheets/main.scss"));
}

#[test]
fn ghost_child_ordering_fails_the_build() {
    let tmp = source_tree(&[
        ("index.md", ""),
        ("a/index.md", "---\nchildren: [ghost]\n---\n"),
    ]);

    let config = SiteConfig::default();
    let scanned = scan::scan(tmp.path(), &config).unwrap();
    let err = tree::link(scanned.pages).unwrap_err();
    match err {
        TreeError::UnknownChild { parent, name } => {
            assert_eq!(parent, "a/index.md");
            assert_eq!(name, "ghost");
        }
        other => panic!("expected UnknownChild, got {other:?}"),
    }
}

#[test]
fn output_root_is_wiped_between_runs() {
    let tmp = source_tree(&[("index.md", "# Home\n")]);
    let out = TempDir::new().unwrap();

    // A stale file from an earlier run must not survive.
    write(out.path(), "stale/old.html", "leftover");
    build(tmp.path(), out.path()).unwrap();

    assert!(!out.path().join("stale").exists());
    assert!(out.path().join("index.html").is_file());
}

#[test]
fn rebuilds_are_byte_identical() {
    let tmp = source_tree(&[
        ("index.md", "---\nchildren: [guide]\n---\n# Home\n"),
        ("guide/index.md", "# Guide\n\n## Overview\n\n## Overview\n"),
        ("stylesheets/main.scss", "body { margin: 0; }\n"),
        ("data/notes.txt", "plain\n"),
    ]);
    let out = TempDir::new().unwrap();

    build(tmp.path(), out.path()).unwrap();
    let first = snapshot(out.path());
    build(tmp.path(), out.path()).unwrap();
    let second = snapshot(out.path());

    assert_eq!(first, second);
}

#[test]
fn duplicate_heading_anchors_are_numbered() {
    let tmp = source_tree(&[(
        "index.md",
        "# Overview\n\n## Overview\n\n## Overview\n",
    )]);
    let out = TempDir::new().unwrap();

    build(tmp.path(), out.path()).unwrap();
    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains("id=\"overview\""));
    assert!(html.contains("id=\"overview2\""));
    assert!(html.contains("id=\"overview3\""));
}

/// Collect `(relative path, bytes)` for every file under `root`, sorted.
fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files = Vec::new();
    collect(root, root, &mut files);
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
            out.push((rel, fs::read(&path).unwrap()));
        }
    }
}
