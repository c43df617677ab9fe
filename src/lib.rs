//! # mdsite
//!
//! A minimal static site generator for Markdown documentation trees. Your
//! filesystem is the data source: the directory structure is the site
//! structure, `index.md` files are section landing pages, and front matter
//! is the only configuration a page carries.
//!
//! # Architecture: Two-Phase Pipeline
//!
//! ```text
//! 1. Scan      source/    →  ScanResult   (walk, classify, extract pages)
//! 2. Link      ScanResult →  Site         (pure tree building)
//! 3. Generate  Site       →  output/      (wipe, compile, copy, render)
//! ```
//!
//! The split is load-bearing, not cosmetic: a page's parent, children,
//! ancestors, and previous/next links are global properties of the whole
//! tree, so no page can render until every page has been seen. Phase 1
//! produces an immutable snapshot, the linking pass is a pure function over
//! it, and generation only ever reads the linked result.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | Ignore rules and per-extension transform dispatch |
//! | [`markdown`] | Front matter, heading slugs, Markdown to HTML, [`types::Page`] extraction |
//! | [`scan`] | Phase 1 — walks the source tree into a `ScanResult` |
//! | [`tree`] | The core — links the flat page map into the site tree |
//! | [`render`] | Tera layout rendering with navigation context |
//! | [`generate`] | Output writing: wipe, CSS compile, copy, per-page render |
//! | [`config`] | Optional `site.toml` loading with stock defaults |
//! | [`serve`] | Static preview server over the output directory |
//! | [`output`] | CLI output formatting — indented site-tree display |
//! | [`types`] | The `Page` record shared across phases |
//!
//! # Design Decisions
//!
//! ## The Site Tree Is Inferred, Then Overridden
//!
//! Parent/child structure comes entirely from path shape: `guide/setup.md`
//! is a child of `guide/index.md`, which is a child of the root `index.md`.
//! Authors who want a specific reading order declare `children: [b, a]` in a
//! section's front matter; anything unlisted drops out of the sequence, and
//! naming a page that does not exist fails the build. Navigation mistakes
//! should be build errors, not quietly broken links.
//!
//! ## Keys, Not Pointers
//!
//! Tree relations are stored as page-map keys rather than references. The
//! map is the single owner of every page, the graph stays acyclic in memory,
//! and a linked site can be serialized wholesale when a test wants to assert
//! on structure.
//!
//! ## Fail the Whole Build
//!
//! There is no partial-success mode. A malformed page, an unresolvable child
//! ordering, a stylesheet that will not compile, or a missing layout each
//! abort the run before the output root is considered complete. Every input
//! is deterministic, so retries are pointless; the errors instead carry the
//! offending file path so the fix is one edit away.

pub mod classify;
pub mod config;
pub mod generate;
pub mod markdown;
pub mod output;
pub mod render;
pub mod scan;
pub mod serve;
pub mod tree;
pub mod types;
