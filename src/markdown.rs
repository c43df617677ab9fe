//! Page metadata extraction: front matter, heading slugs, Markdown to HTML.
//!
//! Takes the raw text of one Markdown file plus its source-relative path and
//! produces a [`Page`] record ready for tree linking.
//!
//! ## Front matter
//!
//! An optional YAML block delimited by `---` lines at the very top of the
//! file:
//!
//! ```text
//! ---
//! title: Getting Started
//! layout: guide
//! children: [install, configure]
//! ---
//! # Getting Started
//! ...
//! ```
//!
//! Any scalar or list value is accepted; `title`, `layout`, and `children`
//! have meaning to the pipeline, everything else is passed through to the
//! layout. Malformed YAML is a fatal error naming the file — a page that
//! cannot be parsed must abort the run, not silently drop out of the site.
//!
//! ## Heading anchors
//!
//! Every heading gets a URL-safe slug id derived from its text: lowercased,
//! parenthetical suffix dropped, non-alphanumeric runs collapsed to single
//! hyphens, edge hyphens stripped. Duplicate slugs within one document get an
//! incrementing numeric suffix (`overview`, `overview2`, `overview3`).
//! Counter state lives in an explicit [`SlugCounter`] value created per
//! document, so extraction stays a pure function of its inputs.

use crate::types::{Metadata, Page};
use pulldown_cmark::{CowStr, Event, Parser, Tag, TagEnd, html};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Malformed front matter in {path}: {source}")]
    FrontMatter {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Per-document slug de-duplication state.
///
/// Tracks how many times each base slug has been produced. The first
/// occurrence keeps the bare slug; later ones get `2`, `3`, ... appended.
#[derive(Debug, Default)]
pub struct SlugCounter {
    seen: HashMap<String, u32>,
}

impl SlugCounter {
    pub fn new() -> Self {
        SlugCounter::default()
    }

    /// Slugify `text` and return a slug unique within this document.
    pub fn assign(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}{count}")
        }
    }
}

/// Lowercase slug: parenthetical suffix dropped, non-alphanumeric runs
/// collapsed to single hyphens, leading/trailing hyphens stripped.
fn slugify(text: &str) -> String {
    let text = strip_parenthetical(text);
    let mut slug = String::with_capacity(text.len());
    let mut gap = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.extend(c.to_lowercase());
        } else {
            gap = true;
        }
    }
    slug
}

/// Drop a trailing `(...)` group: `"Setup (optional)"` → `"Setup "`.
fn strip_parenthetical(text: &str) -> &str {
    let trimmed = text.trim_end();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.rfind('(') {
            return &text[..open];
        }
    }
    text
}

/// Split raw file text into an optional front matter block and the body.
///
/// The opening fence must be the first line of the file. Returns the text
/// between the fences without parsing it.
fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let Some(rest) = raw.strip_prefix("---\n").or_else(|| raw.strip_prefix("---\r\n")) else {
        return (None, raw);
    };
    // The closing fence may be the very next line (empty block) or any
    // later line.
    let (block, after) = if let Some(after) = rest.strip_prefix("---") {
        ("", after)
    } else if let Some(end) = rest.find("\n---") {
        (&rest[..end], &rest[end + "\n---".len()..])
    } else {
        return (None, raw);
    };
    // The closing fence must be a full line: either end-of-file or a line
    // break follows.
    let body = match after.strip_prefix('\n').or_else(|| after.strip_prefix("\r\n")) {
        Some(body) => body,
        None if after.is_empty() => "",
        None => return (None, raw),
    };
    (Some(block), body)
}

/// Render the Markdown body to HTML, assigning slug ids to headings.
///
/// Returns the HTML and the text of the first heading, used as the title
/// fallback when front matter does not set one.
fn render_body(body: &str) -> (String, Option<String>) {
    let mut events: Vec<Event> = Parser::new(body).collect();
    let mut counter = SlugCounter::new();
    let mut first_heading: Option<String> = None;

    let mut i = 0;
    while i < events.len() {
        if matches!(events[i], Event::Start(Tag::Heading { .. })) {
            // Gather the heading's visible text up to the matching end tag.
            let mut text = String::new();
            let mut j = i + 1;
            while j < events.len() {
                match &events[j] {
                    Event::End(TagEnd::Heading(_)) => break,
                    Event::Text(t) | Event::Code(t) => text.push_str(t),
                    _ => {}
                }
                j += 1;
            }
            let slug = counter.assign(&text);
            if first_heading.is_none() {
                first_heading = Some(text);
            }
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(slug));
            }
            i = j;
        }
        i += 1;
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    (out, first_heading)
}

/// Output path for a source path: trailing `.md` becomes `.html`.
pub fn url_for(path: &str) -> String {
    match path.strip_suffix(".md") {
        Some(stem) => format!("{stem}.html"),
        None => path.to_string(),
    }
}

/// Relative prefix reaching the site root from `path`'s directory:
/// one `../` per separator.
pub fn root_prefix_for(path: &str) -> String {
    "../".repeat(path.matches('/').count())
}

/// Extract one [`Page`] from the raw text of a Markdown file.
pub fn extract(rel_path: &str, raw: &str) -> Result<Page, ExtractError> {
    let (front, body) = split_front_matter(raw);
    let metadata: Metadata = match front {
        Some(text) => serde_yaml::from_str::<Option<Metadata>>(text)
            .map_err(|source| ExtractError::FrontMatter {
                path: rel_path.to_string(),
                source,
            })?
            .unwrap_or_default(),
        None => Metadata::new(),
    };

    let (content, first_heading) = render_body(body);

    let title = metadata
        .get("title")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or(first_heading)
        .unwrap_or_else(|| stem_of(rel_path).to_string());

    let layout = metadata
        .get("layout")
        .and_then(|v| v.as_str())
        .unwrap_or("default")
        .to_string();

    Ok(Page::new(
        rel_path.to_string(),
        metadata,
        title,
        layout,
        content,
        url_for(rel_path),
        root_prefix_for(rel_path),
    ))
}

/// Filename without directory or `.md` extension.
fn stem_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(".md").unwrap_or(name)
}
