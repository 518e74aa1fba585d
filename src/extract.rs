//! Block extraction from rendered HTML.
//!
//! The diff engine compares documents as ordered sequences of plain-text
//! blocks, one per structural element (`p`, `h1`-`h6`, `li`, `div`,
//! `blockquote`). This module turns a rendered HTML body into that sequence.
//!
//! Matching is a left-to-right scan: find an opening tag, then the first
//! `</tag>` of the same name after it (case-insensitive). A match is never
//! re-scanned, so a `<p>` nested inside a matched `<div>` does not become its
//! own block. An opening tag that is never closed is skipped and the scan
//! resumes right after its `<`.
//!
//! Extraction never fails and runs in time linear in the input: malformed
//! markup just yields fewer blocks.

use std::sync::LazyLock;

use compact_str::CompactString;
use regex::Regex;
use rustc_hash::FxHashSet;

/// One unit of comparison: the plain text of a structural element.
pub type TextBlock = CompactString;

static OPEN_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)<(p|h[1-6]|li|div|blockquote)\b[^>]*>"));

static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)<(h[1-6])\b[^>]*>(.*?)</h[1-6]>"));

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"<[^>]+>"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static extraction pattern must compile")
}

/// Extract the ordered text blocks of a rendered document.
///
/// Elements with no text still produce a block (an empty string), so block
/// indices line up with the element order the viewer highlights.
///
/// ```
/// use docsync::extract::extract_blocks;
///
/// let blocks = extract_blocks("<p>Hello</p><p>World</p>");
/// assert_eq!(blocks, ["Hello", "World"]);
/// ```
pub fn extract_blocks(html: &str) -> Vec<TextBlock> {
    // ASCII lowering keeps byte offsets, so positions carry over to `html`.
    let lowered = html.to_ascii_lowercase();
    // Tags with no closer past some earlier position have none further on.
    let mut unclosed: FxHashSet<String> = FxHashSet::default();
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(open) = OPEN_TAG_PATTERN.captures_at(&lowered, pos) {
        let (Some(whole), Some(name)) = (open.get(0), open.get(1)) else {
            break;
        };
        let name = name.as_str();
        let close = if unclosed.contains(name) {
            None
        } else {
            let closer = format!("</{name}>");
            let found = lowered[whole.end()..]
                .find(&closer)
                .map(|at| (whole.end() + at, closer.len()));
            if found.is_none() {
                unclosed.insert(name.to_owned());
            }
            found
        };
        match close {
            Some((start, len)) => {
                blocks.push(strip_tags(&html[whole.end()..start]));
                pos = start + len;
            }
            None => pos = whole.start() + 1,
        }
    }
    if !unclosed.is_empty() {
        tracing::trace!(
            found = blocks.len(),
            unclosed = unclosed.len(),
            "docsync.extract.unclosed"
        );
    }
    blocks
}

/// Remove inner markup and surrounding whitespace.
fn strip_tags(content: &str) -> TextBlock {
    let mut text = String::with_capacity(content.len());
    let mut last = 0;
    for tag in TAG_PATTERN.find_iter(content) {
        text.push_str(&content[last..tag.start()]);
        last = tag.end();
    }
    text.push_str(&content[last..]);
    TextBlock::from(text.trim())
}

// =============================================================================
// Outline
// =============================================================================

/// Maximum length of the slug part of a heading anchor.
const MAX_SLUG_LEN: usize = 50;

/// One heading of the document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    /// Heading level, 1 through 6
    pub level: u8,
    /// Plain heading text
    pub text: TextBlock,
    /// Anchor id: slug of the text plus the heading's index
    pub id: String,
}

/// Extract the heading outline of a rendered document.
///
/// Every heading advances the index used in anchor ids, but headings without
/// text are left out of the outline. Heading content must sit on one line.
pub fn extract_outline(html: &str) -> Vec<OutlineItem> {
    let mut outline = Vec::new();
    let mut index = 0usize;
    for captures in HEADING_PATTERN.captures_iter(html) {
        let level = captures
            .get(1)
            .and_then(|m| m.as_str()[1..].parse::<u8>().ok())
            .unwrap_or(1);
        let text = strip_tags(captures.get(2).map_or("", |m| m.as_str()));
        let id = anchor_id(&text, index);
        index += 1;
        if !text.is_empty() {
            outline.push(OutlineItem { level, text, id });
        }
    }
    outline
}

fn anchor_id(text: &str, index: usize) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            slug.push(c);
            in_space = false;
        }
    }
    let slug: String = slug.chars().take(MAX_SLUG_LEN).collect();
    format!("{slug}-{index}")
}
