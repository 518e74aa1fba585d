//! Identity types for views and documents
//!
//! Three kinds of identity flow through docsync:
//! - **ViewId**: one live rendering surface, handed out by the view host
//! - **DocumentUri**: what a view was opened with (may carry a scheme or a
//!   revision query, e.g. `git:/repo/report.docx?ref=HEAD`)
//! - **DocumentPath**: the normalized key that groups sibling views
//!
//! Two views are siblings when their `DocumentPath`s are equal, even when
//! their URIs point at different revisions of the file.
//!
//! ```
//! use docsync::id::{DocumentPath, DocumentUri};
//!
//! let working = DocumentUri::new("file:///repo/report.docx");
//! let head = DocumentUri::new("git:/repo/report.docx?ref=HEAD");
//! assert_eq!(DocumentPath::from_uri(&working), DocumentPath::from_uri(&head));
//! ```

use std::fmt;
use std::sync::Arc;

// =============================================================================
// ViewId
// =============================================================================

/// Opaque identity of one live rendering surface.
///
/// The core never owns views. It only holds their ids, and learns about
/// closing through the host's close event.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct ViewId(u64);

impl ViewId {
    /// Create a ViewId from the host's raw handle value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 representation
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewId({})", self.0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

// =============================================================================
// DocumentUri
// =============================================================================

/// The URI a view was opened with.
///
/// Kept verbatim; the renderer receives exactly what the host provided.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentUri(Arc<str>);

impl DocumentUri {
    /// Wrap a URI string.
    pub fn new(uri: &str) -> Self {
        Self(Arc::from(uri))
    }

    /// Get the URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URI scheme, if the string has one.
    ///
    /// Single-letter prefixes are treated as drive letters (`C:\docs`), not
    /// schemes.
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = self.0.split_once(':')?;
        let mut chars = scheme.chars();
        let valid = scheme.len() > 1
            && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then_some(scheme)
    }

    /// Path component with scheme, query and fragment stripped.
    ///
    /// A non-empty authority stays in front as `//host/path`, so files on
    /// different hosts never share a path. An empty one (`file:///a`) is
    /// dropped.
    pub fn path(&self) -> &str {
        let rest = match self.scheme() {
            Some(scheme) => &self.0[scheme.len() + 1..],
            None => &self.0,
        };
        let rest = rest.find(['?', '#']).map_or(rest, |end| &rest[..end]);
        match rest.strip_prefix("//") {
            Some(after) if after.starts_with('/') => after,
            _ => rest,
        }
    }

    /// Query component without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        let (_, after) = self.0.split_once('?')?;
        Some(after.split_once('#').map_or(after, |(query, _)| query))
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentUri {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

// =============================================================================
// DocumentPath
// =============================================================================

/// Normalized key identifying "the same logical document".
///
/// Backslashes become `/` and runs of separators collapse to one, so the
/// same file reached through different spellings groups together. A leading
/// `//` (UNC host) is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(Arc<str>);

impl DocumentPath {
    /// Create a normalized path key.
    pub fn new(path: &str) -> Self {
        let mut normalized = String::with_capacity(path.len());
        let unc = path
            .strip_prefix(['/', '\\'])
            .is_some_and(|rest| rest.starts_with(['/', '\\']) && !rest[1..].starts_with(['/', '\\']));
        let rest = if unc {
            normalized.push_str("//");
            &path[2..]
        } else {
            path
        };
        for c in rest.chars() {
            let c = if c == '\\' { '/' } else { c };
            if c == '/' && normalized.ends_with('/') {
                continue;
            }
            normalized.push(c);
        }
        Self(Arc::from(normalized))
    }

    /// Derive the sibling key from a view's URI.
    pub fn from_uri(uri: &DocumentUri) -> Self {
        Self::new(uri.path())
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_id_roundtrip() {
        let id = ViewId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(id.to_string(), "view#42");
        assert_eq!(format!("{:?}", id), "ViewId(42)");
    }

    #[test]
    fn test_uri_scheme() {
        assert_eq!(DocumentUri::new("file:///a/b.docx").scheme(), Some("file"));
        assert_eq!(DocumentUri::new("git:/a/b.docx?ref=HEAD").scheme(), Some("git"));
        assert_eq!(DocumentUri::new("C:\\docs\\a.docx").scheme(), None);
        assert_eq!(DocumentUri::new("/plain/path.odt").scheme(), None);
    }

    #[test]
    fn test_uri_path() {
        assert_eq!(DocumentUri::new("file:///a/b.docx").path(), "/a/b.docx");
        assert_eq!(DocumentUri::new("git:/a/b.docx?ref=HEAD").path(), "/a/b.docx");
        assert_eq!(DocumentUri::new("file://server/share/x.odt").path(), "//server/share/x.odt");
        assert_eq!(DocumentUri::new("file://server").path(), "//server");
        assert_eq!(DocumentUri::new("file:///a/b.docx#top").path(), "/a/b.docx");
        assert_eq!(DocumentUri::new("/plain/path.odt").path(), "/plain/path.odt");
    }

    #[test]
    fn test_uri_query() {
        assert_eq!(DocumentUri::new("git:/a.docx?ref=HEAD").query(), Some("ref=HEAD"));
        assert_eq!(DocumentUri::new("git:/a.docx?ref=HEAD#x").query(), Some("ref=HEAD"));
        assert_eq!(DocumentUri::new("file:///a.docx").query(), None);
    }

    #[test]
    fn test_path_normalization() {
        assert_eq!(DocumentPath::new("C:\\docs\\\\a.docx").as_str(), "C:/docs/a.docx");
        assert_eq!(DocumentPath::new("/a//b///c.odt").as_str(), "/a/b/c.odt");
        assert_eq!(DocumentPath::new("/a/b.odt"), DocumentPath::from("/a/b.odt"));
    }

    #[test]
    fn test_unc_prefix_kept() {
        assert_eq!(DocumentPath::new("//server/share//x.odt").as_str(), "//server/share/x.odt");
        assert_eq!(DocumentPath::new("\\\\server\\share\\x.odt").as_str(), "//server/share/x.odt");
        assert_eq!(DocumentPath::new("///a/b.odt").as_str(), "/a/b.odt");
    }

    #[test]
    fn test_distinct_hosts_distinct_paths() {
        let a = DocumentPath::from_uri(&DocumentUri::new("file://serverA/share/x.docx"));
        let b = DocumentPath::from_uri(&DocumentUri::new("file://serverB/share/x.docx"));
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "//serverA/share/x.docx");
        assert_eq!(
            DocumentPath::from_uri(&DocumentUri::new("file:///share/x.docx")).as_str(),
            "/share/x.docx"
        );
    }

    #[test]
    fn test_revisions_share_path() {
        let working = DocumentUri::new("file:///repo/report.docx");
        let head = DocumentUri::new("git:/repo/report.docx?ref=HEAD");
        assert_ne!(working, head);
        assert_eq!(DocumentPath::from_uri(&working), DocumentPath::from_uri(&head));
    }
}
