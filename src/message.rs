//! Messages exchanged with views.
//!
//! Both directions are closed sets of variants tagged by a `command` field,
//! matching what the viewer page posts and listens for:
//!
//! ```text
//! view -> core   {"command":"scroll","scrollPercent":0.42}
//! core -> view   {"command":"syncScroll","scrollPercent":0.42}
//! core -> view   {"command":"highlight","diffs":{"removed":[1],"added":[]}}
//! ```
//!
//! Inbound payloads are decoded once at the boundary; everything past that
//! point matches on [`ViewEvent`] variants.

use serde::{Deserialize, Serialize};

use crate::algo::DiffResult;
use crate::error::SyncResult;

// =============================================================================
// ScrollFraction
// =============================================================================

/// Relative scroll position in `[0, 1]`.
///
/// Out-of-range values are clamped; NaN, infinities and `null` become 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "f64")]
pub struct ScrollFraction(f64);

impl ScrollFraction {
    /// Top of the document.
    pub const TOP: Self = Self(0.0);

    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self::TOP
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for ScrollFraction {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for ScrollFraction {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::TOP, Self::new)
    }
}

impl From<ScrollFraction> for f64 {
    fn from(fraction: ScrollFraction) -> Self {
        fraction.0
    }
}

// =============================================================================
// Outbound
// =============================================================================

/// Block indices a single view should mark.
///
/// Applying a set replaces any previous highlight in the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSet {
    pub removed: Vec<usize>,
    pub added: Vec<usize>,
}

impl HighlightSet {
    /// Split a diff into the left view's set (removals only) and the right
    /// view's set (additions only).
    pub fn split(result: DiffResult) -> (Self, Self) {
        let left = Self {
            removed: result.removed,
            added: Vec::new(),
        };
        let right = Self {
            removed: Vec::new(),
            added: result.added,
        };
        (left, right)
    }
}

/// Instruction sent from the core to a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ViewMessage {
    /// Scroll to the given fraction of the document
    SyncScroll {
        #[serde(rename = "scrollPercent")]
        fraction: ScrollFraction,
    },
    /// Replace diff highlighting
    Highlight { diffs: HighlightSet },
}

impl ViewMessage {
    pub fn sync_scroll(fraction: ScrollFraction) -> Self {
        Self::SyncScroll { fraction }
    }

    pub fn highlight(diffs: HighlightSet) -> Self {
        Self::Highlight { diffs }
    }

    /// Encode for posting to a view.
    pub fn encode(&self) -> SyncResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_value(&self) -> SyncResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// =============================================================================
// Inbound
// =============================================================================

/// Event posted by a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ViewEvent {
    /// The user scrolled the view
    Scroll {
        #[serde(rename = "scrollPercent", default)]
        fraction: ScrollFraction,
    },
    /// The page hit an error it wants an operator to see
    Error {
        #[serde(default)]
        message: Option<String>,
    },
    /// Informational notice from the page
    Info {
        #[serde(default)]
        message: Option<String>,
    },
}

impl ViewEvent {
    /// Decode a raw JSON payload.
    ///
    /// Unknown commands and malformed payloads are `SyncError::Decode`.
    pub fn decode(raw: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Decode an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> SyncResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::SyncError;

    #[test]
    fn test_fraction_clamps() {
        assert_eq!(ScrollFraction::new(0.25).get(), 0.25);
        assert_eq!(ScrollFraction::new(-1.0).get(), 0.0);
        assert_eq!(ScrollFraction::new(3.5).get(), 1.0);
        assert_eq!(ScrollFraction::new(f64::NAN).get(), 0.0);
        assert_eq!(ScrollFraction::new(f64::INFINITY).get(), 0.0);
    }

    #[test]
    fn test_encode_sync_scroll() {
        let msg = ViewMessage::sync_scroll(ScrollFraction::new(0.5));
        assert_eq!(
            msg.to_value().unwrap(),
            json!({"command": "syncScroll", "scrollPercent": 0.5})
        );
    }

    #[test]
    fn test_encode_highlight() {
        let msg = ViewMessage::highlight(HighlightSet {
            removed: vec![],
            added: vec![2],
        });
        assert_eq!(
            msg.to_value().unwrap(),
            json!({"command": "highlight", "diffs": {"removed": [], "added": [2]}})
        );
        let text = msg.encode().unwrap();
        assert!(text.starts_with(r#"{"command":"highlight""#));
    }

    #[test]
    fn test_split_keeps_each_side() {
        let (left, right) = HighlightSet::split(DiffResult {
            removed: vec![0, 3],
            added: vec![1],
        });
        assert_eq!(left, HighlightSet { removed: vec![0, 3], added: vec![] });
        assert_eq!(right, HighlightSet { removed: vec![], added: vec![1] });
    }

    #[test]
    fn test_decode_scroll() {
        let event = ViewEvent::decode(r#"{"command":"scroll","scrollPercent":0.75}"#).unwrap();
        assert_eq!(event, ViewEvent::Scroll { fraction: ScrollFraction::new(0.75) });
    }

    #[test]
    fn test_decode_scroll_defaults() {
        let missing = ViewEvent::decode(r#"{"command":"scroll"}"#).unwrap();
        assert_eq!(missing, ViewEvent::Scroll { fraction: ScrollFraction::TOP });

        let null = ViewEvent::from_value(json!({"command": "scroll", "scrollPercent": null})).unwrap();
        assert_eq!(null, ViewEvent::Scroll { fraction: ScrollFraction::TOP });

        let over = ViewEvent::from_value(json!({"command": "scroll", "scrollPercent": 1.7})).unwrap();
        assert_eq!(over, ViewEvent::Scroll { fraction: ScrollFraction::new(1.0) });
    }

    #[test]
    fn test_decode_error_and_info() {
        let event = ViewEvent::decode(r#"{"command":"error","message":"boom"}"#).unwrap();
        assert_eq!(event, ViewEvent::Error { message: Some("boom".into()) });

        let event = ViewEvent::decode(r#"{"command":"info"}"#).unwrap();
        assert_eq!(event, ViewEvent::Info { message: None });
    }

    #[test]
    fn test_decode_rejects_unknown() {
        let err = ViewEvent::decode(r#"{"command":"zoomChanged","zoom":1.2}"#).unwrap_err();
        assert!(matches!(err, SyncError::Decode(_)));
        assert!(ViewEvent::decode("not json").is_err());
        assert!(ViewEvent::decode(r#"{"scrollPercent":0.1}"#).is_err());
    }
}
