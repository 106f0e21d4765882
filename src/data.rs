use serde::{Deserialize, Serialize};

pub use crate::types::{DedupKey, Link, SourceId};

/// Normalized feed entry produced by the record normalizer.
///
/// `title` is never empty and `link` always starts with `http://` or
/// `https://`; the normalizer rejects records it cannot bring into this shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalItem {
    /// Display title, or the `No title` sentinel.
    pub title: String,
    /// Identity-bearing absolute link (trimmed).
    pub link: Link,
    /// Best-effort publication timestamp, kept as display text.
    #[serde(default)]
    pub published: String,
    /// Raw summary text, possibly carrying markup.
    #[serde(default)]
    pub summary: String,
    /// Display name of the originating source.
    pub source: SourceId,
}

/// Trimmed projection handed to the delivery collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputItem {
    /// Display title carried over from the canonical item.
    pub title: String,
    /// Link exactly as the first occurrence carried it.
    pub link: Link,
    /// Markup-stripped summary bounded by the run's summary length.
    pub summary: String,
}
