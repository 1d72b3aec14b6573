//! Input data model: the parsed-feed document handed to the serializer.
//!
//! This mirrors the common object model a generic feed parser produces for
//! RSS/Atom/RDF input: a `feed` metadata block plus an ordered list of
//! entries, where every field beyond those two is optional. "Detail" structs
//! carry the richer variant of a field (value plus type/language/base) and
//! are always preferred over any plain-text sibling the parser may emit.
//!
//! All structs deserialize from a loose JSON dump of a parser result, so a
//! document can also be ingested without going through [`crate::feed`]. Only
//! the two top-level keys are required; everything else falls back to
//! `Default` when missing.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// The input was not shaped like a parsed-feed document.
///
/// Raised when the top-level `feed` or `entries` key is missing or of the
/// wrong type. Absence of any other field is never an error — a sparser
/// input just produces a sparser document.
#[derive(Debug, Error)]
#[error("input is not a parsed-feed document: {0}")]
pub struct ShapeError(#[from] serde_json::Error);

/// A complete parsed-feed document: feed metadata plus ordered entries.
///
/// Both fields are required on deserialization; see [`ShapeError`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedDocument {
    /// Feed-level metadata.
    pub feed: FeedMeta,
    /// Entries in the order the parser produced them. The serializer
    /// preserves this order.
    pub entries: Vec<Entry>,
}

impl FeedDocument {
    /// Parses a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if `feed` or `entries` is missing or mistyped,
    /// or if the input is not valid JSON at all.
    pub fn from_json(json: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a document from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ShapeError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Feed-level metadata. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedMeta {
    /// Feed title with its type/language metadata.
    pub title_detail: Option<ContentDetail>,
    /// Alternate and related links, in source order.
    pub links: Vec<LinkDetail>,
    /// Short description of the feed (Atom 0.3 `tagline`).
    pub tagline_detail: Option<ContentDetail>,
    /// Rights statement (Atom 0.3 `copyright`).
    pub copyright_detail: Option<ContentDetail>,
    /// The software that produced the source feed.
    pub generator_detail: Option<GeneratorDetail>,
    /// Extended feed description (Atom 0.3 `info`).
    pub info_detail: Option<ContentDetail>,
    /// Last modification time of the feed, UTC.
    #[serde(alias = "modified_parsed")]
    pub modified: Option<DateTime<Utc>>,
    /// Globally unique feed identifier.
    pub id: Option<String>,
    /// Primary author of the feed.
    pub author_detail: Option<PersonDetail>,
    /// Additional contributors, in source order.
    pub contributors: Vec<PersonDetail>,
}

/// One entry (article, post) of the feed. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Entry {
    /// Entry title with its type/language metadata.
    pub title_detail: Option<ContentDetail>,
    /// Entry links, in source order.
    pub links: Vec<LinkDetail>,
    /// Entry summary.
    pub summary_detail: Option<ContentDetail>,
    /// Full content blocks. Parsers normally supply at most one, but the
    /// serializer writes however many are present, in order.
    pub content: Vec<ContentDetail>,
    /// Original publication time (Atom 0.3 `issued`), UTC.
    #[serde(alias = "issued_parsed")]
    pub issued: Option<DateTime<Utc>>,
    /// Creation time (Atom 0.3 `created`), UTC.
    #[serde(alias = "created_parsed")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification time, UTC.
    #[serde(alias = "modified_parsed")]
    pub modified: Option<DateTime<Utc>>,
    /// Globally unique entry identifier.
    pub id: Option<String>,
    /// Primary author of the entry.
    pub author_detail: Option<PersonDetail>,
    /// Additional contributors, in source order.
    pub contributors: Vec<PersonDetail>,
}

/// Textual content with its MIME-like type, language, and base URI.
///
/// Backs the `title`, `tagline`, `copyright`, `info`, `summary`, and
/// `content` elements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentDetail {
    /// The text itself.
    pub value: Option<String>,
    /// MIME-like type of the text, e.g. `text/html`.
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    /// Language tag (`xml:lang`).
    pub language: Option<String>,
    /// Base URI for relative references (`xml:base`).
    pub base: Option<String>,
}

/// One `link` element: relation, type, target, and title, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkDetail {
    /// Link relation, e.g. `alternate`.
    pub rel: Option<String>,
    /// MIME type of the target.
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    /// Target URI.
    pub href: Option<String>,
    /// Human-readable link title.
    pub title: Option<String>,
}

/// The software that generated the source feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratorDetail {
    /// Generator name (element text).
    pub name: Option<String>,
    /// Generator home page.
    pub url: Option<String>,
    /// Generator version string.
    pub version: Option<String>,
}

/// A person construct: author or contributor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonDetail {
    /// Person's name.
    pub name: Option<String>,
    /// Person's home page.
    pub url: Option<String>,
    /// Person's email address.
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_document_parses() {
        let doc = FeedDocument::from_json(r#"{"feed": {}, "entries": []}"#).unwrap();
        assert!(doc.feed.title_detail.is_none());
        assert!(doc.entries.is_empty());
    }

    #[test]
    fn test_missing_feed_key_is_shape_error() {
        let err = FeedDocument::from_json(r#"{"entries": []}"#).unwrap_err();
        assert!(err.to_string().contains("feed"), "unexpected error: {}", err);
    }

    #[test]
    fn test_missing_entries_key_is_shape_error() {
        let err = FeedDocument::from_json(r#"{"feed": {}}"#).unwrap_err();
        assert!(
            err.to_string().contains("entries"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_entries_wrong_type_is_shape_error() {
        assert!(FeedDocument::from_json(r#"{"feed": {}, "entries": 5}"#).is_err());
    }

    #[test]
    fn test_detail_fields_deserialize() {
        let doc = FeedDocument::from_json(
            r#"{
                "feed": {
                    "title_detail": {"value": "Example", "type": "text/plain", "language": "en"},
                    "links": [{"rel": "alternate", "href": "https://example.com/"}],
                    "generator_detail": {"name": "gen", "version": "1.0"}
                },
                "entries": [
                    {"id": "urn:1", "issued_parsed": "2004-03-15T12:00:00Z"}
                ]
            }"#,
        )
        .unwrap();

        let title = doc.feed.title_detail.unwrap();
        assert_eq!(title.value.as_deref(), Some("Example"));
        assert_eq!(title.media_type.as_deref(), Some("text/plain"));
        assert_eq!(title.base, None);

        assert_eq!(doc.feed.links.len(), 1);
        assert_eq!(doc.feed.links[0].rel.as_deref(), Some("alternate"));
        assert_eq!(doc.feed.links[0].title, None);

        let generator = doc.feed.generator_detail.unwrap();
        assert_eq!(generator.name.as_deref(), Some("gen"));
        assert_eq!(generator.url, None);

        // Dates accept both the plain and the `_parsed` key spellings.
        assert!(doc.entries[0].issued.is_some());
        assert_eq!(doc.entries[0].id.as_deref(), Some("urn:1"));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        // Unsupported parser fields (enclosures, category, ttl, ...) are
        // silently ignored rather than rejected.
        let doc = FeedDocument::from_json(
            r#"{
                "feed": {"ttl": 60, "cloud": {}, "image": {"href": "x"}},
                "entries": [{"enclosures": [], "comments": "https://example.com/c"}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.entries.len(), 1);
    }
}
