//! Convert parsed syndication feeds into Atom 0.3 XML.
//!
//! The input is the common object model a feed parser produces for RSS,
//! Atom, or RDF sources: feed-level metadata plus an ordered list of
//! entries, where every field is optional. The output is a single Atom 0.3
//! document written to any [`std::io::Write`] sink in a caller-selected
//! encoding. The transform is pure, synchronous, and single-pass: absence
//! of a field suppresses the corresponding element or attribute entirely,
//! and nothing is retained between calls.
//!
//! Documents can be built directly, ingested from a JSON dump of a parser
//! result ([`FeedDocument::from_json`]), or adapted from a feed-rs parse
//! ([`feed::to_document`]).
//!
//! # Examples
//!
//! ```
//! use atomwriter::{write_atom, ContentDetail, Entry, FeedDocument, DEFAULT_ENCODING};
//!
//! let mut document = FeedDocument::default();
//! document.feed.title_detail = Some(ContentDetail {
//!     value: Some("Example".to_string()),
//!     ..Default::default()
//! });
//! document.entries.push(Entry::default());
//!
//! let mut out = Vec::new();
//! write_atom(&document, &mut out, DEFAULT_ENCODING).unwrap();
//! let xml = String::from_utf8(out).unwrap();
//! assert!(xml.contains(r#"<feed xmlns="http://purl.org/atom/ns#" version="0.3">"#));
//! ```

pub mod atom;
pub mod feed;

pub use atom::model::{
    ContentDetail, Entry, FeedDocument, FeedMeta, GeneratorDetail, LinkDetail, PersonDetail,
    ShapeError,
};
pub use atom::writer::{to_xml, write_atom, AtomWriteError, ATOM_NS, ATOM_VERSION, DEFAULT_ENCODING};
