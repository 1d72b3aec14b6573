//! Feed ingestion: loading source bytes and adapting the parser's model.
//!
//! The actual RSS/Atom/RDF parsing is delegated to feed-rs; this module
//! fetches the bytes ([`fetcher`]) and maps the parsed result onto the
//! serializer's input model ([`convert`]).

pub mod convert;
pub mod fetcher;

pub use convert::to_document;
pub use fetcher::{load_source, FetchError};
