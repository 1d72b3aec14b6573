//! Atom 0.3 output: the parsed-feed input model and the XML serializer.
//!
//! [`model`] defines the read-only document the serializer consumes;
//! [`writer`] turns it into Atom 0.3 XML text. The two are deliberately
//! decoupled from feed fetching and parsing, which live in [`crate::feed`].

pub mod model;
pub mod writer;

pub use model::{
    ContentDetail, Entry, FeedDocument, FeedMeta, GeneratorDetail, LinkDetail, PersonDetail,
    ShapeError,
};
pub use writer::{to_xml, write_atom, AtomWriteError, ATOM_NS, ATOM_VERSION, DEFAULT_ENCODING};
