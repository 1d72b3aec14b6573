//! Atom 0.3 XML serialization.
//!
//! Pure bottom-up tree building: leaf builders (plain text, date, content,
//! link, generator, person) feed the entry assembler, which feeds the feed
//! assembler at the document root. Every builder is a no-op when its data is
//! absent, and an absent sub-field skips just that attribute or child — an
//! empty string is never written in place of a missing value.
//!
//! The document is realized fully in memory, then transcoded to the caller's
//! encoding and written through the sink in one pass. Feed sizes are small,
//! so there is no streaming path.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::atom::model::{
    ContentDetail, Entry, FeedDocument, GeneratorDetail, LinkDetail, PersonDetail,
};

/// Atom 0.3 namespace URI. Fixed by this serializer, not derived from input.
pub const ATOM_NS: &str = "http://purl.org/atom/ns#";

/// Output format version. Fixed by this serializer, not negotiated.
pub const ATOM_VERSION: &str = "0.3";

/// Default output encoding label.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// W3C date-time layout used for every date construct: zero-padded UTC with
/// literal `T` and `Z` separators.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Errors that can occur while producing Atom output.
#[derive(Debug, Error)]
pub enum AtomWriteError {
    /// XML event writing failed.
    #[error("XML write error: {0}")]
    Xml(String),

    /// The requested output encoding label is not recognized.
    #[error("unknown output encoding: {0}")]
    UnknownEncoding(String),

    /// Writing to the output sink failed.
    #[error("failed to write Atom output: {0}")]
    Io(#[from] std::io::Error),
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn emit(w: &mut XmlWriter, event: Event) -> Result<(), AtomWriteError> {
    w.write_event(event)
        .map_err(|e| AtomWriteError::Xml(e.to_string()))
}

/// Writes `<name>value</name>` if `value` is present.
fn write_plain(w: &mut XmlWriter, name: &str, value: Option<&str>) -> Result<(), AtomWriteError> {
    let Some(value) = value else {
        return Ok(());
    };
    emit(w, Event::Start(BytesStart::new(name)))?;
    emit(w, Event::Text(BytesText::new(value)))?;
    emit(w, Event::End(BytesEnd::new(name)))
}

/// Writes a date construct if `value` is present.
fn write_date(
    w: &mut XmlWriter,
    name: &str,
    value: Option<&DateTime<Utc>>,
) -> Result<(), AtomWriteError> {
    let Some(value) = value else {
        return Ok(());
    };
    let stamp = value.format(DATE_FORMAT).to_string();
    write_plain(w, name, Some(&stamp))
}

/// Writes a content construct (`title`, `tagline`, `summary`, `content`, ...)
/// if `data` is present.
///
/// `mode="escaped"` is set unconditionally; `type`, `xml:lang`, and
/// `xml:base` only when the corresponding detail field is present.
fn write_content(
    w: &mut XmlWriter,
    name: &str,
    data: Option<&ContentDetail>,
) -> Result<(), AtomWriteError> {
    let Some(data) = data else {
        return Ok(());
    };
    let mut element = BytesStart::new(name);
    element.push_attribute(("mode", "escaped"));
    if let Some(media_type) = &data.media_type {
        element.push_attribute(("type", media_type.as_str()));
    }
    if let Some(language) = &data.language {
        element.push_attribute(("xml:lang", language.as_str()));
    }
    if let Some(base) = &data.base {
        element.push_attribute(("xml:base", base.as_str()));
    }
    match &data.value {
        Some(value) => {
            emit(w, Event::Start(element))?;
            emit(w, Event::Text(BytesText::new(value)))?;
            emit(w, Event::End(BytesEnd::new(name)))
        }
        None => emit(w, Event::Empty(element)),
    }
}

/// Writes a self-closing link element if `data` is present. Links carry no
/// text content; each of `rel`, `type`, `href`, `title` is set only when
/// present.
fn write_link(
    w: &mut XmlWriter,
    name: &str,
    data: Option<&LinkDetail>,
) -> Result<(), AtomWriteError> {
    let Some(data) = data else {
        return Ok(());
    };
    let mut element = BytesStart::new(name);
    if let Some(rel) = &data.rel {
        element.push_attribute(("rel", rel.as_str()));
    }
    if let Some(media_type) = &data.media_type {
        element.push_attribute(("type", media_type.as_str()));
    }
    if let Some(href) = &data.href {
        element.push_attribute(("href", href.as_str()));
    }
    if let Some(title) = &data.title {
        element.push_attribute(("title", title.as_str()));
    }
    emit(w, Event::Empty(element))
}

/// Writes a generator element if `data` is present: the name as element
/// text, `url` and `version` as conditional attributes.
fn write_generator(
    w: &mut XmlWriter,
    name: &str,
    data: Option<&GeneratorDetail>,
) -> Result<(), AtomWriteError> {
    let Some(data) = data else {
        return Ok(());
    };
    let mut element = BytesStart::new(name);
    if let Some(url) = &data.url {
        element.push_attribute(("url", url.as_str()));
    }
    if let Some(version) = &data.version {
        element.push_attribute(("version", version.as_str()));
    }
    match &data.name {
        Some(generator_name) => {
            emit(w, Event::Start(element))?;
            emit(w, Event::Text(BytesText::new(generator_name)))?;
            emit(w, Event::End(BytesEnd::new(name)))
        }
        None => emit(w, Event::Empty(element)),
    }
}

/// Writes a person construct (`author`, `contributor`) if `data` is present,
/// with `name`/`url`/`email` children for whichever fields are set.
fn write_person(
    w: &mut XmlWriter,
    name: &str,
    data: Option<&PersonDetail>,
) -> Result<(), AtomWriteError> {
    let Some(data) = data else {
        return Ok(());
    };
    if data.name.is_none() && data.url.is_none() && data.email.is_none() {
        return emit(w, Event::Empty(BytesStart::new(name)));
    }
    emit(w, Event::Start(BytesStart::new(name)))?;
    write_plain(w, "name", data.name.as_deref())?;
    write_plain(w, "url", data.url.as_deref())?;
    write_plain(w, "email", data.email.as_deref())?;
    emit(w, Event::End(BytesEnd::new(name)))
}

/// Writes one `entry` element. Child order is fixed and other systems diff
/// against it: title, link*, summary, content*, issued, created, modified,
/// id, author, contributor*.
fn write_entry(w: &mut XmlWriter, entry: &Entry) -> Result<(), AtomWriteError> {
    emit(w, Event::Start(BytesStart::new("entry")))?;

    write_content(w, "title", entry.title_detail.as_ref())?;
    for link in &entry.links {
        write_link(w, "link", Some(link))?;
    }
    write_content(w, "summary", entry.summary_detail.as_ref())?;
    // Atom 0.3 nominally allows one content element, but multipart content
    // confuses downstream parsers, so whatever the source parser handed over
    // is written as-is, one element per block.
    for content in &entry.content {
        write_content(w, "content", Some(content))?;
    }
    write_date(w, "issued", entry.issued.as_ref())?;
    write_date(w, "created", entry.created.as_ref())?;
    write_date(w, "modified", entry.modified.as_ref())?;
    write_plain(w, "id", entry.id.as_deref())?;
    write_person(w, "author", entry.author_detail.as_ref())?;
    for contributor in &entry.contributors {
        write_person(w, "contributor", Some(contributor))?;
    }
    // Not represented in Atom 0.3 output: enclosures, publisher, category,
    // categories, source, comments, license.

    emit(w, Event::End(BytesEnd::new("entry")))
}

/// Writes the `feed` document root and everything beneath it.
fn write_feed(w: &mut XmlWriter, document: &FeedDocument) -> Result<(), AtomWriteError> {
    let mut root = BytesStart::new("feed");
    root.push_attribute(("xmlns", ATOM_NS));
    root.push_attribute(("version", ATOM_VERSION));
    emit(w, Event::Start(root))?;

    let meta = &document.feed;
    write_content(w, "title", meta.title_detail.as_ref())?;
    for link in &meta.links {
        write_link(w, "link", Some(link))?;
    }
    write_content(w, "tagline", meta.tagline_detail.as_ref())?;
    write_content(w, "copyright", meta.copyright_detail.as_ref())?;
    write_generator(w, "generator", meta.generator_detail.as_ref())?;
    write_content(w, "info", meta.info_detail.as_ref())?;
    write_date(w, "modified", meta.modified.as_ref())?;
    write_plain(w, "id", meta.id.as_deref())?;
    write_person(w, "author", meta.author_detail.as_ref())?;
    for contributor in &meta.contributors {
        write_person(w, "contributor", Some(contributor))?;
    }
    // Not represented in Atom 0.3 output: image, textinput, cloud,
    // published, category, categories, docs, ttl, language, license,
    // errorreportsto.

    if document.entries.is_empty() {
        emit(w, Event::Empty(BytesStart::new("entries")))?;
    } else {
        emit(w, Event::Start(BytesStart::new("entries")))?;
        for entry in &document.entries {
            write_entry(w, entry)?;
        }
        emit(w, Event::End(BytesEnd::new("entries")))?;
    }

    emit(w, Event::End(BytesEnd::new("feed")))
}

/// Serializes a parsed-feed document to Atom 0.3 XML bytes.
///
/// The tree is built once, indented two spaces per level with
/// newline-terminated lines, then transcoded to `encoding`.
///
/// # Arguments
///
/// * `document` - The parsed-feed document to serialize
/// * `encoding` - Output encoding label, resolved per the WHATWG Encoding
///   Standard (so e.g. `ISO-8859-1` resolves to windows-1252). The XML
///   declaration names the resolved encoding. Use [`DEFAULT_ENCODING`] for
///   UTF-8.
///
/// # Errors
///
/// Returns [`AtomWriteError::UnknownEncoding`] for an unrecognized label, or
/// [`AtomWriteError::Xml`] if event writing fails.
pub fn to_xml(document: &FeedDocument, encoding: &str) -> Result<Vec<u8>, AtomWriteError> {
    let target = Encoding::for_label(encoding.as_bytes())
        .ok_or_else(|| AtomWriteError::UnknownEncoding(encoding.to_string()))?;

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some(target.name()), None)),
    )?;
    write_feed(&mut writer, document)?;

    let xml = writer.into_inner().into_inner();
    // The writer only ever receives valid UTF-8.
    let mut text = String::from_utf8(xml).map_err(|e| AtomWriteError::Xml(e.to_string()))?;
    text.push('\n');
    let (bytes, _, _) = target.encode(&text);
    Ok(bytes.into_owned())
}

/// Serializes a parsed-feed document and writes it through `sink`.
///
/// The document is fully serialized before the first byte reaches the sink;
/// an I/O failure propagates immediately with no partial-write recovery --
/// the caller owns the sink lifecycle.
///
/// # Errors
///
/// Everything [`to_xml`] returns, plus [`AtomWriteError::Io`] for sink
/// failures.
pub fn write_atom<W: Write>(
    document: &FeedDocument,
    sink: &mut W,
    encoding: &str,
) -> Result<(), AtomWriteError> {
    let bytes = to_xml(document, encoding)?;
    sink.write_all(&bytes)?;
    Ok(())
}
