//! Adapter from the feed parser's model to the serializer's input model.
//!
//! feed-rs normalizes RSS/Atom/RDF into one object model; this module maps
//! that model onto [`FeedDocument`]. The mapping is lossy where feed-rs has
//! no counterpart for an Atom 0.3 construct: there is no `created` source
//! (`published` maps to `issued`, `updated` to `modified`), no extended
//! `info` block, and no per-element `xml:base`. Those fields stay `None`
//! and the serializer suppresses them.

use feed_rs::model as parsed;

use crate::atom::model::{
    ContentDetail, Entry, FeedDocument, FeedMeta, GeneratorDetail, LinkDetail, PersonDetail,
};

/// Converts a parsed feed into the serializer's document model.
///
/// Order is preserved for links, contributors, and entries. Empty strings
/// (which feed-rs uses for "not present" in a few spots) become `None` so
/// the serializer never writes an empty element or attribute for them.
pub fn to_document(feed: parsed::Feed) -> FeedDocument {
    let language = feed.language;
    FeedDocument {
        feed: FeedMeta {
            title_detail: feed.title.map(|t| text_detail(t, language.as_deref())),
            links: feed.links.into_iter().map(link_detail).collect(),
            tagline_detail: feed.description.map(|t| text_detail(t, None)),
            copyright_detail: feed.rights.map(|t| text_detail(t, None)),
            generator_detail: feed.generator.map(generator_detail),
            // feed-rs has no counterpart for the Atom 0.3 info block.
            info_detail: None,
            modified: feed.updated,
            id: non_empty(feed.id),
            author_detail: feed.authors.into_iter().next().map(person_detail),
            contributors: feed.contributors.into_iter().map(person_detail).collect(),
        },
        entries: feed.entries.into_iter().map(entry).collect(),
    }
}

fn entry(entry: parsed::Entry) -> Entry {
    Entry {
        title_detail: entry.title.map(|t| text_detail(t, None)),
        links: entry.links.into_iter().map(link_detail).collect(),
        summary_detail: entry.summary.map(|t| text_detail(t, None)),
        content: entry.content.map(content_detail).into_iter().collect(),
        issued: entry.published,
        // No created source in the parser model.
        created: None,
        modified: entry.updated,
        id: non_empty(entry.id),
        author_detail: entry.authors.into_iter().next().map(person_detail),
        contributors: entry.contributors.into_iter().map(person_detail).collect(),
    }
}

fn text_detail(text: parsed::Text, language: Option<&str>) -> ContentDetail {
    ContentDetail {
        value: non_empty(text.content),
        media_type: Some(text.content_type.essence().to_string()),
        language: language.map(str::to_string),
        base: None,
    }
}

fn content_detail(content: parsed::Content) -> ContentDetail {
    ContentDetail {
        value: content.body.and_then(non_empty),
        media_type: Some(content.content_type.essence().to_string()),
        language: None,
        base: None,
    }
}

fn link_detail(link: parsed::Link) -> LinkDetail {
    LinkDetail {
        rel: link.rel,
        media_type: link.media_type,
        href: non_empty(link.href),
        title: link.title,
    }
}

fn person_detail(person: parsed::Person) -> PersonDetail {
    PersonDetail {
        name: non_empty(person.name),
        url: person.uri,
        email: person.email,
    }
}

fn generator_detail(generator: parsed::Generator) -> GeneratorDetail {
    GeneratorDetail {
        name: non_empty(generator.content),
        url: generator.uri,
        version: generator.version,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
