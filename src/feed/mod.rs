//! Feed rendering: publication records to RSS items to an XML document.
//!
//! - [`to_feed_item`]: map one [`PublicationRecord`] to a [`FeedItem`]
//! - [`build_feed`]: map a page of records, honouring the [`MalformedPolicy`]
//! - [`render_feed`]: build and serialize in one step

mod date;
mod rss;

pub use date::{http_date, parse_created, parse_http_date};
pub use rss::{to_xml, DC_NAMESPACE};

use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::models::{Feed, FeedItem, FieldStyle, PublicationRecord, DEFAULT_CHANNEL_TITLE};
use crate::sources::literature_url;

/// Authors listed by name before the summary is cut short
pub const MAX_LISTED_AUTHORS: usize = 3;

/// What to do with a record that cannot be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Abort the whole run
    #[default]
    Fail,
    /// Log the record and leave it out of the feed
    Skip,
}

/// Rendering options for one feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: String,
    pub field_style: FieldStyle,
    pub on_malformed: MalformedPolicy,
    /// Used instead of failing when a record has no title
    pub untitled_placeholder: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHANNEL_TITLE.to_string(),
            field_style: FieldStyle::default(),
            on_malformed: MalformedPolicy::default(),
            untitled_placeholder: None,
        }
    }
}

/// A rendered feed and the number of records left out of it
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub feed: Feed,
    pub skipped: usize,
}

/// First three authors, comma-joined, with `, et al.` when more exist.
pub fn author_summary<S: AsRef<str>>(authors: &[S]) -> String {
    let listed = authors
        .iter()
        .take(MAX_LISTED_AUTHORS)
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    if authors.len() > MAX_LISTED_AUTHORS {
        format!("{}, et al.", listed)
    } else {
        listed
    }
}

/// Map a single record to an RSS item.
pub fn to_feed_item(
    record: &PublicationRecord,
    options: &RenderOptions,
) -> Result<FeedItem, FeedError> {
    let title = match (record.primary_title(), &options.untitled_placeholder) {
        (Some(title), _) => title.to_string(),
        (None, Some(placeholder)) => placeholder.clone(),
        (None, None) => {
            return Err(FeedError::Parse(format!(
                "Record {} has an empty title list",
                record.id
            )))
        }
    };

    let created = parse_created(&record.created)
        .map_err(|e| FeedError::Parse(format!("Record {}: {}", record.id, e)))?;

    Ok(FeedItem {
        title,
        link: literature_url(&record.id),
        author_summary: author_summary(&record.authors),
        pub_date: http_date(&created),
    })
}

/// Map a page of records into a feed, preserving their order.
pub fn build_feed(
    records: &[PublicationRecord],
    options: &RenderOptions,
) -> Result<RenderOutcome, FeedError> {
    let mut feed = Feed::new(options.field_style).title(options.title.clone());
    let mut skipped = 0;

    for record in records {
        match to_feed_item(record, options) {
            Ok(item) => feed.items.push(item),
            Err(e) if options.on_malformed == MalformedPolicy::Skip => {
                tracing::warn!(id = %record.id, error = %e, "Skipping malformed record");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(RenderOutcome { feed, skipped })
}

/// Build the feed and serialize it to RSS 2.0 XML.
pub fn render_feed(
    records: &[PublicationRecord],
    options: &RenderOptions,
) -> Result<String, FeedError> {
    let outcome = build_feed(records, options)?;
    to_xml(&outcome.feed)
}
