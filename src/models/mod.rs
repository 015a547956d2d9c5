//! Core data models for literature queries, publications and feeds.

mod feed;
mod publication;
mod query;

pub use feed::{Feed, FeedItem, FieldStyle, DEFAULT_CHANNEL_TITLE};
pub use publication::{PublicationBuilder, PublicationRecord};
pub use query::{author_disjunction, LiteratureQuery, SortOrder, DEFAULT_FIELDS};
