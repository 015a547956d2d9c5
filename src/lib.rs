//! # inspire-feed
//!
//! Turns the most recent INSPIRE-HEP papers of a set of authors into an
//! RSS 2.0 feed file.
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures (LiteratureQuery, PublicationRecord, Feed)
//! - [`sources`]: Literature sources behind the [`LiteratureSource`] trait
//! - [`feed`]: RSS item mapping and XML serialization
//! - [`pipeline`]: Fetch, render and write for configured feeds
//! - [`utils`]: HTTP client and atomic file writes
//! - [`config`]: Configuration management

pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use error::FeedError;
pub use models::{Feed, FeedItem, PublicationRecord};
pub use sources::{InspireSource, LiteratureSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
