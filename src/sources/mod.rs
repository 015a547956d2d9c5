//! Literature sources with a trait-based fetch interface.
//!
//! The feed pipeline talks to a [`LiteratureSource`], so the network-backed
//! [`InspireSource`] can be swapped for a [`MockSource`] in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use inspire_feed::models::LiteratureQuery;
//! use inspire_feed::sources::{InspireSource, LiteratureSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = InspireSource::new()?;
//! let query = LiteratureQuery::for_authors(&["M.Schmaltz.1"], 10);
//! let records = source.fetch(&query).await?;
//! println!("{} records", records.len());
//! # Ok(())
//! # }
//! ```

mod inspire;
pub mod mock;

pub use inspire::{literature_url, InspireSource, INSPIRE_BASE_URL};
pub use mock::MockSource;

use crate::models::{LiteratureQuery, PublicationRecord};
use async_trait::async_trait;

/// A backend able to run one page of a literature search.
#[async_trait]
pub trait LiteratureSource: Send + Sync + std::fmt::Debug {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fetch a single page of results, in the order the backend returns them
    async fn fetch(&self, query: &LiteratureQuery) -> Result<Vec<PublicationRecord>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (JSON, missing fields)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidRequest(format!("URL: {}", err))
    }
}
