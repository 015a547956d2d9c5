//! Errors that abort a feed run.

use crate::sources::SourceError;

/// Fatal errors of a feed run, one variant per pipeline stage
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Request failure or non-success status from the literature API
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid JSON, missing fields, empty title list or unparseable date
    #[error("Parse error: {0}")]
    Parse(String),

    /// XML serialization failure
    #[error("Render error: {0}")]
    Render(String),

    /// Filesystem failure while writing the feed
    #[error("Write error for {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid feed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        FeedError::Write {
            path: path.display().to_string(),
            source,
        }
    }
}

impl From<SourceError> for FeedError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Network(msg) => FeedError::Network(msg),
            SourceError::Api(msg) => FeedError::Network(msg),
            SourceError::Parse(msg) => FeedError::Parse(msg),
            SourceError::InvalidRequest(msg) => FeedError::Config(msg),
        }
    }
}
