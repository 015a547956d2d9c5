//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{LiteratureQuery, PublicationBuilder, PublicationRecord};
use crate::sources::{LiteratureSource, SourceError};

#[derive(Debug)]
enum MockResponse {
    Records(Vec<PublicationRecord>),
    NetworkFailure(String),
}

/// A mock source for testing that returns predefined responses.
#[derive(Debug, Default)]
pub struct MockSource {
    response: Mutex<Option<MockResponse>>,
    queries: Mutex<Vec<LiteratureQuery>>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source that returns `records`.
    pub fn with_records(records: Vec<PublicationRecord>) -> Self {
        let source = Self::new();
        source.set_records(records);
        source
    }

    /// Set the records to return.
    pub fn set_records(&self, records: Vec<PublicationRecord>) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(MockResponse::Records(records));
    }

    /// Make every fetch fail with a network error.
    pub fn set_network_failure(&self, message: impl Into<String>) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(MockResponse::NetworkFailure(message.into()));
    }

    /// Clear the configured response.
    pub fn clear_response(&self) {
        let mut guard = self.response.lock().unwrap();
        *guard = None;
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<LiteratureQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LiteratureSource for MockSource {
    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn fetch(&self, query: &LiteratureQuery) -> Result<Vec<PublicationRecord>, SourceError> {
        self.queries.lock().unwrap().push(query.clone());

        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(MockResponse::Records(records)) => Ok(records.clone()),
            Some(MockResponse::NetworkFailure(message)) => {
                Err(SourceError::Network(message.clone()))
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Helper function to create a mock record for testing.
pub fn make_record(id: &str, title: &str, authors: &[&str]) -> PublicationRecord {
    PublicationBuilder::new(id)
        .title(title)
        .authors(authors.iter().copied())
        .created("2024-01-01T00:00:00+00:00")
        .build()
}
