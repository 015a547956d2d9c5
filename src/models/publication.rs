//! Publication record model, as returned by the literature API.

use serde::{Deserialize, Serialize};

/// One retrieved publication.
///
/// Values are taken verbatim from the API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Literature record identifier (control number)
    pub id: String,

    /// Titles, primary title first
    pub titles: Vec<String>,

    /// Author full names in API order
    pub authors: Vec<String>,

    /// Record creation timestamp (ISO-8601)
    pub created: String,
}

impl PublicationRecord {
    /// Primary title, if the record has one
    pub fn primary_title(&self) -> Option<&str> {
        self.titles.first().map(String::as_str)
    }
}

/// Builder for PublicationRecord
#[derive(Debug, Default)]
pub struct PublicationBuilder {
    record: PublicationRecord,
}

impl PublicationBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            record: PublicationRecord {
                id: id.into(),
                ..Default::default()
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.titles.push(title.into());
        self
    }

    pub fn authors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.authors.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn created(mut self, created: impl Into<String>) -> Self {
        self.record.created = created.into();
        self
    }

    pub fn build(self) -> PublicationRecord {
        self.record
    }
}
