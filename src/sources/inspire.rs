//! INSPIRE-HEP literature source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::models::{LiteratureQuery, PublicationRecord};
use crate::sources::{LiteratureSource, SourceError};
use crate::utils::{HttpClient, DEFAULT_USER_AGENT};

/// Public INSPIRE-HEP host
pub const INSPIRE_BASE_URL: &str = "https://inspirehep.net";

const LITERATURE_ENDPOINT: &str = "api/literature";

/// Canonical page of a literature record
pub fn literature_url(id: &str) -> String {
    format!("{}/literature/{}", INSPIRE_BASE_URL, id)
}

/// INSPIRE-HEP literature source
///
/// Uses the public REST API; one call returns a single page of hits.
#[derive(Debug, Clone)]
pub struct InspireSource {
    client: HttpClient,
    base_url: Url,
}

impl InspireSource {
    /// Create a source for the public INSPIRE host
    pub fn new() -> Result<Self, SourceError> {
        Self::with_client(HttpClient::new()?, INSPIRE_BASE_URL)
    }

    /// Create a source against `base_url` with the given request timeout
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        Self::with_client(HttpClient::with_settings(DEFAULT_USER_AGENT, timeout)?, base_url)
    }

    /// Create a source sharing an existing HTTP client
    ///
    /// `base_url` may carry a path prefix, e.g. `http://proxy.local/inspire`.
    pub fn with_client(client: HttpClient, base_url: &str) -> Result<Self, SourceError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    /// Full request URL with the query string form-encoded
    pub fn search_url(&self, query: &LiteratureQuery) -> Result<Url, SourceError> {
        let mut url = self.base_url.join(LITERATURE_ENDPOINT)?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        Ok(url)
    }
}

#[async_trait]
impl LiteratureSource for InspireSource {
    fn name(&self) -> &str {
        "INSPIRE-HEP"
    }

    async fn fetch(&self, query: &LiteratureQuery) -> Result<Vec<PublicationRecord>, SourceError> {
        let url = self.search_url(query)?;
        tracing::debug!(%url, "Querying INSPIRE literature API");

        let response = self
            .client
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to query INSPIRE: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "INSPIRE API returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response body: {}", e)))?;

        let records = parse_response(&body)?;
        tracing::debug!(count = records.len(), "Parsed literature hits");
        Ok(records)
    }
}

/// Parse a literature search response body into records, keeping hit order.
pub(crate) fn parse_response(body: &str) -> Result<Vec<PublicationRecord>, SourceError> {
    let data: LiteratureResponse = serde_json::from_str(body)?;
    Ok(data.hits.hits.into_iter().map(Hit::into_record).collect())
}

// ===== INSPIRE API Types =====

#[derive(Debug, Deserialize)]
struct LiteratureResponse {
    hits: Hits,
}

#[derive(Debug, Deserialize)]
struct Hits {
    hits: Vec<Hit>,
}

// Everything but the id may be missing or null; the renderer decides what a
// record without a title or timestamp means.
#[derive(Debug, Deserialize)]
struct Hit {
    id: HitId,
    created: Option<String>,
    metadata: Option<HitMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HitId {
    Text(String),
    Number(u64),
}

#[derive(Debug, Default, Deserialize)]
struct HitMetadata {
    titles: Option<Vec<TitleEntry>>,
    authors: Option<Vec<AuthorEntry>>,
}

#[derive(Debug, Deserialize)]
struct TitleEntry {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthorEntry {
    full_name: Option<String>,
}

impl Hit {
    fn into_record(self) -> PublicationRecord {
        let id = match self.id {
            HitId::Text(id) => id,
            HitId::Number(id) => id.to_string(),
        };

        let metadata = self.metadata.unwrap_or_default();

        PublicationRecord {
            id,
            titles: metadata
                .titles
                .unwrap_or_default()
                .into_iter()
                .filter_map(|t| t.title)
                .collect(),
            authors: metadata
                .authors
                .unwrap_or_default()
                .into_iter()
                .filter_map(|a| a.full_name)
                .collect(),
            created: self.created.unwrap_or_default(),
        }
    }
}
