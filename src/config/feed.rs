//! Per-feed configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::FeedError;
use crate::feed::{MalformedPolicy, RenderOptions};
use crate::models::{FieldStyle, LiteratureQuery, SortOrder, DEFAULT_CHANNEL_TITLE};

/// One feed: which authors to query and where the RSS file goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Name used to select the feed from the command line
    pub name: String,

    /// Author identities, e.g. `M.Schmaltz.1`
    pub authors: Vec<String>,

    /// Number of records fetched (single page)
    #[serde(default = "default_size")]
    pub size: usize,

    /// Output file
    pub output: PathBuf,

    /// Element carrying the author summary
    #[serde(default)]
    pub field_style: FieldStyle,

    /// Channel title
    #[serde(default = "default_title")]
    pub title: String,

    /// Sort order of the result page
    #[serde(default)]
    pub sort: SortOrder,

    /// Abort on malformed records, or skip them
    #[serde(default)]
    pub on_malformed: MalformedPolicy,

    /// Title used for records without one, instead of failing
    #[serde(default)]
    pub untitled_placeholder: Option<String>,
}

fn default_size() -> usize {
    100
}

fn default_title() -> String {
    DEFAULT_CHANNEL_TITLE.to_string()
}

impl FeedConfig {
    /// Create a feed with default settings
    pub fn new(name: impl Into<String>, authors: Vec<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            authors,
            size: default_size(),
            output: output.into(),
            field_style: FieldStyle::default(),
            title: default_title(),
            sort: SortOrder::default(),
            on_malformed: MalformedPolicy::default(),
            untitled_placeholder: None,
        }
    }

    /// Default feed: nine author identities written to `ALL_AUTH_feed.xml`
    pub fn builtin() -> Self {
        let authors = [
            "Hong.Wan.Liu.1",
            "dillon.j.brout.1",
            "Emily.C.Cunningham.1",
            "M.Schmaltz.1",
            "S.Mishra.Sharma.1",
            "E.L.Blanton.1",
            "T.G.Brainerd.1",
            "Kirit.S.Karkare.1",
            "Nora.F.Sherman.1",
        ];
        Self::new(
            "all-authors",
            authors.iter().map(|a| a.to_string()).collect(),
            "ALL_AUTH_feed.xml",
        )
    }

    /// Check the feed can produce a meaningful query
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.name.trim().is_empty() {
            return Err(FeedError::Config("feed name must not be empty".to_string()));
        }
        if self.authors.iter().all(|a| a.trim().is_empty()) {
            return Err(FeedError::Config(format!(
                "feed '{}' has no authors",
                self.name
            )));
        }
        if self.size == 0 {
            return Err(FeedError::Config(format!(
                "feed '{}' must request at least one record",
                self.name
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(FeedError::Config(format!(
                "feed '{}' has no output path",
                self.name
            )));
        }
        Ok(())
    }

    /// Search query for this feed
    pub fn query(&self) -> LiteratureQuery {
        LiteratureQuery::for_authors(&self.authors, self.size).sort(self.sort)
    }

    /// Renderer settings for this feed
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            title: self.title.clone(),
            field_style: self.field_style,
            on_malformed: self.on_malformed,
            untitled_placeholder: self.untitled_placeholder.clone(),
        }
    }
}
