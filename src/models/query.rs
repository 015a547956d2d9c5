//! Literature search query model.

use serde::{Deserialize, Serialize};

/// Fields requested from the literature API for every hit.
pub const DEFAULT_FIELDS: [&str; 3] = ["titles", "authors.full_name", "created"];

/// Sort order understood by the literature API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest records first
    #[default]
    MostRecent,
    /// Most cited records first
    MostCited,
}

impl SortOrder {
    /// Value sent in the `sort` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::MostRecent => "mostrecent",
            SortOrder::MostCited => "mostcited",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a literature search.
///
/// Built once per feed run and never mutated afterwards; the builder-style
/// setters consume `self`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteratureQuery {
    /// Sort order of the result page
    pub sort: SortOrder,

    /// Number of records on the page
    pub size: usize,

    /// 1-based page number
    pub page: usize,

    /// Search expression (`q` parameter)
    pub expression: String,

    /// Field names to retrieve
    pub fields: Vec<String>,
}

impl LiteratureQuery {
    /// Create a query for an arbitrary search expression
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            sort: SortOrder::default(),
            size: 100,
            page: 1,
            expression: expression.into(),
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Create a query matching records written by any of `authors`
    pub fn for_authors<S: AsRef<str>>(authors: &[S], size: usize) -> Self {
        Self::new(author_disjunction(authors)).size(size)
    }

    /// Set the page size
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the sort order
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Query parameters in the order the API documents them.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sort", self.sort.as_str().to_string()),
            ("size", self.size.to_string()),
            ("page", self.page.to_string()),
            ("q", self.expression.clone()),
            ("fields", self.fields.join(",")),
        ]
    }
}

/// Build `find author A or B or C` from a list of author identities.
pub fn author_disjunction<S: AsRef<str>>(authors: &[S]) -> String {
    let joined = authors
        .iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(" or ");
    format!("find author {}", joined)
}
