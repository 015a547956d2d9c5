//! Feed models: rendered items and the channel that wraps them.

use serde::{Deserialize, Serialize};

/// Default channel title
pub const DEFAULT_CHANNEL_TITLE: &str = "Papers";

/// Element used to carry the author summary of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldStyle {
    /// `<description>`
    #[default]
    #[serde(rename = "description")]
    Description,

    /// `<dc:creator>`, requires the Dublin Core namespace on the root element
    #[serde(rename = "dc:creator", alias = "dc-creator")]
    DcCreator,
}

impl FieldStyle {
    /// Qualified element name
    pub fn element(&self) -> &'static str {
        match self {
            FieldStyle::Description => "description",
            FieldStyle::DcCreator => "dc:creator",
        }
    }

    /// Whether the style needs `xmlns:dc` declared
    pub fn needs_dc_namespace(&self) -> bool {
        matches!(self, FieldStyle::DcCreator)
    }
}

impl std::fmt::Display for FieldStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element())
    }
}

/// A single `<item>` of the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Primary title of the publication
    pub title: String,

    /// Canonical literature URL
    pub link: String,

    /// First authors, comma-joined
    pub author_summary: String,

    /// HTTP-date publication date
    pub pub_date: String,
}

/// An RSS channel with its items, in API order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// Channel title
    pub title: String,

    /// Element used for author summaries
    pub field_style: FieldStyle,

    /// Items, most recent first as returned by the API
    pub items: Vec<FeedItem>,
}

impl Feed {
    /// Create an empty feed with the default channel title
    pub fn new(field_style: FieldStyle) -> Self {
        Self {
            title: DEFAULT_CHANNEL_TITLE.to_string(),
            field_style,
            items: Vec::new(),
        }
    }

    /// Set the channel title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
