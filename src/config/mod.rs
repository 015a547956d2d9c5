//! Configuration management.
//!
//! Feeds are described in a TOML file; HTTP settings may also come from
//! environment variables prefixed with `INSPIRE_FEED` (nested keys separated
//! by `__`, e.g. `INSPIRE_FEED_HTTP__TIMEOUT_SECS=60`).
//!
//! ```toml
//! [http]
//! base_url = "https://inspirehep.net"
//! timeout_secs = 30
//!
//! [[feeds]]
//! name = "all-authors"
//! authors = ["M.Schmaltz.1", "E.L.Blanton.1"]
//! size = 100
//! output = "ALL_AUTH_feed.xml"
//! field_style = "description"
//!
//! [[feeds]]
//! name = "group"
//! authors = ["Hong.Wan.Liu.1"]
//! output = "feed.xml"
//! field_style = "dc:creator"
//! on_malformed = "skip"
//! ```

mod feed;

pub use feed::FeedConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FeedError;
use crate::sources::INSPIRE_BASE_URL;
use crate::utils::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "inspire-feed.toml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Feeds, generated in order
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            feeds: default_feeds(),
        }
    }
}

fn default_feeds() -> Vec<FeedConfig> {
    vec![FeedConfig::builtin()]
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Literature API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    INSPIRE_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Config {
    /// Validate every feed and reject duplicate names
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.http.timeout_secs == 0 {
            return Err(FeedError::Config("http.timeout_secs must be positive".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for feed in &self.feeds {
            feed.validate()?;
            if !seen.insert(feed.name.as_str()) {
                return Err(FeedError::Config(format!(
                    "duplicate feed name '{}'",
                    feed.name
                )));
            }
        }
        Ok(())
    }

    /// Feeds matching `names`, or every feed when `names` is empty
    pub fn select(&self, names: &[String]) -> Result<Vec<&FeedConfig>, FeedError> {
        if names.is_empty() {
            return Ok(self.feeds.iter().collect());
        }

        names
            .iter()
            .map(|name| {
                self.feeds
                    .iter()
                    .find(|f| &f.name == name)
                    .ok_or_else(|| FeedError::Config(format!("unknown feed '{}'", name)))
            })
            .collect()
    }
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix("INSPIRE_FEED")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Configuration from environment variables and built-in defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(
            config::Environment::with_prefix("INSPIRE_FEED")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the working directory, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("inspire-feed").join("config.toml"))
        .filter(|path| path.is_file())
}
