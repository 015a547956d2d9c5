//! Utility modules supporting feed generation.
//!
//! - [`HttpClient`]: shared HTTP client with timeouts and a crate user agent
//! - [`write_atomic`]: replace a file without exposing partial content
//!
//! # Writing a Feed
//!
//! ```rust,no_run
//! use inspire_feed::utils::write_atomic;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! write_atomic(Path::new("feed.xml"), "<rss version=\"2.0\"/>")?;
//! # Ok(())
//! # }
//! ```

mod http;
mod write;

pub use http::{HttpClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use write::write_atomic;
