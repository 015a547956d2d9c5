//! Fetch, render and write one feed.
//!
//! Each stage runs only after the previous one succeeded; the output file is
//! touched only in the final stage, so a failed fetch or render leaves any
//! previous feed in place.

use std::path::PathBuf;

use tracing::Instrument;

use crate::config::{Config, FeedConfig};
use crate::error::FeedError;
use crate::feed::{build_feed, to_xml};
use crate::sources::LiteratureSource;
use crate::utils::write_atomic;

/// Pipeline stage, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Rendering,
    Writing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Rendering => "rendering",
            Stage::Writing => "writing",
        };
        f.write_str(name)
    }
}

/// Summary of a completed feed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedReport {
    pub name: String,
    pub output: PathBuf,
    pub fetched: usize,
    pub items: usize,
    pub skipped: usize,
}

/// Run one feed end to end.
pub async fn run_feed(
    source: &dyn LiteratureSource,
    feed: &FeedConfig,
) -> Result<FeedReport, FeedError> {
    feed.validate()?;

    let span = tracing::info_span!("feed", name = %feed.name);
    run_stages(source, feed).instrument(span).await
}

async fn run_stages(
    source: &dyn LiteratureSource,
    feed: &FeedConfig,
) -> Result<FeedReport, FeedError> {
    tracing::info!(stage = %Stage::Fetching, source = source.name(), size = feed.size, "Querying literature");
    let records = source.fetch(&feed.query()).await?;

    tracing::info!(stage = %Stage::Rendering, records = records.len(), "Building feed");
    let outcome = build_feed(&records, &feed.render_options())?;
    let xml = to_xml(&outcome.feed)?;

    tracing::info!(stage = %Stage::Writing, path = %feed.output.display(), "Writing feed");
    write_atomic(&feed.output, &xml)?;

    let report = FeedReport {
        name: feed.name.clone(),
        output: feed.output.clone(),
        fetched: records.len(),
        items: outcome.feed.len(),
        skipped: outcome.skipped,
    };
    tracing::info!(items = report.items, skipped = report.skipped, "Feed written");
    Ok(report)
}

/// Run the selected feeds one after another, stopping at the first failure.
pub async fn run_all(
    source: &dyn LiteratureSource,
    config: &Config,
    names: &[String],
) -> Result<Vec<FeedReport>, FeedError> {
    let feeds = config.select(names)?;
    let mut reports = Vec::with_capacity(feeds.len());
    for feed in feeds {
        reports.push(run_feed(source, feed).await?);
    }
    Ok(reports)
}
