use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use inspire_feed::config::{find_config_file, get_config, load_config, Config, FeedConfig};
use inspire_feed::feed::MalformedPolicy;
use inspire_feed::models::FieldStyle;
use inspire_feed::pipeline::run_all;
use inspire_feed::sources::InspireSource;
use inspire_feed::utils::HttpClient;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Name given to a feed defined entirely on the command line
const CLI_FEED_NAME: &str = "cli";

/// Output file of a command-line feed without `--out`
const CLI_FEED_OUTPUT: &str = "feed.xml";

/// inspire-feed - Write RSS feeds of the latest INSPIRE-HEP papers by a set of authors
#[derive(Parser, Debug)]
#[command(name = "inspire-feed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Write RSS feeds of the latest INSPIRE-HEP papers by a set of authors", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only generate the named feed (repeatable)
    #[arg(long = "feed", value_name = "NAME")]
    feeds: Vec<String>,

    /// Author identities for a single ad-hoc feed (comma-separated), replacing configured feeds
    #[arg(long, value_delimiter = ',', conflicts_with = "feeds")]
    authors: Vec<String>,

    /// Number of records to fetch
    #[arg(long)]
    size: Option<usize>,

    /// Output file
    #[arg(long)]
    out: Option<PathBuf>,

    /// Element used for the author summary
    #[arg(long, value_enum)]
    field_style: Option<FieldStyleArg>,

    /// Channel title
    #[arg(long)]
    title: Option<String>,

    /// Skip malformed records instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Title used for records that have none, instead of aborting
    #[arg(long, value_name = "PLACEHOLDER")]
    untitled: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Literature API host
    #[arg(long)]
    base_url: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Element carrying the author summary
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FieldStyleArg {
    /// `<description>`
    Description,
    /// `<dc:creator>` with the Dublin Core namespace declared
    DcCreator,
}

impl From<FieldStyleArg> for FieldStyle {
    fn from(arg: FieldStyleArg) -> Self {
        match arg {
            FieldStyleArg::Description => FieldStyle::Description,
            FieldStyleArg::DcCreator => FieldStyle::DcCreator,
        }
    }
}

impl Cli {
    /// Merge command-line options into the loaded configuration
    fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(timeout) = self.timeout {
            config.http.timeout_secs = timeout;
        }
        if let Some(base_url) = &self.base_url {
            config.http.base_url = base_url.clone();
        }

        if !self.authors.is_empty() {
            let output = self
                .out
                .clone()
                .unwrap_or_else(|| PathBuf::from(CLI_FEED_OUTPUT));
            config.feeds = vec![FeedConfig::new(CLI_FEED_NAME, self.authors.clone(), output)];
        } else if let Some(out) = &self.out {
            let selected = config.select(&self.feeds)?;
            if selected.len() != 1 {
                anyhow::bail!("--out needs exactly one feed, {} selected", selected.len());
            }
            let name = selected[0].name.clone();
            if let Some(feed) = config.feeds.iter_mut().find(|f| f.name == name) {
                feed.output = out.clone();
            }
        }

        let selected: Vec<String> = config
            .select(&self.feeds)?
            .into_iter()
            .map(|f| f.name.clone())
            .collect();

        for feed in config.feeds.iter_mut().filter(|f| selected.contains(&f.name)) {
            if let Some(size) = self.size {
                feed.size = size;
            }
            if let Some(style) = self.field_style {
                feed.field_style = style.into();
            }
            if let Some(title) = &self.title {
                feed.title = title.clone();
            }
            if self.skip_malformed {
                feed.on_malformed = MalformedPolicy::Skip;
            }
            if let Some(placeholder) = &self.untitled {
                feed.untitled_placeholder = Some(placeholder.clone());
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("inspire_feed={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        get_config().context("Failed to read configuration from environment")?
    };

    let config = cli.apply(config)?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let client = HttpClient::with_settings(
        &config.http.user_agent,
        Duration::from_secs(config.http.timeout_secs),
    )?;
    let source = InspireSource::with_client(client, &config.http.base_url)?;

    let reports = run_all(&source, &config, &cli.feeds).await?;
    for report in &reports {
        tracing::info!(
            "{}: {} items written to {}",
            report.name,
            report.items,
            report.output.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_feed_config() -> Config {
        let mut config = Config::default();
        config
            .feeds
            .push(FeedConfig::new("group", vec!["A.B.1".to_string()], "feed.xml"));
        config
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["inspire-feed"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.feeds.is_empty());
        assert!(cli.authors.is_empty());
        assert!(!cli.skip_malformed);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["inspire-feed", "-v"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["inspire-feed", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_feed_options() {
        let cli = Cli::parse_from([
            "inspire-feed",
            "--authors",
            "M.Schmaltz.1,E.L.Blanton.1",
            "--size",
            "20",
            "--out",
            "out.xml",
            "--field-style",
            "dc-creator",
        ]);
        assert_eq!(cli.authors, vec!["M.Schmaltz.1", "E.L.Blanton.1"]);
        assert_eq!(cli.size, Some(20));
        assert_eq!(cli.out, Some(PathBuf::from("out.xml")));
        assert_eq!(cli.field_style, Some(FieldStyleArg::DcCreator));
    }

    #[test]
    fn test_cli_authors_conflicts_with_feed() {
        let result = Cli::try_parse_from(["inspire-feed", "--authors", "A.B.1", "--feed", "group"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        assert!(Cli::try_parse_from(["inspire-feed", "--authors", "A.B.1"]).is_ok());
        assert!(Cli::try_parse_from(["inspire-feed", "--feed", "group"]).is_ok());
    }

    #[test]
    fn test_apply_no_options_keeps_config() {
        let cli = Cli::parse_from(["inspire-feed"]);
        let config = cli.apply(Config::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_apply_adhoc_feed_replaces_configured() {
        let cli = Cli::parse_from([
            "inspire-feed",
            "--authors",
            "A.B.1",
            "--field-style",
            "dc-creator",
            "--skip-malformed",
        ]);
        let config = cli.apply(two_feed_config()).unwrap();

        assert_eq!(config.feeds.len(), 1);
        let feed = &config.feeds[0];
        assert_eq!(feed.name, "cli");
        assert_eq!(feed.output, PathBuf::from("feed.xml"));
        assert_eq!(feed.field_style, FieldStyle::DcCreator);
        assert_eq!(feed.on_malformed, MalformedPolicy::Skip);
    }

    #[test]
    fn test_apply_overrides_only_selected_feed() {
        let cli = Cli::parse_from(["inspire-feed", "--feed", "group", "--size", "5"]);
        let config = cli.apply(two_feed_config()).unwrap();

        assert_eq!(config.feeds[0].size, 100);
        assert_eq!(config.feeds[1].size, 5);
    }

    #[test]
    fn test_apply_out_requires_single_feed() {
        let cli = Cli::parse_from(["inspire-feed", "--out", "x.xml"]);
        assert!(cli.apply(two_feed_config()).is_err());

        let cli = Cli::parse_from(["inspire-feed", "--feed", "group", "--out", "x.xml"]);
        let config = cli.apply(two_feed_config()).unwrap();
        assert_eq!(config.feeds[1].output, PathBuf::from("x.xml"));
    }

    #[test]
    fn test_apply_http_overrides() {
        let cli = Cli::parse_from([
            "inspire-feed",
            "--timeout",
            "5",
            "--base-url",
            "http://localhost:8080",
        ]);
        let config = cli.apply(Config::default()).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_apply_rejects_zero_size() {
        let cli = Cli::parse_from(["inspire-feed", "--size", "0"]);
        assert!(cli.apply(Config::default()).is_err());
    }

    #[test]
    fn test_apply_unknown_feed() {
        let cli = Cli::parse_from(["inspire-feed", "--feed", "nope"]);
        assert!(cli.apply(Config::default()).is_err());
    }
}
