//! Wiki-Pathfinder main entry point
//!
//! This is the command-line interface for the article path finder.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiki_pathfinder::config::{load_config, validate, Config};
use wiki_pathfinder::output::{print_fetch_statistics, print_results};
use wiki_pathfinder::url::parse_article_url;
use wiki_pathfinder::PathFinder;

/// Wiki-Pathfinder: finds link paths between encyclopedia articles
///
/// Searches breadth-first from each article toward the other, following only
/// links in article text and references, at a polite request rate.
#[derive(Parser, Debug)]
#[command(name = "wiki-pathfinder")]
#[command(version = "1.0.0")]
#[command(about = "Finds link paths between two wiki articles", long_about = None)]
#[command(
    after_help = "Example: wiki-pathfinder 'https://en.wikipedia.org/wiki/Six_degrees_of_separation' 'https://en.wikipedia.org/wiki/American_Broadcasting_Company' 10"
)]
struct Cli {
    /// First article URL
    #[arg(value_name = "URL1")]
    url1: String,

    /// Second article URL
    #[arg(value_name = "URL2")]
    url2: String,

    /// Maximum requests per second (also the number of concurrent requests)
    #[arg(value_name = "RATE_LIMIT")]
    rate_limit: usize,

    /// Maximum number of articles on an expanded path
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print fetch statistics after the results
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };

    config.fetch.rate_limit = cli.rate_limit;
    if let Some(max_depth) = cli.max_depth {
        config.search.max_depth = max_depth;
    }
    validate(&config).context("invalid settings")?;

    let from = parse_article_url(&cli.url1).context("invalid URL1")?;
    let to = parse_article_url(&cli.url2).context("invalid URL2")?;

    let finder = PathFinder::from_config(&config)?;

    tracing::info!(
        "Rate limit: {} req/s, max depth: {}",
        config.fetch.rate_limit,
        config.search.max_depth
    );

    tokio::select! {
        (forward, backward) = finder.find_bidirectional_path(from.as_str(), to.as_str()) => {
            print_results(&forward, &backward, &cli.url1, &cli.url2);
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted by user");
        }
    }

    if cli.stats {
        print_fetch_statistics(&finder.fetcher().stats());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_pathfinder=info,warn"),
            1 => EnvFilter::new("wiki_pathfinder=debug,info"),
            2 => EnvFilter::new("wiki_pathfinder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
