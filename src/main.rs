//! Page-Walker main entry point
//!
//! This is the command-line interface for the Page-Walker listing extractor.

use clap::Parser;
use page_walker::config::{load_config_with_hash, Config};
use page_walker::output::{print_summary, run_walk, JsonLinesSink, Sink};
use page_walker::walker::{build_http_client, HttpFetcher, PageParser, PageWalker, WalkLimits};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Page-Walker: a paginated listing extractor
///
/// Page-Walker fetches a listing page, extracts one record per item using
/// the configured selectors, and follows the "next page" link until the
/// listing ends. Records are written as JSON Lines.
#[derive(Parser, Debug)]
#[command(name = "page-walker")]
#[command(version = "1.0.0")]
#[command(about = "A paginated listing extractor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Start the walk here instead of the configured start-url
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Write records to this file instead of the configured path (`-` for stdout)
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Stop after this many pages
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be walked without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    apply_overrides(&mut config, &cli);

    if cli.dry_run {
        handle_dry_run(&config, &config_hash)
    } else {
        handle_walk(&config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout stays clean for records.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_walker=info,warn"),
            1 => EnvFilter::new("page_walker=debug,info"),
            2 => EnvFilter::new("page_walker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(start_url) = &cli.start_url {
        config.walker.start_url = start_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.walker.max_pages = Some(max_pages);
    }
}

/// Handles the --dry-run mode: validates config and shows what would be walked
fn handle_dry_run(config: &Config, config_hash: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Compiling the selectors is part of the check
    PageParser::new(&config.selectors)?;
    page_walker::url::PageReference::parse(&config.walker.start_url)?;

    println!("=== Page-Walker Dry Run ===\n");
    println!("Config hash: {}\n", config_hash);

    println!("Walk:");
    println!("  Start URL: {}", config.walker.start_url);
    match config.walker.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unbounded"),
    }

    println!("\nSelectors:");
    println!("  Item: {}", config.selectors.item);
    println!("  Text: {}", config.selectors.text);
    println!("  Author: {}", config.selectors.author);
    println!("  Tags: {}", config.selectors.tags);
    println!("  Next: {}", config.selectors.next);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nOutput:");
    if config.output.is_stdout() {
        println!("  Records: stdout");
    } else {
        println!("  Records: {}", config.output.path);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main walk operation
async fn handle_walk(config: &Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_http_client(&config.user_agent, &config.http)?;
    let parser = PageParser::new(&config.selectors)?;
    let limits = WalkLimits {
        max_pages: config.walker.max_pages,
    };
    let walker = PageWalker::with_limits(HttpFetcher::new(client, parser), limits);

    let mut sink: Box<dyn Sink> = if config.output.is_stdout() {
        Box::new(JsonLinesSink::stdout())
    } else {
        tracing::info!("Writing records to: {}", config.output.path);
        Box::new(JsonLinesSink::create(Path::new(&config.output.path))?)
    };

    tracing::info!("Starting walk at {}", config.walker.start_url);

    match run_walk(&walker, &config.walker.start_url, &mut sink).await {
        Ok(summary) => {
            tracing::info!(
                "Walk completed: {} records from {} pages",
                summary.records_emitted,
                summary.pages_fetched
            );
            if !quiet {
                print_summary(&summary);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Walk failed: {}", e);
            Err(e.into())
        }
    }
}
