//! BORM scraper main entry point
//!
//! This is the command-line interface for the daily bulletin harvester.

use borm_scraper::config::{load_config_with_hash, validate, Config, RenderBackend};
use borm_scraper::crawler::crawl;
use borm_scraper::output::{print_statistics, CrawlStatistics};
use borm_scraper::url::summary_url;
use borm_scraper::{CrawlRange, FailureKind};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// BORM scraper: harvests announcements from the regional official bulletin
///
/// Visits the bulletin summary for each day of a date range, renders every
/// announcement it lists and stores each one as a JSON record plus its raw
/// body under a date-partitioned document root.
#[derive(Parser, Debug)]
#[command(name = "borm-scraper")]
#[command(version)]
#[command(about = "Daily bulletin harvester for the BORM portal", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory the documents are written under
    #[arg(long, value_name = "DIR", global = true)]
    document_root: Option<PathBuf>,

    /// Page rendering backend
    #[arg(long, value_enum, global = true)]
    backend: Option<Backend>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download every announcement published between two dates
    Crawl {
        /// First day to crawl (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date_start: NaiveDate,

        /// Last day to crawl, inclusive (YYYY-MM-DD); defaults to DATE_START
        #[arg(value_parser = parse_date)]
        date_end: Option<NaiveDate>,

        /// Show the days and summary pages that would be visited without fetching
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Backend {
    Chromium,
    Http,
}

impl From<Backend> for RenderBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Chromium => RenderBackend::Chromium,
            Backend::Http => RenderBackend::Http,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected a date as YYYY-MM-DD: {}", e))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;

    if let Some(root) = &cli.document_root {
        config.output.document_root = root.to_string_lossy().into_owned();
    }
    if let Some(backend) = cli.backend {
        config.render.backend = backend.into();
    }
    validate(&config)?;

    match cli.command {
        Command::Crawl {
            date_start,
            date_end,
            dry_run,
        } => {
            let range = CrawlRange::new(date_start, date_end.unwrap_or(date_start))?;
            if dry_run {
                handle_dry_run(&config, range)?;
            } else {
                handle_crawl(config, range).await?;
            }
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("borm_scraper=info,warn"),
            1 => EnvFilter::new("borm_scraper=debug,info"),
            2 => EnvFilter::new("borm_scraper=trace,debug"),
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

fn load_configuration(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, range: CrawlRange) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== BORM Scraper Dry Run ===\n");

    println!("Portal:");
    println!("  Base URL: {}", config.portal.base_url);
    println!("  Link title: {}", config.portal.link_title);

    println!("\nRender:");
    println!("  Backend: {:?}", config.render.backend);
    println!("  Ready timeout: {}ms", config.render.ready_timeout_ms);

    println!("\nOutput:");
    println!("  Document root: {}", config.output.document_root);

    println!("\nDays ({}):", range.day_count());
    for day in range.days() {
        println!("  - {} {}", day, summary_url(&config.portal, day)?);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, range: CrawlRange) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Writing documents under {} using the {:?} backend",
        config.output.document_root,
        config.render.backend
    );

    let report = match crawl(config, range).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let stats = CrawlStatistics::from_report(&report);
    print_statistics(&stats);

    if report.has_systemic_failures() {
        return Err(anyhow::anyhow!(
            "{} announcements could not be stored; check the document root",
            stats
                .failures_by_kind
                .get(&FailureKind::Storage)
                .copied()
                .unwrap_or(0)
        )
        .into());
    }

    tracing::info!("Crawl completed successfully");
    Ok(())
}
