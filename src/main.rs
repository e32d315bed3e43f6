//! Email-Harvester main entry point
//!
//! This is the command-line interface for the Email-Harvester crawler.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use email_harvester::config::{apply_overrides, load_config, resolve, Config, ConfigOverrides};
use email_harvester::crawler::{Coordinator, HttpFetcher};
use email_harvester::output::{default_report_filename, print_summary, write_report, CrawlEvent};
use email_harvester::{CrawlConfig, RunStatus};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Email-Harvester: a same-domain contact email crawler
///
/// Email-Harvester crawls one website breadth-first, visiting contact-like
/// pages first, and collects every email address it finds (including
/// "name [at] example . com" style spellings) into a plain text report.
#[derive(Parser, Debug)]
#[command(name = "email-harvester")]
#[command(version = "1.0.0")]
#[command(about = "A same-domain contact email crawler", long_about = None)]
struct Cli {
    /// Website to crawl (overrides crawler.base-url)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to crawl
    #[arg(short, long, value_name = "N")]
    max_pages: Option<usize>,

    /// Number of pages fetched concurrently
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,

    /// Per-page timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Report file (defaults to emails_<timestamp>.txt)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Validate the configuration and show what would be crawled
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.url.clone(),
            max_pages: self.max_pages,
            concurrency: self.concurrency,
            timeout: self.timeout,
            report_path: self.output.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };
    let config = apply_overrides(config, &cli.overrides());
    let crawl_config = resolve(&config).context("Invalid crawl configuration")?;

    let report_path = config
        .output
        .report_path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default_report_filename(Local::now())));

    if cli.dry_run {
        handle_dry_run(&crawl_config, &report_path);
        return Ok(());
    }

    handle_crawl(crawl_config, report_path, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("email_harvester=info,warn"),
            1 => EnvFilter::new("email_harvester=debug,info"),
            2 => EnvFilter::new("email_harvester=trace,debug"),
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

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &CrawlConfig, report_path: &std::path::Path) {
    println!("=== Email-Harvester Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Base URL: {}", config.base_url);
    println!("  Max pages: {}", config.max_pages);
    println!("  Concurrency: {}", config.concurrency);
    println!("  Page timeout: {}s", config.page_timeout.as_secs_f64());
    println!("  User agent: {}", config.user_agent);

    println!("\nOutput:");
    println!("  Report: {}", report_path.display());

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: CrawlConfig,
    report_path: PathBuf,
    quiet: bool,
) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&config.user_agent).context("Failed to build HTTP client")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let mut coordinator = Coordinator::new(config, Arc::new(fetcher)).with_events(tx);

    let stop = coordinator.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Stop requested, finishing the current batch");
            stop.stop();
        }
    });

    let printer = tokio::spawn(print_events(rx, quiet));

    let status = coordinator.run().await?;
    let report = coordinator.report();

    // Dropping the coordinator closes the event channel and ends the printer
    drop(coordinator);
    let _ = printer.await;

    write_report(&report, &report_path)
        .with_context(|| format!("Failed to write report to {}", report_path.display()))?;

    if !quiet {
        print_summary(&report);
        println!("Results saved to: {}", report_path.display());
    }

    if status == RunStatus::Stopped {
        tracing::info!("Crawl stopped before the frontier was exhausted");
    }

    Ok(())
}

/// Prints progress events until the coordinator goes away
async fn print_events(mut rx: mpsc::UnboundedReceiver<CrawlEvent>, quiet: bool) {
    while let Some(event) = rx.recv().await {
        if quiet {
            continue;
        }

        match &event {
            CrawlEvent::BatchStarted { urls, .. } => {
                for url in urls {
                    println!("Crawling: {}", url);
                }
            }
            CrawlEvent::EmailsFound {
                source_url, emails, ..
            } => {
                for email in emails {
                    println!("Found: {} ({})", email, source_url);
                }
            }
            CrawlEvent::Finished { status, progress } => {
                println!(
                    "Crawl {} ({:.0}% of page budget used)",
                    status,
                    progress.percent_complete()
                );
            }
        }
        println!("{}", event.progress().status_line());
    }
}
