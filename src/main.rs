//! Outline-Scout main entry point
//!
//! This is the command-line interface for the Outline-Scout website outline
//! mapper.

use anyhow::Context;
use clap::Parser;
use outline_scout::config::{load_config_with_hash, validate, Config};
use outline_scout::crawler::crawl;
use outline_scout::render::WebDriverBackend;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Outline-Scout: a polite website outline mapper
///
/// Outline-Scout checks a site's robots.txt policy, analyzes its sitemaps,
/// and crawls the allowed sections with a headless browser, extracting every
/// page's heading hierarchy into one JSON summary.
#[derive(Parser, Debug)]
#[command(name = "outline-scout")]
#[command(version)]
#[command(about = "A polite website outline mapper", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; built-in defaults apply without one
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the site to crawl
    #[arg(long)]
    base_url: Option<String>,

    /// Maximum depth below each section root
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum pages to visit per section
    #[arg(long)]
    max_pages_per_section: Option<u32>,

    /// Default delay between page requests, in seconds
    #[arg(long)]
    crawl_delay: Option<f64>,

    /// Path of the JSON summary document
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration (built-in defaults when no file is given)
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("configuration invalid after CLI overrides")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("outline_scout=info,warn"),
            1 => EnvFilter::new("outline_scout=debug,info"),
            2 => EnvFilter::new("outline_scout=trace,debug"),
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

/// Applies CLI override flags on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages_per_section {
        config.crawler.max_pages_per_section = max_pages;
    }
    if let Some(delay) = cli.crawl_delay {
        config.crawler.crawl_delay = delay;
    }
    if let Some(output) = &cli.output {
        config.output.results_path = output.clone();
    }
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Outline-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max pages per section: {}",
        config.crawler.max_pages_per_section
    );
    println!("  Default crawl delay: {}s", config.crawler.crawl_delay);

    println!("\nSections ({}):", config.crawler.sections.len());
    for section in &config.crawler.sections {
        println!("  - {}", section);
    }

    println!("\nRender Backend:");
    println!("  WebDriver endpoint: {}", config.render.webdriver_url);
    println!("  Wait timeout: {}ms", config.render.wait_timeout_ms);
    println!("  Settle delay: {}ms", config.render.settle_delay_ms);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.full_user_agent());

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would test {} section paths against robots.txt",
        config.crawler.sections.len()
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl of {} ({} candidate sections)",
        config.crawler.base_url,
        config.crawler.sections.len()
    );

    let backend =
        WebDriverBackend::new(&config.render).context("failed to set up render backend")?;

    match crawl(config, &backend).await {
        Ok(summary) => {
            tracing::info!(
                "Crawl completed: {} pages, {} sections",
                summary.crawl_stats.total_pages,
                summary.crawl_stats.sections_crawled
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
