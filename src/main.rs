//! souq-crawler - Marketplace search-result scraper CLI
//!
//! Triggers a single scrape run against an Amazon or Jumia search URL.

use anyhow::Result;
use clap::Parser;
use souq_crawler::commands::ScrapeCommand;
use souq_crawler::config::{Config, OutputFormat};
use souq_crawler::Site;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "souq-crawler",
    version,
    about = "Marketplace search-result scraper",
    long_about = "Scrapes product records from Amazon and Jumia search pages \
                  through rotating proxies and disguised browser requests."
)]
struct Cli {
    /// Search-results URL to scrape
    url: Option<String>,

    /// Marketplace to build a search URL for (amazon, jumia)
    #[arg(short, long, requires = "query")]
    site: Option<Site>,

    /// Search query, used together with --site
    #[arg(short, long)]
    query: Option<String>,

    /// Maximum number of products to scrape
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Proxy pool service base URL
    #[arg(long, env = "SOUQ_PROXY_SERVICE")]
    proxy_service: Option<String>,

    /// Delay between accepted records in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    config.format = cli.format;

    if let Some(service) = cli.proxy_service {
        config.proxy_service_url = service;
    }
    if let Some(delay) = cli.delay {
        config.pace_delay_ms = delay;
    }

    let url = match (cli.url, cli.site, cli.query) {
        (Some(url), _, _) => url,
        (None, Some(site), Some(query)) => site.search_url(&query),
        _ => anyhow::bail!("Provide a search-results URL, or --site together with --query"),
    };

    let cmd = ScrapeCommand::new(config);
    let output = cmd.execute(&url, cli.limit).await?;
    println!("{}", output);

    Ok(())
}
