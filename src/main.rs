//! Catalog-Scout main entry point
//!
//! Command-line interface for the product-URL discovery crawler. Numeric
//! flags default from environment variables so deployment environments can
//! pin them without wrapper scripts.

use anyhow::Context;
use catalog_scout::config::{self, CrawlConfig};
use catalog_scout::orchestrator::{run_concurrent, run_parallel, run_worker};
use catalog_scout::report::{log_summary, save_report};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Scout: discover product-page URLs on e-commerce domains
#[derive(Parser, Debug)]
#[command(name = "catalog-scout")]
#[command(version = "1.0.0")]
#[command(about = "E-commerce product URL crawler", long_about = None)]
struct Cli {
    /// Domains to crawl
    #[arg(long, num_args = 1.., conflicts_with = "input")]
    domains: Vec<String>,

    /// Path to a file containing domains, one per line
    #[arg(long)]
    input: Option<PathBuf>,

    /// Crawl each domain in its own worker process
    #[arg(long)]
    parallel: bool,

    /// Number of worker processes in parallel mode
    #[arg(long, default_value_t = num_cpus::get())]
    processes: usize,

    /// Maximum number of concurrent requests per domain
    #[arg(long, env = "MAX_CONCURRENT_REQUESTS", default_value_t = 10)]
    max_concurrent: usize,

    /// Delay between requests to the same domain (seconds)
    #[arg(long, env = "CRAWL_DELAY", default_value_t = 1.0)]
    crawl_delay: f64,

    /// Maximum crawl depth
    #[arg(long, env = "MAX_DEPTH", default_value_t = 3)]
    max_depth: u32,

    /// Request timeout in seconds
    #[arg(long, env = "TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Maximum number of retries for failed requests
    #[arg(long, env = "MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Initial delay between retries, doubled on each attempt (seconds)
    #[arg(long, env = "RETRY_DELAY", default_value_t = 2.0)]
    retry_delay: f64,

    /// Directory to store output files
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Internal: crawl a single domain and emit its result as JSON on stdout
    #[arg(long, hide = true)]
    worker: Option<String>,

    /// Internal: serialized crawl configuration for worker mode
    #[arg(long, hide = true, requires = "worker")]
    config: Option<String>,
}

impl Cli {
    fn crawl_config(&self) -> anyhow::Result<CrawlConfig> {
        // Worker processes receive the orchestrator's exact configuration
        if let Some(json) = &self.config {
            return serde_json::from_str(json).context("invalid worker configuration");
        }

        Ok(CrawlConfig {
            max_concurrent_requests: self.max_concurrent,
            crawl_delay: self.crawl_delay,
            max_depth: self.max_depth,
            timeout: self.timeout,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
            output_dir: self.output_dir.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let crawl_config = cli.crawl_config()?;
    config::validate(&crawl_config).context("invalid configuration")?;

    // Hidden worker mode: one domain, result on stdout, logs on stderr
    if let Some(domain) = cli.worker.as_deref() {
        run_worker(domain, &crawl_config).await?;
        return Ok(());
    }

    let domains = resolve_domains(&cli)?;
    tracing::info!("Crawling {} domains", domains.len());

    let results = if cli.parallel {
        run_parallel(&domains, &crawl_config, cli.processes).await?
    } else {
        tracing::info!("Starting concurrent crawler");
        run_concurrent(&domains, &crawl_config).await?
    };

    save_report(&results, &crawl_config.output_dir, cli.parallel)?;
    log_summary(&results);

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
///
/// Logs go to stderr: in worker mode stdout carries the JSON result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_scout=info,warn"),
            1 => EnvFilter::new("catalog_scout=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the domain list from --domains or --input
fn resolve_domains(cli: &Cli) -> anyhow::Result<Vec<String>> {
    if !cli.domains.is_empty() {
        return Ok(cli.domains.clone());
    }

    let Some(path) = &cli.input else {
        anyhow::bail!("either --domains or --input is required");
    };

    config::load_domains(path)
        .with_context(|| format!("failed to load domains from {}", path.display()))
}
