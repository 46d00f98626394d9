// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and validate them into a
//    CrawlConfig
// 2. Run the index crawler (--print-slugs) or the detail crawler
//    (--read-slugs)
// 3. Drain the results to stdout
// 4. Exit with 0 after a normal drain, 1 on any error
//
// Logs go to stderr so stdout only ever carries slugs or the idiom table,
// which keeps `refranero --print-slugs | refranero --read-slugs` working.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod extract;
mod fetch;
mod output;

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{CrawlConfig, Mode};
use fetch::HttpFetcher;
use output::Summary;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins over --verbose when set
fn init_logging(verbose: bool) {
    let default = if verbose { "refranero=debug" } else { "refranero=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = CrawlConfig::from_cli(&cli)?;

    let summary = match config.mode {
        Mode::PrintSlugs => handle_print_slugs(&config, crawl::LETTERS, io::stdout().lock()).await?,
        Mode::ReadSlugs => {
            let stdin = BufReader::new(tokio::io::stdin());
            handle_read_slugs(&config, stdin, io::stdout().lock()).await?
        }
    };

    info!(
        received = summary.received,
        written = summary.written,
        filtered = summary.filtered,
        failed = summary.failed,
        "crawl finished"
    );
    Ok(())
}

// Crawls the index page of every letter and prints the slugs
async fn handle_print_slugs<W: Write>(config: &CrawlConfig, letters: &str, out: W) -> Result<Summary> {
    info!(base_url = %config.base_url, letters = letters.len(), "crawling index pages");

    let fetcher = HttpFetcher::new(&config.base_url, config.timeout)?;
    let mut slugs = crawl::crawl_index(fetcher, letters, config.channel_capacity);

    output::write_slugs(&mut slugs, out, config.failure_policy).await
}

// Feeds slugs from `input` to the detail workers and prints the commonly
// used idioms
async fn handle_read_slugs<R, W>(config: &CrawlConfig, input: R, out: W) -> Result<Summary>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: Write,
{
    info!(base_url = %config.base_url, workers = config.workers, "crawling detail pages");

    let fetcher = HttpFetcher::new(&config.base_url, config.timeout)?;
    let (jobs, job_queue) = mpsc::channel(config.channel_capacity);

    // The producer runs next to the consumer: with tiny queues, feeding every
    // line before draining would stall once all workers wait on the consumer
    let feeder = tokio::spawn(crawl::feed_lines(input, jobs));
    let mut records = crawl::crawl_details(fetcher, job_queue, config.workers, config.channel_capacity);

    let summary = output::write_records(&mut records, out, config.failure_policy, config.output).await?;

    let queued = feeder.await??;
    info!(queued, "input exhausted");
    Ok(summary)
}
