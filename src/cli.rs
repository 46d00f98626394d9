// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The tool has two modes, chosen with mutually exclusive switches:
// - --print-slugs: crawl the alphabetical index and print every idiom slug
// - --read-slugs: read slugs from stdin and print the commonly used idioms
//
// Everything else (base URL, pool size, queue capacity, failure policy) has
// a sensible default so the plain `refranero --print-slugs` just works.
// =============================================================================

use clap::{Parser, ValueEnum};

use crate::config::{DEFAULT_BASE_URL, DEFAULT_CHANNEL_CAPACITY, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};

#[derive(Parser, Debug)]
#[command(
    name = "refranero",
    version,
    about = "Crawl the Cervantes refranero for commonly used Spanish idioms",
    long_about = "refranero crawls the Centro Virtual Cervantes refranero. \
                  Use --print-slugs to list every idiom page, then pipe that list \
                  into --read-slugs to print the idioms marked as commonly used."
)]
pub struct Cli {
    /// Crawl all links for the entire alphabet and print them line by line to stdout
    #[arg(long, conflicts_with = "read_slugs")]
    pub print_slugs: bool,

    /// Read slugs line by line from stdin and print the idiom and definition
    /// of every entry that is commonly used
    #[arg(long)]
    pub read_slugs: bool,

    /// Root URL of the refranero site
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of concurrent workers fetching detail pages
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Capacity of the job and result queues (1 = tightest handoff)
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// What to do when a page cannot be fetched
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    pub on_error: OnError,

    /// Output records as JSON lines instead of a tab-separated table
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnError {
    /// Stop at the first failed fetch and exit non-zero
    Abort,
    /// Log the failed fetch and keep going
    Skip,
}
