// src/config.rs
// =============================================================================
// Turns the parsed command line into an explicit, validated configuration.
//
// The mode switches are never read from globals: `CrawlConfig` is built once
// in main and handed to the crawlers, which makes every run reproducible in
// tests by constructing the struct directly.
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::cli::{Cli, OnError};
use crate::error::{ConfigError, FailurePolicy};

pub const DEFAULT_BASE_URL: &str = "http://cvc.cervantes.es/lengua/refranero";
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    PrintSlugs,
    ReadSlugs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub mode: Mode,
    pub base_url: Url,
    pub workers: usize,
    pub channel_capacity: usize,
    pub timeout: Duration,
    pub failure_policy: FailurePolicy,
    pub output: OutputFormat,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            mode: Mode::ReadSlugs,
            // Constant URL, always parses
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            workers: DEFAULT_WORKERS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            failure_policy: FailurePolicy::Abort,
            output: OutputFormat::Tsv,
        }
    }
}

impl CrawlConfig {
    // Validates the command line and builds the configuration
    //
    // Both mode switches at once is rejected here as well as by clap, so a
    // hand-built `Cli` cannot slip past the rule.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mode = match (cli.print_slugs, cli.read_slugs) {
            (true, true) => return Err(ConfigError::ConflictingModes),
            (true, false) => Mode::PrintSlugs,
            (false, true) => Mode::ReadSlugs,
            (false, false) => return Err(ConfigError::NoMode),
        };

        let base_url = Url::parse(&cli.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: cli.base_url.clone(),
            source,
        })?;

        if cli.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if cli.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if cli.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let failure_policy = match cli.on_error {
            OnError::Abort => FailurePolicy::Abort,
            OnError::Skip => FailurePolicy::Skip,
        };

        let output = if cli.json { OutputFormat::Json } else { OutputFormat::Tsv };

        Ok(Self {
            mode,
            base_url,
            workers: cli.workers,
            channel_capacity: cli.channel_capacity,
            timeout: Duration::from_secs(cli.timeout_secs),
            failure_policy,
            output,
        })
    }
}
