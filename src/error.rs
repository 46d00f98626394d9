// src/error.rs
// =============================================================================
// Error types shared by the crawlers.
//
// Three kinds of failure exist:
// - ConfigError: the command line makes no sense, nothing has started yet
// - CrawlError: one page could not be fetched (or a worker died)
// - a missing section on a page is NOT an error, it extracts as ""
//
// Crawl errors travel on the result stream next to successful records, so
// the consumer decides what a failed job means (see FailurePolicy).
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Both --print-slugs and --read-slugs cannot be passed")]
    ConflictingModes,

    #[error("Nothing to do: pass either --print-slugs or --read-slugs")]
    NoMode,

    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("--workers must be greater than 0")]
    ZeroWorkers,

    #[error("--channel-capacity must be greater than 0")]
    ZeroCapacity,

    #[error("--timeout-secs must be greater than 0")]
    ZeroTimeout,
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("Crawl worker panicked: {0}")]
    WorkerPanicked(String),
}

/// One unit of work as seen by the consumer: the item, or why it failed.
pub type JobOutcome<T> = Result<T, CrawlError>;

/// How the consumer treats a failed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the first error; the run exits non-zero.
    Abort,
    /// Log it, count it, keep draining.
    Skip,
}
