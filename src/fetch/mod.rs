// src/fetch/mod.rs
// =============================================================================
// This module talks to the refranero web site.
//
// Submodules:
// - http: the shared HTTP client and the two URL shapes we request
//
// Pages come back as raw HTML strings. Parsing happens in `extract`, because
// a parsed scraper document is not Send and must never be held across an
// .await inside a spawned task.
// =============================================================================

mod http;

pub use http::HttpFetcher;
