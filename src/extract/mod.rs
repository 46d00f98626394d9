// src/extract/mod.rs
// =============================================================================
// This module pulls structured data out of refranero HTML pages.
//
// Submodules:
// - index: slug links on an alphabetical index page
// - detail: the idiom record on a detail page
//
// Every function here takes HTML as &str and parses it on the spot. Nothing
// in this module is async; a missing element yields an empty value, never
// an error.
// =============================================================================

mod detail;
mod index;

pub use detail::{extract_record, IdiomRecord};
pub use index::extract_slugs;
