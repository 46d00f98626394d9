// src/extract/index.rs
// =============================================================================
// Extracts idiom slugs from an alphabetical index page.
//
// The index lists one idiom per item:
//
//   <ol id="lista_az">
//     <li><a href="ficha.aspx?Par=58&Lng=0">A buen hambre...</a></li>
//     ...
//   </ol>
//
// The href is the slug, kept exactly as written (relative to the base URL).
// =============================================================================

use scraper::{Html, Selector};

pub const SLUG_LINKS: &str = "ol#lista_az > li > a";

// Returns every slug on the page in document order
//
// Anchors without an href are skipped. Duplicates are kept: if the page
// lists the same link twice, so do we.
pub fn extract_slugs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse(SLUG_LINKS).unwrap();

    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}
