// src/crawl/index.rs
// =============================================================================
// The index crawler: discovers every idiom slug.
//
// One task per letter of the alphabet fetches that letter's index page and
// sends its slugs, in document order, into one shared queue. The alphabet
// is small and fixed, so there is no pool bound here; a larger fan-out
// should go through `run_pool` instead.
// =============================================================================

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::pool::close_when_done;
use crate::error::JobOutcome;
use crate::extract::extract_slugs;
use crate::fetch::HttpFetcher;

// Idioms only start with these letters (no K, Ñ, W or X on the site)
pub const LETTERS: &str = "ABCDEFGHIJLMNOPQRSTUVYZ";

// Crawls the index page of every letter in `letters`
//
// Returns the slug queue. A letter whose page cannot be fetched sends one
// error instead of its slugs. The queue closes once every letter is done.
pub fn crawl_index(
    fetcher: HttpFetcher,
    letters: &str,
    capacity: usize,
) -> mpsc::Receiver<JobOutcome<String>> {
    let (tx, rx) = mpsc::channel(capacity);

    let handles = letters
        .chars()
        .map(|letter| {
            let fetcher = fetcher.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let url = fetcher.index_url(letter);
                let html = match fetcher.fetch_page(&url).await {
                    Ok(html) => html,
                    Err(e) => {
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                };

                let slugs = extract_slugs(&html);
                info!(%letter, count = slugs.len(), "index page crawled");

                for slug in slugs {
                    if tx.send(Ok(slug)).await.is_err() {
                        debug!(%letter, "slug queue closed, stopping");
                        return;
                    }
                }
            })
        })
        .collect();

    close_when_done(handles, tx);
    rx
}
