// src/crawl/detail.rs
// =============================================================================
// The detail crawler: turns slugs into idiom records.
//
// How it works:
// 1. `feed_lines` reads slugs, one per line, into the job queue
// 2. A pool of workers fetches `<base>/<slug>` and extracts one record each
// 3. Records (or fetch errors) arrive on the result queue in completion
//    order, not input order
// =============================================================================

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use super::pool::run_pool;
use crate::error::{CrawlError, JobOutcome};
use crate::extract::{extract_record, IdiomRecord};
use crate::fetch::HttpFetcher;

// Starts `workers` detail workers pulling slugs from `jobs`
pub fn crawl_details(
    fetcher: HttpFetcher,
    jobs: mpsc::Receiver<String>,
    workers: usize,
    capacity: usize,
) -> mpsc::Receiver<JobOutcome<IdiomRecord>> {
    run_pool(jobs, workers, capacity, move |slug: String| {
        let fetcher = fetcher.clone();
        async move {
            let url = fetcher.detail_url(&slug);
            let html = fetcher.fetch_page(&url).await?;
            let record = extract_record(&html);
            debug!(%slug, usage = %record.usage, "detail page extracted");
            Ok::<_, CrawlError>(record)
        }
    })
}

// Feeds the job queue from `reader`, one slug per line, in input order
//
// Surrounding whitespace is trimmed and blank lines are skipped. Dropping
// `jobs` on return closes the queue; jobs already queued are still served.
// Returns how many slugs were queued.
pub async fn feed_lines<R>(reader: R, jobs: mpsc::Sender<String>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut queued = 0;

    while let Some(line) = lines.next_line().await? {
        let slug = line.trim();
        if slug.is_empty() {
            continue;
        }
        if jobs.send(slug.to_string()).await.is_err() {
            debug!("job queue closed, stop reading input");
            break;
        }
        queued += 1;
    }

    Ok(queued)
}
