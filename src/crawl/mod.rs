// src/crawl/mod.rs
// =============================================================================
// This module holds the two crawling pipelines.
//
// Both share one shape: fan out over a fixed amount of work, fan the results
// back into a single queue that one consumer drains.
// - index: one task per letter, slugs out
// - detail: a bounded pool of workers, slugs in, idiom records out
//
// Queues are tokio mpsc channels with a small capacity, so a slow consumer
// holds the workers back instead of letting results pile up in memory.
// =============================================================================

mod detail;
mod index;
mod pool;

pub use detail::{crawl_details, feed_lines};
pub use index::{crawl_index, LETTERS};
