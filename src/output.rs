// src/output.rs
// =============================================================================
// The consumer end of both pipelines.
//
// It drains a result queue, applies the failure policy to failed jobs and
// writes what survives:
// - slugs: one per line
// - records: a tab-separated table (or JSON lines) of the commonly used
//   idioms only
//
// Rows are flushed as they arrive, so output already written stays written
// even if a later job aborts the run.
// =============================================================================

use std::io::Write;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::warn;

use crate::config::OutputFormat;
use crate::error::{FailurePolicy, JobOutcome};
use crate::extract::IdiomRecord;

pub const TABLE_HEADER: &str = "Idiom\tMeaning";

/// Counters for one drained queue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Items that arrived successfully
    pub received: usize,
    /// Items written to the output
    pub written: usize,
    /// Records dropped because they are not commonly used
    pub filtered: usize,
    /// Failed jobs skipped under FailurePolicy::Skip
    pub failed: usize,
}

// Unwraps one outcome according to the policy
//
// Ok(Some(item)) to keep going with an item, Ok(None) for a skipped
// failure, Err to abort the run.
fn apply_policy<T>(
    outcome: JobOutcome<T>,
    policy: FailurePolicy,
    summary: &mut Summary,
) -> Result<Option<T>> {
    match outcome {
        Ok(item) => {
            summary.received += 1;
            Ok(Some(item))
        }
        Err(e) => match policy {
            FailurePolicy::Abort => Err(e.into()),
            FailurePolicy::Skip => {
                warn!(error = %e, "skipping failed page");
                summary.failed += 1;
                Ok(None)
            }
        },
    }
}

// Writes every slug on its own line, in arrival order
pub async fn write_slugs<W: Write>(
    slugs: &mut mpsc::Receiver<JobOutcome<String>>,
    mut writer: W,
    policy: FailurePolicy,
) -> Result<Summary> {
    let mut summary = Summary::default();

    while let Some(outcome) = slugs.recv().await {
        if let Some(slug) = apply_policy(outcome, policy, &mut summary)? {
            writeln!(writer, "{}", slug)?;
            summary.written += 1;
        }
    }

    writer.flush()?;
    Ok(summary)
}

// Writes the commonly used records
//
// TSV output starts with a header line even when no row follows. A record
// is kept only if its usage marker equals COMMONLY_USED exactly.
pub async fn write_records<W: Write>(
    records: &mut mpsc::Receiver<JobOutcome<IdiomRecord>>,
    mut writer: W,
    policy: FailurePolicy,
    format: OutputFormat,
) -> Result<Summary> {
    let mut summary = Summary::default();

    if format == OutputFormat::Tsv {
        writeln!(writer, "{}", TABLE_HEADER)?;
        writer.flush()?;
    }

    while let Some(outcome) = records.recv().await {
        let Some(record) = apply_policy(outcome, policy, &mut summary)? else {
            continue;
        };

        if !record.is_commonly_used() {
            summary.filtered += 1;
            continue;
        }

        match format {
            OutputFormat::Tsv => writeln!(writer, "{}\t{}", record.idiom, record.definition)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut writer, &record)?;
                writeln!(writer)?;
            }
        }
        writer.flush()?;
        summary.written += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;
    use reqwest::StatusCode;

    fn record(idiom: &str, usage: &str) -> IdiomRecord {
        IdiomRecord {
            idiom: idiom.to_string(),
            usage: usage.to_string(),
            definition: format!("def {idiom}"),
        }
    }

    fn failure() -> CrawlError {
        CrawlError::Status {
            url: "http://example.com/x".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    async fn queue<T: Send + 'static>(items: Vec<JobOutcome<T>>) -> mpsc::Receiver<JobOutcome<T>> {
        let (tx, rx) = mpsc::channel(items.len().max(1));
        for item in items {
            tx.send(item).await.unwrap();
        }
        rx
    }

    #[tokio::test]
    async fn test_only_commonly_used_rows() {
        let mut rx = queue(vec![
            Ok(record("uno", "Muy usado")),
            Ok(record("dos", "Poco usado")),
            Ok(record("tres", "muy usado")),
            Ok(record("cuatro", "Muy usado ")),
        ])
        .await;

        let mut out = Vec::new();
        let summary = write_records(&mut rx, &mut out, FailurePolicy::Abort, OutputFormat::Tsv)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Idiom\tMeaning\nuno\tdef uno\n");
        assert_eq!(summary.received, 4);
        assert_eq!(summary.written, 1);
        assert_eq!(summary.filtered, 3);
    }

    #[tokio::test]
    async fn test_empty_stream_prints_header_only() {
        let mut rx = queue::<IdiomRecord>(vec![]).await;
        let mut out = Vec::new();
        let summary = write_records(&mut rx, &mut out, FailurePolicy::Abort, OutputFormat::Tsv)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Idiom\tMeaning\n");
        assert_eq!(summary, Summary::default());
    }

    #[tokio::test]
    async fn test_abort_keeps_rows_already_written() {
        let mut rx = queue(vec![
            Ok(record("uno", "Muy usado")),
            Err(failure()),
            Ok(record("dos", "Muy usado")),
        ])
        .await;

        let mut out = Vec::new();
        let err = write_records(&mut rx, &mut out, FailurePolicy::Abort, OutputFormat::Tsv)
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<CrawlError>().is_some());
        assert_eq!(String::from_utf8(out).unwrap(), "Idiom\tMeaning\nuno\tdef uno\n");
    }

    #[tokio::test]
    async fn test_skip_counts_failures() {
        let mut rx = queue(vec![
            Err(failure()),
            Ok(record("uno", "Muy usado")),
            Err(failure()),
        ])
        .await;

        let mut out = Vec::new();
        let summary = write_records(&mut rx, &mut out, FailurePolicy::Skip, OutputFormat::Tsv)
            .await
            .unwrap();

        assert_eq!(summary.failed, 2);
        assert_eq!(summary.written, 1);
    }

    #[tokio::test]
    async fn test_json_lines() {
        let mut rx = queue(vec![Ok(record("uno", "Muy usado")), Ok(record("dos", "Poco usado"))]).await;

        let mut out = Vec::new();
        write_records(&mut rx, &mut out, FailurePolicy::Abort, OutputFormat::Json)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["idiom"], "uno");
        assert_eq!(value["usage"], "Muy usado");
        assert_eq!(value["definition"], "def uno");
    }

    #[tokio::test]
    async fn test_records_to_locked_stdout() {
        // JSON with nothing kept writes no bytes, so the test output stays clean
        let mut rx = queue(vec![Ok(record("dos", "Poco usado"))]).await;
        let summary = write_records(
            &mut rx,
            std::io::stdout().lock(),
            FailurePolicy::Abort,
            OutputFormat::Json,
        )
        .await
        .unwrap();
        assert_eq!(summary.filtered, 1);
        assert_eq!(summary.written, 0);
    }

    #[tokio::test]
    async fn test_write_slugs() {
        let mut rx = queue(vec![Ok("a".to_string()), Err(failure()), Ok("b".to_string())]).await;

        let mut out = Vec::new();
        let summary = write_slugs(&mut rx, &mut out, FailurePolicy::Skip).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
        assert_eq!(summary.written, 2);
        assert_eq!(summary.failed, 1);
    }
}
