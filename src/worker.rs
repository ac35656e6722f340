//! Run splits off the calling task
//!
//! Splitting large scripts on every keystroke can stall an interactive thread.
//! These helpers move the scan onto tokio's blocking pool.
use crate::{
    range::StatementRange,
    result::{Result, SplitterError},
    scanner::StatementSplitter,
};
use tokio::task::{JoinError, JoinHandle};

fn worker_error(err: JoinError) -> SplitterError {
    SplitterError::Worker(err.to_string())
}

fn spawn_split(splitter: StatementSplitter, text: String) -> JoinHandle<Vec<StatementRange>> {
    tokio::task::spawn_blocking(move || splitter.split(&text))
}

/// Split a single buffer on the blocking pool
pub async fn split_in_background(
    splitter: StatementSplitter,
    text: String,
) -> Result<Vec<StatementRange>> {
    spawn_split(splitter, text).await.map_err(worker_error)
}

/// Split several buffers concurrently; results keep the input order
pub async fn split_batch(
    splitter: &StatementSplitter,
    texts: Vec<String>,
) -> Result<Vec<Vec<StatementRange>>> {
    let handles: Vec<_> = texts
        .into_iter()
        .map(|text| spawn_split(splitter.clone(), text))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.map_err(worker_error)?);
    }

    tracing::debug!(buffers = results.len(), "batch split finished");
    Ok(results)
}
