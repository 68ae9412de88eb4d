// Source trait for traffic snapshots
use crate::domain::point::Snapshot;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status.
    #[error("snapshot endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("snapshot request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The payload was not JSON or did not have the expected shape.
    #[error("malformed snapshot payload: {0}")]
    Parse(String),

    #[error("snapshot fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The fetch task died before producing a result.
    #[error("snapshot fetch aborted: {0}")]
    Aborted(String),
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current state of every monitored location.
    ///
    /// A payload without a point list yields an empty snapshot, not an error.
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError>;
}
