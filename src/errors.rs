use thiserror::Error;

/// Failure taxonomy of a fixture sync run. Everything before the destructive
/// delete aborts the run untouched; `RowInsertFailed` is row-scoped.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Secret unavailable: {0}")]
    SecretUnavailable(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Insert failed for fixture {fixture_id}: {reason}")]
    RowInsertFailed { fixture_id: i64, reason: String },

    #[error("Fixture {fixture_id} has an out of range kickoff timestamp {timestamp}")]
    InvalidTimestamp { fixture_id: i64, timestamp: i64 },
}

impl SyncError {
    /// Row-scoped failures are counted by the synchronizer instead of failing the run.
    pub fn is_row_scoped(&self) -> bool {
        matches!(self, SyncError::RowInsertFailed { .. } | SyncError::InvalidTimestamp { .. })
    }
}
