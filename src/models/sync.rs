use serde::Serialize;

use crate::league::window::SyncWindow;

/// Result of one sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub window: SyncWindow,
    /// Records returned by the provider.
    pub fetched: usize,
    /// Rows removed by the delete step (always 0 in upsert mode).
    pub deleted: u64,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed_fixture_ids: Vec<i64>,
}

impl SyncOutcome {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}
