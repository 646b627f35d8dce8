//! Sync status model

use serde::{Deserialize, Serialize};
use std::fmt;

/// User-facing sync state, derived on every observation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Synced,
    NeedsSync,
    Syncing,
    Error,
}

impl SyncState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::NeedsSync => "needs_sync",
            Self::Syncing => "syncing",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived sync status for one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub state: SyncState,
    /// Set only when the state is `Synced` (Unix ms)
    pub last_sync_timestamp: Option<i64>,
    /// Number of queued local changes
    pub pending_changes: usize,
    /// Number of quantity conflicts in the comparison
    pub conflict_count: usize,
}
