use std::path::PathBuf;

use cardsync_core::snapshot::load_queue;
use cardsync_core::sync::{compare_collections, get_sync_status, CollectionComparison};
use cardsync_core::SyncState;

use crate::cli::SnapshotArgs;
use crate::commands::common::{format_timestamp, load_snapshot_pair, resolve_queue_path};
use crate::error::CliError;

pub fn run_status(
    snapshots: &SnapshotArgs,
    queue_path: Option<PathBuf>,
    is_syncing: bool,
    as_json: bool,
) -> Result<(), CliError> {
    let comparison = load_comparison(snapshots);
    let pending = load_queue(&resolve_queue_path(queue_path))?;
    let status = get_sync_status(comparison.as_ref(), &pending, is_syncing);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("state: {}", status.state);
    println!("pending changes: {}", status.pending_changes);
    println!("conflicts: {}", status.conflict_count);
    if let Some(timestamp) = status.last_sync_timestamp {
        println!("last sync: {}", format_timestamp(timestamp));
    }
    if status.state == SyncState::NeedsSync && status.conflict_count > 0 {
        println!("Run `cardsync resolve` to pick a strategy.");
    }
    Ok(())
}

/// Unreadable snapshots surface as an error state instead of failing the command
fn load_comparison(snapshots: &SnapshotArgs) -> Option<CollectionComparison> {
    let comparison = load_snapshot_pair(snapshots).and_then(|(server, client)| {
        compare_collections(&server, &client).map_err(CliError::from)
    });
    match comparison {
        Ok(comparison) => Some(comparison),
        Err(error) => {
            tracing::warn!("Could not compare snapshots: {error}");
            None
        }
    }
}
