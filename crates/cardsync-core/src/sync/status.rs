//! Sync status classification

use super::compare::CollectionComparison;
use crate::models::{PendingChange, SyncState, SyncStatus};
use crate::util::unix_timestamp_millis;

/// Derive the sync status shown to the user.
///
/// A sync in flight outranks everything; a missing comparison means the
/// snapshots could not be read and is reported as an error.
pub fn get_sync_status(
    comparison: Option<&CollectionComparison>,
    pending_changes: &[PendingChange],
    is_syncing: bool,
) -> SyncStatus {
    get_sync_status_at(
        comparison,
        pending_changes,
        is_syncing,
        unix_timestamp_millis(),
    )
}

/// Same as [`get_sync_status`] with an explicit clock (Unix ms)
pub fn get_sync_status_at(
    comparison: Option<&CollectionComparison>,
    pending_changes: &[PendingChange],
    is_syncing: bool,
    now_ms: i64,
) -> SyncStatus {
    let conflict_count = comparison.map_or(0, |comparison| comparison.conflicts.len());

    let state = match comparison {
        _ if is_syncing => SyncState::Syncing,
        None => SyncState::Error,
        Some(comparison) if comparison.has_conflicts || !pending_changes.is_empty() => {
            SyncState::NeedsSync
        }
        Some(_) => SyncState::Synced,
    };

    SyncStatus {
        state,
        last_sync_timestamp: (state == SyncState::Synced).then_some(now_ms),
        pending_changes: pending_changes.len(),
        conflict_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardVariant, ChangeAction, CollectionCard};
    use crate::sync::compare::compare_collections;
    use crate::sync::queue::create_pending_change;
    use pretty_assertions::assert_eq;

    fn conflicting() -> CollectionComparison {
        compare_collections(
            &[CollectionCard::new("sv1-1", CardVariant::Normal, 2)],
            &[CollectionCard::new("sv1-1", CardVariant::Normal, 5)],
        )
        .unwrap()
    }

    #[test]
    fn syncing_outranks_everything() {
        let status = get_sync_status_at(None, &[], true, 10);
        assert_eq!(status.state, SyncState::Syncing);
        assert_eq!(status.last_sync_timestamp, None);

        let comparison = conflicting();
        let status = get_sync_status_at(Some(&comparison), &[], true, 10);
        assert_eq!(status.state, SyncState::Syncing);
        assert_eq!(status.conflict_count, 1);
    }

    #[test]
    fn missing_comparison_is_error() {
        let status = get_sync_status_at(None, &[], false, 10);
        assert_eq!(status.state, SyncState::Error);
        assert_eq!(status.conflict_count, 0);
    }

    #[test]
    fn conflicts_need_sync() {
        let comparison = conflicting();
        let status = get_sync_status_at(Some(&comparison), &[], false, 10);
        assert_eq!(
            status,
            SyncStatus {
                state: SyncState::NeedsSync,
                last_sync_timestamp: None,
                pending_changes: 0,
                conflict_count: 1,
            }
        );
    }

    #[test]
    fn pending_changes_need_sync() {
        let comparison = CollectionComparison::identical(&[]);
        let pending = vec![create_pending_change(
            "sv1-1",
            CardVariant::Normal,
            ChangeAction::Add,
            1,
            None,
            "phone",
        )];
        let status = get_sync_status_at(Some(&comparison), &pending, false, 10);
        assert_eq!(status.state, SyncState::NeedsSync);
        assert_eq!(status.pending_changes, 1);
    }

    #[test]
    fn clean_comparison_is_synced_now() {
        let comparison = CollectionComparison::identical(&[]);
        let status = get_sync_status_at(Some(&comparison), &[], false, 1_700_000_000_000);
        assert_eq!(status.state, SyncState::Synced);
        assert_eq!(status.last_sync_timestamp, Some(1_700_000_000_000));
    }
}
