//! Collection reconciliation engine
//!
//! Diffs a server snapshot against a locally-modified snapshot, resolves
//! every difference with a chosen [`ResolutionStrategy`], and folds the
//! result into a merged collection. Nothing here performs I/O or keeps state
//! between calls.

mod advisor;
mod checksum;
mod compare;
mod queue;
mod resolve;
mod status;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::CollectionCard;
use crate::snapshot::normalize_collection;

pub use advisor::get_recommended_strategy;
pub use checksum::{calculate_checksum, checksums_match};
pub use compare::{
    build_card_map, compare_card, compare_collections, CardMap, CardStatus, CollectionComparison,
    ComparisonSummary, QuantityConflict,
};
pub use queue::{
    apply_pending_changes, clear_applied_changes, create_pending_change, merge_pending_changes,
    sort_pending_changes,
};
pub use resolve::{
    apply_resolutions, resolve_all_conflicts, resolve_missing_card_conflict,
    resolve_quantity_conflict, ConflictResolution, ConflictType, ResolutionStrategy, Side,
};
pub use status::{get_sync_status, get_sync_status_at};

/// Full outcome of one compare/resolve cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub comparison: CollectionComparison,
    pub strategy: ResolutionStrategy,
    pub resolutions: Vec<ConflictResolution>,
    /// Merged collection, sorted by card key
    pub merged: Vec<CollectionCard>,
    /// Checksum of `merged`
    pub checksum: i32,
}

/// Reconcile a server snapshot with a client snapshot using `strategy`.
///
/// Both snapshots are validated first. Snapshots holding the same cards skip
/// the full diff and treat every server card as in sync.
pub fn reconcile(
    server: &[CollectionCard],
    client: &[CollectionCard],
    strategy: ResolutionStrategy,
) -> Result<Reconciliation> {
    let server = normalize_collection(server)?;
    let client = normalize_collection(client)?;

    let comparison = if same_collection(&server, &client) {
        tracing::debug!(cards = server.len(), "Snapshots identical, skipping full comparison");
        CollectionComparison::identical(&server)
    } else {
        compare_collections(&server, &client)?
    };

    let resolutions = resolve_all_conflicts(&comparison, strategy);
    let mut merged = apply_resolutions(&comparison.in_sync, &resolutions);
    merged.sort_by_key(CollectionCard::key);
    let checksum = calculate_checksum(&merged);

    tracing::info!(
        strategy = %strategy,
        resolved = resolutions.len(),
        merged = merged.len(),
        "Reconciled collection"
    );

    Ok(Reconciliation {
        comparison,
        strategy,
        resolutions,
        merged,
        checksum,
    })
}

/// A checksum mismatch settles it; matching checksums can collide, so the
/// rows are compared as well.
fn same_collection(server: &[CollectionCard], client: &[CollectionCard]) -> bool {
    if server.len() != client.len()
        || !checksums_match(calculate_checksum(server), calculate_checksum(client))
    {
        return false;
    }

    let mut server = server.to_vec();
    let mut client = client.to_vec();
    server.sort_by_key(CollectionCard::key);
    client.sort_by_key(CollectionCard::key);
    server == client
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardVariant;
    use pretty_assertions::assert_eq;

    #[test]
    fn reconcile_identical_snapshots_short_circuits() {
        let server = vec![
            CollectionCard::new("sv1-2", CardVariant::Normal, 1),
            CollectionCard::new("sv1-1", CardVariant::Normal, 2),
        ];
        let mut client = server.clone();
        client.reverse();

        let outcome = reconcile(&server, &client, ResolutionStrategy::ServerWins).unwrap();
        assert!(!outcome.comparison.has_conflicts);
        assert!(outcome.resolutions.is_empty());
        assert_eq!(
            outcome.merged,
            vec![
                CollectionCard::new("sv1-1", CardVariant::Normal, 2),
                CollectionCard::new("sv1-2", CardVariant::Normal, 1),
            ]
        );
        assert_eq!(outcome.checksum, calculate_checksum(&server));
    }

    #[test]
    fn reconcile_rejects_duplicate_rows() {
        let client = vec![
            CollectionCard::new("sv1-1", CardVariant::Normal, 2),
            CollectionCard::new("sv1-1", CardVariant::Normal, 3),
        ];
        assert!(reconcile(&[], &client, ResolutionStrategy::KeepHigher).is_err());
    }

    #[test]
    fn reconcile_server_wins_drops_client_only_cards() {
        let server = vec![CollectionCard::new("sv1-1", CardVariant::Normal, 2)];
        let client = vec![
            CollectionCard::new("sv1-1", CardVariant::Normal, 4),
            CollectionCard::new("sv1-7", CardVariant::Holofoil, 1),
        ];

        let outcome = reconcile(&server, &client, ResolutionStrategy::ServerWins).unwrap();
        assert_eq!(outcome.merged, server);
        assert_eq!(outcome.resolutions.len(), 2);
    }

    #[test]
    fn reconcile_diffs_snapshots_with_colliding_checksums() {
        let server = vec![CollectionCard::new("Aa", CardVariant::Normal, 1)];
        let client = vec![CollectionCard::new("BB", CardVariant::Normal, 1)];
        assert_eq!(calculate_checksum(&server), calculate_checksum(&client));
        assert!(!same_collection(&server, &client));

        let outcome = reconcile(&server, &client, ResolutionStrategy::KeepHigher).unwrap();
        assert!(outcome.comparison.has_conflicts);
        assert_eq!(outcome.comparison.only_on_server, server);
        assert_eq!(outcome.comparison.only_on_client, client);
        assert_eq!(
            outcome.merged,
            vec![
                CollectionCard::new("Aa", CardVariant::Normal, 1),
                CollectionCard::new("BB", CardVariant::Normal, 1),
            ]
        );
    }
}
