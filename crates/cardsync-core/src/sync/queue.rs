//! Pending change queue: creation, compaction, ordering and replay

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::models::{
    CardKey, CardVariant, ChangeAction, ChangeId, CollectionCard, PendingChange,
};
use crate::sync::compare::build_card_map;
use crate::util::unix_timestamp_millis;

/// Queue a new local mutation, stamped with a fresh id and the current time
pub fn create_pending_change(
    card_id: impl Into<String>,
    variant: CardVariant,
    action: ChangeAction,
    quantity: u32,
    expected_server_quantity: Option<u32>,
    device_id: impl Into<String>,
) -> PendingChange {
    PendingChange {
        id: ChangeId::new(),
        card_id: card_id.into(),
        variant,
        action,
        quantity,
        expected_server_quantity,
        timestamp: unix_timestamp_millis(),
        device_id: device_id.into(),
    }
}

/// Sort changes by ascending timestamp without touching the input.
///
/// The sort is stable: changes sharing a timestamp keep their queue order.
pub fn sort_pending_changes(changes: &[PendingChange]) -> Vec<PendingChange> {
    let mut sorted = changes.to_vec();
    sorted.sort_by_key(|change| change.timestamp);
    sorted
}

/// Compact the queue to at most one change per card key.
///
/// Two adds (or two removes) accumulate their quantities and keep the
/// latest timestamp. Any other pair is last-write-wins by timestamp, ties
/// broken by change id, so the result never depends on input order.
pub fn merge_pending_changes(changes: &[PendingChange]) -> Vec<PendingChange> {
    let mut ordered = changes.to_vec();
    ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

    let mut merged: Vec<PendingChange> = Vec::with_capacity(ordered.len());
    let mut slots: HashMap<CardKey, usize> = HashMap::new();

    for change in ordered {
        let key = change.key();
        let Some(&slot) = slots.get(&key) else {
            slots.insert(key, merged.len());
            merged.push(change);
            continue;
        };

        let existing = &mut merged[slot];
        let accumulates = existing.action == change.action && change.action != ChangeAction::Update;
        if accumulates {
            existing.quantity = existing.quantity.saturating_add(change.quantity);
            existing.timestamp = existing.timestamp.max(change.timestamp);
            existing.device_id = change.device_id;
        } else {
            *existing = change;
        }
    }

    tracing::debug!(
        queued = changes.len(),
        compacted = merged.len(),
        "Compacted pending changes"
    );
    sort_pending_changes(&merged)
}

/// Replay queued changes on top of a snapshot.
///
/// Produces the locally-modified view of the collection, sorted by card key.
/// Removing more copies than owned leaves zero, and zero-quantity cards are
/// dropped.
pub fn apply_pending_changes(
    snapshot: &[CollectionCard],
    changes: &[PendingChange],
) -> Result<Vec<CollectionCard>> {
    let mut quantities: BTreeMap<CardKey, u32> = build_card_map(snapshot)?.into_iter().collect();

    for change in sort_pending_changes(changes) {
        let quantity = quantities.entry(change.key()).or_insert(0);
        *quantity = match change.action {
            ChangeAction::Add => quantity.saturating_add(change.quantity),
            ChangeAction::Remove => quantity.saturating_sub(change.quantity),
            ChangeAction::Update => change.quantity,
        };
    }

    Ok(quantities
        .into_iter()
        .filter(|(_, quantity)| *quantity > 0)
        .map(|(key, quantity)| CollectionCard::new(key.card_id, key.variant, quantity))
        .collect())
}

/// Drop changes the authoritative store has acknowledged
pub fn clear_applied_changes(
    changes: &[PendingChange],
    applied: &[ChangeId],
) -> Vec<PendingChange> {
    changes
        .iter()
        .filter(|change| !applied.contains(&change.id))
        .cloned()
        .collect()
}
