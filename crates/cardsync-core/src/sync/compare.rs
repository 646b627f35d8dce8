//! Snapshot diffing

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{CardKey, CardVariant, CollectionCard};

/// Quantity per card key for one snapshot
pub type CardMap = HashMap<CardKey, u32>;

/// Build a key to quantity map for a snapshot.
///
/// Two rows with the same key are rejected instead of overwriting each other.
pub fn build_card_map(cards: &[CollectionCard]) -> Result<CardMap> {
    let mut map = CardMap::with_capacity(cards.len());
    for card in cards {
        if map.insert(card.key(), card.quantity).is_some() {
            tracing::warn!(
                card_id = %card.card_id,
                variant = %card.variant,
                "Rejected snapshot with duplicate card key"
            );
            return Err(Error::DuplicateCard {
                card_id: card.card_id.clone(),
                variant: card.variant.to_string(),
            });
        }
    }
    Ok(map)
}

/// A card present on both sides with differing quantities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityConflict {
    pub card_id: String,
    pub variant: CardVariant,
    pub server_quantity: u32,
    pub client_quantity: u32,
}

impl QuantityConflict {
    #[must_use]
    pub fn key(&self) -> CardKey {
        CardKey::new(self.card_id.clone(), self.variant)
    }
}

/// Bucket sizes of a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub in_sync: usize,
    pub conflicts: usize,
    pub only_on_server: usize,
    pub only_on_client: usize,
    /// Number of distinct keys across both snapshots
    pub total_keys: usize,
}

/// Result of diffing a server snapshot against a client snapshot.
///
/// Every key of either snapshot lands in exactly one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionComparison {
    pub in_sync: Vec<CollectionCard>,
    pub conflicts: Vec<QuantityConflict>,
    pub only_on_server: Vec<CollectionCard>,
    pub only_on_client: Vec<CollectionCard>,
    pub has_conflicts: bool,
    pub summary: ComparisonSummary,
}

impl CollectionComparison {
    fn from_buckets(
        in_sync: Vec<CollectionCard>,
        conflicts: Vec<QuantityConflict>,
        only_on_server: Vec<CollectionCard>,
        only_on_client: Vec<CollectionCard>,
    ) -> Self {
        let summary = ComparisonSummary {
            in_sync: in_sync.len(),
            conflicts: conflicts.len(),
            only_on_server: only_on_server.len(),
            only_on_client: only_on_client.len(),
            total_keys: in_sync.len()
                + conflicts.len()
                + only_on_server.len()
                + only_on_client.len(),
        };
        let has_conflicts =
            !conflicts.is_empty() || !only_on_server.is_empty() || !only_on_client.is_empty();

        Self {
            in_sync,
            conflicts,
            only_on_server,
            only_on_client,
            has_conflicts,
            summary,
        }
    }

    /// Comparison of a snapshot against an identical copy of itself
    #[must_use]
    pub fn identical(cards: &[CollectionCard]) -> Self {
        Self::from_buckets(cards.to_vec(), Vec::new(), Vec::new(), Vec::new())
    }

    /// Number of one-sided entries
    #[must_use]
    pub fn one_sided_count(&self) -> usize {
        self.only_on_server.len() + self.only_on_client.len()
    }
}

/// Status of a single card key across both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    InSync,
    Conflict,
    OnlyServer,
    OnlyClient,
}

/// Diff two snapshots into in-sync, conflicting and one-sided buckets.
///
/// Bucket order follows the server snapshot, then the client snapshot for
/// client-only entries.
pub fn compare_collections(
    server: &[CollectionCard],
    client: &[CollectionCard],
) -> Result<CollectionComparison> {
    let server_map = build_card_map(server)?;
    let client_map = build_card_map(client)?;

    let mut in_sync = Vec::new();
    let mut conflicts = Vec::new();
    let mut only_on_server = Vec::new();

    for card in server {
        let key = card.key();
        let client_quantity = client_map.get(&key).copied();
        match (compare_card(&key, Some(card.quantity), client_quantity), client_quantity) {
            (CardStatus::Conflict, Some(client_quantity)) => conflicts.push(QuantityConflict {
                card_id: card.card_id.clone(),
                variant: card.variant,
                server_quantity: card.quantity,
                client_quantity,
            }),
            (CardStatus::OnlyServer, _) => only_on_server.push(card.clone()),
            _ => in_sync.push(card.clone()),
        }
    }

    let only_on_client = client
        .iter()
        .filter(|card| !server_map.contains_key(&card.key()))
        .cloned()
        .collect::<Vec<_>>();

    let comparison =
        CollectionComparison::from_buckets(in_sync, conflicts, only_on_server, only_on_client);
    tracing::debug!(
        in_sync = comparison.summary.in_sync,
        conflicts = comparison.summary.conflicts,
        only_on_server = comparison.summary.only_on_server,
        only_on_client = comparison.summary.only_on_client,
        "Compared collections"
    );
    Ok(comparison)
}

/// Classify one card key given the quantity each side holds, if any.
///
/// Absent on both sides counts as in sync.
pub fn compare_card(
    key: &CardKey,
    server_quantity: Option<u32>,
    client_quantity: Option<u32>,
) -> CardStatus {
    let status = match (server_quantity, client_quantity) {
        (None, None) => CardStatus::InSync,
        (Some(_), None) => CardStatus::OnlyServer,
        (None, Some(_)) => CardStatus::OnlyClient,
        (Some(server), Some(client)) if server == client => CardStatus::InSync,
        (Some(_), Some(_)) => CardStatus::Conflict,
    };
    tracing::trace!(card = %key, ?status, ?server_quantity, ?client_quantity, "Compared card");
    status
}
