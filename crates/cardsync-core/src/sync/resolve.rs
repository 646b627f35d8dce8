//! Strategy-based conflict resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::compare::{CollectionComparison, QuantityConflict};
use crate::error::Error;
use crate::models::{CardKey, CardVariant, CollectionCard};

/// Rule used to turn a conflict or one-sided entry into a single quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// The local (most recent) edit wins
    LastWriteWins,
    /// Keep whichever side owns more copies
    KeepHigher,
    /// Combine both sides' changes since the last known common quantity
    MergeAdd,
    ServerWins,
    ClientWins,
}

impl ResolutionStrategy {
    pub const ALL: [Self; 5] = [
        Self::LastWriteWins,
        Self::KeepHigher,
        Self::MergeAdd,
        Self::ServerWins,
        Self::ClientWins,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastWriteWins => "last_write_wins",
            Self::KeepHigher => "keep_higher",
            Self::MergeAdd => "merge_add",
            Self::ServerWins => "server_wins",
            Self::ClientWins => "client_wins",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == value)
            .ok_or_else(|| Error::InvalidStrategy(s.trim().to_string()))
    }
}

/// Side of the sync a one-sided entry exists on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Server,
    Client,
}

/// Shape of the difference a resolution was produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    QuantityMismatch,
    MissingOnServer,
    MissingOnClient,
}

/// Outcome of resolving one card key.
///
/// A `resolved_quantity` of zero removes the card from the merged collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResolution {
    pub card_id: String,
    pub variant: CardVariant,
    pub resolved_quantity: u32,
    pub strategy: ResolutionStrategy,
    /// Zero when the card is missing on the server
    pub server_quantity: u32,
    /// Zero when the card is missing on the client
    pub client_quantity: u32,
    pub conflict_type: ConflictType,
}

impl ConflictResolution {
    #[must_use]
    pub fn key(&self) -> CardKey {
        CardKey::new(self.card_id.clone(), self.variant)
    }

    /// Whether the card survives into the merged collection
    #[must_use]
    pub const fn keeps_card(&self) -> bool {
        self.resolved_quantity > 0
    }
}

/// Resolve a quantity held differently by server and client.
///
/// `merge_add` adds both sides' deltas relative to `expected_server_quantity`
/// and clamps at zero; without a known prior quantity it keeps the higher one.
pub fn resolve_quantity_conflict(
    server_quantity: u32,
    client_quantity: u32,
    expected_server_quantity: Option<u32>,
    strategy: ResolutionStrategy,
) -> u32 {
    match strategy {
        ResolutionStrategy::LastWriteWins | ResolutionStrategy::ClientWins => client_quantity,
        ResolutionStrategy::ServerWins => server_quantity,
        ResolutionStrategy::KeepHigher => server_quantity.max(client_quantity),
        ResolutionStrategy::MergeAdd => expected_server_quantity.map_or_else(
            || server_quantity.max(client_quantity),
            |expected| {
                let base = i64::from(expected);
                let server_delta = i64::from(server_quantity) - base;
                let client_delta = i64::from(client_quantity) - base;
                let merged = (base + server_delta + client_delta).max(0);
                u32::try_from(merged).unwrap_or(u32::MAX)
            },
        ),
    }
}

/// Resolve a card that exists on only one side.
///
/// Winner-takes-all strategies keep the card only when it exists on the
/// winning side (the client for `last_write_wins`). `keep_higher` and
/// `merge_add` always keep it.
pub fn resolve_missing_card_conflict(
    card: &CollectionCard,
    exists_on: Side,
    strategy: ResolutionStrategy,
) -> ConflictResolution {
    let keep = match strategy {
        ResolutionStrategy::ServerWins => exists_on == Side::Server,
        ResolutionStrategy::ClientWins | ResolutionStrategy::LastWriteWins => {
            exists_on == Side::Client
        }
        ResolutionStrategy::KeepHigher | ResolutionStrategy::MergeAdd => true,
    };

    let (server_quantity, client_quantity, conflict_type) = match exists_on {
        Side::Server => (card.quantity, 0, ConflictType::MissingOnClient),
        Side::Client => (0, card.quantity, ConflictType::MissingOnServer),
    };

    ConflictResolution {
        card_id: card.card_id.clone(),
        variant: card.variant,
        resolved_quantity: if keep { card.quantity } else { 0 },
        strategy,
        server_quantity,
        client_quantity,
        conflict_type,
    }
}

fn resolve_conflict(
    conflict: &QuantityConflict,
    strategy: ResolutionStrategy,
) -> ConflictResolution {
    ConflictResolution {
        card_id: conflict.card_id.clone(),
        variant: conflict.variant,
        resolved_quantity: resolve_quantity_conflict(
            conflict.server_quantity,
            conflict.client_quantity,
            None,
            strategy,
        ),
        strategy,
        server_quantity: conflict.server_quantity,
        client_quantity: conflict.client_quantity,
        conflict_type: ConflictType::QuantityMismatch,
    }
}

/// Resolve every conflict and one-sided entry of a comparison.
///
/// The bulk path has no shared prior quantity, so `merge_add` falls back to
/// keeping the higher quantity. Output order: conflicts, server-only,
/// client-only.
pub fn resolve_all_conflicts(
    comparison: &CollectionComparison,
    strategy: ResolutionStrategy,
) -> Vec<ConflictResolution> {
    let conflicts = comparison
        .conflicts
        .iter()
        .map(|conflict| resolve_conflict(conflict, strategy));
    let server_only = comparison
        .only_on_server
        .iter()
        .map(|card| resolve_missing_card_conflict(card, Side::Server, strategy));
    let client_only = comparison
        .only_on_client
        .iter()
        .map(|card| resolve_missing_card_conflict(card, Side::Client, strategy));

    conflicts.chain(server_only).chain(client_only).collect()
}

/// Fold resolutions into the untouched in-sync cards.
///
/// Resolutions that resolved to zero are dropped, as are zero-quantity rows.
pub fn apply_resolutions(
    in_sync: &[CollectionCard],
    resolutions: &[ConflictResolution],
) -> Vec<CollectionCard> {
    in_sync
        .iter()
        .filter(|card| card.quantity > 0)
        .cloned()
        .chain(
            resolutions
                .iter()
                .filter(|resolution| resolution.keeps_card())
                .map(|resolution| {
                    CollectionCard::new(
                        resolution.card_id.clone(),
                        resolution.variant,
                        resolution.resolved_quantity,
                    )
                }),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::compare::compare_collections;
    use pretty_assertions::assert_eq;

    #[test]
    fn strategy_parse_accepts_wire_names() {
        for strategy in ResolutionStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<ResolutionStrategy>().unwrap(), strategy);
        }
        assert_eq!(
            "Keep-Higher".parse::<ResolutionStrategy>().unwrap(),
            ResolutionStrategy::KeepHigher
        );
        assert!("newest".parse::<ResolutionStrategy>().is_err());
    }

    #[test]
    fn winner_strategies_pick_a_side() {
        assert_eq!(resolve_quantity_conflict(2, 5, None, ResolutionStrategy::ServerWins), 2);
        assert_eq!(resolve_quantity_conflict(2, 5, None, ResolutionStrategy::ClientWins), 5);
        assert_eq!(resolve_quantity_conflict(7, 5, None, ResolutionStrategy::LastWriteWins), 5);
    }

    #[test]
    fn keep_higher_returns_max() {
        assert_eq!(resolve_quantity_conflict(2, 5, None, ResolutionStrategy::KeepHigher), 5);
        assert_eq!(resolve_quantity_conflict(9, 5, Some(1), ResolutionStrategy::KeepHigher), 9);
    }

    #[test]
    fn merge_add_combines_independent_adds() {
        assert_eq!(resolve_quantity_conflict(5, 4, Some(2), ResolutionStrategy::MergeAdd), 7);
    }

    #[test]
    fn merge_add_clamps_at_zero() {
        assert_eq!(resolve_quantity_conflict(3, 2, Some(8), ResolutionStrategy::MergeAdd), 0);
        assert_eq!(
            resolve_quantity_conflict(0, 0, Some(u32::MAX), ResolutionStrategy::MergeAdd),
            0
        );
    }

    #[test]
    fn merge_add_saturates_at_max() {
        assert_eq!(
            resolve_quantity_conflict(u32::MAX, u32::MAX, Some(0), ResolutionStrategy::MergeAdd),
            u32::MAX
        );
    }

    #[test]
    fn merge_add_without_expected_keeps_higher() {
        assert_eq!(resolve_quantity_conflict(3, 6, None, ResolutionStrategy::MergeAdd), 6);
    }

    #[test]
    fn missing_card_follows_winning_side() {
        let card = CollectionCard::new("sv1-4", CardVariant::Normal, 3);

        let kept =
            resolve_missing_card_conflict(&card, Side::Server, ResolutionStrategy::ServerWins);
        assert_eq!(kept.resolved_quantity, 3);
        assert_eq!(kept.conflict_type, ConflictType::MissingOnClient);
        assert_eq!((kept.server_quantity, kept.client_quantity), (3, 0));

        let dropped =
            resolve_missing_card_conflict(&card, Side::Server, ResolutionStrategy::LastWriteWins);
        assert_eq!(dropped.resolved_quantity, 0);
        assert!(!dropped.keeps_card());

        let client_side =
            resolve_missing_card_conflict(&card, Side::Client, ResolutionStrategy::ServerWins);
        assert_eq!(client_side.resolved_quantity, 0);
        assert_eq!(client_side.conflict_type, ConflictType::MissingOnServer);
    }

    #[test]
    fn missing_card_always_kept_by_additive_strategies() {
        let card = CollectionCard::new("sv1-4", CardVariant::Holofoil, 2);
        for strategy in [ResolutionStrategy::KeepHigher, ResolutionStrategy::MergeAdd] {
            for side in [Side::Server, Side::Client] {
                let resolution = resolve_missing_card_conflict(&card, side, strategy);
                assert_eq!(resolution.resolved_quantity, 2);
            }
        }
    }

    #[test]
    fn resolve_all_and_apply_mixed_sync() {
        let server = vec![
            CollectionCard::new("A", CardVariant::Normal, 5),
            CollectionCard::new("B", CardVariant::Holofoil, 1),
            CollectionCard::new("C", CardVariant::Normal, 3),
        ];
        let client = vec![
            CollectionCard::new("A", CardVariant::Normal, 5),
            CollectionCard::new("B", CardVariant::Holofoil, 2),
            CollectionCard::new("D", CardVariant::Normal, 1),
        ];
        let comparison = compare_collections(&server, &client).unwrap();

        let resolutions = resolve_all_conflicts(&comparison, ResolutionStrategy::KeepHigher);
        assert_eq!(resolutions.len(), 3);
        assert_eq!(resolutions[0].conflict_type, ConflictType::QuantityMismatch);
        assert_eq!(resolutions[1].conflict_type, ConflictType::MissingOnClient);
        assert_eq!(resolutions[2].conflict_type, ConflictType::MissingOnServer);

        let merged = apply_resolutions(&comparison.in_sync, &resolutions);
        assert_eq!(
            merged,
            vec![
                CollectionCard::new("A", CardVariant::Normal, 5),
                CollectionCard::new("B", CardVariant::Holofoil, 2),
                CollectionCard::new("C", CardVariant::Normal, 3),
                CollectionCard::new("D", CardVariant::Normal, 1),
            ]
        );
    }

    #[test]
    fn apply_resolutions_drops_zero_quantities() {
        let in_sync = vec![
            CollectionCard::new("A", CardVariant::Normal, 1),
            CollectionCard::new("Z", CardVariant::Normal, 0),
        ];
        let card = CollectionCard::new("C", CardVariant::Normal, 3);
        let resolutions = vec![resolve_missing_card_conflict(
            &card,
            Side::Server,
            ResolutionStrategy::ClientWins,
        )];

        let merged = apply_resolutions(&in_sync, &resolutions);
        assert_eq!(merged, vec![CollectionCard::new("A", CardVariant::Normal, 1)]);
    }
}
