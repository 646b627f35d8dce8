//! Snapshot and queue files.
//!
//! Validation happens here, before anything reaches the engine: card ids are
//! trimmed and must be non-empty, duplicate card keys are rejected, and
//! zero-quantity rows are dropped since absence already means zero. Unknown
//! variants and negative or fractional quantities fail at parse time.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{CardKey, CollectionCard, PendingChange};

/// Validate a snapshot received from outside the engine
pub fn normalize_collection(cards: &[CollectionCard]) -> Result<Vec<CollectionCard>> {
    let mut seen: HashSet<CardKey> = HashSet::with_capacity(cards.len());
    let mut normalized = Vec::with_capacity(cards.len());

    for card in cards {
        let card_id = card.card_id.trim();
        if card_id.is_empty() {
            return Err(Error::InvalidInput("card_id must not be empty".to_string()));
        }

        let card = CollectionCard::new(card_id, card.variant, card.quantity);
        if !seen.insert(card.key()) {
            tracing::warn!(card = %card.key(), "Rejected snapshot with duplicate card key");
            return Err(Error::DuplicateCard {
                card_id: card.card_id,
                variant: card.variant.to_string(),
            });
        }

        if card.quantity == 0 {
            tracing::warn!(card = %card.key(), "Dropping zero-quantity row");
            continue;
        }
        normalized.push(card);
    }

    Ok(normalized)
}

/// Parse and validate a snapshot from a JSON array of cards
pub fn parse_snapshot(payload: &str) -> Result<Vec<CollectionCard>> {
    let cards: Vec<CollectionCard> = serde_json::from_str(payload)?;
    normalize_collection(&cards)
}

/// Read and validate a snapshot file
pub fn load_snapshot(path: &Path) -> Result<Vec<CollectionCard>> {
    let raw = std::fs::read_to_string(path)?;
    parse_snapshot(&raw)
}

/// Render a snapshot as pretty-printed JSON sorted by card key
pub fn render_snapshot(cards: &[CollectionCard]) -> serde_json::Result<String> {
    let mut sorted = cards.to_vec();
    sorted.sort_by_key(CollectionCard::key);
    serde_json::to_string_pretty(&sorted)
}

/// Parse a pending change queue from a JSON array
pub fn parse_queue(payload: &str) -> Result<Vec<PendingChange>> {
    let changes: Vec<PendingChange> = serde_json::from_str(payload)?;
    if let Some(change) = changes.iter().find(|change| change.card_id.trim().is_empty()) {
        return Err(Error::InvalidInput(format!(
            "pending change {} has an empty card_id",
            change.id
        )));
    }
    Ok(changes)
}

/// Read a queue file; a missing file is an empty queue
pub fn load_queue(path: &Path) -> Result<Vec<PendingChange>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)?;
    parse_queue(&raw)
}

/// Render a queue as pretty-printed JSON
pub fn render_queue(changes: &[PendingChange]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardVariant, ChangeAction};
    use crate::sync::create_pending_change;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_trims_and_drops_zero_rows() {
        let cards = vec![
            CollectionCard::new(" sv1-1 ", CardVariant::Normal, 2),
            CollectionCard::new("sv1-2", CardVariant::Normal, 0),
        ];
        let normalized = normalize_collection(&cards).unwrap();
        assert_eq!(
            normalized,
            vec![CollectionCard::new("sv1-1", CardVariant::Normal, 2)]
        );
    }

    #[test]
    fn normalize_rejects_empty_card_id() {
        let cards = vec![CollectionCard::new("  ", CardVariant::Normal, 2)];
        assert!(matches!(
            normalize_collection(&cards),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn normalize_rejects_duplicates_after_trimming() {
        let cards = vec![
            CollectionCard::new("sv1-1", CardVariant::Normal, 2),
            CollectionCard::new("sv1-1 ", CardVariant::Normal, 1),
        ];
        assert!(matches!(
            normalize_collection(&cards),
            Err(Error::DuplicateCard { .. })
        ));
    }

    #[test]
    fn parse_snapshot_rejects_unknown_variant() {
        let payload = r#"[{"card_id":"sv1-1","variant":"goldStar","quantity":1}]"#;
        assert!(matches!(
            parse_snapshot(payload),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn parse_snapshot_reads_cards() {
        let payload = r#"
        [
          {"card_id": "sv1-1", "variant": "normal", "quantity": 2},
          {"card_id": "sv1-1", "variant": "reverseHolofoil", "quantity": 1}
        ]
        "#;
        let cards = parse_snapshot(payload).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].variant, CardVariant::ReverseHolofoil);
    }

    #[test]
    fn render_snapshot_sorts_by_key() {
        let cards = vec![
            CollectionCard::new("sv1-2", CardVariant::Normal, 1),
            CollectionCard::new("sv1-1", CardVariant::Normal, 2),
        ];
        let rendered = render_snapshot(&cards).unwrap();
        let reparsed = parse_snapshot(&rendered).unwrap();
        assert_eq!(reparsed[0].card_id, "sv1-1");
        assert_eq!(reparsed[1].card_id, "sv1-2");
    }

    #[test]
    fn load_queue_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let queue = load_queue(&dir.path().join("queue.json")).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");
        let changes = vec![create_pending_change(
            "sv1-1",
            CardVariant::Holofoil,
            ChangeAction::Add,
            2,
            Some(1),
            "tablet",
        )];

        std::fs::write(&path, render_queue(&changes).unwrap()).unwrap();
        assert_eq!(load_queue(&path).unwrap(), changes);
    }
}
