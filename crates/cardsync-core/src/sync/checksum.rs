//! Order-independent collection fingerprint

use std::fmt::Write as _;

use crate::models::CollectionCard;

/// Fingerprint a collection for a cheap "definitely identical" check.
///
/// Cards are sorted by key before hashing, so input order never matters.
/// An empty collection hashes to 0.
pub fn calculate_checksum(cards: &[CollectionCard]) -> i32 {
    let mut sorted = cards.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| {
        (&a.card_id, a.variant, a.quantity).cmp(&(&b.card_id, b.variant, b.quantity))
    });

    let mut canonical = String::new();
    for (index, card) in sorted.iter().enumerate() {
        if index > 0 {
            canonical.push('|');
        }
        let _ = write!(canonical, "{}:{}:{}", card.card_id, card.variant, card.quantity);
    }

    rolling_hash(&canonical)
}

/// Whether two checksums match; a mismatch still needs a full comparison
/// to find what differs.
pub const fn checksums_match(a: i32, b: i32) -> bool {
    a == b
}

fn rolling_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}
