//! Collection card model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Print variant of a card.
///
/// Declaration order is the sort order used for card keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardVariant {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "holofoil")]
    Holofoil,
    #[serde(rename = "reverseHolofoil")]
    ReverseHolofoil,
    #[serde(rename = "1stEditionNormal")]
    FirstEditionNormal,
    #[serde(rename = "1stEditionHolofoil")]
    FirstEditionHolofoil,
    #[serde(rename = "unlimitedHolofoil")]
    UnlimitedHolofoil,
}

impl CardVariant {
    /// Every supported variant, in sort order
    pub const ALL: [Self; 6] = [
        Self::Normal,
        Self::Holofoil,
        Self::ReverseHolofoil,
        Self::FirstEditionNormal,
        Self::FirstEditionHolofoil,
        Self::UnlimitedHolofoil,
    ];

    /// Wire name of the variant (matches the serde representation)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Holofoil => "holofoil",
            Self::ReverseHolofoil => "reverseHolofoil",
            Self::FirstEditionNormal => "1stEditionNormal",
            Self::FirstEditionHolofoil => "1stEditionHolofoil",
            Self::UnlimitedHolofoil => "unlimitedHolofoil",
        }
    }
}

impl fmt::Display for CardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == value)
            .ok_or_else(|| Error::InvalidVariant(value.to_string()))
    }
}

/// Identity of one entry within a snapshot: card id plus print variant
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub card_id: String,
    pub variant: CardVariant,
}

impl CardKey {
    pub fn new(card_id: impl Into<String>, variant: CardVariant) -> Self {
        Self {
            card_id: card_id.into(),
            variant,
        }
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.card_id, self.variant)
    }
}

/// One owned entry in a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionCard {
    /// Catalog identifier of the card (e.g. `sv1-1`)
    pub card_id: String,
    /// Print variant
    pub variant: CardVariant,
    /// Owned copies; zero is never persisted
    pub quantity: u32,
}

impl CollectionCard {
    /// Create a new collection entry
    #[must_use]
    pub fn new(card_id: impl Into<String>, variant: CardVariant, quantity: u32) -> Self {
        Self {
            card_id: card_id.into(),
            variant,
            quantity,
        }
    }

    /// Key identifying this entry within a snapshot
    #[must_use]
    pub fn key(&self) -> CardKey {
        CardKey::new(self.card_id.clone(), self.variant)
    }
}
