//! Pending change model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{CardKey, CardVariant};
use crate::error::Error;

/// A unique identifier for a pending change, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChangeId(Uuid);

impl ChangeId {
    /// Create a new unique change ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ChangeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChangeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Kind of local mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// Add copies on top of the current quantity
    Add,
    /// Remove copies from the current quantity
    Remove,
    /// Set the quantity outright
    Update,
}

impl ChangeAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "update" => Ok(Self::Update),
            other => Err(Error::InvalidAction(other.to_string())),
        }
    }
}

/// A local mutation that has not yet been applied to the authoritative store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChange {
    /// Unique identifier
    pub id: ChangeId,
    pub card_id: String,
    pub variant: CardVariant,
    pub action: ChangeAction,
    pub quantity: u32,
    /// Server quantity the change was made against, when known
    pub expected_server_quantity: Option<u32>,
    /// Creation timestamp (Unix ms)
    pub timestamp: i64,
    /// Device that queued the change
    pub device_id: String,
}

impl PendingChange {
    /// Key of the card this change targets
    #[must_use]
    pub fn key(&self) -> CardKey {
        CardKey::new(self.card_id.clone(), self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_id_unique() {
        let id1 = ChangeId::new();
        let id2 = ChangeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_change_id_parse() {
        let id = ChangeId::new();
        let parsed: ChangeId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_change_action_parse() {
        assert_eq!("ADD".parse::<ChangeAction>().unwrap(), ChangeAction::Add);
        assert_eq!(" update ".parse::<ChangeAction>().unwrap(), ChangeAction::Update);
        assert!("delete".parse::<ChangeAction>().is_err());
    }

    #[test]
    fn test_change_action_serde_lowercase() {
        let json = serde_json::to_string(&ChangeAction::Remove).unwrap();
        assert_eq!(json, "\"remove\"");
    }
}
