//! cardsync-core - Core library for cardsync
//!
//! This crate contains the collection models and the reconciliation engine
//! that merges divergent collection snapshots from devices that went offline.
//! Every engine function is a pure computation over its inputs; persistence
//! and transport belong to the caller.

pub mod error;
pub mod models;
pub mod snapshot;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{
    CardKey, CardVariant, ChangeAction, ChangeId, CollectionCard, PendingChange, SyncState,
    SyncStatus,
};
pub use sync::{
    CollectionComparison, ConflictResolution, ConflictType, Reconciliation, ResolutionStrategy,
};
