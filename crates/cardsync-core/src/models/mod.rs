//! Data models for cardsync

mod card;
mod pending_change;
mod sync_status;

pub use card::{CardKey, CardVariant, CollectionCard};
pub use pending_change::{ChangeAction, ChangeId, PendingChange};
pub use sync_status::{SyncState, SyncStatus};
