//! Default strategy recommendation

use super::compare::CollectionComparison;
use super::resolve::ResolutionStrategy;

/// Suggest a strategy from the shape of the differences.
///
/// Advisory only: callers must confirm before resolving with it.
pub fn get_recommended_strategy(comparison: &CollectionComparison) -> ResolutionStrategy {
    if comparison.one_sided_count() > 0 {
        ResolutionStrategy::KeepHigher
    } else if !comparison.conflicts.is_empty() {
        ResolutionStrategy::MergeAdd
    } else {
        ResolutionStrategy::LastWriteWins
    }
}
