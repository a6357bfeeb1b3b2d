//! Ordering strategy trait and selection
//!
//! Provides the [`OrderingStrategy`] trait deciding the emitted order of a
//! merged list region.

use crate::generation::GenerationOrder;
use crate::ordered::PreservedOrder;
use regen_segment::{AppendableSegment, OrderPolicy};
use std::fmt;

/// Emitted-order policy of a merged list region
///
/// # Contract
/// `order()` must be a pure function of its inputs and must return a
/// permutation of the ids of `merged`. The result is computed once per
/// region and shared by rendering and tracing.
pub trait OrderingStrategy: Send + Sync + fmt::Debug {
    /// Compute the emitted order of `merged`
    ///
    /// `old` is the region persisted by the previous run, if any.
    fn order(&self, merged: &AppendableSegment, old: Option<&AppendableSegment>) -> Vec<String>;

    /// Strategy name (for logging)
    fn name(&self) -> &'static str;
}

/// Strategy declared by a region's policy
///
/// Selection depends only on the flag the template put on the region.
#[must_use]
pub fn strategy_for(policy: OrderPolicy) -> &'static dyn OrderingStrategy {
    match policy {
        OrderPolicy::Generated => &GenerationOrder,
        OrderPolicy::Preserve => &PreservedOrder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_selects_strategy() {
        assert_eq!(strategy_for(OrderPolicy::Generated).name(), "generated");
        assert_eq!(strategy_for(OrderPolicy::Preserve).name(), "preserve");
    }
}
