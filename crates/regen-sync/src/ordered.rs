//! Order-preserving strategy
//!
//! Survivors keep their previously emitted relative order; ids introduced by
//! this generation follow in generation order.

use crate::strategy::OrderingStrategy;
use regen_segment::AppendableSegment;
use std::collections::HashSet;

/// Stability over freshness
///
/// # Characteristics
/// - Survivors keep their previous relative order
/// - New ids are appended in generation order
/// - Ids missing from the merged region are never placed
#[derive(Debug, Clone, Copy, Default)]
pub struct PreservedOrder;

impl PreservedOrder {
    /// Create order-preserving strategy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl OrderingStrategy for PreservedOrder {
    fn order(&self, merged: &AppendableSegment, old: Option<&AppendableSegment>) -> Vec<String> {
        let mut placed: HashSet<&str> = HashSet::with_capacity(merged.children().len());
        let mut order = Vec::with_capacity(merged.children().len());

        let survivors = old
            .into_iter()
            .flat_map(|old| old.children().ids())
            .filter(|id| merged.child(id).is_some());
        for id in survivors.chain(merged.children().ids()) {
            if placed.insert(id) {
                order.push(id.to_string());
            }
        }

        order
    }

    fn name(&self) -> &'static str {
        "preserve"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regen_segment::{OrderPolicy, Segment};

    fn region(ids: &[&str]) -> AppendableSegment {
        AppendableSegment::with_children(
            "fields",
            OrderPolicy::Preserve,
            ids.iter().map(|id| Segment::variable(*id, "")),
        )
        .unwrap()
    }

    #[test]
    fn survivors_first_then_new() {
        let merged = region(&["d", "c", "a"]);
        let old = region(&["a", "b", "c"]);
        assert_eq!(PreservedOrder.order(&merged, Some(&old)), vec!["a", "c", "d"]);
    }

    #[test]
    fn without_history_follows_generation() {
        let merged = region(&["z", "y"]);
        assert_eq!(PreservedOrder::new().order(&merged, None), vec!["z", "y"]);
    }

    #[test]
    fn empty_merge_is_empty() {
        let old = region(&["a", "b"]);
        assert!(PreservedOrder.order(&region(&[]), Some(&old)).is_empty());
    }
}
