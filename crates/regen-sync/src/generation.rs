//! Default ordering: follow the generator

use crate::strategy::OrderingStrategy;
use regen_segment::AppendableSegment;

/// Emits children in the order of the newest generation
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationOrder;

impl GenerationOrder {
    /// Create generation-order strategy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl OrderingStrategy for GenerationOrder {
    fn order(&self, merged: &AppendableSegment, _old: Option<&AppendableSegment>) -> Vec<String> {
        merged.children().ids().map(str::to_string).collect()
    }

    fn name(&self) -> &'static str {
        "generated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regen_segment::{OrderPolicy, Segment};

    #[test]
    fn ignores_history() {
        let merged = AppendableSegment::with_children(
            "ops",
            OrderPolicy::Generated,
            vec![Segment::variable("b", ""), Segment::variable("a", "")],
        )
        .unwrap();
        let old = AppendableSegment::with_children(
            "ops",
            OrderPolicy::Generated,
            vec![Segment::variable("a", ""), Segment::variable("b", "")],
        )
        .unwrap();

        assert_eq!(GenerationOrder::new().order(&merged, Some(&old)), vec!["b", "a"]);
    }
}
