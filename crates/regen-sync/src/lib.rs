//! Regen Synchronization
//!
//! Merging a freshly generated segment tree with the tree persisted by the
//! previous run.
//!
//! # Core Concepts
//!
//! - [`synchronize`]: Recursive merge keyed by segment id
//! - [`OrderingStrategy`]: Emitted order of a merged list region
//! - [`GenerationOrder`]: Follow the newest generation (default policy)
//! - [`PreservedOrder`]: Keep survivors in their previous order, append new ids
//! - [`MergeStats`]: Counters reported per merge
//!
//! # Example
//!
//! ```rust
//! use regen_segment::{AppendableSegment, OrderPolicy, Segment};
//! use regen_sync::synchronize;
//!
//! let old: Segment = AppendableSegment::with_children(
//!     "fields",
//!     OrderPolicy::Preserve,
//!     vec![Segment::variable("a", "edited a\n"), Segment::variable("b", "b\n")],
//! )
//! .unwrap()
//! .into();
//! let new: Segment = AppendableSegment::with_children(
//!     "fields",
//!     OrderPolicy::Preserve,
//!     vec![Segment::variable("c", "c\n"), Segment::variable("a", "a\n")],
//! )
//! .unwrap()
//! .into();
//!
//! let merged = synchronize(new, Some(&old));
//! assert_eq!(merged.render(), "edited a\nc\n");
//! ```

#![warn(unreachable_pub)]

// Strategies
mod generation;
mod ordered;
mod strategy;

// Merge
mod merge;
mod stats;

// Re-exports
pub use generation::GenerationOrder;
pub use merge::{synchronize, synchronize_with_stats};
pub use ordered::PreservedOrder;
pub use stats::MergeStats;
pub use strategy::{strategy_for, OrderingStrategy};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use regen_segment::{AppendableSegment, CompositeSegment, OrderPolicy, Segment};

    fn file(fields: &[(&str, &str)]) -> Segment {
        let fields = AppendableSegment::with_children(
            "fields",
            OrderPolicy::Preserve,
            fields.iter().map(|(id, c)| Segment::variable(*id, *c)),
        )
        .unwrap();
        CompositeSegment::with_children(
            "A.java",
            vec![
                Segment::literal("open", "class A {\n"),
                fields.into(),
                Segment::literal("close", "}\n"),
            ],
        )
        .unwrap()
        .into()
    }

    #[test]
    fn nested_region_merges_through_composite() {
        let old = file(&[("x", "  int x; // mine\n")]);
        let new = file(&[("y", "  int y;\n"), ("x", "  int x;\n")]);

        let (merged, stats) = synchronize_with_stats(new, Some(&old));
        assert_eq!(merged.render(), "class A {\n  int x; // mine\n  int y;\n}\n");
        assert_eq!(stats.preserved, 1);
        assert_eq!(stats.introduced, 1);
        assert!(!stats.is_empty());
    }

    #[test]
    fn first_generation_keeps_defaults() {
        let (merged, stats) = synchronize_with_stats(file(&[("x", "  int x;\n")]), None);
        assert_eq!(merged.render(), "class A {\n  int x;\n}\n");
        assert_eq!(stats.defaulted, 1);
        assert_eq!(stats.preserved, 0);
    }
}
