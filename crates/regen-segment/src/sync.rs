//! Merged list regions
//!
//! A [`SyncSegment`] pairs the freshly generated list region (`new_side`,
//! already carrying merged child content) with the region persisted by the
//! previous run (`old_side`). The emitted order is fixed at construction so
//! that rendered text and persisted trace can never disagree.

use crate::composite::{AppendableSegment, OrderPolicy};
use crate::segment::Segment;
use std::collections::HashSet;

/// Result of synchronizing one list region against its previous trace
///
/// When the policy of `new_side` is [`OrderPolicy::Preserve`] this is the
/// ordered synchronization node; it carries no extra state.
///
/// # Invariants
/// - `order` is a permutation of the ids of `new_side`
/// - `old_side` is read-only history; it is never rendered
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSegment {
    new_side: AppendableSegment,
    old_side: Option<AppendableSegment>,
    order: Vec<String>,
}

impl SyncSegment {
    /// Pair a merged region with its history and emitted order
    ///
    /// The order is normalized against `new_side`: ids that are not children
    /// or that repeat are skipped, and children the order leaves out are
    /// appended in new-side order. The stored order is therefore always a
    /// permutation of the new side's ids.
    #[must_use]
    pub fn new(
        new_side: AppendableSegment,
        old_side: Option<AppendableSegment>,
        order: Vec<String>,
    ) -> Self {
        let mut placed = HashSet::with_capacity(order.len());
        let mut normalized = Vec::with_capacity(new_side.children().len());
        for id in order {
            if new_side.child(&id).is_some() && placed.insert(id.clone()) {
                normalized.push(id);
            }
        }
        for id in new_side.children().ids() {
            if !placed.contains(id) {
                normalized.push(id.to_string());
            }
        }
        Self {
            new_side,
            old_side,
            order: normalized,
        }
    }

    /// Segment id (shared by both sides)
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        self.new_side.id()
    }

    /// Ordering policy declared by the template for this region
    #[inline]
    #[must_use]
    pub fn policy(&self) -> OrderPolicy {
        self.new_side.policy()
    }

    /// Check if this node keeps the previously emitted order
    #[inline]
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.policy() == OrderPolicy::Preserve
    }

    /// Merged region for the current generation
    #[inline]
    #[must_use]
    pub fn new_side(&self) -> &AppendableSegment {
        &self.new_side
    }

    /// Region persisted by the previous run, if any
    #[inline]
    #[must_use]
    pub fn old_side(&self) -> Option<&AppendableSegment> {
        self.old_side.as_ref()
    }

    /// Ids in emitted order
    #[inline]
    #[must_use]
    pub fn emitted_order(&self) -> &[String] {
        &self.order
    }

    /// Resolve a child, new side first, falling back to the old side
    ///
    /// A child known to neither side resolves to `None`.
    #[must_use]
    pub fn child(&self, id: &str) -> Option<&Segment> {
        self.new_side
            .child(id)
            .or_else(|| self.old_side.as_ref().and_then(|old| old.child(id)))
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, id: &str) -> Option<&mut Segment> {
        self.new_side.child_mut(id)
    }

    /// Children of the new side in emitted order
    pub fn emitted(&self) -> impl Iterator<Item = &Segment> {
        self.order.iter().filter_map(|id| self.new_side.child(id))
    }

    /// Append rendered children in emitted order
    pub fn render_into(&self, out: &mut String) {
        for child in self.emitted() {
            child.render_into(out);
        }
    }

    /// Flatten into a plain list region in emitted order
    #[must_use]
    pub fn into_appendable(self) -> AppendableSegment {
        let (id, policy, children) = self.new_side.into_parts();
        AppendableSegment::from_parts(id, policy, children.arranged(&self.order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(policy: OrderPolicy, items: &[(&str, &str)]) -> AppendableSegment {
        AppendableSegment::with_children(
            "fields",
            policy,
            items.iter().map(|(id, c)| Segment::variable(*id, *c)),
        )
        .unwrap()
    }

    fn ids(order: &[&str]) -> Vec<String> {
        order.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn renders_in_emitted_order() {
        let new_side = region(OrderPolicy::Preserve, &[("b", "B"), ("a", "A")]);
        let sync = SyncSegment::new(new_side, None, ids(&["a", "b"]));
        let mut out = String::new();
        sync.render_into(&mut out);
        assert_eq!(out, "AB");
        assert!(sync.is_ordered());
    }

    #[test]
    fn order_is_normalized_to_a_permutation() {
        let new_side = region(OrderPolicy::Generated, &[("a", "A"), ("b", "B"), ("c", "C")]);
        let sync = SyncSegment::new(new_side, None, ids(&["c", "ghost", "c", "a"]));
        assert_eq!(sync.emitted_order(), ids(&["c", "a", "b"]).as_slice());
    }

    #[test]
    fn child_falls_back_to_old_side() {
        let new_side = region(OrderPolicy::Generated, &[("a", "new a")]);
        let old_side = region(OrderPolicy::Generated, &[("a", "old a"), ("gone", "old")]);
        let sync = SyncSegment::new(new_side, Some(old_side), ids(&["a"]));

        assert_eq!(sync.child("a").and_then(Segment::content), Some("new a"));
        assert_eq!(sync.child("gone").and_then(Segment::content), Some("old"));
        assert!(sync.child("never").is_none());
        // history is resolvable but never emitted
        assert_eq!(sync.emitted().count(), 1);
    }

    #[test]
    fn into_appendable_uses_emitted_order() {
        let new_side = region(OrderPolicy::Preserve, &[("x", "1"), ("y", "2"), ("z", "3")]);
        let sync = SyncSegment::new(new_side, None, ids(&["z", "x", "y"]));
        let flat = sync.into_appendable();
        assert_eq!(flat.children().ids().collect::<Vec<_>>(), vec!["z", "x", "y"]);
        assert_eq!(flat.policy(), OrderPolicy::Preserve);
    }
}
