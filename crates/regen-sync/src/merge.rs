//! Recursive merge of a generated tree with its previous trace
//!
//! The new tree decides shape and membership. The old tree contributes
//! variable content and, for preserving regions, the emitted order.

use crate::stats::MergeStats;
use crate::strategy::strategy_for;
use regen_segment::{
    AppendableSegment, ChildList, CompositeSegment, Segment, SegmentKind, SyncSegment,
};
use tracing::{debug, warn};

/// Merge `new` with the previous tree at the same position
///
/// Total over all inputs: absent or mismatched prior content only means the
/// generated default is kept.
#[must_use]
pub fn synchronize(new: Segment, old: Option<&Segment>) -> Segment {
    synchronize_with_stats(new, old).0
}

/// Merge and count what happened to prior content
#[must_use]
pub fn synchronize_with_stats(new: Segment, old: Option<&Segment>) -> (Segment, MergeStats) {
    let mut stats = MergeStats::default();
    let merged = merge(new, old, &mut stats);
    (merged, stats)
}

fn merge(new: Segment, old: Option<&Segment>, stats: &mut MergeStats) -> Segment {
    let old = old.filter(|old| {
        let usable = same_shape(new.kind(), old.kind());
        if !usable && new.kind() != SegmentKind::Literal {
            debug!(
                "Ignoring previous {} {}: now generated as {}",
                old.kind(),
                old.id(),
                new.kind()
            );
        }
        usable
    });

    match new {
        Segment::Literal(_) => new,
        Segment::Variable(mut variable) => {
            if let Some(Segment::Variable(previous)) = old {
                variable.set_content(previous.content());
                stats.preserved += 1;
            } else {
                stats.defaulted += 1;
            }
            variable.into()
        }
        Segment::Composite(composite) => {
            let (id, children) = composite.into_parts();
            let children = merge_children(&id, children, |child| {
                let previous = old.and_then(|o| o.child(child.id()));
                merge(child, previous, stats)
            });
            CompositeSegment::from_parts(id, children).into()
        }
        Segment::Appendable(list) => merge_list(list, old, stats),
        Segment::Synchronized(sync) => merge_list(sync.into_appendable(), old, stats),
    }
}

fn merge_list(list: AppendableSegment, old: Option<&Segment>, stats: &mut MergeStats) -> Segment {
    let history = old.and_then(history);
    let (id, policy, children) = list.into_parts();

    let children = merge_children(&id, children, |child| {
        let previous = history.as_ref().and_then(|h| h.child(child.id()));
        match previous {
            None => {
                debug!("New child {} in {}", child.id(), id);
                stats.introduced += 1;
            }
            Some(previous) if !same_shape(child.kind(), previous.kind()) => {
                debug!("Child {} in {} changed kind; treated as new", child.id(), id);
                stats.introduced += 1;
            }
            Some(_) => {}
        }
        merge(child, previous, stats)
    });
    let merged = AppendableSegment::from_parts(id, policy, children);

    if let Some(history) = &history {
        for gone in history.children().ids().filter(|id| merged.child(id).is_none()) {
            debug!("Dropping {} from {}: no longer generated", gone, merged.id());
            stats.dropped += 1;
        }
    }

    let strategy = strategy_for(policy);
    let order = strategy.order(&merged, history.as_ref());
    debug!("Ordered {} by {} policy", merged.id(), strategy.name());

    SyncSegment::new(merged, history, order).into()
}

/// Rebuild a child list from merged children
///
/// Merging keeps ids, so a collision can only come from a broken child
/// merge; the later child is dropped rather than corrupting the list.
fn merge_children(
    parent: &str,
    children: ChildList,
    mut merge_child: impl FnMut(Segment) -> Segment,
) -> ChildList {
    let mut merged = ChildList::new();
    for child in children {
        if let Err(err) = merged.push(parent, merge_child(child)) {
            warn!("Skipping merged child: {}", err);
        }
    }
    merged
}

/// Previous list region in its emitted order
fn history(old: &Segment) -> Option<AppendableSegment> {
    match old {
        Segment::Appendable(list) => Some(list.clone()),
        Segment::Synchronized(sync) => Some(sync.clone().into_appendable()),
        _ => None,
    }
}

fn same_shape(new: SegmentKind, old: SegmentKind) -> bool {
    let is_list = |kind| matches!(kind, SegmentKind::Appendable | SegmentKind::Synchronized);
    new == old || (is_list(new) && is_list(old))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use regen_segment::OrderPolicy;

    fn list(policy: OrderPolicy, items: &[(&str, &str)]) -> Segment {
        AppendableSegment::with_children(
            "fields",
            policy,
            items.iter().map(|(id, c)| Segment::variable(*id, *c)),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn literal_new_wins() {
        let merged = synchronize(Segment::literal("h", "new"), Some(&Segment::literal("h", "old")));
        assert_eq!(merged.render(), "new");
    }

    #[test]
    fn variable_old_wins() {
        let (merged, stats) = synchronize_with_stats(
            Segment::variable("v", "default"),
            Some(&Segment::variable("v", "edited")),
        );
        assert_eq!(merged.content(), Some("edited"));
        assert_eq!(stats.preserved, 1);
    }

    #[test]
    fn kind_mismatch_is_absence() {
        let (merged, stats) = synchronize_with_stats(
            Segment::variable("v", "default"),
            Some(&Segment::literal("v", "old literal")),
        );
        assert_eq!(merged.content(), Some("default"));
        assert_eq!(stats.defaulted, 1);
    }

    #[test]
    fn list_becomes_synchronized() {
        let merged = synchronize(list(OrderPolicy::Generated, &[("a", "A")]), None);
        assert_eq!(merged.kind(), SegmentKind::Synchronized);
        assert_eq!(merged.render(), "A");
    }

    #[test]
    fn resynchronizing_uses_previous_sync_node() {
        let first = synchronize(
            list(OrderPolicy::Preserve, &[("b", "B"), ("a", "A")]),
            None,
        );
        let second = synchronize(
            list(OrderPolicy::Preserve, &[("a", "a2"), ("c", "c2"), ("b", "b2")]),
            Some(&first),
        );
        assert_eq!(second.child_order(), vec!["b", "a", "c"]);
        assert_eq!(second.render(), "BAc2");
    }

    #[test]
    fn kind_change_in_list_counts_as_introduced() {
        let old = list(OrderPolicy::Generated, &[("a", "edited"), ("b", "kept")]);
        let new = AppendableSegment::with_children(
            "fields",
            OrderPolicy::Generated,
            vec![Segment::literal("a", "now fixed"), Segment::variable("b", "b")],
        )
        .unwrap()
        .into();

        let (merged, stats) = synchronize_with_stats(new, Some(&old));
        assert_eq!(merged.render(), "now fixedkept");
        assert_eq!(stats.introduced, 1);
        assert_eq!(stats.preserved, 1);
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn merged_children_keep_their_ids() {
        let (_, _, children) = match list(OrderPolicy::Generated, &[("a", "1"), ("b", "2")]) {
            Segment::Appendable(list) => list.into_parts(),
            _ => unreachable!(),
        };
        let merged = merge_children("fields", children, |child| child);
        assert_eq!(merged.ids().collect::<Vec<_>>(), vec!["a", "b"]);

        // a child merge that renames collapses onto one entry instead of two
        let (_, _, children) = match list(OrderPolicy::Generated, &[("a", "1"), ("b", "2")]) {
            Segment::Appendable(list) => list.into_parts(),
            _ => unreachable!(),
        };
        let collapsed = merge_children("fields", children, |_| Segment::variable("same", ""));
        assert_eq!(collapsed.ids().collect::<Vec<_>>(), vec!["same"]);
    }

    #[test]
    fn composite_and_list_are_not_interchangeable() {
        assert!(!same_shape(SegmentKind::Composite, SegmentKind::Appendable));
        assert!(same_shape(SegmentKind::Synchronized, SegmentKind::Appendable));
    }
}
