//! Property tests for child lists, sync order, content edits and paths

use proptest::prelude::*;
use regen_segment::{AppendableSegment, OrderPolicy, Segment, SegmentPath, SyncSegment};
use std::collections::BTreeSet;

fn unique_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,5}", 0..10)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

fn region(ids: &[String]) -> AppendableSegment {
    AppendableSegment::with_children(
        "list",
        OrderPolicy::Preserve,
        ids.iter().map(|id| Segment::variable(id.as_str(), id.as_str())),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_sync_order_is_always_a_permutation(
        ids in unique_ids(),
        order in prop::collection::vec("[a-z][a-z0-9_]{0,5}", 0..15),
    ) {
        let sync = SyncSegment::new(region(&ids), None, order);

        // Invariant: every child exactly once, whatever order was requested
        let emitted: Vec<_> = sync.emitted_order().to_vec();
        prop_assert_eq!(emitted.len(), ids.len());
        let emitted: BTreeSet<_> = emitted.into_iter().collect();
        let expected: BTreeSet<_> = ids.iter().cloned().collect();
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn prop_shuffled_order_is_accepted_verbatim(
        ids in unique_ids().prop_shuffle(),
    ) {
        let mut order = ids.clone();
        order.reverse();
        let (_, _, children) = region(&ids).into_parts();
        let reordered = children.reordered("list", &order).unwrap();
        prop_assert_eq!(reordered.ids().collect::<Vec<_>>(), order.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_path_text_is_stable(ids in prop::collection::vec("[a-z][a-z0-9_]{0,5}", 0..6)) {
        let path: SegmentPath = ids.into_iter().collect();
        let reparsed: SegmentPath = path.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, path);
    }

    #[test]
    fn prop_content_edits_keep_trace_reloadable(
        ids in unique_ids(),
        edits in prop::collection::vec(("[a-z][a-z0-9_]{0,5}", ".{0,8}"), 0..8),
    ) {
        let mut root: Segment = region(&ids).into();
        for (id, content) in &edits {
            if let Some(variable) = root.variable_mut(&SegmentPath::single(id.as_str())) {
                variable.set_content(content.as_str());
            }
        }

        // ids are untouched by edits, so the persisted form always reloads
        prop_assert_eq!(root.child_order(), ids.iter().map(String::as_str).collect::<Vec<_>>());
        let reloaded = Segment::from_trace(root.to_trace()).unwrap();
        prop_assert_eq!(reloaded.render(), root.render());
    }
}
