//! Trace persistence round trips
//!
//! Arbitrary well-formed trees must render identically after being written
//! as a trace and read back.

use proptest::prelude::*;
use regen_segment::{AppendableSegment, CompositeSegment, OrderPolicy, Segment};
use regen_trace::FileTraceModel;

/// Arbitrary well-formed tree; sibling ids are made unique by position
fn tree() -> impl Strategy<Value = Segment> {
    let leaf = prop_oneof![
        ".{0,12}".prop_map(|c| Segment::literal("leaf", c)),
        ".{0,12}".prop_map(|c| Segment::variable("leaf", c)),
    ];
    leaf.prop_recursive(4, 32, 5, |inner| {
        (
            prop::collection::vec(inner, 0..5),
            prop_oneof![
                Just(None),
                Just(Some(OrderPolicy::Generated)),
                Just(Some(OrderPolicy::Preserve)),
            ],
        )
            .prop_map(|(children, policy)| {
                let children = children.into_iter().enumerate().map(|(i, child)| rename(child, i));
                match policy {
                    None => CompositeSegment::with_children("node", children)
                        .unwrap()
                        .into(),
                    Some(policy) => AppendableSegment::with_children("node", policy, children)
                        .unwrap()
                        .into(),
                }
            })
    })
}

fn rename(segment: Segment, index: usize) -> Segment {
    let mut record = segment.to_trace();
    let id = format!("c{index}");
    match &mut record {
        regen_segment::TraceRecord::Literal { id: old, .. }
        | regen_segment::TraceRecord::Variable { id: old, .. }
        | regen_segment::TraceRecord::Composite { id: old, .. }
        | regen_segment::TraceRecord::Appendable { id: old, .. } => *old = id,
    }
    Segment::from_trace(record).unwrap()
}

proptest! {
    #[test]
    fn prop_reloaded_trace_renders_identical_text(root in tree(), pretty in any::<bool>()) {
        let file = FileTraceModel::new("f.txt", root).unwrap();
        let json = file.trace_json(pretty).unwrap();
        let reloaded = FileTraceModel::from_trace_json("f.txt", &json).unwrap();

        prop_assert_eq!(reloaded.content(), file.content());
        prop_assert_eq!(reloaded.root(), file.root());
    }

    #[test]
    fn prop_merging_a_reloaded_tree_changes_nothing(root in tree()) {
        let file = FileTraceModel::new("f.txt", root).unwrap();
        let reloaded = FileTraceModel::from_trace_json("f.txt", &file.trace_json(false).unwrap()).unwrap();

        let (merged, stats) = file.clone().synchronized(Some(reloaded.root()));
        prop_assert_eq!(merged.content(), file.content());
        prop_assert_eq!(stats.dropped, 0);
        prop_assert_eq!(stats.defaulted, 0);
    }
}
