//! Testing utilities for the regen workspace
//!
//! Shared fixtures for segment trees and their traces.

#![allow(missing_docs)]

use regen_segment::{AppendableSegment, CompositeSegment, OrderPolicy, Segment, SegmentPath};
use std::str::FromStr;

/// List region of variables, one per `(id, content)` pair
pub fn create_region(id: &str, policy: OrderPolicy, items: &[(&str, &str)]) -> AppendableSegment {
    AppendableSegment::with_children(
        id,
        policy,
        items.iter().map(|(child, content)| Segment::variable(*child, *content)),
    )
    .unwrap()
}

/// Model-element row: a composite holding a signature literal and,
/// optionally, an editable `body` variable
pub fn create_row(id: &str, signature: &str, body: Option<&str>) -> Segment {
    let mut row = CompositeSegment::new(id);
    row.push(Segment::literal("signature", signature)).unwrap();
    if let Some(body) = body {
        row.push(Segment::variable("body", body)).unwrap();
    }
    row.into()
}

/// List region of pre-built children
pub fn create_region_of(id: &str, policy: OrderPolicy, children: Vec<Segment>) -> AppendableSegment {
    AppendableSegment::with_children(id, policy, children).unwrap()
}

/// Java-like class file with an editable import block and one field region
pub fn create_class_file(name: &str, policy: OrderPolicy, fields: &[(&str, &str)]) -> Segment {
    CompositeSegment::with_children(
        format!("{name}.java"),
        vec![
            Segment::literal("header", format!("public class {name} {{\n")),
            Segment::variable("imports", ""),
            create_region("fields", policy, fields).into(),
            Segment::literal("footer", "}\n"),
        ],
    )
    .unwrap()
    .into()
}

/// Rendered child order of the node at `path` (`""` for the root)
pub fn order_at(tree: &Segment, path: &str) -> Vec<String> {
    find(tree, path)
        .child_order()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Leaf content at `path` (`None` if absent or not a leaf)
pub fn content_at(tree: &Segment, path: &str) -> Option<String> {
    tree.find(&parse(path))
        .and_then(Segment::content)
        .map(str::to_string)
}

/// Owned id list
pub fn ids(order: &[&str]) -> Vec<String> {
    order.iter().map(|id| (*id).to_string()).collect()
}

fn parse(path: &str) -> SegmentPath {
    if path.is_empty() {
        SegmentPath::root()
    } else {
        SegmentPath::from_str(path).unwrap()
    }
}

fn find<'a>(tree: &'a Segment, path: &str) -> &'a Segment {
    let path = parse(path);
    tree.find(&path)
        .unwrap_or_else(|| panic!("nothing at {path} in {}", tree.id()))
}
