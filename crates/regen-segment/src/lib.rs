//! Regen Segment Trees
//!
//! Generated files represented as trees of identified regions.
//!
//! # Core Concepts
//!
//! - [`Segment`]: Closed set of segment kinds (literal, variable, composite,
//!   appendable, synchronized)
//! - [`ChildList`]: Ordered, id-keyed children of a container
//! - [`SyncSegment`]: A list region merged against its previous trace
//! - [`TraceRecord`]: Persisted description of a tree
//! - [`SegmentPath`]: Dotted addressing within a tree
//!
//! # Example
//!
//! ```rust
//! use regen_segment::{AppendableSegment, CompositeSegment, OrderPolicy, Segment};
//!
//! let mut fields = AppendableSegment::new("fields", OrderPolicy::Preserve);
//! fields.push(Segment::variable("name", "  String name;\n")).unwrap();
//!
//! let mut file = CompositeSegment::new("Person.java");
//! file.push(Segment::literal("open", "class Person {\n")).unwrap();
//! file.push(fields.into()).unwrap();
//! file.push(Segment::literal("close", "}\n")).unwrap();
//!
//! let root = Segment::from(file);
//! assert_eq!(root.render(), "class Person {\n  String name;\n}\n");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod children;
mod composite;
mod error;
mod path;
mod segment;
mod sync;
mod trace;

// Re-exports
pub use children::ChildList;
pub use composite::{AppendableSegment, CompositeSegment, OrderPolicy};
pub use error::SegmentError;
pub use path::SegmentPath;
pub use segment::{LiteralSegment, Segment, SegmentKind, VariableSegment};
pub use sync::SyncSegment;
pub use trace::TraceRecord;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn build_fill_and_trace() {
        let mut root: Segment = CompositeSegment::with_children(
            "Service.java",
            vec![
                Segment::literal("package", "package demo;\n"),
                Segment::variable("imports", ""),
                AppendableSegment::new("methods", OrderPolicy::Generated).into(),
            ],
        )
        .unwrap()
        .into();

        let path = SegmentPath::from_str("imports").unwrap();
        root.set_content(&path, "import java.util.List;\n").unwrap();

        assert_eq!(root.render(), "package demo;\nimport java.util.List;\n");

        let record = root.to_trace();
        assert_eq!(record.id(), "Service.java");
        let reloaded = Segment::try_from(record).unwrap();
        assert_eq!(reloaded.render(), root.render());
    }

    #[test]
    fn empty_list_region_renders_nothing() {
        let seg: Segment = AppendableSegment::new("ops", OrderPolicy::Preserve).into();
        assert_eq!(seg.render(), "");
        assert!(seg.child_order().is_empty());
    }
}
