//! Persisted trace records
//!
//! A [`TraceRecord`] is the structured description of a segment tree that is
//! stored next to a generated file and reloaded on the next regeneration.
//!
//! ```json
//! {"type":"composite","id":"Person.java","children":[
//!   {"type":"literal","id":"header","content":"class Person {\n"},
//!   {"type":"appendable","id":"fields","policy":"preserve","children":[
//!     {"type":"variable","id":"name","content":"  String name;\n"}]}]}
//! ```

use crate::composite::{AppendableSegment, CompositeSegment, OrderPolicy};
use crate::error::SegmentError;
use crate::segment::Segment;
use serde::{Deserialize, Serialize};

/// Serializable description of one segment and its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceRecord {
    /// Template-owned text
    Literal { id: String, content: String },
    /// User-editable text
    Variable { id: String, content: String },
    /// Fixed container, children in declaration order
    Composite {
        id: String,
        children: Vec<TraceRecord>,
    },
    /// List region, children in emitted order
    Appendable {
        id: String,
        policy: OrderPolicy,
        children: Vec<TraceRecord>,
    },
}

impl TraceRecord {
    /// Id of the described segment
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Literal { id, .. }
            | Self::Variable { id, .. }
            | Self::Composite { id, .. }
            | Self::Appendable { id, .. } => id,
        }
    }

    /// Parse a record from JSON text
    ///
    /// # Errors
    /// Returns the `serde_json` error for unparseable input
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize to compact JSON
    ///
    /// # Errors
    /// Returns the `serde_json` error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    ///
    /// # Errors
    /// Returns the `serde_json` error if serialization fails
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Segment {
    /// Describe this subtree as a trace record
    ///
    /// Synchronized regions are recorded as list regions in their emitted
    /// order, which is the order the next run will treat as history.
    #[must_use]
    pub fn to_trace(&self) -> TraceRecord {
        match self {
            Self::Literal(s) => TraceRecord::Literal {
                id: s.id().to_string(),
                content: s.content().to_string(),
            },
            Self::Variable(s) => TraceRecord::Variable {
                id: s.id().to_string(),
                content: s.content().to_string(),
            },
            Self::Composite(s) => TraceRecord::Composite {
                id: s.id().to_string(),
                children: s.children().iter().map(Segment::to_trace).collect(),
            },
            Self::Appendable(s) => TraceRecord::Appendable {
                id: s.id().to_string(),
                policy: s.policy(),
                children: s.children().iter().map(Segment::to_trace).collect(),
            },
            Self::Synchronized(s) => TraceRecord::Appendable {
                id: s.id().to_string(),
                policy: s.policy(),
                children: s.emitted().map(Segment::to_trace).collect(),
            },
        }
    }

    /// Rebuild a tree from its trace record
    ///
    /// # Errors
    /// Returns [`SegmentError::DuplicateChild`] if the record lists two
    /// siblings with the same id
    pub fn from_trace(record: TraceRecord) -> Result<Self, SegmentError> {
        Ok(match record {
            TraceRecord::Literal { id, content } => Self::literal(id, content),
            TraceRecord::Variable { id, content } => Self::variable(id, content),
            TraceRecord::Composite { id, children } => {
                let children = children
                    .into_iter()
                    .map(Self::from_trace)
                    .collect::<Result<Vec<_>, _>>()?;
                CompositeSegment::with_children(id, children)?.into()
            }
            TraceRecord::Appendable {
                id,
                policy,
                children,
            } => {
                let children = children
                    .into_iter()
                    .map(Self::from_trace)
                    .collect::<Result<Vec<_>, _>>()?;
                AppendableSegment::with_children(id, policy, children)?.into()
            }
        })
    }
}

impl From<&Segment> for TraceRecord {
    fn from(segment: &Segment) -> Self {
        segment.to_trace()
    }
}

impl TryFrom<TraceRecord> for Segment {
    type Error = SegmentError;

    fn try_from(record: TraceRecord) -> Result<Self, Self::Error> {
        Self::from_trace(record)
    }
}
