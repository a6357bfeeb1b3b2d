//! Structural errors for segment trees
//!
//! Absence of a child is never an error (lookups return `Option`). These
//! errors only cover trees that would violate their own invariants.

use crate::path::SegmentPath;

/// Errors raised while building or mutating a segment tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    /// A container already holds a child with this id
    #[error("duplicate child '{id}' in segment '{parent}'")]
    DuplicateChild { parent: String, id: String },

    /// An order references a child that does not exist
    #[error("segment '{parent}' has no child '{id}'")]
    UnknownChild { parent: String, id: String },

    /// An emitted order is not a permutation of the children
    #[error("invalid child order for segment '{id}': {reason}")]
    InvalidOrder { id: String, reason: String },

    /// Content was assigned to a segment that does not hold editable content
    #[error("segment at '{0}' does not hold editable content")]
    NotEditable(SegmentPath),

    /// No segment exists at the given path
    #[error("no segment at '{0}'")]
    NotFound(SegmentPath),

    /// Path text could not be parsed
    #[error("invalid segment path: {0}")]
    InvalidPath(String),
}

impl SegmentError {
    /// Create duplicate child error
    pub fn duplicate(parent: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateChild {
            parent: parent.into(),
            id: id.into(),
        }
    }

    /// Create invalid order error
    pub fn invalid_order(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOrder {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
