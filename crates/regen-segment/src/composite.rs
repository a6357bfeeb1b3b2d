//! Container segments
//!
//! [`CompositeSegment`] is the template skeleton: its children are fixed by
//! the template. [`AppendableSegment`] is a list region whose children follow
//! the model (one child per attribute, operation, ...).

use crate::children::ChildList;
use crate::error::SegmentError;
use crate::path::SegmentPath;
use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-shape ordered container
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSegment {
    id: String,
    children: ChildList,
}

impl CompositeSegment {
    /// Create empty composite
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: ChildList::new(),
        }
    }

    /// Create composite from children
    ///
    /// # Errors
    /// Returns [`SegmentError::DuplicateChild`] if two children share an id
    pub fn with_children(
        id: impl Into<String>,
        children: impl IntoIterator<Item = Segment>,
    ) -> Result<Self, SegmentError> {
        let mut composite = Self::new(id);
        for child in children {
            composite.push(child)?;
        }
        Ok(composite)
    }

    /// Build from an already consistent child list
    #[inline]
    #[must_use]
    pub fn from_parts(id: String, children: ChildList) -> Self {
        Self { id, children }
    }

    /// Segment id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append a child
    ///
    /// # Errors
    /// Returns [`SegmentError::DuplicateChild`] if the id is taken
    pub fn push(&mut self, child: Segment) -> Result<(), SegmentError> {
        self.children.push(&self.id, child)
    }

    /// Child by id
    #[inline]
    #[must_use]
    pub fn child(&self, id: &str) -> Option<&Segment> {
        self.children.get(id)
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, id: &str) -> Option<&mut Segment> {
        self.children.get_mut(id)
    }

    /// Fill the default content of a direct variable child
    ///
    /// # Errors
    /// - [`SegmentError::NotFound`] if there is no such child
    /// - [`SegmentError::NotEditable`] if the child is not a variable
    pub fn set_content(&mut self, id: &str, content: impl Into<String>) -> Result<(), SegmentError> {
        match self.children.get_mut(id) {
            Some(Segment::Variable(v)) => {
                v.set_content(content);
                Ok(())
            }
            Some(_) => Err(SegmentError::NotEditable(SegmentPath::single(id))),
            None => Err(SegmentError::NotFound(SegmentPath::single(id))),
        }
    }

    /// Children in declaration order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &ChildList {
        &self.children
    }

    /// Split into id and children
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (String, ChildList) {
        (self.id, self.children)
    }
}

/// How a list region orders its children after synchronization
///
/// Supplied per region by the template layer; never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPolicy {
    /// Emit children in the order of the newest generation
    Generated,
    /// Keep the previously emitted order, appending new children at the end
    Preserve,
}

impl fmt::Display for OrderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated => f.write_str("generated"),
            Self::Preserve => f.write_str("preserve"),
        }
    }
}

/// Open-ended list region keyed by model-element id
///
/// Membership and order change from one generation to the next. There is no
/// upper bound on the number of children.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendableSegment {
    id: String,
    policy: OrderPolicy,
    children: ChildList,
}

impl AppendableSegment {
    /// Create empty list region with its ordering policy
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, policy: OrderPolicy) -> Self {
        Self {
            id: id.into(),
            policy,
            children: ChildList::new(),
        }
    }

    /// Create list region from children
    ///
    /// # Errors
    /// Returns [`SegmentError::DuplicateChild`] if two children share an id
    pub fn with_children(
        id: impl Into<String>,
        policy: OrderPolicy,
        children: impl IntoIterator<Item = Segment>,
    ) -> Result<Self, SegmentError> {
        let mut appendable = Self::new(id, policy);
        for child in children {
            appendable.push(child)?;
        }
        Ok(appendable)
    }

    /// Build from an already consistent child list
    #[inline]
    #[must_use]
    pub fn from_parts(id: String, policy: OrderPolicy, children: ChildList) -> Self {
        Self {
            id,
            policy,
            children,
        }
    }

    /// Segment id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Ordering policy of this region
    #[inline]
    #[must_use]
    pub fn policy(&self) -> OrderPolicy {
        self.policy
    }

    /// Append a child for a model element
    ///
    /// # Errors
    /// Returns [`SegmentError::DuplicateChild`] if the id is taken
    pub fn push(&mut self, child: Segment) -> Result<(), SegmentError> {
        self.children.push(&self.id, child)
    }

    /// Remove the child of a model element that no longer exists
    #[inline]
    pub fn remove(&mut self, id: &str) -> Option<Segment> {
        self.children.remove(id)
    }

    /// Child by id
    #[inline]
    #[must_use]
    pub fn child(&self, id: &str) -> Option<&Segment> {
        self.children.get(id)
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, id: &str) -> Option<&mut Segment> {
        self.children.get_mut(id)
    }

    /// Children in current order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &ChildList {
        &self.children
    }

    /// Split into id, policy and children
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (String, OrderPolicy, ChildList) {
        (self.id, self.policy, self.children)
    }
}
