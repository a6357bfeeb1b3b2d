//! The segment hierarchy
//!
//! A generated file is a tree of [`Segment`]s. The set of segment kinds is
//! closed: leaves ([`LiteralSegment`], [`VariableSegment`]), fixed containers
//! ([`CompositeSegment`]), open-ended containers ([`AppendableSegment`]) and
//! merged containers ([`SyncSegment`]).

use crate::composite::{AppendableSegment, CompositeSegment};
use crate::error::SegmentError;
use crate::path::SegmentPath;
use crate::sync::SyncSegment;
use std::fmt;

/// Kind tag of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Template-owned text
    Literal,
    /// User-editable text
    Variable,
    /// Fixed-shape container
    Composite,
    /// Model-driven list container
    Appendable,
    /// Merged list container
    Synchronized,
}

impl SegmentKind {
    /// Check if segments of this kind own children
    #[inline]
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Composite | Self::Appendable | Self::Synchronized)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Literal => "literal",
            Self::Variable => "variable",
            Self::Composite => "composite",
            Self::Appendable => "appendable",
            Self::Synchronized => "synchronized",
        };
        f.write_str(name)
    }
}

/// Template text the generator always owns
///
/// Regenerated on every pass; never carried over from a previous trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSegment {
    id: String,
    content: String,
}

impl LiteralSegment {
    /// Create literal segment
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Segment id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Literal text
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Free-form region whose content survives regeneration
///
/// `render` returns the stored content unchanged; it is never re-derived
/// from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSegment {
    id: String,
    content: String,
}

impl VariableSegment {
    /// Create variable segment with default content
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Segment id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current content
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace content
    #[inline]
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

/// A node of a generated file
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Template-owned text
    Literal(LiteralSegment),
    /// User-editable text
    Variable(VariableSegment),
    /// Fixed-shape container
    Composite(CompositeSegment),
    /// Model-driven list container
    Appendable(AppendableSegment),
    /// Merged list container
    Synchronized(SyncSegment),
}

impl Segment {
    /// Create literal leaf
    #[inline]
    #[must_use]
    pub fn literal(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Literal(LiteralSegment::new(id, content))
    }

    /// Create variable leaf
    #[inline]
    #[must_use]
    pub fn variable(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Variable(VariableSegment::new(id, content))
    }

    /// Segment id
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Literal(s) => s.id(),
            Self::Variable(s) => s.id(),
            Self::Composite(s) => s.id(),
            Self::Appendable(s) => s.id(),
            Self::Synchronized(s) => s.id(),
        }
    }

    /// Kind tag
    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Literal(_) => SegmentKind::Literal,
            Self::Variable(_) => SegmentKind::Variable,
            Self::Composite(_) => SegmentKind::Composite,
            Self::Appendable(_) => SegmentKind::Appendable,
            Self::Synchronized(_) => SegmentKind::Synchronized,
        }
    }

    /// Leaf content (`None` for containers)
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s.content()),
            Self::Variable(s) => Some(s.content()),
            _ => None,
        }
    }

    /// Render the exact text belonging at this segment's position
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    /// Append rendered text to `out`
    pub fn render_into(&self, out: &mut String) {
        match self {
            Self::Literal(s) => out.push_str(s.content()),
            Self::Variable(s) => out.push_str(s.content()),
            Self::Composite(s) => s.children().iter().for_each(|c| c.render_into(out)),
            Self::Appendable(s) => s.children().iter().for_each(|c| c.render_into(out)),
            Self::Synchronized(s) => s.render_into(out),
        }
    }

    /// Direct child by id
    ///
    /// Absence is an expected outcome, not a fault.
    #[must_use]
    pub fn child(&self, id: &str) -> Option<&Segment> {
        match self {
            Self::Literal(_) | Self::Variable(_) => None,
            Self::Composite(s) => s.child(id),
            Self::Appendable(s) => s.child(id),
            Self::Synchronized(s) => s.child(id),
        }
    }

    /// Mutable direct child by id
    pub(crate) fn child_mut(&mut self, id: &str) -> Option<&mut Segment> {
        match self {
            Self::Literal(_) | Self::Variable(_) => None,
            Self::Composite(s) => s.child_mut(id),
            Self::Appendable(s) => s.child_mut(id),
            Self::Synchronized(s) => s.child_mut(id),
        }
    }

    /// Child ids in the order they are rendered (empty for leaves)
    #[must_use]
    pub fn child_order(&self) -> Vec<&str> {
        match self {
            Self::Literal(_) | Self::Variable(_) => Vec::new(),
            Self::Composite(s) => s.children().ids().collect(),
            Self::Appendable(s) => s.children().ids().collect(),
            Self::Synchronized(s) => s.emitted_order().iter().map(String::as_str).collect(),
        }
    }

    /// Descendant at `path` (the empty path is `self`)
    #[must_use]
    pub fn find(&self, path: &SegmentPath) -> Option<&Segment> {
        path.iter().try_fold(self, |node, id| node.child(id))
    }

    fn find_mut(&mut self, path: &SegmentPath) -> Option<&mut Segment> {
        let mut node = self;
        for id in path.iter() {
            node = node.child_mut(id)?;
        }
        Some(node)
    }

    /// Variable at `path`, for editing its content
    ///
    /// Only leaf content is reachable mutably; ids and child lists are fixed
    /// once a tree is built.
    pub fn variable_mut(&mut self, path: &SegmentPath) -> Option<&mut VariableSegment> {
        match self.find_mut(path)? {
            Self::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Assign content to the variable at `path`
    ///
    /// # Errors
    /// - [`SegmentError::NotFound`] if nothing lives at `path`
    /// - [`SegmentError::NotEditable`] if the target is not a variable
    pub fn set_content(
        &mut self,
        path: &SegmentPath,
        content: impl Into<String>,
    ) -> Result<(), SegmentError> {
        match self.find_mut(path) {
            Some(Self::Variable(v)) => {
                v.set_content(content);
                Ok(())
            }
            Some(_) => Err(SegmentError::NotEditable(path.clone())),
            None => Err(SegmentError::NotFound(path.clone())),
        }
    }

    /// Number of segments in this subtree, including `self`
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + match self {
            Self::Literal(_) | Self::Variable(_) => 0,
            Self::Composite(s) => s.children().iter().map(Segment::node_count).sum(),
            Self::Appendable(s) => s.children().iter().map(Segment::node_count).sum(),
            Self::Synchronized(s) => s.new_side().children().iter().map(Segment::node_count).sum(),
        }
    }
}

impl From<LiteralSegment> for Segment {
    fn from(s: LiteralSegment) -> Self {
        Self::Literal(s)
    }
}

impl From<VariableSegment> for Segment {
    fn from(s: VariableSegment) -> Self {
        Self::Variable(s)
    }
}

impl From<CompositeSegment> for Segment {
    fn from(s: CompositeSegment) -> Self {
        Self::Composite(s)
    }
}

impl From<AppendableSegment> for Segment {
    fn from(s: AppendableSegment) -> Self {
        Self::Appendable(s)
    }
}

impl From<SyncSegment> for Segment {
    fn from(s: SyncSegment) -> Self {
        Self::Synchronized(s)
    }
}
