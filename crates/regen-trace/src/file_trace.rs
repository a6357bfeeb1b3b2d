//! One generated file and its segment tree

use crate::error::TraceError;
use crate::layout::checked_path;
use regen_segment::{Segment, TraceRecord};
use regen_sync::{synchronize_with_stats, MergeStats};

/// A generated file: relative path plus the tree it renders from
///
/// Text and trace are both derived from the tree on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTraceModel {
    path: String,
    root: Segment,
}

impl FileTraceModel {
    /// Create file model (path is normalized)
    ///
    /// # Errors
    /// Returns [`TraceError::UnsafePath`] if `path` could resolve outside the
    /// output directory
    pub fn new(path: &str, root: Segment) -> Result<Self, TraceError> {
        Ok(Self {
            path: checked_path(path)?,
            root,
        })
    }

    /// Relative path with forward slashes
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whole-file tree
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Segment {
        &self.root
    }

    /// Take the tree out
    #[inline]
    #[must_use]
    pub fn into_root(self) -> Segment {
        self.root
    }

    /// Rendered file text
    #[must_use]
    pub fn content(&self) -> String {
        self.root.render()
    }

    /// Trace record of the whole tree
    #[must_use]
    pub fn to_trace(&self) -> TraceRecord {
        self.root.to_trace()
    }

    /// Trace as JSON text
    ///
    /// # Errors
    /// Returns [`TraceError::Serialize`] if serialization fails
    pub fn trace_json(&self, pretty: bool) -> Result<String, TraceError> {
        let record = self.to_trace();
        let json = if pretty {
            record.to_json_pretty()?
        } else {
            record.to_json()?
        };
        Ok(json)
    }

    /// Merge this freshly generated file with the previous tree
    #[must_use]
    pub fn synchronized(self, old: Option<&Segment>) -> (Self, MergeStats) {
        let (root, stats) = synchronize_with_stats(self.root, old);
        (
            Self {
                path: self.path,
                root,
            },
            stats,
        )
    }

    /// Rebuild a file model from persisted trace JSON
    ///
    /// # Errors
    /// - [`TraceError::Malformed`] if `text` is not a trace record
    /// - [`TraceError::InvalidTree`] if the record describes an inconsistent tree
    /// - [`TraceError::UnsafePath`] if `path` leaves the output directory
    pub fn from_trace_json(path: &str, text: &str) -> Result<Self, TraceError> {
        let record = TraceRecord::from_json(text).map_err(|e| TraceError::malformed(path, e))?;
        let root = Segment::from_trace(record).map_err(|e| TraceError::invalid_tree(path, e))?;
        Self::new(path, root)
    }
}
