//! Merge counters

use serde::Serialize;
use std::ops::AddAssign;

/// What a merge did with prior content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Variables whose previous content was carried forward
    pub preserved: usize,
    /// Variables that kept the generated default
    pub defaulted: usize,
    /// List children that existed before but are no longer generated
    pub dropped: usize,
    /// List children with no previous position
    pub introduced: usize,
}

impl MergeStats {
    /// Check if nothing was counted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign for MergeStats {
    fn add_assign(&mut self, other: Self) {
        self.preserved += other.preserved;
        self.defaulted += other.defaulted;
        self.dropped += other.dropped;
        self.introduced += other.introduced;
    }
}
