//! Dotted addresses of segments within a file tree

use crate::error::SegmentError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Ids leading from a file root down to one of its segments
///
/// The root itself is not named: `attributes.name` is the child `name` of
/// the root's child `attributes`, and the empty path is the root. Ids are
/// opaque model identifiers, so only `.` is special.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SegmentPath(Vec<String>);

impl SegmentPath {
    /// Path to a direct child of the root
    #[inline]
    #[must_use]
    pub fn single(id: impl Into<String>) -> Self {
        Self(vec![id.into()])
    }

    /// Path to the root
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Ids from the root's child downwards
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SegmentPath {
    fn from_iter<I: IntoIterator<Item = String>>(ids: I) -> Self {
        Self(ids.into_iter().collect())
    }
}

impl Display for SegmentPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for SegmentPath {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        s.split('.')
            .map(|id| {
                if id.is_empty() {
                    Err(SegmentError::InvalidPath(format!("empty id in '{s}'")))
                } else {
                    Ok(id.to_string())
                }
            })
            .collect()
    }
}
