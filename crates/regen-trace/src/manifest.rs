//! Manifest of traced files
//!
//! Persisted as `{"tracedFiles": [...]}`: a JSON list of paths, never a
//! string holding escaped JSON.

use crate::layout::normalize_path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sorted, deduplicated set of traced paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceManifest {
    #[serde(rename = "tracedFiles")]
    traced_files: BTreeSet<String>,
}

impl TraceManifest {
    /// Create empty manifest
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path (normalized)
    ///
    /// Returns `false` if it was already listed.
    pub fn insert(&mut self, path: &str) -> bool {
        self.traced_files.insert(normalize_path(path))
    }

    /// Check if a path is listed
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.traced_files.contains(&normalize_path(path))
    }

    /// Listed paths in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.traced_files.iter().map(String::as_str)
    }

    /// Number of listed paths
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.traced_files.len()
    }

    /// Check if nothing is listed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traced_files.is_empty()
    }

    /// Parse manifest JSON
    ///
    /// Paths are normalized on load, so manifests written with backslashes
    /// compare equal to fresh ones.
    ///
    /// # Errors
    /// Returns the `serde_json` error for unparseable input
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: Self = serde_json::from_str(text)?;
        Ok(raw.traced_files.iter().map(String::as_str).collect())
    }

    /// Serialize to JSON
    ///
    /// # Errors
    /// Returns the `serde_json` error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<'a> FromIterator<&'a str> for TraceManifest {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for path in iter {
            manifest.insert(path);
        }
        manifest
    }
}
