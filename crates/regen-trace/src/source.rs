//! Where the previous run's traces are read from
//!
//! Provides the [`TraceSource`] trait plus a filesystem and an in-memory
//! implementation.

use crate::layout::normalize_path;
use crate::output::OutputFile;
use std::collections::HashMap;
use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};

/// Read access to files persisted by an earlier run
pub trait TraceSource: Send + Sync + Debug {
    /// Contents of the file at `relative`
    ///
    /// # Returns
    /// - `Ok(None)` if no such file exists
    /// - `Ok(Some(text))` otherwise
    ///
    /// # Errors
    /// Any IO failure other than absence
    fn read(&self, relative: &str) -> io::Result<Option<String>>;
}

/// Files below a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create source rooted at `root`
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TraceSource for DirectorySource {
    fn read(&self, relative: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.root.join(relative)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Files held in memory, e.g. fetched from a hosting service
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    /// Create empty source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a file
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: &str, contents: impl Into<String>) {
        self.files.insert(normalize_path(path), contents.into());
    }

    /// Number of files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl TraceSource for MemorySource {
    fn read(&self, relative: &str) -> io::Result<Option<String>> {
        Ok(self.files.get(&normalize_path(relative)).cloned())
    }
}

impl FromIterator<OutputFile> for MemorySource {
    fn from_iter<I: IntoIterator<Item = OutputFile>>(iter: I) -> Self {
        let mut source = Self::new();
        for file in iter {
            source.insert(&file.path, file.contents);
        }
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_source_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("traces")).unwrap();
        std::fs::write(dir.path().join("traces/a.traces"), "{}").unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.read("traces/a.traces").unwrap().as_deref(), Some("{}"));
        assert_eq!(source.read("traces/b.traces").unwrap(), None);
    }

    #[test]
    fn directory_source_reports_other_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("traces/a.traces")).unwrap();
        // a directory where a file is expected
        assert!(DirectorySource::new(dir.path()).read("traces/a.traces").is_err());
    }

    #[test]
    fn memory_source_normalizes_paths() {
        let source = MemorySource::new().with_file("traces\\x.traces", "1");
        assert_eq!(source.read("traces/x.traces").unwrap().as_deref(), Some("1"));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn memory_source_from_outputs() {
        let source: MemorySource = vec![OutputFile::new("a.txt", "A")].into_iter().collect();
        assert_eq!(source.read("a.txt").unwrap().as_deref(), Some("A"));
        assert!(source.read("b.txt").unwrap().is_none());
    }
}
