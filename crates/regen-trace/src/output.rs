//! Emitted files

use crate::error::TraceError;
use crate::layout::checked_path;
use serde::Serialize;
use std::path::Path;

/// One file to hand to the caller: relative path and full contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    /// Relative path with forward slashes
    pub path: String,
    /// File contents
    pub contents: String,
}

impl OutputFile {
    /// Create output file
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Write every file below `root`, creating parent directories
///
/// # Errors
/// - [`TraceError::UnsafePath`] if a file would land outside `root`; nothing
///   is written in that case
/// - [`TraceError::Io`] naming the first path that could not be written
pub fn write_all(root: impl AsRef<Path>, files: &[OutputFile]) -> Result<(), TraceError> {
    let root = root.as_ref();
    let paths = files
        .iter()
        .map(|file| checked_path(&file.path))
        .collect::<Result<Vec<_>, _>>()?;
    for (file, path) in files.iter().zip(&paths) {
        let target = root.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TraceError::io_error(parent, e))?;
        }
        std::fs::write(&target, &file.contents).map_err(|e| TraceError::io_error(&target, e))?;
    }
    tracing::debug!("Wrote {} files below {}", files.len(), root.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            OutputFile::new("src/main/A.java", "class A {}\n"),
            OutputFile::new("traces/tracedFiles.json", "{\"tracedFiles\":[]}"),
        ];
        write_all(dir.path(), &files).unwrap();

        let text = std::fs::read_to_string(dir.path().join("src/main/A.java")).unwrap();
        assert_eq!(text, "class A {}\n");
        assert!(dir.path().join("traces/tracedFiles.json").is_file());
    }

    #[test]
    fn unwritable_target_names_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blocker"), "file, not a directory").unwrap();
        let files = vec![OutputFile::new("blocker/a.txt", "x")];

        let err = write_all(dir.path(), &files).unwrap_err();
        assert!(matches!(err, TraceError::Io { ref path, .. } if path.ends_with("blocker")));
    }

    #[test]
    fn refuses_to_write_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out");
        let files = vec![
            OutputFile::new("inside.txt", "ok"),
            OutputFile::new("../outside.txt", "nope"),
        ];
        let err = write_all(&root, &files).unwrap_err();
        assert!(matches!(err, TraceError::UnsafePath(_)));
        assert!(!dir.path().join("outside.txt").exists());
        assert!(!root.join("inside.txt").exists());
    }
}
