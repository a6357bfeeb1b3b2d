//! Aggregate over all files of one regeneration run

use crate::error::TraceError;
use crate::file_trace::FileTraceModel;
use crate::layout::{normalize_path, TraceLayout};
use crate::manifest::TraceManifest;
use crate::output::OutputFile;
use std::collections::BTreeMap;

/// Every file generated by one run, keyed by normalized path
///
/// Built once per run and consumed to emit texts, traces and the manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceModel {
    files: BTreeMap<String, FileTraceModel>,
    guidances: Option<serde_json::Value>,
}

impl TraceModel {
    /// Create empty model
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the guidance document emitted next to the manifest
    #[must_use]
    pub fn with_guidances(mut self, guidances: serde_json::Value) -> Self {
        self.guidances = Some(guidances);
        self
    }

    /// Guidance document, if any
    #[inline]
    #[must_use]
    pub fn guidances(&self) -> Option<&serde_json::Value> {
        self.guidances.as_ref()
    }

    /// Add a file, returning the one it replaces
    pub fn insert(&mut self, file: FileTraceModel) -> Option<FileTraceModel> {
        self.files.insert(file.path().to_string(), file)
    }

    /// File by path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FileTraceModel> {
        self.files.get(&normalize_path(path))
    }

    /// Paths in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Files in path order
    pub fn files(&self) -> impl Iterator<Item = &FileTraceModel> {
        self.files.values()
    }

    /// Number of files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no file was generated
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Manifest listing every file of this model
    #[must_use]
    pub fn manifest(&self) -> TraceManifest {
        self.paths().collect()
    }

    /// Paths traced by `previous` that this model no longer generates
    #[must_use]
    pub fn stale_paths(&self, previous: &TraceManifest) -> Vec<String> {
        previous
            .paths()
            .filter(|path| !self.files.contains_key(*path))
            .map(str::to_string)
            .collect()
    }

    /// Everything to persist for this run
    ///
    /// Per file, the text at `P` then the trace at its trace path; finally
    /// the manifest and, when attached, the guidance document.
    ///
    /// # Errors
    /// Returns [`TraceError::Serialize`] if a trace cannot be serialized
    pub fn output_files(
        &self,
        layout: &TraceLayout,
        pretty: bool,
    ) -> Result<Vec<OutputFile>, TraceError> {
        let mut out = Vec::with_capacity(self.files.len() * 2 + 2);
        for file in self.files.values() {
            out.push(OutputFile::new(file.path(), file.content()));
            out.push(OutputFile::new(
                layout.trace_path(file.path()),
                file.trace_json(pretty)?,
            ));
        }
        out.push(OutputFile::new(
            layout.manifest_path(),
            self.manifest().to_json()?,
        ));
        if let Some(guidances) = &self.guidances {
            out.push(OutputFile::new(
                layout.guidance_path(),
                serde_json::to_string(guidances)?,
            ));
        }
        Ok(out)
    }
}

impl FromIterator<FileTraceModel> for TraceModel {
    fn from_iter<I: IntoIterator<Item = FileTraceModel>>(iter: I) -> Self {
        let mut model = Self::new();
        for file in iter {
            model.insert(file);
        }
        model
    }
}
