//! Trees persisted by the previous run
//!
//! Loaded lazily by path and cached for the duration of one run.

use crate::error::TraceError;
use crate::file_trace::FileTraceModel;
use crate::layout::{normalize_path, TraceLayout};
use crate::manifest::TraceManifest;
use crate::source::TraceSource;
use regen_segment::Segment;
use std::collections::HashMap;

/// Previous run's manifest and trees, read through a [`TraceSource`]
///
/// The cache only holds successful loads: `None` records a file that had no
/// trace, and a failed load is retried on the next call.
#[derive(Debug)]
pub struct PreviousRun {
    source: Box<dyn TraceSource>,
    layout: TraceLayout,
    manifest: TraceManifest,
    trees: HashMap<String, Option<Segment>>,
}

impl PreviousRun {
    /// Open the previous run and read its manifest
    ///
    /// A missing manifest means this is the first generation.
    ///
    /// # Errors
    /// - [`TraceError::Io`] if the manifest cannot be read
    /// - [`TraceError::Malformed`] if it is not a manifest
    pub fn open(source: impl TraceSource + 'static, layout: TraceLayout) -> Result<Self, TraceError> {
        let manifest_path = layout.manifest_path();
        let manifest = match source
            .read(&manifest_path)
            .map_err(|e| TraceError::io_error(&manifest_path, e))?
        {
            Some(text) => TraceManifest::from_json(&text)
                .map_err(|e| TraceError::malformed(&manifest_path, e))?,
            None => {
                tracing::info!("No manifest at {}: first generation", manifest_path);
                TraceManifest::new()
            }
        };

        Ok(Self {
            source: Box::new(source),
            layout,
            manifest,
            trees: HashMap::new(),
        })
    }

    /// Previous run with nothing persisted
    #[must_use]
    pub fn empty(layout: TraceLayout) -> Self {
        Self {
            source: Box::new(crate::source::MemorySource::new()),
            layout,
            manifest: TraceManifest::new(),
            trees: HashMap::new(),
        }
    }

    /// Manifest of the previous run (empty on first generation)
    #[inline]
    #[must_use]
    pub fn manifest(&self) -> &TraceManifest {
        &self.manifest
    }

    /// Trace layout used to locate files
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &TraceLayout {
        &self.layout
    }

    /// Previous tree of a generated file
    ///
    /// # Returns
    /// - `Ok(None)` if the file has no trace
    /// - `Ok(Some(tree))` otherwise
    ///
    /// # Errors
    /// - [`TraceError::Io`] if the trace exists but cannot be read
    /// - [`TraceError::Malformed`] / [`TraceError::InvalidTree`] if it cannot be
    ///   turned into a tree
    pub fn old_tree(&mut self, path: &str) -> Result<Option<&Segment>, TraceError> {
        let path = normalize_path(path);
        if !self.trees.contains_key(&path) {
            let tree = self.load(&path)?;
            self.trees.insert(path.clone(), tree);
        }
        Ok(self.trees.get(&path).and_then(Option::as_ref))
    }

    /// Previously loaded tree, without touching the source
    #[must_use]
    pub fn cached(&self, path: &str) -> Option<&Segment> {
        self.trees.get(&normalize_path(path)).and_then(Option::as_ref)
    }

    fn load(&self, path: &str) -> Result<Option<Segment>, TraceError> {
        let trace_path = self.layout.trace_path(path);
        let Some(text) = self
            .source
            .read(&trace_path)
            .map_err(|e| TraceError::io_error(&trace_path, e))?
        else {
            tracing::debug!("No previous trace for {}", path);
            return Ok(None);
        };
        let file = FileTraceModel::from_trace_json(&trace_path, &text)?;
        Ok(Some(file.into_root()))
    }
}
