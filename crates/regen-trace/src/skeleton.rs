//! Freshly generated files as handed over by the model layer
//!
//! ```json
//! {"files": {"src/Person.java": {"type": "composite", "id": "Person.java", "children": []}},
//!  "guidances": {"hints": []}}
//! ```

use crate::error::TraceError;
use crate::file_trace::FileTraceModel;
use regen_segment::{Segment, TraceRecord};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One generation's output before merging
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Skeleton {
    /// Tree of every generated file, by relative path
    pub files: BTreeMap<String, TraceRecord>,
    /// Guidance document to persist next to the manifest
    #[serde(default)]
    pub guidances: Option<serde_json::Value>,
}

impl Skeleton {
    /// Parse skeleton JSON
    ///
    /// # Errors
    /// Returns [`TraceError::Malformed`] naming `origin` for unparseable input
    pub fn from_json(origin: &str, text: &str) -> Result<Self, TraceError> {
        serde_json::from_str(text).map_err(|e| TraceError::malformed(origin, e))
    }

    /// Build the file models
    ///
    /// # Errors
    /// - [`TraceError::InvalidTree`] naming the first inconsistent file
    /// - [`TraceError::UnsafePath`] for a path outside the output directory
    pub fn into_files(self) -> Result<Vec<FileTraceModel>, TraceError> {
        self.files
            .into_iter()
            .map(|(path, record)| -> Result<FileTraceModel, TraceError> {
                let root =
                    Segment::from_trace(record).map_err(|e| TraceError::invalid_tree(&path, e))?;
                FileTraceModel::new(&path, root)
            })
            .collect()
    }
}
