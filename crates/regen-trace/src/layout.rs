//! Where traces live next to the generated files

use crate::error::TraceError;
use serde::{Deserialize, Serialize};

/// Path conventions for persisted traces
///
/// A generated file at `P` has its trace at `<trace_dir>/P<trace_suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceLayout {
    /// Directory holding every trace file
    pub trace_dir: String,
    /// Suffix appended to a file's path to name its trace
    pub trace_suffix: String,
    /// Manifest file name inside `trace_dir`
    pub manifest_file: String,
    /// Guidance file name inside `trace_dir`
    pub guidance_file: String,
}

impl TraceLayout {
    /// Create default layout
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With trace directory
    #[inline]
    #[must_use]
    pub fn with_trace_dir(mut self, dir: impl Into<String>) -> Self {
        self.trace_dir = dir.into();
        self
    }

    /// Trace path of a generated file
    #[must_use]
    pub fn trace_path(&self, path: &str) -> String {
        format!(
            "{}/{}{}",
            self.trace_dir,
            normalize_path(path),
            self.trace_suffix
        )
    }

    /// Manifest path
    #[inline]
    #[must_use]
    pub fn manifest_path(&self) -> String {
        format!("{}/{}", self.trace_dir, self.manifest_file)
    }

    /// Guidance path
    #[inline]
    #[must_use]
    pub fn guidance_path(&self) -> String {
        format!("{}/{}", self.trace_dir, self.guidance_file)
    }
}

impl Default for TraceLayout {
    fn default() -> Self {
        Self {
            trace_dir: "traces".to_string(),
            trace_suffix: ".traces".to_string(),
            manifest_file: "tracedFiles.json".to_string(),
            guidance_file: "guidances.json".to_string(),
        }
    }
}

/// Relative path with forward slashes and no leading `./` or `/`
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut rest = path.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }
    rest.to_string()
}

/// Normalized path of a generated file
///
/// # Errors
/// Returns [`TraceError::UnsafePath`] if the path is empty or has a `..`
/// component
pub fn checked_path(path: &str) -> Result<String, TraceError> {
    let normalized = normalize_path(path);
    if normalized.is_empty() || normalized.split('/').any(|part| part == "..") {
        return Err(TraceError::UnsafePath(path.to_string()));
    }
    Ok(normalized)
}
