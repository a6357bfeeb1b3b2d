//! Regeneration configuration
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! parallel = true
//! strict = false
//! pretty_traces = true
//!
//! [layout]
//! trace_dir = "traces"
//! ```

use crate::error::TraceError;
use crate::layout::TraceLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Regeneration configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegenConfig {
    /// Trace path conventions
    pub layout: TraceLayout,
    /// Merge files in parallel
    pub parallel: bool,
    /// Abort the run on an unreadable previous trace instead of
    /// regenerating that file fresh
    pub strict: bool,
    /// Indent persisted traces
    pub pretty_traces: bool,
}

impl RegenConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With trace layout
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: TraceLayout) -> Self {
        self.layout = layout;
        self
    }

    /// With parallel merge
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// With strict trace loading
    #[inline]
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// With indented traces
    #[inline]
    #[must_use]
    pub fn with_pretty_traces(mut self, pretty: bool) -> Self {
        self.pretty_traces = pretty;
        self
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns [`TraceError::Config`] for invalid TOML or unknown value types
    pub fn from_toml_str(text: &str) -> Result<Self, TraceError> {
        toml::from_str(text).map_err(|e| TraceError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// - [`TraceError::Io`] if the file cannot be read
    /// - [`TraceError::Config`] if it cannot be parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TraceError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            layout: TraceLayout::default(),
            parallel: true,
            strict: false,
            pretty_traces: false,
        }
    }
}
