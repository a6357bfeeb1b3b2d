//! Error types for trace persistence
//!
//! Provides error handling for:
//! - Reading previous traces (ingress)
//! - Writing text, traces and manifest (egress)
//! - Loading configuration

use regen_segment::SegmentError;
use std::path::PathBuf;

/// Errors while loading, merging or emitting traces
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// IO error on a trace or output file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted record is not valid JSON of the expected shape
    #[error("malformed trace {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Persisted record describes an inconsistent tree
    #[error("invalid tree in {path}: {source}")]
    InvalidTree {
        path: String,
        #[source]
        source: SegmentError,
    },

    /// A generated file path would resolve outside the output directory
    #[error("unsafe output path '{0}': must be relative and stay below the output directory")]
    UnsafePath(String),

    /// Serialization of a trace or manifest failed
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(String),
}

impl TraceError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-trace error for path
    pub fn malformed(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }

    /// Create invalid-tree error for path
    pub fn invalid_tree(path: impl Into<String>, source: SegmentError) -> Self {
        Self::InvalidTree {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for trace operations
pub type TraceResult<T> = Result<T, TraceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TraceError::malformed("traces/A.java.traces", source);
        assert!(err.to_string().starts_with("malformed trace traces/A.java.traces"));
    }

    #[test]
    fn invalid_tree_display() {
        let err = TraceError::invalid_tree("x.traces", SegmentError::duplicate("root", "a"));
        assert!(err.to_string().contains("invalid tree in x.traces"));
    }

    #[test]
    fn config_error_display() {
        let err = TraceError::Config("bad key".to_string());
        assert_eq!(err.to_string(), "config error: bad key");
    }
}
