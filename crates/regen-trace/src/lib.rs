//! Regen Trace Layer
//!
//! Per-file trace models, their persistence, and the regeneration driver.
//!
//! # Core Concepts
//!
//! - [`FileTraceModel`]: One generated file and its segment tree
//! - [`TraceModel`]: All files of one run, keyed by path
//! - [`TraceManifest`]: The `tracedFiles.json` list of traced paths
//! - [`PreviousRun`]: Trees persisted by the previous run, read through a [`TraceSource`]
//! - [`Regenerator`]: Merges a generation with the previous run
//! - [`RegenConfig`]: TOML configuration
//!
//! # Example
//!
//! ```rust
//! use regen_segment::Segment;
//! use regen_trace::{FileTraceModel, MemorySource, PreviousRun, RegenConfig, Regenerator};
//!
//! let config = RegenConfig::default();
//! let source = MemorySource::new().with_file(
//!     "traces/notes.txt.traces",
//!     r#"{"type":"variable","id":"notes","content":"my notes\n"}"#,
//! );
//! let mut previous = PreviousRun::open(source, config.layout.clone()).unwrap();
//!
//! let notes = FileTraceModel::new("notes.txt", Segment::variable("notes", "notes\n")).unwrap();
//! let generated = vec![notes];
//! let report = Regenerator::new(config).run(generated, &mut previous).unwrap();
//!
//! assert_eq!(report.model.get("notes.txt").unwrap().content(), "my notes\n");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod config;
mod error;
mod file_trace;
mod layout;
mod manifest;
mod model;

// Persistence
mod output;
mod previous;
mod source;

// Driver
mod regenerate;
mod skeleton;

// Re-exports
pub use config::RegenConfig;
pub use error::{TraceError, TraceResult};
pub use file_trace::FileTraceModel;
pub use layout::{checked_path, normalize_path, TraceLayout};
pub use manifest::TraceManifest;
pub use model::TraceModel;
pub use output::{write_all, OutputFile};
pub use previous::PreviousRun;
pub use regenerate::{FileFailure, RegenerationReport, Regenerator};
pub use skeleton::Skeleton;
pub use source::{DirectorySource, MemorySource, TraceSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
