//! Regeneration driver
//!
//! Merges every freshly generated file with its previous tree and assembles
//! the run's [`TraceModel`].

use crate::config::RegenConfig;
use crate::error::TraceError;
use crate::file_trace::FileTraceModel;
use crate::model::TraceModel;
use crate::output::OutputFile;
use crate::previous::PreviousRun;
use rayon::prelude::*;
use regen_sync::MergeStats;

/// A file whose previous trace could not be used
///
/// The file was regenerated as if it had never been traced.
#[derive(Debug)]
pub struct FileFailure {
    /// Generated file path
    pub path: String,
    /// Why its previous trace was unusable
    pub error: TraceError,
}

/// Outcome of one regeneration run
#[derive(Debug)]
pub struct RegenerationReport {
    /// Merged files
    pub model: TraceModel,
    /// Files regenerated fresh because their trace was unusable
    pub failures: Vec<FileFailure>,
    /// Paths traced before but no longer generated
    pub stale: Vec<String>,
    /// Merge counters summed over all files
    pub stats: MergeStats,
}

impl RegenerationReport {
    /// Check if every previous trace was usable
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Files to persist for this run
    ///
    /// # Errors
    /// Returns [`TraceError::Serialize`] if a trace cannot be serialized
    pub fn output_files(&self, config: &RegenConfig) -> Result<Vec<OutputFile>, TraceError> {
        self.model.output_files(&config.layout, config.pretty_traces)
    }
}

/// Runs regeneration passes under one configuration
#[derive(Debug, Clone, Default)]
pub struct Regenerator {
    config: RegenConfig,
}

impl Regenerator {
    /// Create regenerator
    #[inline]
    #[must_use]
    pub fn new(config: RegenConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RegenConfig {
        &self.config
    }

    /// Merge `generated` with the previous run
    ///
    /// # Workflow
    /// 1. Load the previous tree of every generated file
    /// 2. Merge each file with its previous tree (in parallel if configured)
    /// 3. Assemble the trace model and list stale paths
    ///
    /// # Errors
    /// Only in strict mode: the first previous trace that could not be loaded.
    /// Otherwise such files are reported in [`RegenerationReport::failures`].
    pub fn run(
        &self,
        generated: Vec<FileTraceModel>,
        previous: &mut PreviousRun,
    ) -> Result<RegenerationReport, TraceError> {
        tracing::info!("Regenerating {} files", generated.len());

        // 1. Load previous trees
        let mut failures = Vec::new();
        for file in &generated {
            if let Err(error) = previous.old_tree(file.path()) {
                if self.config.strict {
                    return Err(error);
                }
                tracing::warn!("Regenerating {} fresh: {}", file.path(), error);
                failures.push(FileFailure {
                    path: file.path().to_string(),
                    error,
                });
            }
        }

        // 2. Merge
        let previous = &*previous;
        let merge = |file: FileTraceModel| {
            let old = previous.cached(file.path());
            file.synchronized(old)
        };
        let merged: Vec<(FileTraceModel, MergeStats)> = if self.config.parallel {
            generated.into_par_iter().map(merge).collect()
        } else {
            generated.into_iter().map(merge).collect()
        };

        // 3. Assemble
        let mut stats = MergeStats::default();
        let mut model = TraceModel::new();
        for (file, file_stats) in merged {
            tracing::debug!("Merged {}: {:?}", file.path(), file_stats);
            stats += file_stats;
            if let Some(replaced) = model.insert(file) {
                tracing::warn!("Duplicate generated path {}: keeping the later file", replaced.path());
            }
        }
        let stale = model.stale_paths(previous.manifest());

        tracing::info!(
            "Regenerated {} files: {} edits preserved, {} dropped, {} new, {} stale, {} failed",
            model.len(),
            stats.preserved,
            stats.dropped,
            stats.introduced,
            stale.len(),
            failures.len()
        );

        Ok(RegenerationReport {
            model,
            failures,
            stale,
            stats,
        })
    }
}
