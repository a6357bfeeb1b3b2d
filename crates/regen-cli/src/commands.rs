//! Subcommand implementations

use anyhow::Context;
use regen_trace::{
    write_all, DirectorySource, FileTraceModel, PreviousRun, RegenConfig, Regenerator, Skeleton,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Inputs of `regen run`
#[derive(Debug, Clone)]
pub(crate) struct RunOptions {
    pub(crate) skeleton: PathBuf,
    pub(crate) out: PathBuf,
    pub(crate) config: Option<PathBuf>,
    pub(crate) strict: bool,
}

fn load_skeleton(path: &Path) -> anyhow::Result<Skeleton> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading skeleton {}", path.display()))?;
    Ok(Skeleton::from_json(&path.display().to_string(), &text)?)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RegenConfig> {
    Ok(match path {
        Some(path) => RegenConfig::load(path)?,
        None => RegenConfig::default(),
    })
}

/// Merge, write everything below `out`, and summarize
pub(crate) fn run(options: &RunOptions) -> anyhow::Result<String> {
    let mut config = load_config(options.config.as_deref())?;
    if options.strict {
        config = config.with_strict(true);
    }

    let skeleton = load_skeleton(&options.skeleton)?;
    let guidances = skeleton.guidances.clone();
    let generated = skeleton.into_files()?;

    let mut previous = PreviousRun::open(DirectorySource::new(&options.out), config.layout.clone())?;
    let mut report = Regenerator::new(config.clone()).run(generated, &mut previous)?;
    if let Some(guidances) = guidances {
        report.model = report.model.with_guidances(guidances);
    }

    let files = report.output_files(&config)?;
    write_all(&options.out, &files)?;
    tracing::info!("Wrote {} files to {}", files.len(), options.out.display());

    let mut summary = String::new();
    writeln!(
        summary,
        "{} files written ({} edits preserved, {} new, {} dropped)",
        report.model.len(),
        report.stats.preserved,
        report.stats.introduced,
        report.stats.dropped
    )?;
    for failure in &report.failures {
        writeln!(summary, "regenerated fresh: {} ({})", failure.path, failure.error)?;
    }
    for path in &report.stale {
        writeln!(summary, "stale: {path}")?;
    }
    Ok(summary)
}

/// Text of a persisted trace
pub(crate) fn render(trace: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(trace)
        .with_context(|| format!("reading trace {}", trace.display()))?;
    let file = FileTraceModel::from_trace_json(&trace.display().to_string(), &text)?;
    Ok(file.content())
}

/// Previously traced paths the skeleton no longer generates
pub(crate) fn stale(
    skeleton: &Path,
    out: &Path,
    config: Option<&Path>,
) -> anyhow::Result<Vec<String>> {
    let config = load_config(config)?;
    let generated = load_skeleton(skeleton)?.into_files()?;
    let previous = PreviousRun::open(DirectorySource::new(out), config.layout)?;
    let model = generated.into_iter().collect::<regen_trace::TraceModel>();
    Ok(model.stale_paths(previous.manifest()))
}
