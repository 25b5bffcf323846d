// src/pipeline.rs
//
// Extract → Transform → Persist. Each stage either succeeds completely or
// the run stops with a stage-tagged error; nothing downstream ever sees a
// table that failed upstream.

use std::path::PathBuf;

use crate::config::options::PipelineOptions;
use crate::error::Result;
use crate::progress::{NullProgress, Progress};
use crate::transform::TransformReport;
use crate::{extract, file, transform};

/// Summary of what was produced.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub sources: Vec<PathBuf>,
    pub report: TransformReport,
    pub table_file: PathBuf,
    pub player_files: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
}

/// Top-level runner.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(opts: &PipelineOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };

    let result = run_stages(opts, progress);
    match &result {
        Ok(sum) => progress.log(&format!(
            "Wrote {} row(s), {} player file(s)",
            sum.report.output_rows,
            sum.player_files.len()
        )),
        Err(e) => {
            loge!("Pipeline: {} failed: {}", e.stage(), e);
            progress.log(&format!("Error: {e}"));
        }
    }
    progress.finish();
    result
}

fn run_stages(opts: &PipelineOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    progress.stage("extract");
    logf!("Pipeline: input {}", opts.input.describe());
    let raw = extract::extract(&opts.input)?;

    progress.stage("transform");
    let cleaned = transform::transform(&raw, opts.date_policy)?;

    progress.stage("persist");
    let written = file::persist(
        &cleaned.rows,
        &opts.output.table_file,
        &opts.output.players_dir,
        opts.format,
        opts.prune_stale,
    )?;

    Ok(RunSummary {
        sources: raw.sources,
        report: cleaned.report,
        table_file: written.table_file,
        player_files: written.player_files,
        pruned: written.pruned,
    })
}
