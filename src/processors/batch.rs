//! Batch conversion of a table directory into an image directory.
//!
//! The driver scans the input directory, pairs every table with its target
//! image path, and pushes each pair through parse -> render. Every file
//! gets its own [`FileReport`] instead of aborting the whole run on the
//! first error; the caller inspects the [`BatchSummary`] and decides how
//! to finish.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;
use thiserror::Error;

use crate::config::{PipelineConfig, PlotConfig};
use crate::core::loaders::{load_light_curve, LoaderError};
use crate::core::scanner::{find_name_collisions, output_path_for, scan_input_dir, ScanError};
use crate::visualization::{render_scatter, RenderError};

/// Errors that abort the batch before any file is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to create output directory '{path}': {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single file failed.
#[derive(Error, Debug)]
pub enum BatchFailure {
    #[error("parse: {0}")]
    Parse(#[from] LoaderError),

    #[error("render: {0}")]
    Render(#[from] RenderError),
}

/// One table/image pair scheduled for conversion.
#[derive(Debug, Clone)]
pub struct FileTask {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Outcome of one file: the number of rendered records, or why it failed.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: Result<usize, BatchFailure>,
}

/// Per-file outcomes of a whole batch, in task order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    /// Number of files rendered successfully.
    pub fn rendered(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_ok()).count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.reports.len() - self.rendered()
    }

    /// Returns true if every file rendered.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// Iterates over the failed reports.
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| r.outcome.is_err())
    }
}

/// Convert one table file into one image file.
///
/// Returns the number of records rendered.
pub fn process_file(
    input: &Path,
    output: &Path,
    plot: &PlotConfig,
) -> Result<usize, BatchFailure> {
    let curve = load_light_curve(input)?;
    render_scatter(&curve, output, plot)?;
    Ok(curve.len())
}

/// Scan the input directory and build the batch work list.
///
/// Tasks are sorted by input path for stable progress display. Output
/// names that collide case-insensitively are logged; the later file wins
/// on file systems that fold case. The output directory is created if
/// missing, so the renderer itself never has to.
///
/// # Errors
///
/// Fails if the input directory cannot be read or the output directory
/// cannot be created. Nothing has been processed at that point.
pub fn plan_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
) -> Result<Vec<FileTask>, BatchError> {
    let mut inputs = scan_input_dir(input_dir, &config.extensions.data)?;
    inputs.sort();

    for (kept, colliding) in find_name_collisions(&inputs) {
        warn!(
            "output name collision: {} and {} map to the same image on case-insensitive file systems",
            kept.display(),
            colliding.display()
        );
    }

    fs::create_dir_all(output_dir).map_err(|e| BatchError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let tasks = inputs
        .into_iter()
        .map(|input| {
            let output = output_path_for(&input, output_dir, &config.extensions.image);
            FileTask { input, output }
        })
        .collect();

    Ok(tasks)
}

/// Run the batch work list, reporting each finished file through `on_done`.
///
/// Runs files in parallel when `batch.parallel` is set; `batch.fail_fast`
/// forces sequential processing and stops after the first failed file, so
/// the summary then covers only the files attempted.
pub fn run_tasks<F>(tasks: Vec<FileTask>, config: &PipelineConfig, on_done: F) -> BatchSummary
where
    F: Fn(&FileReport) + Sync,
{
    let run_one = |task: FileTask| {
        let outcome = process_file(&task.input, &task.output, &config.plot);
        match &outcome {
            Ok(records) => info!(
                "rendered {} -> {} ({} records)",
                task.input.display(),
                task.output.display(),
                records
            ),
            Err(e) => warn!("failed to convert {}: {}", task.input.display(), e),
        }
        let report = FileReport {
            input: task.input,
            output: task.output,
            outcome,
        };
        on_done(&report);
        report
    };

    let reports = if config.batch.fail_fast {
        let mut reports = Vec::with_capacity(tasks.len());
        for task in tasks {
            let report = run_one(task);
            let stop = report.outcome.is_err();
            reports.push(report);
            if stop {
                break;
            }
        }
        reports
    } else if config.batch.parallel {
        tasks.into_par_iter().map(run_one).collect()
    } else {
        tasks.into_iter().map(run_one).collect()
    };

    BatchSummary { reports }
}

/// Convert every table in `input_dir` into an image in `output_dir`.
pub fn convert_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
) -> Result<BatchSummary, BatchError> {
    let tasks = plan_directory(input_dir, output_dir, config)?;
    Ok(run_tasks(tasks, config, |_| {}))
}
