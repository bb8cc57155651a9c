use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::encode::output::{OutputDescriptor, OutputFormat};
use crate::encode::writer::{GifSettings, encode_sequence};
use crate::foundation::core::{FrameSequence, GridShape};
use crate::foundation::error::{TileError, TileResult};
use crate::grid::partition::partition;
use crate::grid::plan::TilePlan;
use crate::masks::catalog::MaskCatalog;
use crate::run::opts::{RunMode, RunOpts};
use crate::source::decode::load_frames;
use crate::source::locator::Locator;
use crate::transform::pipeline::{TransformOpts, transform};

enum Layout {
    Grid(GridShape),
    Masked(MaskCatalog),
}

/// One output that could not be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileFailure {
    pub file_name: String,
    pub message: String,
}

/// Outcome of a completed run.
///
/// `outputs` and `failures` follow canonical tile (or mask) order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub out_dir: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<TileFailure>,
    /// Number of source frames processed.
    pub frames: usize,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute a run: decode, transform, partition or mask, and encode every output.
///
/// Config errors are reported before the source is read. Fetch and decode errors abort the
/// run. Encode errors are collected per output in the returned report; every encode has
/// finished by the time this returns.
#[tracing::instrument(skip(opts), fields(name = %opts.name))]
pub fn run(opts: &RunOpts) -> TileResult<RunReport> {
    opts.validate()?;
    let locator = Locator::parse(&opts.source)?;
    let format = OutputFormat::for_source(&locator)?;
    let gif = GifSettings::new(opts.gif_speed)?;
    let pool = build_thread_pool(opts.threads)?;

    let name = opts.name.trim();

    let (target_w, target_h) = match &opts.mode {
        RunMode::Grid { grid } => grid.pixel_size(opts.cell_size)?,
        RunMode::Masked { .. } => (opts.cell_size, opts.cell_size),
    };
    let topts = TransformOpts::new(
        opts.resize_mode,
        target_w,
        target_h,
        opts.filters.clone(),
        format,
    )?;

    let layout = match &opts.mode {
        RunMode::Grid { grid } => Layout::Grid(*grid),
        RunMode::Masked { mask_dir } => Layout::Masked(MaskCatalog::load_dir(mask_dir)?),
    };

    tracing::info!(source = %locator, ?format, "starting run");
    let frames = load_frames(&locator)?;

    let jobs: Vec<(OutputDescriptor, FrameSequence)> = match layout {
        Layout::Grid(grid) => {
            let plan = build_grid_plan(&frames, &topts, grid, opts.cell_size)?;
            let count = plan.len();
            plan.into_sequences()
                .into_iter()
                .enumerate()
                .map(|(idx, seq)| {
                    let desc = OutputDescriptor::for_tile(
                        name,
                        idx,
                        count,
                        format,
                        locator.extension(),
                    );
                    (desc, seq)
                })
                .collect()
        }
        Layout::Masked(catalog) => {
            let count = catalog.len();
            catalog
                .entries()
                .iter()
                .map(|mask| -> TileResult<(OutputDescriptor, FrameSequence)> {
                    tracing::debug!(mask = %mask.name, "applying mask");
                    let seq = frames
                        .iter()
                        .map(|f| transform(f, &topts, Some(&mask.pixels)))
                        .collect();
                    let desc = OutputDescriptor::new(
                        name,
                        mask.name.as_str(),
                        count,
                        format,
                        locator.extension(),
                    );
                    Ok((desc, FrameSequence::new(seq)?))
                })
                .collect::<TileResult<_>>()?
        }
    };

    let out_dir = opts.out_dir();
    prepare_out_dir(&out_dir)?;

    let (outputs, failures) = encode_outputs(&pool, &jobs, &out_dir, gif);
    let report = RunReport {
        out_dir,
        outputs,
        failures,
        frames: frames.len(),
    };

    tracing::info!(
        outputs = report.outputs.len(),
        failures = report.failures.len(),
        dir = %report.out_dir.display(),
        "run finished"
    );
    Ok(report)
}

/// Transform every source frame, partition it, and regroup tiles into per-tile sequences.
pub fn build_grid_plan(
    frames: &FrameSequence,
    topts: &TransformOpts,
    grid: GridShape,
    cell_size: u32,
) -> TileResult<TilePlan> {
    let per_frame = frames
        .iter()
        .enumerate()
        .map(|(idx, f)| {
            tracing::debug!(frame = idx, "transforming frame");
            partition(&transform(f, topts, None), grid, cell_size)
        })
        .collect::<TileResult<Vec<_>>>()?;
    TilePlan::aggregate(grid, per_frame)
}

/// Encode every job on `pool` and wait for all of them.
///
/// A failed output is logged and recorded; it never stops its siblings. Both lists keep job
/// order.
fn encode_outputs(
    pool: &rayon::ThreadPool,
    jobs: &[(OutputDescriptor, FrameSequence)],
    out_dir: &Path,
    gif: GifSettings,
) -> (Vec<PathBuf>, Vec<TileFailure>) {
    let results: Vec<(String, TileResult<PathBuf>)> = pool.install(|| {
        jobs.par_iter()
            .map(|(desc, seq)| (desc.file_name(), encode_sequence(seq, desc, out_dir, gif)))
            .collect()
    });

    let mut outputs = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (file_name, result) in results {
        match result {
            Ok(path) => outputs.push(path),
            Err(err) => {
                tracing::warn!(file = %file_name, error = %err, "output failed");
                failures.push(TileFailure {
                    file_name,
                    message: err.to_string(),
                });
            }
        }
    }
    (outputs, failures)
}

/// Empty `dir` (removing stale outputs of an earlier run) and recreate it.
pub fn prepare_out_dir(dir: &Path) -> TileResult<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("clear output dir '{}'", dir.display()))?;
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> TileResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(TileError::config("threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/run/session.rs"]
mod tests;
