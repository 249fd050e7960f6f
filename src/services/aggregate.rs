//! Duration aggregation over scanned files

use crate::models::{SkippedFile, Summary};
use crate::services::probe::{DurationProbe, ProbeError};
use crate::{Error, MeasureOptions, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Notices emitted while a measurement runs
#[derive(Debug)]
pub enum MeasureEvent<'a> {
    /// Target validated, traversal starting.
    ScanStarted { root: &'a Path },
    /// Traversal finished with this many recognized files.
    ScanFinished { files: usize },
    /// About to probe file `index` (1-based) of `total`.
    Reading {
        index: usize,
        total: usize,
        path: &'a Path,
    },
    /// A file's duration could not be read; it is counted as skipped.
    Skipped {
        path: &'a Path,
        error: &'a ProbeError,
    },
}

/// Probe every file and accumulate the total duration
///
/// A failing probe never aborts the run: the file is counted in
/// `skipped_files` and the remaining files are still probed. With
/// `opts.jobs > 1` files are probed on a dedicated thread pool; outcomes are
/// collected in scan order and summed the same way as the sequential path.
///
/// # Errors
/// Only `InvalidInput` when the thread pool cannot be built.
pub fn aggregate(
    files: &[PathBuf],
    probe: &dyn DurationProbe,
    opts: &MeasureOptions,
) -> Result<Summary> {
    log::debug!(
        "Probing {} files with '{}' (jobs: {})",
        files.len(),
        probe.name(),
        opts.jobs
    );

    let outcomes = if opts.jobs > 1 {
        probe_parallel(files, probe, opts)?
    } else {
        files
            .iter()
            .enumerate()
            .map(|(i, path)| probe_one(i + 1, files.len(), path, probe, opts))
            .collect()
    };

    let mut total_seconds = 0.0_f64;
    let mut skipped = Vec::new();

    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(seconds) => total_seconds += seconds,
            Err(err) => skipped.push(SkippedFile {
                path: path.display().to_string(),
                reason: err.to_string(),
            }),
        }
    }

    Ok(Summary::new(total_seconds, files.len(), skipped))
}

fn probe_parallel(
    files: &[PathBuf],
    probe: &dyn DurationProbe,
    opts: &MeasureOptions,
) -> Result<Vec<std::result::Result<f64, ProbeError>>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.jobs)
        .build()
        .map_err(|e| Error::InvalidInput(format!("cannot start probe workers: {e}")))?;

    let started = AtomicUsize::new(0);
    let total = files.len();

    Ok(pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let index = started.fetch_add(1, Ordering::Relaxed) + 1;
                probe_one(index, total, path, probe, opts)
            })
            .collect()
    }))
}

fn probe_one(
    index: usize,
    total: usize,
    path: &Path,
    probe: &dyn DurationProbe,
    opts: &MeasureOptions,
) -> std::result::Result<f64, ProbeError> {
    opts.notify(&MeasureEvent::Reading { index, total, path });

    let outcome = probe.probe(path).and_then(|seconds| {
        if seconds.is_finite() && seconds >= 0.0 {
            Ok(seconds)
        } else {
            Err(ProbeError::InvalidDuration(seconds.to_string()))
        }
    });
    match &outcome {
        Ok(seconds) => log::debug!("{}: {seconds}s", path.display()),
        Err(error) => {
            log::warn!("Skipping {}: {error}", path.display());
            opts.notify(&MeasureEvent::Skipped { path, error });
        }
    }
    outcome
}
