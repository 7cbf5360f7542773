use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::consts::{MAX_BATCH_WORKERS, SUPPORTED_EXTENSIONS};
use crate::error::{Result, TrichromeError};

use super::config::AlignConfig;
use super::process::process_plate;
use super::types::{BatchSummary, PlateReport, ProgressReporter};

/// List plate images in `dir` (non-recursive), sorted by path.
pub fn discover_plates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut plates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if supported {
            plates.push(path);
        }
    }
    plates.sort();
    Ok(plates)
}

/// Worker count used when none is requested: the machine's parallelism,
/// capped at [`MAX_BATCH_WORKERS`].
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
        .min(MAX_BATCH_WORKERS)
}

/// Align every plate in `inputs` on a pool of `workers` threads.
///
/// Each plate is an independent run. A failing plate is recorded in
/// [`BatchSummary::failed`] and does not stop the others.
pub fn process_batch(
    inputs: &[PathBuf],
    config: &AlignConfig,
    output_dir: &Path,
    workers: usize,
    reporter: &dyn ProgressReporter,
) -> Result<BatchSummary> {
    if inputs.is_empty() {
        return Err(TrichromeError::EmptySequence);
    }

    let workers = workers.max(1);
    info!(plates = inputs.len(), workers, "Starting batch");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| TrichromeError::Pipeline(format!("Failed to start worker pool: {e}")))?;

    reporter.begin(inputs.len());
    let counter = AtomicUsize::new(0);

    let results: Vec<(PathBuf, Result<PlateReport>)> = pool.install(|| {
        inputs
            .par_iter()
            .map(|path| {
                let result = process_plate(path, config, output_dir);
                let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                reporter.advance(done);
                (path.clone(), result)
            })
            .collect()
    });
    reporter.finish();

    let mut summary = BatchSummary::default();
    for (path, result) in results {
        match result {
            Ok(report) => summary.succeeded.push(report),
            Err(e) => {
                warn!(input = %path.display(), error = %e, "Plate failed");
                summary.failed.push((path, e.to_string()));
            }
        }
    }

    info!(
        succeeded = summary.succeeded.len(),
        failed = summary.failed.len(),
        "Batch complete"
    );
    Ok(summary)
}
