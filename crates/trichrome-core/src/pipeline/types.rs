use std::path::PathBuf;
use std::time::Duration;

use crate::align::{LevelRecord, MetricKind};
use crate::frame::{ColorFrame, Displacement};

use super::config::{AlignMode, AutoParams};

/// A plate after alignment and post-processing, still in memory.
#[derive(Clone, Debug)]
pub struct PlateAlignment {
    pub composite: ColorFrame,
    pub metric: MetricKind,
    pub mode: AlignMode,
    pub params: AutoParams,
    /// Total displacement of the middle third (green).
    pub displacement_a: Displacement,
    /// Total displacement of the bottom third (red).
    pub displacement_b: Displacement,
    /// Per-level contributions; a single full-resolution record in flat mode.
    pub levels: Vec<LevelRecord>,
    pub elapsed: Duration,
}

/// What was written for one input plate.
#[derive(Clone, Debug)]
pub struct PlateReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub metric: MetricKind,
    pub mode: AlignMode,
    pub params: AutoParams,
    pub displacement_a: Displacement,
    pub displacement_b: Displacement,
    pub levels: Vec<LevelRecord>,
    pub width: usize,
    pub height: usize,
    pub elapsed: Duration,
}

/// Outcome of a batch run. Failures do not stop the other plates.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: Vec<PlateReport>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Thread-safe progress reporting for batch runs.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// The batch is starting with `total` plates.
    fn begin(&self, _total: usize) {}

    /// One plate finished (successfully or not). `done` counts finished plates.
    fn advance(&self, _done: usize) {}

    /// Every plate has finished.
    fn finish(&self) {}
}

/// No-op progress reporter.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
