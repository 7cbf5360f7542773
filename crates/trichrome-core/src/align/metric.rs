//! Similarity metrics scored by the exhaustive shift search.
//!
//! Each metric is a strategy behind [`SimilarityMetric`]; the search only ever
//! asks for a score and whether one score beats another, so the optimization
//! direction lives with the metric.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::NCC_NORM_EPSILON;

/// Scores how well a shifted candidate plane matches the reference plane.
pub trait SimilarityMetric: Send + Sync {
    /// Short identifier used in logs and output file names.
    fn name(&self) -> &'static str;

    /// Score `candidate` against `reference`. Both must have the same shape.
    fn evaluate(&self, candidate: &Array2<f32>, reference: &Array2<f32>) -> f64;

    /// `true` if `score` is strictly better than `current`.
    ///
    /// NaN is never better than anything.
    fn better(&self, score: f64, current: f64) -> bool;

    /// A score every finite score beats.
    fn worst(&self) -> f64;
}

/// Sum of squared differences. Lower is better.
#[derive(Clone, Copy, Debug, Default)]
pub struct SumSquaredDifferences;

impl SimilarityMetric for SumSquaredDifferences {
    fn name(&self) -> &'static str {
        "SSD"
    }

    fn evaluate(&self, candidate: &Array2<f32>, reference: &Array2<f32>) -> f64 {
        candidate
            .iter()
            .zip(reference.iter())
            .map(|(&a, &b)| {
                let d = a as f64 - b as f64;
                d * d
            })
            .sum()
    }

    fn better(&self, score: f64, current: f64) -> bool {
        score < current
    }

    fn worst(&self) -> f64 {
        f64::INFINITY
    }
}

/// Normalized cross-correlation of the flattened planes. Higher is better.
///
/// Invariant to a uniform gain on either plane. A plane with (near) zero norm
/// scores `-inf` so it is never selected.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizedCrossCorrelation;

impl SimilarityMetric for NormalizedCrossCorrelation {
    fn name(&self) -> &'static str {
        "NCC"
    }

    fn evaluate(&self, candidate: &Array2<f32>, reference: &Array2<f32>) -> f64 {
        let mut dot = 0.0f64;
        let mut norm_a = 0.0f64;
        let mut norm_b = 0.0f64;
        for (&a, &b) in candidate.iter().zip(reference.iter()) {
            let (a, b) = (a as f64, b as f64);
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        let norm_a = norm_a.sqrt();
        let norm_b = norm_b.sqrt();
        if norm_a < NCC_NORM_EPSILON || norm_b < NCC_NORM_EPSILON {
            return f64::NEG_INFINITY;
        }

        dot / (norm_a * norm_b)
    }

    fn better(&self, score: f64, current: f64) -> bool {
        score > current
    }

    fn worst(&self) -> f64 {
        f64::NEG_INFINITY
    }
}

static SSD: SumSquaredDifferences = SumSquaredDifferences;
static NCC: NormalizedCrossCorrelation = NormalizedCrossCorrelation;

/// Closed set of metrics selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    Ssd,
    #[default]
    Ncc,
}

impl MetricKind {
    pub fn metric(&self) -> &'static dyn SimilarityMetric {
        match self {
            Self::Ssd => &SSD,
            Self::Ncc => &NCC,
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.metric().name())
    }
}
