//! Exhaustive integer shift search.
//!
//! Every displacement in a square window is tried: the moving plane is brought
//! back by the candidate with a circular shift and scored against the
//! reference. Cost is O((2r+1)^2 * pixels) per moving plane.

use ndarray::Array2;
use tracing::warn;

use crate::consts::MIN_SEARCH_RADIUS;
use crate::error::{Result, TrichromeError};
use crate::frame::Displacement;

use super::metric::SimilarityMetric;
use super::shift::{apply_correction, circular_shift_into};

/// Candidate displacements for one search call: the square
/// `{(x, y) : -r <= x, y <= r}`.
///
/// On planes shorter than `2r + 1` along an axis several candidates wrap to
/// the same circular shift and score identically; the first one enumerated
/// wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchWindow {
    pub radius: i32,
}

impl SearchWindow {
    /// Window for `radius`, clamped to at least 1.
    pub fn new(radius: usize) -> Self {
        let r = radius.max(MIN_SEARCH_RADIUS).min(i32::MAX as usize / 2);
        Self { radius: r as i32 }
    }

    /// Candidates in enumeration order: `dx` ascending, then `dy` ascending.
    pub fn candidates(&self) -> impl Iterator<Item = Displacement> + '_ {
        let r = self.radius;
        (-r..=r).flat_map(move |dx| (-r..=r).map(move |dy| Displacement::new(dx, dy)))
    }

    pub fn len(&self) -> usize {
        let side = 2 * self.radius as usize + 1;
        side * side
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Best displacement of one moving plane.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub displacement: Displacement,
    /// The moving plane brought back onto the reference by `displacement`.
    pub shifted: Array2<f32>,
    /// Metric score at `displacement` (the metric's worst score if no
    /// candidate scored finitely).
    pub score: f64,
}

/// Best displacements of both moving planes against the same reference.
#[derive(Clone, Debug)]
pub struct PairSearch {
    pub a: SearchResult,
    pub b: SearchResult,
}

/// Find the displacement of `candidate` relative to `reference` within `radius`.
///
/// Ties go to the first candidate in window order. If every candidate scores
/// non-finite (e.g. an all-zero plane under NCC) the zero displacement is
/// returned.
pub fn search(
    reference: &Array2<f32>,
    candidate: &Array2<f32>,
    radius: usize,
    metric: &dyn SimilarityMetric,
) -> Result<SearchResult> {
    check_shape(reference, candidate)?;

    let window = SearchWindow::new(radius);
    let mut scratch = Array2::<f32>::zeros(candidate.dim());

    let mut best: Option<(Displacement, f64)> = None;
    for d in window.candidates() {
        circular_shift_into(candidate, -d, &mut scratch);
        let score = metric.evaluate(&scratch, reference);
        let current = best.map_or(metric.worst(), |(_, s)| s);
        if metric.better(score, current) {
            best = Some((d, score));
        }
    }

    let (displacement, score) = match best {
        Some(found) => found,
        None => {
            warn!(
                metric = metric.name(),
                "No candidate scored finitely; keeping zero displacement"
            );
            (Displacement::ZERO, metric.worst())
        }
    };

    Ok(SearchResult {
        displacement,
        shifted: apply_correction(candidate, displacement),
        score,
    })
}

/// Run [`search`] for both moving planes with the same window and metric.
/// The two searches are independent and run in parallel.
pub fn search_pair(
    reference: &Array2<f32>,
    moving_a: &Array2<f32>,
    moving_b: &Array2<f32>,
    radius: usize,
    metric: &dyn SimilarityMetric,
) -> Result<PairSearch> {
    let (a, b) = rayon::join(
        || search(reference, moving_a, radius, metric),
        || search(reference, moving_b, radius, metric),
    );
    Ok(PairSearch { a: a?, b: b? })
}

pub(crate) fn check_shape(reference: &Array2<f32>, other: &Array2<f32>) -> Result<()> {
    if reference.dim() != other.dim() {
        return Err(TrichromeError::InvalidInputShape {
            expected: reference.dim(),
            found: other.dim(),
        });
    }
    Ok(())
}
