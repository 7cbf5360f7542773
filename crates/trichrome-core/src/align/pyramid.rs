//! Coarse-to-fine pyramid alignment.
//!
//! At depth `d` the three planes are averaged down by `2^d`, the moving planes
//! are searched against the reference within that level's radius, and the
//! displacement found is projected back to full resolution. The full-resolution
//! moving planes are corrected by it before the next finer level searches the
//! residual. The full-resolution level (`d == 0`) ends the recursion.

use ndarray::Array2;
use tracing::debug;

use crate::consts::{BASE_LEVEL_RADIUS_DIVISOR, MAX_PYRAMID_DEPTH, MIN_SEARCH_RADIUS};
use crate::error::{Result, TrichromeError};
use crate::frame::Displacement;

use super::metric::SimilarityMetric;
use super::search::{check_shape, search_pair};
use super::shift::apply_correction;

/// One level of the search schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PyramidLevel {
    pub depth: usize,
    /// Downscale factor `2^depth` (full-resolution pixels per level pixel).
    pub factor: usize,
    /// Search radius in level pixels.
    pub radius: usize,
}

impl PyramidLevel {
    /// Fails with [`TrichromeError::InvalidDepth`] past [`MAX_PYRAMID_DEPTH`].
    pub fn new(depth: usize, max_depth: usize, base_radius: usize) -> Result<Self> {
        check_depth(depth.max(max_depth))?;
        let factor = u32::try_from(depth)
            .ok()
            .and_then(|d| 1usize.checked_shl(d))
            .ok_or(TrichromeError::InvalidDepth {
                depth,
                max: MAX_PYRAMID_DEPTH,
            })?;
        Ok(Self {
            depth,
            factor,
            radius: level_radius(depth, max_depth, base_radius),
        })
    }

    /// Resampling scale, `0.5^depth`.
    pub fn scale(&self) -> f64 {
        1.0 / self.factor as f64
    }
}

/// Search radius at `depth`.
///
/// `max(1, R / 2^(D - d))` for `d > 0`. The full-resolution level uses
/// `max(1, R / 16)` whatever `D` is.
// NOTE: d == 0 uses a fixed divisor, not 2^(D - d) like every other level.
pub fn level_radius(depth: usize, max_depth: usize, base_radius: usize) -> usize {
    let divisor = if depth == 0 {
        BASE_LEVEL_RADIUS_DIVISOR
    } else {
        let exp = max_depth.saturating_sub(depth).min(usize::BITS as usize - 1);
        1usize << exp
    };
    (base_radius / divisor).max(MIN_SEARCH_RADIUS)
}

/// The levels visited by [`pyramid_align`], coarsest first.
pub fn pyramid_levels(max_depth: usize, base_radius: usize) -> Result<Vec<PyramidLevel>> {
    check_depth(max_depth)?;
    (0..=max_depth)
        .rev()
        .map(|d| PyramidLevel::new(d, max_depth, base_radius))
        .collect()
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_PYRAMID_DEPTH {
        return Err(TrichromeError::InvalidDepth {
            depth,
            max: MAX_PYRAMID_DEPTH,
        });
    }
    Ok(())
}

/// What one level contributed, in full-resolution pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelRecord {
    pub level: PyramidLevel,
    pub displacement_a: Displacement,
    pub displacement_b: Displacement,
}

/// Outcome of one pyramid run.
#[derive(Clone, Debug)]
pub struct PyramidAlignment {
    /// Moving plane A corrected by `displacement_a`.
    pub aligned_a: Array2<f32>,
    /// Moving plane B corrected by `displacement_b`.
    pub aligned_b: Array2<f32>,
    /// Total displacement of moving plane A relative to the reference.
    pub displacement_a: Displacement,
    /// Total displacement of moving plane B relative to the reference.
    pub displacement_b: Displacement,
    /// Per-level contributions, coarsest first. They sum to the totals.
    pub levels: Vec<LevelRecord>,
}

/// Align two moving planes onto `reference` from depth `max_depth` down to
/// full resolution.
///
/// `max_depth` may not exceed [`MAX_PYRAMID_DEPTH`].
pub fn pyramid_align(
    reference: &Array2<f32>,
    moving_a: &Array2<f32>,
    moving_b: &Array2<f32>,
    max_depth: usize,
    base_radius: usize,
    metric: &dyn SimilarityMetric,
) -> Result<PyramidAlignment> {
    check_shape(reference, moving_a)?;
    check_shape(reference, moving_b)?;
    check_depth(max_depth)?;

    let mut levels = Vec::with_capacity(max_depth + 1);
    let outcome = align_level(
        reference,
        moving_a.clone(),
        moving_b.clone(),
        max_depth,
        max_depth,
        base_radius,
        metric,
        &mut levels,
    )?;

    Ok(PyramidAlignment {
        aligned_a: outcome.aligned_a,
        aligned_b: outcome.aligned_b,
        displacement_a: outcome.total_a,
        displacement_b: outcome.total_b,
        levels,
    })
}

/// Planes and accumulated displacement handed back up the recursion.
struct LevelOutcome {
    aligned_a: Array2<f32>,
    aligned_b: Array2<f32>,
    total_a: Displacement,
    total_b: Displacement,
}

#[allow(clippy::too_many_arguments)]
fn align_level(
    reference: &Array2<f32>,
    moving_a: Array2<f32>,
    moving_b: Array2<f32>,
    depth: usize,
    max_depth: usize,
    base_radius: usize,
    metric: &dyn SimilarityMetric,
    records: &mut Vec<LevelRecord>,
) -> Result<LevelOutcome> {
    let level = PyramidLevel::new(depth, max_depth, base_radius)?;

    if depth == 0 {
        let found = search_pair(reference, &moving_a, &moving_b, level.radius, metric)?;
        debug!(
            depth,
            radius = level.radius,
            a = %found.a.displacement,
            b = %found.b.displacement,
            "Full-resolution level"
        );
        records.push(LevelRecord {
            level,
            displacement_a: found.a.displacement,
            displacement_b: found.b.displacement,
        });
        return Ok(LevelOutcome {
            aligned_a: found.a.shifted,
            aligned_b: found.b.shifted,
            total_a: found.a.displacement,
            total_b: found.b.displacement,
        });
    }

    let small_ref = downsample(reference, level.factor);
    let small_a = downsample(&moving_a, level.factor);
    let small_b = downsample(&moving_b, level.factor);

    let found = search_pair(&small_ref, &small_a, &small_b, level.radius, metric)?;
    let overflow = || TrichromeError::DisplacementOverflow { depth };
    let step_a = found.a.displacement.scaled(level.factor).ok_or_else(overflow)?;
    let step_b = found.b.displacement.scaled(level.factor).ok_or_else(overflow)?;
    debug!(
        depth,
        factor = level.factor,
        scale = level.scale(),
        radius = level.radius,
        a = %step_a,
        b = %step_b,
        "Pyramid level"
    );
    records.push(LevelRecord {
        level,
        displacement_a: step_a,
        displacement_b: step_b,
    });

    let corrected_a = apply_correction(&moving_a, step_a);
    let corrected_b = apply_correction(&moving_b, step_b);

    let finer = align_level(
        reference,
        corrected_a,
        corrected_b,
        depth - 1,
        max_depth,
        base_radius,
        metric,
        records,
    )?;

    Ok(LevelOutcome {
        total_a: step_a.checked_add(finer.total_a).ok_or_else(overflow)?,
        total_b: step_b.checked_add(finer.total_b).ok_or_else(overflow)?,
        ..finer
    })
}

/// Area-average a plane down by `factor`.
///
/// Each output pixel is the mean of a `factor x factor` block; blocks cut by
/// the right or bottom edge average only the pixels they contain. Output shape
/// is `(ceil(h / factor), ceil(w / factor))`.
pub fn downsample(plane: &Array2<f32>, factor: usize) -> Array2<f32> {
    if factor <= 1 {
        return plane.clone();
    }
    let (h, w) = plane.dim();
    let new_h = h.div_ceil(factor);
    let new_w = w.div_ceil(factor);
    let mut result = Array2::<f32>::zeros((new_h, new_w));

    for r in 0..new_h {
        let r0 = r * factor;
        let r1 = (r0 + factor).min(h);
        for c in 0..new_w {
            let c0 = c * factor;
            let c1 = (c0 + factor).min(w);
            let mut sum = 0.0f64;
            for row in r0..r1 {
                for col in c0..c1 {
                    sum += plane[[row, col]] as f64;
                }
            }
            result[[r, c]] = (sum / ((r1 - r0) * (c1 - c0)) as f64) as f32;
        }
    }

    result
}
