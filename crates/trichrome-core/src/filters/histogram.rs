//! Percentile contrast stretch.

use crate::consts::EPSILON;
use crate::frame::Frame;

/// Black and white points at the `low` and `high` quantiles (in [0, 1]) of
/// the finite samples. `None` if there are none.
pub fn percentile_bounds(frame: &Frame, low: f32, high: f32) -> Option<(f32, f32)> {
    let mut samples: Vec<f32> = frame.data.iter().copied().filter(|v| v.is_finite()).collect();
    if samples.is_empty() {
        return None;
    }

    let last = samples.len() - 1;
    let rank = |q: f32| ((samples.len() as f32 * q.clamp(0.0, 1.0)) as usize).min(last);
    let (lo_rank, hi_rank) = (rank(low), rank(high));

    let (_, &mut black, _) = samples.select_nth_unstable_by(lo_rank, f32::total_cmp);
    let (_, &mut white, _) = samples.select_nth_unstable_by(hi_rank, f32::total_cmp);
    Some((black, white))
}

/// Map `[black, white]` linearly onto `[0, 1]`, clipping outside it.
/// A collapsed range only shifts by `black`.
pub fn linear_stretch(frame: &Frame, black: f32, white: f32) -> Frame {
    let span = white - black;
    let scale = if span.abs() < EPSILON { 1.0 } else { 1.0 / span };
    let data = frame.data.mapv(|v| ((v - black) * scale).clamp(0.0, 1.0));
    Frame::new(data, frame.original_bit_depth)
}

/// [`linear_stretch`] between the `low` and `high` percentiles of the frame.
pub fn auto_stretch(frame: &Frame, low: f32, high: f32) -> Frame {
    match percentile_bounds(frame, low, high) {
        Some((black, white)) => linear_stretch(frame, black, white),
        None => frame.clone(),
    }
}
