use crate::consts::EPSILON;
use crate::frame::Frame;

/// Apply gamma correction: output = input^(1/gamma).
///
/// gamma > 1.0 brightens midtones, gamma < 1.0 darkens them.
pub fn gamma_correct(frame: &Frame, gamma: f32) -> Frame {
    let inv_gamma = 1.0 / gamma.max(EPSILON);
    let data = frame.data.mapv(|v| v.clamp(0.0, 1.0).powf(inv_gamma));
    Frame::new(data, frame.original_bit_depth)
}

/// Rescale so the smallest sample maps to 0.0 and the largest to 1.0.
///
/// A flat frame maps to all zeros.
pub fn normalize_min_max(frame: &Frame) -> Frame {
    let (lo, hi) = frame
        .data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    let data = if range.abs() < EPSILON {
        frame.data.mapv(|_| 0.0)
    } else {
        frame.data.mapv(|v| (v - lo) / range)
    };
    Frame::new(data, frame.original_bit_depth)
}
