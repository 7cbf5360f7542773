#![allow(dead_code)]

use ndarray::{concatenate, Array2, Axis};

use trichrome_core::align::circular_shift;
use trichrome_core::frame::{Displacement, Frame};

/// Smooth diagonal ramp, `(r + 2c) / 300`. Survives area downsampling well,
/// so coarse pyramid levels still see the shift.
pub fn make_ramp(rows: usize, cols: usize) -> Array2<f32> {
    Array2::from_shape_fn((rows, cols), |(r, c)| (r + 2 * c) as f32 / 300.0)
}

/// Deterministic non-periodic texture in [0, 1). No two distinct circular
/// shifts of it coincide.
pub fn make_texture(rows: usize, cols: usize) -> Array2<f32> {
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let v = (r * r * 31 + c * 17 + r * c * 7 + c * c * 3) % 101;
        v as f32 / 101.0
    })
}

/// Stack three planes vertically into a plate: reference on top, then
/// moving A, then moving B.
pub fn make_plate(
    reference: &Array2<f32>,
    moving_a: &Array2<f32>,
    moving_b: &Array2<f32>,
) -> Frame {
    let data = concatenate(
        Axis(0),
        &[reference.view(), moving_a.view(), moving_b.view()],
    )
    .unwrap();
    Frame::new(data, 16)
}

/// Plate whose moving thirds are the reference displaced by `a` and `b`.
pub fn make_shifted_plate(reference: &Array2<f32>, a: Displacement, b: Displacement) -> Frame {
    make_plate(
        reference,
        &circular_shift(reference, a),
        &circular_shift(reference, b),
    )
}
