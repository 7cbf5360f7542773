use ndarray::Array2;

use crate::frame::Displacement;

/// Translate a plane by `shift` with wrap-around.
///
/// `result[r, c] = plane[(r - dy) mod h, (c - dx) mod w]`: samples leaving one
/// edge re-enter on the opposite edge.
pub fn circular_shift(plane: &Array2<f32>, shift: Displacement) -> Array2<f32> {
    let mut result = Array2::<f32>::zeros(plane.dim());
    circular_shift_into(plane, shift, &mut result);
    result
}

/// Same as [`circular_shift`] but writes into an existing buffer of the same shape.
pub fn circular_shift_into(plane: &Array2<f32>, shift: Displacement, out: &mut Array2<f32>) {
    let (h, w) = plane.dim();
    debug_assert_eq!(out.dim(), (h, w));
    if h == 0 || w == 0 {
        return;
    }

    let row_off = wrap(shift.dy, h);
    let col_off = wrap(shift.dx, w);

    for row in 0..h {
        let src_row = (row + h - row_off) % h;
        for col in 0..w {
            let src_col = (col + w - col_off) % w;
            out[[row, col]] = plane[[src_row, src_col]];
        }
    }
}

/// Undo a displacement: the plane moved by `displacement` is brought back
/// onto the reference grid.
pub fn apply_correction(plane: &Array2<f32>, displacement: Displacement) -> Array2<f32> {
    circular_shift(plane, -displacement)
}

fn wrap(offset: i32, len: usize) -> usize {
    offset.rem_euclid(len as i32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_wraps_columns() {
        let plane = Array2::from_shape_vec((1, 4), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let shifted = circular_shift(&plane, Displacement::new(1, 0));
        assert_eq!(shifted.as_slice().unwrap(), &[4.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_shift_wraps_rows_negative() {
        let plane = Array2::from_shape_vec((3, 1), vec![1.0, 2.0, 3.0]).unwrap();
        let shifted = circular_shift(&plane, Displacement::new(0, -1));
        assert_eq!(shifted.as_slice().unwrap(), &[2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_shift_larger_than_plane() {
        let plane = Array2::from_shape_fn((3, 4), |(r, c)| (r * 4 + c) as f32);
        let a = circular_shift(&plane, Displacement::new(9, -7));
        let b = circular_shift(&plane, Displacement::new(1, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_correction_inverts_shift() {
        let plane = Array2::from_shape_fn((5, 6), |(r, c)| (r * 6 + c) as f32);
        let d = Displacement::new(2, -3);
        assert_eq!(apply_correction(&circular_shift(&plane, d), d), plane);
    }
}
