use ndarray::Array2;

use trichrome_core::filters::enhance::{boost_saturation, luminance, sharpen};
use trichrome_core::filters::histogram::{auto_stretch, linear_stretch, percentile_bounds};
use trichrome_core::filters::levels::{gamma_correct, normalize_min_max};
use trichrome_core::filters::{enhance, EnhanceConfig};
use trichrome_core::frame::{ColorFrame, Frame};

fn gradient(rows: usize, cols: usize) -> Frame {
    let data = Array2::from_shape_fn((rows, cols), |(r, c)| {
        (r * cols + c) as f32 / (rows * cols - 1) as f32
    });
    Frame::new(data, 16)
}

fn gray_color(frame: &Frame) -> ColorFrame {
    ColorFrame {
        red: frame.clone(),
        green: frame.clone(),
        blue: frame.clone(),
    }
}

#[test]
fn test_gamma_one_is_identity() {
    let frame = gradient(8, 8);
    let out = gamma_correct(&frame, 1.0);
    for (a, b) in out.data.iter().zip(frame.data.iter()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn test_gamma_brightens_midtones() {
    let frame = Frame::new(Array2::from_elem((2, 2), 0.25), 8);
    let out = gamma_correct(&frame, 2.0);
    assert!((out.data[[0, 0]] - 0.5).abs() < 1e-6);
}

#[test]
fn test_normalize_min_max() {
    let data = Array2::from_shape_vec((1, 3), vec![0.2, 0.4, 0.6]).unwrap();
    let out = normalize_min_max(&Frame::new(data, 16));
    assert!((out.data[[0, 0]] - 0.0).abs() < 1e-6);
    assert!((out.data[[0, 1]] - 0.5).abs() < 1e-6);
    assert!((out.data[[0, 2]] - 1.0).abs() < 1e-6);
}

#[test]
fn test_normalize_flat_frame() {
    let out = normalize_min_max(&Frame::new(Array2::from_elem((3, 3), 0.7), 16));
    assert!(out.data.iter().all(|&v| v == 0.0));
}

#[test]
fn test_auto_stretch_full_range() {
    let data = Array2::from_shape_fn((10, 10), |(r, c)| 0.25 + (r * 10 + c) as f32 / 200.0);
    let out = auto_stretch(&Frame::new(data, 16), 0.0, 0.99);
    assert!((out.data[[0, 0]] - 0.0).abs() < 1e-6);
    assert!((out.data[[9, 9]] - 1.0).abs() < 1e-6);
}

#[test]
fn test_sharpen_flat_unchanged() {
    let frame = Frame::new(Array2::from_elem((6, 6), 0.4), 16);
    let out = sharpen(&frame);
    for &v in out.data.iter() {
        assert!((v - 0.4).abs() < 1e-6);
    }
}

#[test]
fn test_sharpen_boosts_peak() {
    let mut data = Array2::from_elem((5, 5), 0.2);
    data[[2, 2]] = 0.5;
    let out = sharpen(&Frame::new(data, 16));
    assert!(out.data[[2, 2]] > 0.5);
    assert!(out.data[[2, 1]] < 0.2);
}

#[test]
fn test_saturation_leaves_gray_alone() {
    let color = gray_color(&gradient(4, 4));
    let out = boost_saturation(&color, 2.0);
    for (a, b) in out.red.data.iter().zip(color.red.data.iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn test_luminance_weights_sum_to_one() {
    let color = gray_color(&Frame::new(Array2::from_elem((2, 2), 0.6), 8));
    let y = luminance(&color);
    assert!((y[[0, 0]] - 0.6).abs() < 1e-5);
}

#[test]
fn test_enhance_default_output_in_range() {
    let frame = gradient(16, 16);
    let color = ColorFrame {
        red: frame.clone(),
        green: gamma_correct(&frame, 2.0),
        blue: Frame::new(frame.data.mapv(|v| 1.0 - v), 16),
    };
    let out = enhance(&color, &EnhanceConfig::default());
    assert_eq!((out.width(), out.height()), (16, 16));
    for band in [&out.red, &out.green, &out.blue] {
        assert!(band.data.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}

#[test]
fn test_percentile_bounds() {
    let data = Array2::from_shape_fn((1, 10), |(_, c)| (9 - c) as f32 / 10.0);
    let frame = Frame::new(data, 16);
    assert_eq!(percentile_bounds(&frame, 0.0, 1.0), Some((0.0, 0.9)));
    assert_eq!(percentile_bounds(&frame, 0.2, 0.5), Some((0.2, 0.5)));
}

#[test]
fn test_percentile_bounds_skip_nan() {
    let data = Array2::from_shape_vec((1, 3), vec![f32::NAN, 0.3, 0.6]).unwrap();
    let frame = Frame::new(data, 16);
    assert_eq!(percentile_bounds(&frame, 0.0, 1.0), Some((0.3, 0.6)));
    let empty = Frame::new(Array2::from_elem((2, 2), f32::NAN), 16);
    assert_eq!(percentile_bounds(&empty, 0.0, 1.0), None);
}

#[test]
fn test_linear_stretch_clips() {
    let data = Array2::from_shape_vec((1, 3), vec![0.1, 0.3, 0.9]).unwrap();
    let out = linear_stretch(&Frame::new(data, 8), 0.2, 0.4);
    assert_eq!(out.data[[0, 0]], 0.0);
    assert!((out.data[[0, 1]] - 0.5).abs() < 1e-6);
    assert_eq!(out.data[[0, 2]], 1.0);
}
