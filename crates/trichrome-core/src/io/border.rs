//! Heuristic trimming of dark borders and wrap-around artifacts left on the
//! edges of an aligned composite.

use ndarray::{s, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_BORDER_MIN_CROP_PIXELS, DEFAULT_BORDER_THRESHOLD_RATIO};
use crate::frame::{ColorFrame, Frame};

/// Configuration for automatic border trimming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderCropConfig {
    /// A border line is trimmed while its mean is below
    /// `threshold_ratio * mean(image)` (on the max-normalized gray image).
    pub threshold_ratio: f32,
    /// Extra pixels removed past the last dark line on each side.
    pub min_crop_pixels: usize,
}

impl Default for BorderCropConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: DEFAULT_BORDER_THRESHOLD_RATIO,
            min_crop_pixels: DEFAULT_BORDER_MIN_CROP_PIXELS,
        }
    }
}

/// Rows `top..bottom` and columns `left..right` to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderBounds {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

/// Trim dark border lines from a composite.
///
/// Only the outer quarter on each side is examined. If the bounds found would
/// leave nothing, the composite is returned unchanged.
pub fn auto_border_crop(color: &ColorFrame, config: &BorderCropConfig) -> ColorFrame {
    let gray = normalized_gray(color);
    let Some(bounds) = find_border_bounds(&gray, config) else {
        debug!("Border trim would empty the image; keeping it whole");
        return color.clone();
    };

    debug!(
        top = bounds.top,
        bottom = bounds.bottom,
        left = bounds.left,
        right = bounds.right,
        "Border trim"
    );

    let crop = |frame: &Frame| {
        let data = frame
            .data
            .slice(s![bounds.top..bounds.bottom, bounds.left..bounds.right])
            .to_owned();
        Frame::new(data, frame.original_bit_depth)
    };

    ColorFrame {
        red: crop(&color.red),
        green: crop(&color.green),
        blue: crop(&color.blue),
    }
}

/// Channel mean, divided by its maximum when that is non-zero.
fn normalized_gray(color: &ColorFrame) -> Array2<f32> {
    let mut gray = (&color.red.data + &color.green.data + &color.blue.data) / 3.0;
    let max = gray.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max > 0.0 {
        gray.mapv_inplace(|v| v / max);
    }
    gray
}

/// Scan each side for dark lines and return the bounds to keep.
pub fn find_border_bounds(gray: &Array2<f32>, config: &BorderCropConfig) -> Option<BorderBounds> {
    let (h, w) = gray.dim();
    if h == 0 || w == 0 {
        return None;
    }

    let threshold = config.threshold_ratio * gray.mean().unwrap_or(0.0);
    let pad = config.min_crop_pixels as i64;

    let row_means: Vec<f32> = gray.mean_axis(Axis(1)).map(|m| m.to_vec()).unwrap_or_default();
    let col_means: Vec<f32> = gray.mean_axis(Axis(0)).map(|m| m.to_vec()).unwrap_or_default();

    let (top, bottom) = scan_line_means(&row_means, threshold, pad);
    let (left, right) = scan_line_means(&col_means, threshold, pad);

    let top = top.max(0) as usize;
    let left = left.max(0) as usize;
    let bottom = bottom.min(h as i64);
    let right = right.min(w as i64);

    if bottom <= top as i64 || right <= left as i64 {
        return None;
    }

    Some(BorderBounds {
        top,
        bottom: bottom as usize,
        left,
        right: right as usize,
    })
}

/// Returns the (start, end) bounds for one axis.
fn scan_line_means(means: &[f32], threshold: f32, pad: i64) -> (i64, i64) {
    let n = means.len();
    let mut start = 0i64;
    let mut end = n as i64;

    for (i, &m) in means.iter().enumerate().take(n / 4) {
        if m < threshold {
            start = i as i64 + pad;
        } else {
            break;
        }
    }

    for i in ((3 * n) / 4 + 1..n).rev() {
        if means[i] < threshold {
            end = i as i64 - pad;
        } else {
            break;
        }
    }

    (start, end)
}
