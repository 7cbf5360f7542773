//! Cosmetic post-processing of an aligned composite.
//!
//! Nothing here feeds back into alignment; it only changes how the saved
//! composite looks.

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ENHANCE_GAMMA, DEFAULT_SATURATION_BOOST, DEFAULT_STRETCH_HIGH_PERCENTILE,
    DEFAULT_STRETCH_LOW_PERCENTILE, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R,
};
use crate::frame::{ColorFrame, Frame};

use super::histogram::auto_stretch;
use super::levels::{gamma_correct, normalize_min_max};

/// 5-point Laplacian sharpening kernel.
const SHARPEN_KERNEL: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// Enhancement steps, applied in field order. `None` skips a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnhanceConfig {
    /// Percentile contrast stretch as (low, high) in [0, 1].
    pub stretch: Option<(f32, f32)>,
    pub gamma: Option<f32>,
    pub sharpen: bool,
    /// Chroma multiplier around per-pixel luminance (1.0 = unchanged).
    pub saturation: Option<f32>,
    /// Final per-channel min-max rescale to [0, 1].
    pub normalize: bool,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            stretch: Some((
                DEFAULT_STRETCH_LOW_PERCENTILE,
                DEFAULT_STRETCH_HIGH_PERCENTILE,
            )),
            gamma: Some(DEFAULT_ENHANCE_GAMMA),
            sharpen: true,
            saturation: Some(DEFAULT_SATURATION_BOOST),
            normalize: true,
        }
    }
}

/// Run the configured enhancement steps over a composite.
pub fn enhance(color: &ColorFrame, config: &EnhanceConfig) -> ColorFrame {
    let mut out = color.clone();

    if let Some((low, high)) = config.stretch {
        out = process_color(&out, |f| auto_stretch(f, low, high));
    }
    if let Some(gamma) = config.gamma {
        out = process_color(&out, |f| gamma_correct(f, gamma));
    }
    if config.sharpen {
        out = process_color(&out, sharpen);
    }
    if let Some(amount) = config.saturation {
        out = boost_saturation(&out, amount);
    }
    if config.normalize {
        out = process_color(&out, normalize_min_max);
    }

    out
}

/// Convolve with the Laplacian sharpening kernel. Edge pixels are clamped
/// and the result clipped to [0, 1].
pub fn sharpen(frame: &Frame) -> Frame {
    let (h, w) = frame.data.dim();
    let mut result = Array2::<f32>::zeros((h, w));
    if h == 0 || w == 0 {
        return Frame::new(result, frame.original_bit_depth);
    }

    for row in 0..h {
        for col in 0..w {
            let mut acc = 0.0f32;
            for (kr, kernel_row) in SHARPEN_KERNEL.iter().enumerate() {
                let r = (row + kr).saturating_sub(1).min(h - 1);
                for (kc, &k) in kernel_row.iter().enumerate() {
                    if k == 0.0 {
                        continue;
                    }
                    let c = (col + kc).saturating_sub(1).min(w - 1);
                    acc += k * frame.data[[r, c]];
                }
            }
            result[[row, col]] = acc.clamp(0.0, 1.0);
        }
    }

    Frame::new(result, frame.original_bit_depth)
}

/// Scale each pixel's distance from its luminance by `amount`.
pub fn boost_saturation(color: &ColorFrame, amount: f32) -> ColorFrame {
    let luma = luminance(color);
    let push = |band: &Frame| {
        let data = Zip::from(&band.data)
            .and(&luma)
            .map_collect(|&v, &y| (y + (v - y) * amount).clamp(0.0, 1.0));
        Frame::new(data, band.original_bit_depth)
    };

    ColorFrame {
        red: push(&color.red),
        green: push(&color.green),
        blue: push(&color.blue),
    }
}

/// BT.601 luminance of a composite.
pub fn luminance(color: &ColorFrame) -> Array2<f32> {
    Zip::from(&color.red.data)
        .and(&color.green.data)
        .and(&color.blue.data)
        .map_collect(|&r, &g, &b| LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b)
}

/// Apply a processing function to each channel of a color frame independently.
pub fn process_color<F>(color: &ColorFrame, mut process_fn: F) -> ColorFrame
where
    F: FnMut(&Frame) -> Frame,
{
    ColorFrame {
        red: process_fn(&color.red),
        green: process_fn(&color.green),
        blue: process_fn(&color.blue),
    }
}
