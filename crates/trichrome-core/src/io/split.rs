use ndarray::{s, Array2};

use crate::error::{Result, TrichromeError};
use crate::frame::ChannelPlanes;

/// Margin removed from every side of each third of a plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropMargins {
    pub rows: usize,
    pub cols: usize,
}

impl CropMargins {
    /// Margins for a `crop_percent` crop of a `third_rows x cols` plane.
    pub fn from_percent(third_rows: usize, cols: usize, crop_percent: f32) -> Result<Self> {
        if !(0.0..50.0).contains(&crop_percent) {
            return Err(TrichromeError::InvalidCrop(format!(
                "crop percentage {crop_percent} must be in [0, 50)"
            )));
        }
        let rows = (third_rows as f64 * crop_percent as f64 / 100.0) as usize;
        let cols_margin = (cols as f64 * crop_percent as f64 / 100.0) as usize;
        if 2 * rows >= third_rows || 2 * cols_margin >= cols {
            return Err(TrichromeError::InvalidCrop(format!(
                "{crop_percent}% crop leaves nothing of a {cols}x{third_rows} plane"
            )));
        }
        Ok(Self {
            rows,
            cols: cols_margin,
        })
    }
}

/// Split a tri-color plate into its three planes and crop each by
/// `crop_percent` on every side.
///
/// The plate is stacked vertically: top third is the reference (blue filter),
/// middle third moving A (green), bottom third moving B (red). Rows left over
/// after dividing by three are dropped from the bottom.
pub fn split_plate(plate: &Array2<f32>, crop_percent: f32) -> Result<ChannelPlanes> {
    let (h, w) = plate.dim();
    let third = h / 3;
    if third == 0 || w == 0 {
        return Err(TrichromeError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let margins = CropMargins::from_percent(third, w, crop_percent)?;
    let band = |index: usize| -> Array2<f32> {
        let top = index * third + margins.rows;
        let bottom = (index + 1) * third - margins.rows;
        plate
            .slice(s![top..bottom, margins.cols..w - margins.cols])
            .to_owned()
    };

    Ok(ChannelPlanes {
        reference: band(0),
        moving_a: band(1),
        moving_b: band(2),
    })
}
