use serde::{Deserialize, Serialize};

use crate::align::MetricKind;
use crate::consts::{
    DEFAULT_OUTPUT_EXTENSION, LARGE_PLATE_EXTENT, LARGE_PLATE_ROWS, LARGE_PLATE_SEARCH_RADIUS,
    MEDIUM_PLATE_SEARCH_RADIUS, PLATE_CROP_PERCENT, PLATE_PYRAMID_DEPTH, SMALL_PLATE_EXTENT,
    SMALL_PLATE_ROWS, SMALL_PLATE_SEARCH_RADIUS,
};
use crate::filters::EnhanceConfig;
use crate::frame::ChannelOrder;
use crate::io::border::BorderCropConfig;

/// How displacements are searched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignMode {
    /// Coarse-to-fine search over a resolution pyramid.
    #[default]
    Pyramid,
    /// One full-resolution search over the whole radius.
    Flat,
}

impl std::fmt::Display for AlignMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pyramid => write!(f, "Pyramid"),
            Self::Flat => write!(f, "Flat"),
        }
    }
}

/// Settings for aligning one plate. Unset overrides are derived from the
/// plate size by [`AutoParams`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignConfig {
    #[serde(default)]
    pub metric: MetricKind,
    #[serde(default)]
    pub mode: AlignMode,
    /// Base search radius in full-resolution pixels.
    pub search_radius: Option<usize>,
    /// Deepest pyramid level (0 = full resolution only).
    pub max_depth: Option<usize>,
    /// Margin removed from each side of each third, in percent.
    pub crop_percent: Option<f32>,
    /// Extension (and so format) of the saved composite: png, jpg or tiff.
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
    #[serde(default = "ChannelOrder::plate")]
    pub channel_order: ChannelOrder,
    pub border_crop: Option<BorderCropConfig>,
    pub enhance: Option<EnhanceConfig>,
}

fn default_output_extension() -> String {
    DEFAULT_OUTPUT_EXTENSION.to_string()
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            metric: MetricKind::default(),
            mode: AlignMode::default(),
            search_radius: None,
            max_depth: None,
            crop_percent: None,
            output_extension: default_output_extension(),
            channel_order: ChannelOrder::plate(),
            border_crop: Some(BorderCropConfig::default()),
            enhance: None,
        }
    }
}

impl AlignConfig {
    /// Fill unset overrides from the plate dimensions.
    pub fn resolve(&self, plate_rows: usize, plate_cols: usize) -> AutoParams {
        let auto = AutoParams::for_dimensions(plate_rows, plate_cols);
        AutoParams {
            search_radius: self.search_radius.unwrap_or(auto.search_radius),
            crop_percent: self.crop_percent.unwrap_or(auto.crop_percent),
            max_depth: self.max_depth.unwrap_or(auto.max_depth),
        }
    }
}

/// Size-dependent alignment parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoParams {
    pub search_radius: usize,
    pub crop_percent: f32,
    pub max_depth: usize,
}

impl AutoParams {
    /// Radius grows with the larger side; crop and depth follow the row count.
    pub fn for_dimensions(rows: usize, cols: usize) -> Self {
        let extent = rows.max(cols);
        let search_radius = if extent < SMALL_PLATE_EXTENT {
            SMALL_PLATE_SEARCH_RADIUS
        } else if extent < LARGE_PLATE_EXTENT {
            MEDIUM_PLATE_SEARCH_RADIUS
        } else {
            LARGE_PLATE_SEARCH_RADIUS
        };

        let class = if rows < SMALL_PLATE_ROWS {
            0
        } else if rows < LARGE_PLATE_ROWS {
            1
        } else {
            2
        };

        Self {
            search_radius,
            crop_percent: PLATE_CROP_PERCENT[class],
            max_depth: PLATE_PYRAMID_DEPTH[class],
        }
    }
}
