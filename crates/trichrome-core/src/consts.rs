/// Smallest search radius ever used; guarantees a non-empty search window.
pub const MIN_SEARCH_RADIUS: usize = 1;

/// Divisor applied to the base search radius at the full-resolution level,
/// independent of the pyramid depth.
pub const BASE_LEVEL_RADIUS_DIVISOR: usize = 16;

/// Deepest pyramid level accepted. At `2^16` a plate of any realistic size
/// has already collapsed to a single pixel.
pub const MAX_PYRAMID_DEPTH: usize = 16;

/// Norm below which a plane is treated as degenerate for NCC scoring.
pub const NCC_NORM_EPSILON: f64 = 1e-12;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-10;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Search radius for plates whose larger side is below `SMALL_PLATE_EXTENT`.
pub const SMALL_PLATE_SEARCH_RADIUS: usize = 15;

/// Search radius for plates whose larger side is below `LARGE_PLATE_EXTENT`.
pub const MEDIUM_PLATE_SEARCH_RADIUS: usize = 25;

/// Search radius for everything larger.
pub const LARGE_PLATE_SEARCH_RADIUS: usize = 35;

/// Larger-side threshold separating small from medium plates (radius choice).
pub const SMALL_PLATE_EXTENT: usize = 800;

/// Larger-side threshold separating medium from large plates (radius choice).
pub const LARGE_PLATE_EXTENT: usize = 2000;

/// Row-count threshold separating small from medium plates (crop and depth).
pub const SMALL_PLATE_ROWS: usize = 800;

/// Row-count threshold separating medium from large plates (crop and depth).
pub const LARGE_PLATE_ROWS: usize = 1500;

/// Crop percentages for small / medium / large plates.
pub const PLATE_CROP_PERCENT: [f32; 3] = [6.0, 4.0, 3.0];

/// Pyramid depths for small / medium / large plates.
pub const PLATE_PYRAMID_DEPTH: [usize; 3] = [6, 8, 10];

/// Default fraction of the mean gray level below which a border line is trimmed.
pub const DEFAULT_BORDER_THRESHOLD_RATIO: f32 = 0.10;

/// Extra pixels removed past the last dark border line.
pub const DEFAULT_BORDER_MIN_CROP_PIXELS: usize = 5;

/// Default gamma for enhancement (> 1 brightens midtones).
pub const DEFAULT_ENHANCE_GAMMA: f32 = 1.1;

/// Default percentile clip for the enhancement contrast stretch.
pub const DEFAULT_STRETCH_LOW_PERCENTILE: f32 = 0.001;

/// Default upper percentile for the enhancement contrast stretch.
pub const DEFAULT_STRETCH_HIGH_PERCENTILE: f32 = 0.999;

/// Default chroma multiplier for the saturation boost.
pub const DEFAULT_SATURATION_BOOST: f32 = 1.2;

/// Upper bound on batch worker threads.
pub const MAX_BATCH_WORKERS: usize = 4;

/// File extensions (lowercase) picked up by batch discovery.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["tif", "tiff", "jpg", "jpeg", "png"];

/// Default file extension of saved composites.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "jpg";
