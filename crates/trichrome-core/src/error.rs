use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrichromeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plane shape mismatch: expected {expected:?} (rows, cols), found {found:?}")]
    InvalidInputShape {
        /// (rows, cols) of the reference plane.
        expected: (usize, usize),
        /// (rows, cols) of the offending plane.
        found: (usize, usize),
    },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Pyramid depth {depth} exceeds the maximum of {max}")]
    InvalidDepth { depth: usize, max: usize },

    #[error("Displacement overflow at pyramid depth {depth}")]
    DisplacementOverflow { depth: usize },

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No input plates")]
    EmptySequence,
}

pub type Result<T> = std::result::Result<T, TrichromeError>;
