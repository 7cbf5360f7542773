use std::ops::{Add, Neg};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A single grayscale image.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Color image composed of separate channel frames.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
}

impl ColorFrame {
    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }
}

/// Integer translation of a plane relative to the reference plane.
///
/// `dx` is horizontal (columns), `dy` vertical (rows). A plane built as
/// `circular_shift(reference, d)` sits at displacement `d`; aligning it
/// applies the negated displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: i32,
    pub dy: i32,
}

impl Displacement {
    pub const ZERO: Displacement = Displacement { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Project a displacement found at a coarser level to full resolution.
    /// `None` if the result does not fit in `i32`.
    pub fn scaled(self, factor: usize) -> Option<Self> {
        let f = i32::try_from(factor).ok()?;
        Some(Self {
            dx: self.dx.checked_mul(f)?,
            dy: self.dy.checked_mul(f)?,
        })
    }

    pub fn checked_add(self, rhs: Displacement) -> Option<Self> {
        Some(Self {
            dx: self.dx.checked_add(rhs.dx)?,
            dy: self.dy.checked_add(rhs.dy)?,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl Add for Displacement {
    type Output = Displacement;

    fn add(self, rhs: Displacement) -> Displacement {
        Displacement {
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
        }
    }
}

impl Neg for Displacement {
    type Output = Displacement;

    fn neg(self) -> Displacement {
        Displacement {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

impl std::fmt::Display for Displacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.dx, self.dy)
    }
}

/// Role of a plane within one alignment run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneRole {
    Reference,
    MovingA,
    MovingB,
}

impl std::fmt::Display for PlaneRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference => write!(f, "Reference"),
            Self::MovingA => write!(f, "Moving A"),
            Self::MovingB => write!(f, "Moving B"),
        }
    }
}

/// Which plane lands in each output band, in (red, green, blue) order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOrder {
    pub bands: [PlaneRole; 3],
}

impl ChannelOrder {
    /// Tri-color plate layout: red from the bottom third (moving B), green
    /// from the middle (moving A), blue from the top (reference).
    pub fn plate() -> Self {
        Self {
            bands: [PlaneRole::MovingB, PlaneRole::MovingA, PlaneRole::Reference],
        }
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self {
            bands: [PlaneRole::Reference, PlaneRole::MovingA, PlaneRole::MovingB],
        }
    }
}

/// The three planes of one plate, before alignment.
#[derive(Clone, Debug)]
pub struct ChannelPlanes {
    /// Fixed plane (top third of a plate, blue filter).
    pub reference: Array2<f32>,
    /// Middle third, green filter.
    pub moving_a: Array2<f32>,
    /// Bottom third, red filter.
    pub moving_b: Array2<f32>,
}
