use ndarray::Array2;

use crate::error::Result;
use crate::frame::{ChannelOrder, ColorFrame, Frame, PlaneRole};

use super::search::check_shape;

/// Stack the reference and the two aligned moving planes into one color image.
///
/// `order` names the plane that goes into the red, green and blue bands.
pub fn compose(
    reference: &Array2<f32>,
    aligned_a: &Array2<f32>,
    aligned_b: &Array2<f32>,
    order: &ChannelOrder,
    bit_depth: u8,
) -> Result<ColorFrame> {
    check_shape(reference, aligned_a)?;
    check_shape(reference, aligned_b)?;

    let pick = |role: PlaneRole| {
        let data = match role {
            PlaneRole::Reference => reference,
            PlaneRole::MovingA => aligned_a,
            PlaneRole::MovingB => aligned_b,
        };
        Frame::new(data.clone(), bit_depth)
    };

    let [red, green, blue] = order.bands;
    Ok(ColorFrame {
        red: pick(red),
        green: pick(green),
        blue: pick(blue),
    })
}
