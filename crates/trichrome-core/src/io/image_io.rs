use std::path::Path;

use image::{ImageFormat, Luma, Rgb};
use ndarray::Array2;

use crate::error::Result;
use crate::frame::{ColorFrame, Frame};

/// Load an image file as a grayscale frame normalized to [0, 1].
///
/// Color files are reduced to luminance. 8-bit sources keep their bit depth
/// in the returned frame's metadata.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    let bit_depth = match img.color() {
        image::ColorType::L8
        | image::ColorType::La8
        | image::ColorType::Rgb8
        | image::ColorType::Rgba8 => 8,
        _ => 16,
    };
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = gray.get_pixel(col as u32, row as u32);
            data[[row, col]] = pixel.0[0] as f32 / 65535.0;
        }
    }

    Ok(Frame::new(data, bit_depth))
}

/// Save a frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let pixels: Vec<u16> = frame
        .data
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 65535.0) as u16)
        .collect();

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save(path)?;
    Ok(())
}

/// Save a ColorFrame as 16-bit RGB TIFF.
pub fn save_color_tiff(color: &ColorFrame, path: &Path) -> Result<()> {
    let h = color.height();
    let w = color.width();

    let mut pixels: Vec<u16> = Vec::with_capacity(h * w * 3);
    for row in 0..h {
        for col in 0..w {
            for band in [&color.red, &color.green, &color.blue] {
                pixels.push((band.data[[row, col]].clamp(0.0, 1.0) * 65535.0) as u16);
            }
        }
    }

    let img = image::ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save(path)?;
    Ok(())
}

/// Save a ColorFrame as 8-bit RGB in the given format.
pub fn save_color_8bit(color: &ColorFrame, path: &Path, format: ImageFormat) -> Result<()> {
    let h = color.height();
    let w = color.width();

    let mut img = image::RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let r = (color.red.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            let g = (color.green.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            let b = (color.blue.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Rgb([r, g, b]));
        }
    }

    img.save_with_format(path, format)?;
    Ok(())
}

/// Save a ColorFrame, choosing format from file extension (TIFF by default).
pub fn save_color_image(color: &ColorFrame, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => save_color_8bit(color, path, ImageFormat::Png),
        Some("jpg" | "jpeg") => save_color_8bit(color, path, ImageFormat::Jpeg),
        _ => save_color_tiff(color, path),
    }
}
