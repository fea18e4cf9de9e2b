use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::Result;
use crate::frame::PixelFrame;

/// Load a still image into a frame.
///
/// 8-bit grayscale files stay single-channel; everything else is decoded
/// to RGB planes.
pub fn load_image(path: &Path) -> Result<PixelFrame> {
    let img = image::open(path)?;
    match img {
        DynamicImage::ImageLuma8(gray) => {
            let (w, h) = gray.dimensions();
            PixelFrame::from_interleaved(h as usize, w as usize, 1, gray.as_raw())
        }
        other => {
            let rgb = other.to_rgb8();
            let (w, h) = rgb.dimensions();
            PixelFrame::from_interleaved(h as usize, w as usize, 3, rgb.as_raw())
        }
    }
}

/// Save a binary mask as an 8-bit grayscale PNG (white = set).
pub fn save_mask_png(mask: &Array2<bool>, path: &Path) -> Result<()> {
    let (h, w) = mask.dim();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = if mask[[row, col]] { 255 } else { 0 };
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
