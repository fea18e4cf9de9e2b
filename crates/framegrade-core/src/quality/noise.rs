use std::f64::consts::PI;

use ndarray::Array2;

use crate::error::{FramegradeError, Result};
use crate::frame::GrayFrame;

/// Estimate the noise standard deviation of a frame.
///
/// Immerkaer's fast estimator: convolve with the high-pass kernel
///    1 -2  1
///   -2  4 -2
///    1 -2  1
/// sum the absolute responses over interior pixels and scale by
/// sqrt(0.5 * pi) / (6 * (W-2) * (H-2)). The kernel isolates pixel-level
/// noise; the scale factor approximately cancels the contribution of
/// structured edges.
///
/// Frames narrower or shorter than 3 pixels are malformed input.
pub fn noise_sigma(gray: &GrayFrame) -> Result<f64> {
    noise_sigma_array(&gray.data)
}

pub fn noise_sigma_array(data: &Array2<u8>) -> Result<f64> {
    let (h, w) = data.dim();
    if h <= 2 || w <= 2 {
        return Err(FramegradeError::InvalidFrameShape(format!(
            "noise estimation requires at least 3x3 pixels, got {w}x{h}"
        )));
    }

    let mut sum = 0.0f64;
    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let response = data[[row - 1, col - 1]] as i32
                - 2 * data[[row - 1, col]] as i32
                + data[[row - 1, col + 1]] as i32
                - 2 * data[[row, col - 1]] as i32
                + 4 * data[[row, col]] as i32
                - 2 * data[[row, col + 1]] as i32
                + data[[row + 1, col - 1]] as i32
                - 2 * data[[row + 1, col]] as i32
                + data[[row + 1, col + 1]] as i32;
            sum += response.abs() as f64;
        }
    }

    Ok(sum * (0.5 * PI).sqrt() / (6.0 * (w as f64 - 2.0) * (h as f64 - 2.0)))
}

/// True when the estimated sigma exceeds the acceptable ceiling.
pub fn is_too_noisy(gray: &GrayFrame, thresh_noise: f64) -> Result<bool> {
    Ok(noise_sigma(gray)? > thresh_noise)
}
