use ndarray::Array2;

use crate::frame::GrayFrame;

/// Compute Laplacian variance of a frame — higher means sharper.
///
/// Convolves with the 3x3 Laplacian kernel:
///   0  1  0
///   1 -4  1
///   0  1  0
/// Then returns the variance of the response over interior pixels, in
/// 8-bit sample units.
pub fn laplacian_variance(gray: &GrayFrame) -> f64 {
    laplacian_variance_array(&gray.data)
}

pub fn laplacian_variance_array(data: &Array2<u8>) -> f64 {
    let (h, w) = data.dim();
    if h < 3 || w < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let count = ((h - 2) * (w - 2)) as f64;

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let lap = -4.0 * data[[row, col]] as f64
                + data[[row - 1, col]] as f64
                + data[[row + 1, col]] as f64
                + data[[row, col - 1]] as f64
                + data[[row, col + 1]] as f64;
            sum += lap;
            sum_sq += lap * lap;
        }
    }

    let mean = sum / count;
    sum_sq / count - mean * mean
}

/// True when the sharpness figure falls below the minimum-acceptable floor.
pub fn is_too_blurred(gray: &GrayFrame, thresh_blur: f64) -> bool {
    laplacian_variance(gray) < thresh_blur
}
