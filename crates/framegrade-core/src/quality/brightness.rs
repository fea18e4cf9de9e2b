use crate::frame::GrayFrame;

/// Mean sample intensity normalized by the frame's maximum sample.
///
/// An all-zero frame keeps a divisor of 1 so its mean is 0 rather than NaN
/// and it still classifies as dark.
pub fn mean_brightness(gray: &GrayFrame) -> f64 {
    let count = gray.data.len();
    if count == 0 {
        return 0.0;
    }
    let max = gray.data.iter().copied().max().unwrap_or(0).max(1) as f64;
    let sum: f64 = gray.data.iter().map(|&v| v as f64).sum();
    sum / (max * count as f64)
}

/// Classify a frame as too dark and/or too bright.
///
/// Callers must supply `thresh_dark < thresh_bright` for sane behavior; the
/// ordering is not enforced here.
pub fn assess(gray: &GrayFrame, thresh_dark: f32, thresh_bright: f32) -> (bool, bool) {
    let mean = mean_brightness(gray);
    (mean < thresh_dark as f64, mean > thresh_bright as f64)
}
