use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::{ColorFrame, GrayFrame};

/// Reduce a `ColorFrame` to luminance using ITU-R BT.601 weights.
pub fn luminance(color: &ColorFrame) -> GrayFrame {
    let (h, w) = color.red.dim();
    let mut data = Array2::<u8>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let y = LUMINANCE_R * color.red[[row, col]] as f32
                + LUMINANCE_G * color.green[[row, col]] as f32
                + LUMINANCE_B * color.blue[[row, col]] as f32;
            data[[row, col]] = y.round() as u8;
        }
    }

    let mut frame = GrayFrame::new(data);
    frame.metadata = color.metadata.clone();
    frame
}
