use ndarray::Array2;

use crate::frame::GrayFrame;

const TAN_22_5: f32 = 0.414_213_56;
const TAN_67_5: f32 = 2.414_213_5;

/// Compute the binary edge mask of a frame.
///
/// Canny-style two-threshold detection: 3x3 Sobel gradients, L1 magnitude
/// |gx| + |gy| in 8-bit sample units, non-maximum suppression along the
/// quantized gradient direction, then hysteresis linking. Magnitudes at or
/// above `high` seed edges; magnitudes at or above `low` are kept only when
/// 8-connected to a seed. Raising either bound suppresses weak edges.
pub fn edge_mask(gray: &GrayFrame, low: f32, high: f32) -> Array2<bool> {
    let data = &gray.data;
    let (h, w) = data.dim();
    let mut mask = Array2::from_elem((h, w), false);
    if h < 3 || w < 3 {
        return mask;
    }

    let mut gx = Array2::<f32>::zeros((h, w));
    let mut gy = Array2::<f32>::zeros((h, w));
    let mut magnitude = Array2::<f32>::zeros((h, w));

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let sx = -(data[[row - 1, col - 1]] as f32) + data[[row - 1, col + 1]] as f32
                - 2.0 * data[[row, col - 1]] as f32
                + 2.0 * data[[row, col + 1]] as f32
                - data[[row + 1, col - 1]] as f32
                + data[[row + 1, col + 1]] as f32;
            let sy = -(data[[row - 1, col - 1]] as f32)
                - 2.0 * data[[row - 1, col]] as f32
                - data[[row - 1, col + 1]] as f32
                + data[[row + 1, col - 1]] as f32
                + 2.0 * data[[row + 1, col]] as f32
                + data[[row + 1, col + 1]] as f32;
            gx[[row, col]] = sx;
            gy[[row, col]] = sy;
            magnitude[[row, col]] = sx.abs() + sy.abs();
        }
    }

    // Thin ridges to single-pixel width, then classify against both bounds.
    let mut candidate = Array2::from_elem((h, w), false);
    let mut pending: Vec<(usize, usize)> = Vec::new();
    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let m = magnitude[[row, col]];
            if m < low {
                continue;
            }
            let (n1, n2) =
                neighbors_along_gradient(&magnitude, row, col, gx[[row, col]], gy[[row, col]]);
            if m < n1 || m < n2 {
                continue;
            }
            candidate[[row, col]] = true;
            if m >= high {
                mask[[row, col]] = true;
                pending.push((row, col));
            }
        }
    }

    // Hysteresis: grow edges from strong seeds through connected candidates.
    while let Some((row, col)) = pending.pop() {
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                if nr < 0 || nc < 0 || nr >= h as isize || nc >= w as isize {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if candidate[[nr, nc]] && !mask[[nr, nc]] {
                    mask[[nr, nc]] = true;
                    pending.push((nr, nc));
                }
            }
        }
    }

    mask
}

/// Magnitudes of the two neighbors along the gradient direction, quantized
/// to horizontal, vertical, or one of the two diagonals.
fn neighbors_along_gradient(
    magnitude: &Array2<f32>,
    row: usize,
    col: usize,
    gx: f32,
    gy: f32,
) -> (f32, f32) {
    let ax = gx.abs();
    let ay = gy.abs();
    if ay <= ax * TAN_22_5 {
        (magnitude[[row, col - 1]], magnitude[[row, col + 1]])
    } else if ay >= ax * TAN_67_5 {
        (magnitude[[row - 1, col]], magnitude[[row + 1, col]])
    } else if (gx >= 0.0) == (gy >= 0.0) {
        (magnitude[[row - 1, col - 1]], magnitude[[row + 1, col + 1]])
    } else {
        (magnitude[[row - 1, col + 1]], magnitude[[row + 1, col - 1]])
    }
}

/// Fraction of pixels marked as edges by [`edge_mask`].
pub fn edge_density(gray: &GrayFrame, low: f32, high: f32) -> f64 {
    let mask = edge_mask(gray, low, high);
    if mask.is_empty() {
        return 0.0;
    }
    let edge_pixels = mask.iter().filter(|&&e| e).count();
    edge_pixels as f64 / mask.len() as f64
}

/// A frame dominated by a single flat region (lens cap, blank wall)
/// produces almost no edges.
pub fn is_too_uniform(gray: &GrayFrame, low: f32, high: f32, thresh_uniform: f32) -> bool {
    edge_density(gray, low, high) < thresh_uniform as f64
}
