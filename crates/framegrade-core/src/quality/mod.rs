pub mod brightness;
pub mod noise;
pub mod sharpness;
pub mod uniformity;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::STREAMING_BATCH_SIZE;
use crate::error::Result;
use crate::frame::{GrayFrame, PixelFrame};
use crate::io::ser::SerReader;

/// Immutable analyzer thresholds, loaded once at startup and shared
/// read-only across evaluations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// Frames whose normalized mean brightness falls below this are too dark.
    #[serde(default = "default_dark")]
    pub dark: f32,

    /// Frames whose normalized mean brightness rises above this are too bright.
    #[serde(default = "default_bright")]
    pub bright: f32,

    /// Lower hysteresis bound of the edge detector, in 8-bit gradient units.
    #[serde(default = "default_edge_low")]
    pub edge_low: f32,

    /// Upper hysteresis bound of the edge detector.
    #[serde(default = "default_edge_high")]
    pub edge_high: f32,

    /// Frames whose edge density falls below this are too uniform.
    #[serde(default = "default_uniform")]
    pub uniform: f32,

    /// Minimum acceptable Laplacian variance; anything below is too blurred.
    #[serde(default = "default_blur")]
    pub blur: f64,

    /// Maximum acceptable noise sigma; anything above is too noisy.
    #[serde(default = "default_noise")]
    pub noise: f64,
}

fn default_dark() -> f32 {
    0.3
}
fn default_bright() -> f32 {
    0.8
}
fn default_edge_low() -> f32 {
    500.0
}
fn default_edge_high() -> f32 {
    1000.0
}
fn default_uniform() -> f32 {
    0.5
}
fn default_blur() -> f64 {
    200.0
}
fn default_noise() -> f64 {
    70.0
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            dark: default_dark(),
            bright: default_bright(),
            edge_low: default_edge_low(),
            edge_high: default_edge_high(),
            uniform: default_uniform(),
            blur: default_blur(),
            noise: default_noise(),
        }
    }
}

/// Classification labels, listed in decision priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QualityVerdict {
    TooDark,
    TooBright,
    TooUniform,
    TooBlurred,
    TooNoisy,
    GoodQuality,
}

impl QualityVerdict {
    pub fn is_good(&self) -> bool {
        matches!(self, Self::GoodQuality)
    }

    /// All verdicts in decision priority order.
    pub const ALL: [QualityVerdict; 6] = [
        Self::TooDark,
        Self::TooBright,
        Self::TooUniform,
        Self::TooBlurred,
        Self::TooNoisy,
        Self::GoodQuality,
    ];
}

impl std::fmt::Display for QualityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooDark => write!(f, "too dark"),
            Self::TooBright => write!(f, "too bright"),
            Self::TooUniform => write!(f, "too uniform"),
            Self::TooBlurred => write!(f, "too blurred"),
            Self::TooNoisy => write!(f, "too noisy"),
            Self::GoodQuality => write!(f, "good quality"),
        }
    }
}

/// Full result of evaluating one frame: the verdict plus the per-analyzer
/// booleans and the raw scores that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct QualityReport {
    pub verdict: QualityVerdict,
    /// Mean intensity normalized by the frame maximum, in [0, 1].
    pub brightness: f64,
    /// Edge pixels as a fraction of frame area, in [0, 1].
    pub edge_density: f64,
    /// Variance of the Laplacian response, 8-bit units.
    pub laplacian_variance: f64,
    /// Estimated noise standard deviation, 8-bit units.
    pub noise_sigma: f64,
    pub too_dark: bool,
    pub too_bright: bool,
    pub too_uniform: bool,
    pub too_blurred: bool,
    pub too_noisy: bool,
}

/// Evaluate a single grayscale frame against the thresholds.
///
/// All four analyzers run eagerly so the report carries every raw score;
/// the verdict applies the strict priority order dark, bright, uniform,
/// blurred, noisy, first match wins. Brightness defects mask every other
/// measurement (a black frame also reads as uniform and blurred), so they
/// are checked first; uniformity precedes blur because a flat frame also
/// has near-zero Laplacian variance.
///
/// Frames too small for the noise estimator fail the whole evaluation with
/// `InvalidFrameShape`; no partial verdict is produced.
pub fn evaluate_gray(gray: &GrayFrame, thresholds: &QualityThresholds) -> Result<QualityReport> {
    let noise_sigma = noise::noise_sigma(gray)?;

    let mean = brightness::mean_brightness(gray);
    let edge_density = uniformity::edge_density(gray, thresholds.edge_low, thresholds.edge_high);
    let laplacian_variance = sharpness::laplacian_variance(gray);

    let too_dark = mean < thresholds.dark as f64;
    let too_bright = mean > thresholds.bright as f64;
    let too_uniform = edge_density < thresholds.uniform as f64;
    let too_blurred = laplacian_variance < thresholds.blur;
    let too_noisy = noise_sigma > thresholds.noise;

    let verdict = if too_dark {
        QualityVerdict::TooDark
    } else if too_bright {
        QualityVerdict::TooBright
    } else if too_uniform {
        QualityVerdict::TooUniform
    } else if too_blurred {
        QualityVerdict::TooBlurred
    } else if too_noisy {
        QualityVerdict::TooNoisy
    } else {
        QualityVerdict::GoodQuality
    };

    debug!(
        %verdict,
        brightness = mean,
        edge_density,
        laplacian_variance,
        noise_sigma,
        "frame evaluated"
    );

    Ok(QualityReport {
        verdict,
        brightness: mean,
        edge_density,
        laplacian_variance,
        noise_sigma,
        too_dark,
        too_bright,
        too_uniform,
        too_blurred,
        too_noisy,
    })
}

/// Evaluate a frame of either channel layout.
///
/// Color frames are reduced to luminance first; grayscale frames are
/// analyzed as-is.
pub fn evaluate(frame: &PixelFrame, thresholds: &QualityThresholds) -> Result<QualityReport> {
    evaluate_gray(&frame.luma(), thresholds)
}

/// Evaluate a batch of frames in parallel.
///
/// Evaluations are independent and pure, so frames are scored on the rayon
/// pool with no coordination. Results keep input order.
pub fn evaluate_frames(
    frames: &[PixelFrame],
    thresholds: &QualityThresholds,
) -> Vec<Result<QualityReport>> {
    frames
        .par_iter()
        .map(|frame| evaluate(frame, thresholds))
        .collect()
}

/// Evaluate all frames of a SER video, decoding in batches of
/// [`STREAMING_BATCH_SIZE`] so the whole file never sits in memory.
///
/// Each batch is decoded, evaluated in parallel, then dropped before the
/// next batch is loaded. An optional `on_progress` callback receives the
/// number of frames evaluated so far after each batch.
pub fn evaluate_streaming(
    reader: &SerReader,
    thresholds: &QualityThresholds,
    on_progress: Option<&dyn Fn(usize)>,
) -> Result<Vec<(usize, QualityReport)>> {
    let total = reader.frame_count();
    info!(total_frames = total, "Evaluating frames");

    let mut reports: Vec<(usize, QualityReport)> = Vec::with_capacity(total);

    for batch_start in (0..total).step_by(STREAMING_BATCH_SIZE) {
        let batch_end = (batch_start + STREAMING_BATCH_SIZE).min(total);
        let batch: Vec<(usize, PixelFrame)> = (batch_start..batch_end)
            .map(|i| Ok((i, reader.read_frame(i)?)))
            .collect::<Result<_>>()?;

        let batch_reports: Vec<(usize, QualityReport)> = batch
            .par_iter()
            .map(|(i, frame)| Ok((*i, evaluate(frame, thresholds)?)))
            .collect::<Result<_>>()?;

        reports.extend(batch_reports);
        // batch dropped here — memory freed
        if let Some(progress) = on_progress {
            progress(reports.len());
        }
    }

    Ok(reports)
}
