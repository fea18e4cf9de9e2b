use std::borrow::Cow;
use std::path::PathBuf;

use ndarray::Array2;

use crate::color::luminance;
use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{FramegradeError, Result};

/// A single grayscale frame.
/// Pixel values are u8 intensity samples in [0, 255].
#[derive(Clone, Debug, PartialEq)]
pub struct GrayFrame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<u8>,
    /// Optional per-frame metadata
    pub metadata: FrameMetadata,
}

impl GrayFrame {
    pub fn new(data: Array2<u8>) -> Self {
        Self {
            data,
            metadata: FrameMetadata::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameMetadata {
    pub frame_index: usize,
    pub timestamp_us: Option<u64>,
}

/// Color frame stored as planar R, G, B channels of identical shape.
/// Sources with other channel orders are swizzled into these planes when
/// the frame is decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFrame {
    pub red: Array2<u8>,
    pub green: Array2<u8>,
    pub blue: Array2<u8>,
    pub metadata: FrameMetadata,
}

impl ColorFrame {
    pub fn new(red: Array2<u8>, green: Array2<u8>, blue: Array2<u8>) -> Self {
        Self {
            red,
            green,
            blue,
            metadata: FrameMetadata::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.red.ncols()
    }

    pub fn height(&self) -> usize {
        self.red.nrows()
    }
}

/// A decoded frame as it enters the system: a single intensity channel or
/// three color channels.
///
/// The channel count is inspected exactly once, in [`from_interleaved`];
/// everything downstream of the decode boundary works with one of the two
/// well-typed variants and never re-checks dimensionality.
///
/// [`from_interleaved`]: PixelFrame::from_interleaved
#[derive(Clone, Debug, PartialEq)]
pub enum PixelFrame {
    Gray(GrayFrame),
    Color(ColorFrame),
}

impl PixelFrame {
    /// Build a frame from interleaved row-major samples.
    ///
    /// `channels` must be 1 (grayscale) or 3 (RGB); any other channel count
    /// is a malformed frame shape, as are zero dimensions or a sample slice
    /// whose length does not match `height * width * channels`.
    pub fn from_interleaved(
        height: usize,
        width: usize,
        channels: usize,
        samples: &[u8],
    ) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(FramegradeError::InvalidFrameShape(format!(
                "degenerate dimensions {width}x{height}"
            )));
        }
        let expected = height
            .checked_mul(width)
            .and_then(|px| px.checked_mul(channels))
            .ok_or_else(|| {
                FramegradeError::InvalidFrameShape(format!(
                    "dimensions {width}x{height}x{channels} overflow"
                ))
            })?;
        if samples.len() != expected {
            return Err(FramegradeError::InvalidFrameShape(format!(
                "{} samples do not match {width}x{height}x{channels}",
                samples.len()
            )));
        }

        match channels {
            1 => {
                let data = Array2::from_shape_vec((height, width), samples.to_vec())
                    .expect("sample count checked against shape");
                Ok(Self::Gray(GrayFrame::new(data)))
            }
            COLOR_CHANNEL_COUNT => {
                let mut red = Array2::<u8>::zeros((height, width));
                let mut green = Array2::<u8>::zeros((height, width));
                let mut blue = Array2::<u8>::zeros((height, width));
                for row in 0..height {
                    for col in 0..width {
                        let idx = (row * width + col) * COLOR_CHANNEL_COUNT;
                        red[[row, col]] = samples[idx];
                        green[[row, col]] = samples[idx + 1];
                        blue[[row, col]] = samples[idx + 2];
                    }
                }
                Ok(Self::Color(ColorFrame::new(red, green, blue)))
            }
            n => Err(FramegradeError::InvalidFrameShape(format!(
                "unsupported channel count {n} (expected 1 or 3)"
            ))),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Self::Gray(gray) => gray.width(),
            Self::Color(color) => color.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Gray(gray) => gray.height(),
            Self::Color(color) => color.height(),
        }
    }

    pub fn metadata(&self) -> &FrameMetadata {
        match self {
            Self::Gray(gray) => &gray.metadata,
            Self::Color(color) => &color.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut FrameMetadata {
        match self {
            Self::Gray(gray) => &mut gray.metadata,
            Self::Color(color) => &mut color.metadata,
        }
    }

    /// Reduce to a single luminance channel.
    ///
    /// A frame that is already grayscale is borrowed unchanged; color frames
    /// are converted. The result must be treated as read-only.
    pub fn luma(&self) -> Cow<'_, GrayFrame> {
        match self {
            Self::Gray(gray) => Cow::Borrowed(gray),
            Self::Color(color) => Cow::Owned(luminance(color)),
        }
    }

    /// Consuming variant of [`luma`](Self::luma); a grayscale frame is moved
    /// out without copying.
    pub fn into_luma(self) -> GrayFrame {
        match self {
            Self::Gray(gray) => gray,
            Self::Color(color) => luminance(&color),
        }
    }
}

/// Color layout of the source data.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorMode {
    Mono,
    RGB,
    BGR,
}

/// Metadata about the source file.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_mode: ColorMode,
    pub observer: Option<String>,
    pub telescope: Option<String>,
    pub instrument: Option<String>,
}
