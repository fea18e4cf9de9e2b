use std::fs::File;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;

use crate::error::{FramegradeError, Result};
use crate::frame::{ColorMode, FrameMetadata, PixelFrame, SourceInfo};

pub const SER_HEADER_SIZE: usize = 178;
const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";

/// SER file header (178 bytes).
#[derive(Clone, Debug)]
pub struct SerHeader {
    pub color_id: i32,
    pub little_endian: bool,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
    pub observer: String,
    pub instrument: String,
    pub telescope: String,
    pub date_time: u64,
    pub date_time_utc: u64,
}

impl SerHeader {
    /// Bytes per pixel plane (1 for 8-bit, 2 for 9-16 bit).
    pub fn bytes_per_pixel_plane(&self) -> usize {
        if self.pixel_depth <= 8 {
            1
        } else {
            2
        }
    }

    /// Number of planes per pixel (1 for mono, 3 for RGB/BGR).
    pub fn planes_per_pixel(&self) -> usize {
        match self.color_id {
            100 | 101 => 3,
            _ => 1,
        }
    }

    /// Total bytes per frame.
    pub fn frame_byte_size(&self) -> usize {
        let pixels = (self.width as usize)
            .checked_mul(self.height as usize)
            .expect("Image dimensions too large");
        let bytes_per_pixel = self.bytes_per_pixel_plane() * self.planes_per_pixel();
        pixels
            .checked_mul(bytes_per_pixel)
            .expect("Frame size calculation overflow")
    }

    /// Map the SER color id to a supported layout.
    ///
    /// Bayer mosaics carry undebayered sensor data the analyzers cannot
    /// interpret as intensity, so they are rejected here.
    pub fn color_mode(&self) -> Result<ColorMode> {
        match self.color_id {
            0 => Ok(ColorMode::Mono),
            100 => Ok(ColorMode::RGB),
            101 => Ok(ColorMode::BGR),
            8..=11 => Err(FramegradeError::UnsupportedColorMode(format!(
                "Bayer mosaic (SER color id {})",
                self.color_id
            ))),
            other => Err(FramegradeError::UnsupportedColorMode(format!(
                "SER color id {other}"
            ))),
        }
    }
}

/// Memory-mapped SER video reader.
#[derive(Debug)]
pub struct SerReader {
    mmap: Mmap,
    pub header: SerHeader,
    color_mode: ColorMode,
}

impl SerReader {
    /// Open a SER file and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SER_HEADER_SIZE {
            return Err(FramegradeError::InvalidSer(
                "File too small for SER header".into(),
            ));
        }

        if &mmap[0..14] != SER_MAGIC {
            return Err(FramegradeError::InvalidSer(
                "Missing LUCAM-RECORDER magic".into(),
            ));
        }

        let header = parse_header(&mmap[..SER_HEADER_SIZE])?;
        let color_mode = header.color_mode()?;

        let expected_data_size =
            SER_HEADER_SIZE + header.frame_byte_size() * header.frame_count as usize;
        if mmap.len() < expected_data_size {
            return Err(FramegradeError::InvalidSer(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected_data_size,
                mmap.len()
            )));
        }

        Ok(Self {
            mmap,
            header,
            color_mode,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    pub fn color_mode(&self) -> &ColorMode {
        &self.color_mode
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(FramegradeError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        let offset = SER_HEADER_SIZE + index * self.header.frame_byte_size();
        let end = offset + self.header.frame_byte_size();
        Ok(&self.mmap[offset..end])
    }

    /// Decode a single frame to 8-bit samples.
    ///
    /// Mono sources become grayscale frames; RGB and BGR become planar
    /// color frames (BGR is swizzled into RGB order). Deeper bit depths
    /// are downscaled to 8 bits.
    pub fn read_frame(&self, index: usize) -> Result<PixelFrame> {
        let raw = self.frame_raw(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;
        let bps = self.header.bytes_per_pixel_plane();
        let planes = self.header.planes_per_pixel();

        let mut samples: Vec<u8> = Vec::with_capacity(h * w * planes);
        for pixel in 0..h * w {
            let offset = pixel * planes * bps;
            match self.color_mode {
                ColorMode::Mono => samples.push(self.decode_sample(raw, offset)),
                ColorMode::RGB => {
                    for plane in 0..planes {
                        samples.push(self.decode_sample(raw, offset + plane * bps));
                    }
                }
                ColorMode::BGR => {
                    for plane in [2, 1, 0] {
                        samples.push(self.decode_sample(raw, offset + plane * bps));
                    }
                }
            }
        }

        let mut frame = PixelFrame::from_interleaved(h, w, planes, &samples)?;
        *frame.metadata_mut() = FrameMetadata {
            frame_index: index,
            timestamp_us: self.read_timestamp(index),
        };
        Ok(frame)
    }

    fn decode_sample(&self, raw: &[u8], offset: usize) -> u8 {
        let depth = self.header.pixel_depth;
        if self.header.bytes_per_pixel_plane() == 1 {
            if depth >= 8 {
                raw[offset]
            } else {
                let max = (1u16 << depth) - 1;
                ((raw[offset] as u16 * 255 + max / 2) / max) as u8
            }
        } else {
            let pair = [raw[offset], raw[offset + 1]];
            let val = if self.header.little_endian {
                u16::from_le_bytes(pair)
            } else {
                u16::from_be_bytes(pair)
            };
            (val >> (depth - 8)) as u8
        }
    }

    /// Read per-frame timestamp from the optional trailer.
    fn read_timestamp(&self, index: usize) -> Option<u64> {
        let trailer_offset =
            SER_HEADER_SIZE + self.header.frame_byte_size() * self.header.frame_count as usize;
        let ts_offset = trailer_offset + index * 8;
        if ts_offset + 8 <= self.mmap.len() {
            let bytes = &self.mmap[ts_offset..ts_offset + 8];
            Some(u64::from_le_bytes(bytes.try_into().ok()?))
        } else {
            None
        }
    }

    /// Build SourceInfo from the header.
    pub fn source_info(&self, path: &Path) -> SourceInfo {
        SourceInfo {
            filename: path.to_path_buf(),
            total_frames: self.frame_count(),
            width: self.header.width,
            height: self.header.height,
            bit_depth: self.header.pixel_depth as u8,
            color_mode: self.color_mode.clone(),
            observer: non_empty(&self.header.observer),
            telescope: non_empty(&self.header.telescope),
            instrument: non_empty(&self.header.instrument),
        }
    }

    /// Iterator over all frames.
    pub fn frames(&self) -> impl Iterator<Item = Result<PixelFrame>> + '_ {
        (0..self.frame_count()).map(move |i| self.read_frame(i))
    }
}

fn parse_header(buf: &[u8]) -> Result<SerHeader> {
    let mut cursor = std::io::Cursor::new(&buf[14..]); // skip magic

    let _lu_id = cursor.read_i32::<LittleEndian>()?;
    let color_id = cursor.read_i32::<LittleEndian>()?;
    let le_flag = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_i32::<LittleEndian>()? as u32;
    let height = cursor.read_i32::<LittleEndian>()? as u32;
    let pixel_depth = cursor.read_i32::<LittleEndian>()? as u32;
    let frame_count = cursor.read_i32::<LittleEndian>()? as u32;

    let observer = read_fixed_string(&buf[42..82]);
    let instrument = read_fixed_string(&buf[82..122]);
    let telescope = read_fixed_string(&buf[122..162]);

    let mut cursor = std::io::Cursor::new(&buf[162..]);
    let date_time = cursor.read_u64::<LittleEndian>()?;
    let date_time_utc = cursor.read_u64::<LittleEndian>()?;

    if width == 0 || height == 0 {
        return Err(FramegradeError::InvalidFrameShape(format!(
            "degenerate dimensions {width}x{height}"
        )));
    }
    if pixel_depth == 0 || pixel_depth > 16 {
        return Err(FramegradeError::InvalidSer(format!(
            "Pixel depth {pixel_depth} out of range"
        )));
    }

    // SER spec: LittleEndian field = 0 means big-endian pixel data,
    // but many writers (including FireCapture) use 0 for little-endian.
    // Follow Siril's convention: treat 0 as little-endian.
    let little_endian = le_flag != 1;

    Ok(SerHeader {
        color_id,
        little_endian,
        width,
        height,
        pixel_depth,
        frame_count,
        observer,
        instrument,
        telescope,
        date_time,
        date_time_utc,
    })
}

fn read_fixed_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
