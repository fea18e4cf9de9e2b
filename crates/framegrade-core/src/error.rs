use thiserror::Error;

#[derive(Error, Debug)]
pub enum FramegradeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid frame shape: {0}")]
    InvalidFrameShape(String),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Unsupported color mode: {0}")]
    UnsupportedColorMode(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, FramegradeError>;
