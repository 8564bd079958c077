use thiserror::Error;

/// Precondition failures of the denoising core. All of them are caller
/// errors and are reported before any output byte is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DenoiseError {
    #[error("invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("missing {0} buffer")]
    NullBuffer(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Denoise(#[from] DenoiseError),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
