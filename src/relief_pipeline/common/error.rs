use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReliefError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode source image: {0}")]
    DecodeFailure(String),

    #[error("Failed to encode output: {0}")]
    EncodeError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid thickness field dimensions: {0}")]
    InvalidDimensions(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReliefError>;
