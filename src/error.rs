//! Error types for the plant health pipeline

use thiserror::Error;

/// Errors produced by the NDVI pipeline and its image I/O.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Buffer length mismatch: expected {expected} samples, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Field size mismatch: expected {ew}x{eh}, got {aw}x{ah}")]
    SizeMismatch { ew: usize, eh: usize, aw: usize, ah: usize },

    #[error("No dynamic range: min {min} and max {max} cannot be rescaled")]
    DegenerateRange { min: f32, max: f32 },

    #[error("Histogram index out of bounds: value {value} at position {position} maps to bin {bin}")]
    HistogramOutOfRange { position: usize, value: f32, bin: i64 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
