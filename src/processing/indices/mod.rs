// src/processing/indices/mod.rs
pub mod ndvi;

use crate::error::Result;
use crate::processing::field::{PixelBuffer, ScalarField};

// Re-export indices
pub use ndvi::{calculate_ndvi, InfrablueNdvi, BLUE_CHANNEL, IR_CHANNEL};

/// Per-pixel index computed from a decoded RGBA image
pub trait IndexCalculator: Send + Sync {
    /// Calculate the index for every pixel of the image
    fn calculate(&self, image: &PixelBuffer<'_>) -> Result<ScalarField>;

    /// Return the name of the index
    fn name(&self) -> &str;
}
