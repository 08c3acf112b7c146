// src/processing/mod.rs
pub mod field;
pub mod indices;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod stats;
pub mod threshold;

// Re-export main components
pub use field::{Mask, PixelBuffer, Range, ScalarField};
pub use indices::calculate_ndvi;
pub use normalize::normalize;
pub use pipeline::{Export, Pipeline, PipelineOptions, PipelineOutput, Report};
pub use score::vegetation_score;
pub use stats::{min_max, Histogram};
pub use threshold::{build_mask, otsu_threshold};
