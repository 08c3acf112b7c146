// src/utils/mod.rs
pub mod rgba;

pub use rgba::{mask_to_rgba, scaled_to_rgba};
