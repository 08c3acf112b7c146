// src/processing/score.rs
use itertools::Itertools;

use crate::error::Result;
use crate::processing::field::{check_same_shape, Mask, ScalarField};

/// Sum raw NDVI over every pixel the mask marks as vegetation.
///
/// Accumulates sequentially in `f32` so repeated runs agree to the bit. A
/// non-finite NDVI value under the mask turns the total into NaN or infinity.
pub fn vegetation_score(ndvi_raw: &ScalarField, mask: &Mask) -> Result<f32> {
    check_same_shape(ndvi_raw.shape(), mask.shape())?;

    let mut total = 0.0f32;
    for (&ndvi, &class) in ndvi_raw.data().iter().zip_eq(mask.data()) {
        if class == Mask::VEGETATION {
            total += ndvi;
        }
    }
    Ok(total)
}
