// src/utils/rgba.rs
use rayon::prelude::*;

use crate::processing::field::{Mask, ScalarField, CHANNELS};

const OPAQUE: u8 = 255;

/// Expand a scaled (0-255) field into opaque grey RGBA.
///
/// Each value narrows with an `as u8` cast: fractions truncate toward zero,
/// NaN becomes 0 and anything beyond the byte range saturates.
pub fn scaled_to_rgba(scaled: &ScalarField) -> Vec<u8> {
    let mut output = vec![0u8; scaled.len() * CHANNELS];
    output
        .par_chunks_exact_mut(CHANNELS)
        .zip(scaled.data().par_iter())
        .for_each(|(px, &value)| {
            let grey = value as u8;
            px.copy_from_slice(&[grey, grey, grey, OPAQUE]);
        });
    output
}

/// Expand a 0/255 mask into opaque black/white RGBA.
pub fn mask_to_rgba(mask: &Mask) -> Vec<u8> {
    mask.data()
        .par_iter()
        .flat_map_iter(|&class| [class, class, class, OPAQUE])
        .collect()
}
