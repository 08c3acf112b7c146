//! Otsu thresholding and vegetation mask construction.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::processing::field::{Mask, ScalarField};
use crate::processing::stats::Histogram;

/// Otsu threshold of a scaled field.
///
/// Any finite sample whose bin falls outside 0-255 is an error here; use
/// [`Histogram::from_scaled`] directly to clamp and count such samples instead.
/// NaN samples are left out of the histogram.
pub fn otsu_threshold(scaled: &ScalarField) -> Result<u8> {
    let histogram = Histogram::from_scaled(scaled);
    check_histogram(&histogram)?;
    Ok(histogram.otsu_threshold())
}

/// Fail if any sample of the histogram had to be clamped.
pub fn check_histogram(histogram: &Histogram) -> Result<()> {
    match histogram.first_out_of_range() {
        Some(anomaly) => Err(Error::HistogramOutOfRange {
            position: anomaly.position,
            value: anomaly.value,
            bin: anomaly.bin,
        }),
        None => Ok(()),
    }
}

/// Classify each scaled sample: `>= threshold` is vegetation (255), the rest 0.
///
/// NaN compares false and so always lands in the background.
pub fn build_mask(scaled: &ScalarField, threshold: u8) -> Result<Mask> {
    let cut = threshold as f32;
    let classes: Vec<u8> = scaled
        .data()
        .par_iter()
        .map(|&value| {
            if value >= cut {
                Mask::VEGETATION
            } else {
                Mask::BACKGROUND
            }
        })
        .collect();

    let (width, height) = scaled.shape();
    Mask::from_classes(classes, width, height)
}
