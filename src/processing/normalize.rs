// src/processing/normalize.rs
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::processing::field::{Range, ScalarField};

/// Top of the display range the normalizer maps onto.
pub const DISPLAY_MAX: f64 = 255.0;

/// Linearly rescale `field` so that `range.min` maps to 0 and `range.max` to 255.
///
/// The arithmetic runs in `f64` and narrows to `f32`. Results are not clamped:
/// values outside `range` land outside 0-255, and NaN stays NaN.
///
/// Fails with [`Error::DegenerateRange`] when the range has no width, since
/// every output would be a division by zero.
pub fn normalize(field: &ScalarField, range: Range) -> Result<ScalarField> {
    if !(range.max > range.min) {
        return Err(Error::DegenerateRange {
            min: range.min,
            max: range.max,
        });
    }

    let data_black = range.min as f64;
    let data_white = range.max as f64;
    let span = data_white - data_black;

    let scaled: Vec<f32> = field
        .data()
        .par_iter()
        .map(|&value| (((value as f64 - data_black) / span) * DISPLAY_MAX) as f32)
        .collect();

    let (width, height) = field.shape();
    ScalarField::new(scaled, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bounds_to_display_range() {
        let field = ScalarField::new(vec![-0.5, 0.0, 0.5], 3, 1).unwrap();
        let scaled = normalize(&field, Range::new(-0.5, 0.5)).unwrap();
        assert_eq!(scaled.data(), &[0.0, 127.5, 255.0]);
    }

    #[test]
    fn equal_bounds_are_degenerate() {
        let field = ScalarField::new(vec![0.3; 4], 2, 2).unwrap();
        let err = normalize(&field, Range::new(0.3, 0.3)).unwrap_err();
        assert!(matches!(err, Error::DegenerateRange { .. }));
    }

    #[test]
    fn nan_bounds_are_degenerate() {
        let field = ScalarField::new(vec![0.3], 1, 1).unwrap();
        assert!(normalize(&field, Range::new(f32::NAN, 1.0)).is_err());
    }

    #[test]
    fn nan_passes_through() {
        let field = ScalarField::new(vec![f32::NAN, 1.0], 2, 1).unwrap();
        let scaled = normalize(&field, Range::new(0.0, 1.0)).unwrap();
        assert!(scaled.data()[0].is_nan());
        assert_eq!(scaled.data()[1], 255.0);
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        let field = ScalarField::new(vec![2.0], 1, 1).unwrap();
        let scaled = normalize(&field, Range::new(0.0, 1.0)).unwrap();
        assert_eq!(scaled.data()[0], 510.0);
    }
}
