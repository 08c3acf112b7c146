// src/processing/indices/ndvi.rs
use rayon::prelude::*;

use super::IndexCalculator;
use crate::error::Result;
use crate::processing::field::{PixelBuffer, ScalarField, CHANNELS};

/// Near-infrared sample position within an infrablue RGBA pixel.
pub const IR_CHANNEL: usize = 0;
/// Blue sample position within an infrablue RGBA pixel.
pub const BLUE_CHANNEL: usize = 2;

/// NDVI calculator for infrablue photographs: `(IR - BLUE) / (IR + BLUE)`.
///
/// A NoIR camera behind a blue filter records near-infrared in the red
/// channel, so blue stands in for the visible band of classic NDVI.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfrablueNdvi;

impl IndexCalculator for InfrablueNdvi {
    fn calculate(&self, image: &PixelBuffer<'_>) -> Result<ScalarField> {
        let (width, height) = image.shape();

        // 0/0 stays NaN and x/0 stays infinite; later stages rely on it.
        let result_data: Vec<f32> = image
            .data()
            .par_chunks_exact(CHANNELS)
            .map(|px| {
                let ir = px[IR_CHANNEL] as f32;
                let blue = px[BLUE_CHANNEL] as f32;
                (ir - blue) / (ir + blue)
            })
            .collect();

        ScalarField::new(result_data, width, height)
    }

    fn name(&self) -> &str {
        "NDVI"
    }
}

/// Compute the raw NDVI field of an infrablue image.
pub fn calculate_ndvi(image: &PixelBuffer<'_>) -> Result<ScalarField> {
    InfrablueNdvi.calculate(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(pixels: &[(u8, u8)]) -> Vec<u8> {
        pixels
            .iter()
            .flat_map(|&(ir, blue)| [ir, 77, blue, 255])
            .collect()
    }

    #[test]
    fn reads_only_ir_and_blue() {
        let mut data = rgba(&[(200, 50)]);
        data[1] = 0;
        data[3] = 0;
        let image = PixelBuffer::new(&data, 1, 1).unwrap();
        let ndvi = calculate_ndvi(&image).unwrap();
        assert!((ndvi.data()[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn zero_denominator_is_nan() {
        let data = rgba(&[(0, 0)]);
        let image = PixelBuffer::new(&data, 1, 1).unwrap();
        let ndvi = calculate_ndvi(&image).unwrap();
        assert!(ndvi.data()[0].is_nan());
    }

    #[test]
    fn extremes_hit_unit_bounds() {
        let data = rgba(&[(255, 0), (0, 255)]);
        let image = PixelBuffer::new(&data, 2, 1).unwrap();
        let ndvi = calculate_ndvi(&image).unwrap();
        assert_eq!(ndvi.data(), &[1.0, -1.0]);
    }

    #[test]
    fn calculator_name() {
        assert_eq!(InfrablueNdvi.name(), "NDVI");
    }
}
