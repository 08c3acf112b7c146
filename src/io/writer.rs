// src/io/writer.rs
use image::{ImageFormat, RgbaImage};
use std::path::Path;

use crate::error::{Error, Result};
use crate::processing::field::CHANNELS;

/// Encode an RGBA buffer as PNG.
pub fn write_png(output_path: &Path, rgba: Vec<u8>, width: usize, height: usize) -> Result<()> {
    let invalid = || Error::InvalidDimensions { width, height };
    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;

    let actual = rgba.len();
    let image = RgbaImage::from_raw(w, h, rgba).ok_or(Error::BufferLength {
        expected: width * height * CHANNELS,
        actual,
    })?;
    image.save_with_format(output_path, ImageFormat::Png)?;

    Ok(())
}
