// src/io/reader.rs
use image::ImageReader;
use std::path::Path;

use crate::error::Result;
use crate::processing::field::PixelBuffer;

/// Decoded image as interleaved RGBA bytes.
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl DecodedImage {
    pub fn as_buffer(&self) -> Result<PixelBuffer<'_>> {
        PixelBuffer::new(&self.pixels, self.width, self.height)
    }
}

/// Decode an image file into RGBA, whatever its stored colour type.
pub fn read_rgba(path: &Path) -> Result<DecodedImage> {
    let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        pixels: rgba.into_raw(),
        width: width as usize,
        height: height as usize,
    })
}
