// src/processing/field.rs
use crate::error::{Error, Result};

/// Samples per pixel in a decoded image (RGBA).
pub const CHANNELS: usize = 4;

/// Borrowed view over an interleaved RGBA image.
///
/// The caller owns the bytes; the pipeline only reads them while computing NDVI.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> PixelBuffer<'a> {
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self> {
        check_shape(width, height)?;
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// A width x height grid of `f32` values, indexed by `row * width + col`.
///
/// Used for raw NDVI and for the 0-255 scaled field. Non-finite values are
/// kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl ScalarField {
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        check_shape(width, height)?;
        if data.len() != width * height {
            return Err(Error::BufferLength {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Binary vegetation classification: every value is 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Mask {
    pub const VEGETATION: u8 = 255;
    pub const BACKGROUND: u8 = 0;

    /// Build a mask from per-pixel classifications (`true` = vegetation).
    pub fn from_flags<I>(flags: I, width: usize, height: usize) -> Result<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        let data: Vec<u8> = flags
            .into_iter()
            .map(|veg| if veg { Self::VEGETATION } else { Self::BACKGROUND })
            .collect();
        Self::from_classes(data, width, height)
    }

    pub(crate) fn from_classes(data: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        check_shape(width, height)?;
        if data.len() != width * height {
            return Err(Error::BufferLength {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn vegetation_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == Self::VEGETATION).count()
    }

    /// The mask as a 0/255 scalar field, for feeding back into the thresholder.
    pub fn to_field(&self) -> ScalarField {
        ScalarField {
            data: self.data.iter().map(|&v| v as f32).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Min/max pair produced by the range finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

impl Default for Range {
    /// Both bounds start at zero, so a seeded range always spans 0.
    fn default() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

fn check_shape(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Fail unless `a` and `b` describe the same grid.
pub(crate) fn check_same_shape(a: (usize, usize), b: (usize, usize)) -> Result<()> {
    if a != b {
        return Err(Error::SizeMismatch {
            ew: a.0,
            eh: a.1,
            aw: b.0,
            ah: b.1,
        });
    }
    Ok(())
}
