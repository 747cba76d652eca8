//! Pixel storage.
//!
//! A [`PixelBuffer`] is one contiguous, row-major run of [`Pixel`]s whose length
//! always equals `width * height`. Every constructor checks this, so code holding
//! a buffer never needs to re-validate it.

use std::ops::{Index, IndexMut};

use crate::error::BufferError;

/// The RGB values of a single pixel.
///
/// Channels are stored as `u16` so images declaring a maximum above 255
/// (two bytes per channel in P6) are represented without loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Pixel {
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Largest of the three channels.
    pub fn max_channel(&self) -> u16 {
        self.red.max(self.green).max(self.blue)
    }
}

impl From<(u16, u16, u16)> for Pixel {
    fn from((red, green, blue): (u16, u16, u16)) -> Self {
        Self { red, green, blue }
    }
}

/// A `width x height` grid of pixels stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Allocate a buffer of black pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Pixel::default(); len],
        })
    }

    /// Wrap an existing row-major pixel vector.
    ///
    /// Fails unless `pixels.len() == width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BufferError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`), never zero.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false`: a buffer has at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pixel> {
        self.pixels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Pixel> {
        self.pixels.get_mut(index)
    }

    /// Pixel at column `x` of row `y`.
    pub fn get_xy(&self, x: u32, y: u32) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.offset(x, y))
    }

    /// Overwrite the pixel at column `x` of row `y`. Returns `false` when out of bounds.
    pub fn set_xy(&mut self, x: u32, y: u32, pixel: Pixel) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let offset = self.offset(x, y);
        self.pixels[offset] = pixel;
        true
    }

    pub fn as_slice(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pixel> {
        self.pixels.iter()
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, Pixel> {
        self.pixels.chunks(self.width as usize)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Index<usize> for PixelBuffer {
    type Output = Pixel;

    fn index(&self, index: usize) -> &Pixel {
        &self.pixels[index]
    }
}

impl IndexMut<usize> for PixelBuffer {
    fn index_mut(&mut self, index: usize) -> &mut Pixel {
        &mut self.pixels[index]
    }
}

impl<'a> IntoIterator for &'a PixelBuffer {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

/// `width * height` as a `usize`, rejecting empty and overflowing shapes.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, BufferError> {
    if width == 0 || height == 0 {
        return Err(BufferError::ZeroDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BufferError::TooManyPixels { width, height })
}
