//! Images: a PPM header plus the pixel buffer it describes.

use serde::{Deserialize, Serialize};

use crate::error::ImageError;
use crate::pixel::{Pixel, PixelBuffer};

/// PPM payload encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `P3`: whitespace-separated ASCII decimal samples.
    Text,
    /// `P6`: raw big-endian samples, one or two bytes each.
    Binary,
}

impl Format {
    /// The magic marker that opens a file of this format.
    pub fn magic(&self) -> &'static str {
        match self {
            Self::Text => "P3",
            Self::Binary => "P6",
        }
    }

    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"P3" => Some(Self::Text),
            b"P6" => Some(Self::Binary),
            _ => None,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.magic())
    }
}

/// Header fields of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHeader {
    pub format: Format,
    pub width: u32,
    pub height: u32,
    pub max: u16,
}

/// A decoded PPM image.
///
/// Width and height are read from the owned [`PixelBuffer`], so the header can
/// never disagree with the buffer length. Every channel is within `[0, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    format: Format,
    max: u16,
    pixels: PixelBuffer,
}

impl Image {
    /// Build an image, checking that `max` is positive and no channel exceeds it.
    pub fn new(format: Format, max: u16, pixels: PixelBuffer) -> Result<Self, ImageError> {
        if max == 0 {
            return Err(ImageError::ZeroMaxValue);
        }
        if let Some((index, pixel)) = pixels
            .iter()
            .enumerate()
            .find(|(_, p)| p.max_channel() > max)
        {
            return Err(ImageError::ChannelOutOfRange {
                index,
                value: pixel.max_channel(),
                max,
            });
        }
        Ok(Self {
            format,
            max,
            pixels,
        })
    }

    /// Caller guarantees every channel is `<= max` and `max > 0`.
    pub(crate) fn from_parts_unchecked(format: Format, max: u16, pixels: PixelBuffer) -> Self {
        debug_assert!(max > 0);
        Self {
            format,
            max,
            pixels,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn max(&self) -> u16 {
        self.max
    }

    pub fn header(&self) -> ImageHeader {
        ImageHeader {
            format: self.format,
            width: self.width(),
            height: self.height(),
            max: self.max,
        }
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn pixel(&self, index: usize) -> Option<&Pixel> {
        self.pixels.get(index)
    }

    /// Overwrite the red channel at `index`.
    ///
    /// Returns `false` (and changes nothing) if `index` is out of bounds or
    /// `red` exceeds the image maximum.
    pub fn set_red(&mut self, index: usize, red: u16) -> bool {
        if red > self.max {
            return false;
        }
        match self.pixels.get_mut(index) {
            Some(pixel) => {
                pixel.red = red;
                true
            }
            None => false,
        }
    }

    pub fn same_dimensions(&self, other: &Image) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(values: &[(u16, u16, u16)], width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_pixels(width, height, values.iter().copied().map(Pixel::from).collect())
            .unwrap()
    }

    #[test]
    fn test_format_magic() {
        assert_eq!(Format::from_magic(b"P3"), Some(Format::Text));
        assert_eq!(Format::from_magic(b"P6"), Some(Format::Binary));
        assert_eq!(Format::from_magic(b"P5"), None);
        assert_eq!(Format::Binary.to_string(), "P6");
    }

    #[test]
    fn test_new_rejects_channel_above_max() {
        let pixels = buffer(&[(1, 2, 3), (4, 16, 6)], 2, 1);
        let err = Image::new(Format::Text, 15, pixels).unwrap_err();
        assert_eq!(
            err,
            ImageError::ChannelOutOfRange {
                index: 1,
                value: 16,
                max: 15
            }
        );
    }

    #[test]
    fn test_new_rejects_zero_max() {
        let pixels = buffer(&[(0, 0, 0)], 1, 1);
        assert_eq!(
            Image::new(Format::Text, 0, pixels),
            Err(ImageError::ZeroMaxValue)
        );
    }

    #[test]
    fn test_header_reflects_buffer() {
        let image = Image::new(Format::Binary, 255, buffer(&[(0, 0, 0); 6], 3, 2)).unwrap();
        assert_eq!(
            image.header(),
            ImageHeader {
                format: Format::Binary,
                width: 3,
                height: 2,
                max: 255
            }
        );
    }

    #[test]
    fn test_set_red_bounds() {
        let mut image = Image::new(Format::Text, 100, buffer(&[(1, 1, 1)], 1, 1)).unwrap();
        assert!(!image.set_red(0, 101));
        assert!(!image.set_red(1, 5));
        assert!(image.set_red(0, 100));
        assert_eq!(image.pixel(0).unwrap().red, 100);
    }

    #[test]
    fn test_header_serializes_lowercase_format() {
        let header = ImageHeader {
            format: Format::Text,
            width: 1,
            height: 1,
            max: 255,
        };
        let json = serde_json::to_string(&header).unwrap();
        assert!(json.contains("\"format\":\"text\""));
    }
}
