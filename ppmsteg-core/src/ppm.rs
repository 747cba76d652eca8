//! PPM (Portable Pixel Map) codec.
//!
//! Parses both the text (`P3`) and binary (`P6`) variants and always writes the
//! text variant.
//!
//! # Usage
//!
//! ```
//! use ppmsteg_core::ppm;
//!
//! let image = ppm::parse(b"P3\n2 1\n255\n10 10 10 20 20 20\n")?;
//! assert_eq!((image.width(), image.height()), (2, 1));
//!
//! let text = ppm::serialize(&image);
//! assert_eq!(text, b"P3\n2 1\n255\n10 10 10\n20 20 20\n");
//! # Ok::<(), ppmsteg_core::ParseError>(())
//! ```

use std::io::{self, Write};

use tracing::{debug, instrument};

use crate::error::{ParseError, DEFAULT_MAX_PIXELS, MAX_CHANNEL_VALUE};
use crate::image::{Format, Image};
use crate::pixel::{pixel_count, Pixel, PixelBuffer};

/// Resource limits applied while parsing untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted `width * height`.
    pub max_pixels: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Parse a P3 or P6 image with default [`Limits`].
pub fn parse(bytes: &[u8]) -> Result<Image, ParseError> {
    parse_with_limits(bytes, &Limits::default())
}

/// Parse a P3 or P6 image.
///
/// Either a complete image is returned or an error; a truncated payload never
/// yields a partially filled buffer.
#[instrument(level = "debug", skip_all, fields(bytes = bytes.len()))]
pub fn parse_with_limits(bytes: &[u8], limits: &Limits) -> Result<Image, ParseError> {
    let mut reader = ByteReader::new(bytes);

    reader.skip_header_space();
    let format = reader
        .token()
        .and_then(Format::from_magic)
        .ok_or(ParseError::UnrecognizedFormat)?;

    let width = reader.header_number("width")?;
    let height = reader.header_number("height")?;
    let max = reader.header_number("maximum value")?;

    if width == 0 || height == 0 {
        return Err(ParseError::MalformedHeader(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    if max == 0 || max > MAX_CHANNEL_VALUE {
        return Err(ParseError::MalformedHeader(format!(
            "maximum value must be in 1..={MAX_CHANNEL_VALUE}, got {max}"
        )));
    }
    let max = max as u16;

    let pixels = u64::from(width) * u64::from(height);
    if pixels > limits.max_pixels {
        return Err(ParseError::TooLarge {
            pixels,
            limit: limits.max_pixels,
        });
    }
    let count =
        pixel_count(width, height).map_err(|e| ParseError::MalformedHeader(e.to_string()))?;

    debug!(%format, width, height, max, "Parsed header");

    let data = match format {
        Format::Text => read_text_payload(&mut reader, count, max)?,
        Format::Binary => read_binary_payload(&mut reader, count, max)?,
    };

    let buffer = PixelBuffer::from_pixels(width, height, data)
        .map_err(|e| ParseError::MalformedHeader(e.to_string()))?;
    Ok(Image::from_parts_unchecked(format, max, buffer))
}

fn read_text_payload(
    reader: &mut ByteReader<'_>,
    count: usize,
    max: u16,
) -> Result<Vec<Pixel>, ParseError> {
    // The shortest encoding of a pixel is "0 0 0 " (six bytes).
    let mut data = Vec::with_capacity(count.min(reader.remaining() / 6 + 1));
    let mut channels = [0u16; 3];

    for i in 0..count {
        for (c, channel) in channels.iter_mut().enumerate() {
            let index = 3 * i + c;
            reader.skip_space();
            let token = reader.token().ok_or(ParseError::TruncatedData)?;
            let value = parse_decimal(token)
                .filter(|v| *v <= u32::from(max))
                .ok_or(ParseError::InvalidSample { index })?;
            *channel = value as u16;
        }
        data.push(Pixel::new(channels[0], channels[1], channels[2]));
    }
    Ok(data)
}

fn read_binary_payload(
    reader: &mut ByteReader<'_>,
    count: usize,
    max: u16,
) -> Result<Vec<Pixel>, ParseError> {
    match reader.next_byte() {
        Some(b) if b.is_ascii_whitespace() => {}
        Some(_) => {
            return Err(ParseError::MalformedHeader(
                "expected a single whitespace byte after the maximum value".into(),
            ))
        }
        None => return Err(ParseError::TruncatedData),
    }

    let bytes_per_sample = if max < 256 { 1 } else { 2 };
    let stride = 3 * bytes_per_sample;
    let needed = count
        .checked_mul(stride)
        .ok_or(ParseError::TruncatedData)?;
    let payload = reader.take(needed).ok_or(ParseError::TruncatedData)?;

    let mut data = Vec::with_capacity(count);
    for (i, chunk) in payload.chunks_exact(stride).enumerate() {
        let channel = |c: usize| -> Result<u16, ParseError> {
            let value = if bytes_per_sample == 1 {
                u16::from(chunk[c])
            } else {
                u16::from_be_bytes([chunk[2 * c], chunk[2 * c + 1]])
            };
            if value > max {
                return Err(ParseError::InvalidSample { index: 3 * i + c });
            }
            Ok(value)
        };
        data.push(Pixel::new(channel(0)?, channel(1)?, channel(2)?));
    }
    Ok(data)
}

/// Serialize an image as P3 text.
pub fn serialize(image: &Image) -> Vec<u8> {
    // Roughly "ddd ddd ddd\n" per pixel.
    let mut out = Vec::with_capacity(16 + image.pixels().len() * 12);
    // io::Write for Vec<u8> never fails.
    let _ = write_to(image, &mut out);
    out
}

/// Write an image as P3 text to `writer`.
///
/// Samples are written as stored; nothing is clamped.
pub fn write_to<W: Write>(image: &Image, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", Format::Text.magic())?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "{}", image.max())?;
    for pixel in image.pixels() {
        writeln!(writer, "{} {} {}", pixel.red, pixel.green, pixel.blue)?;
    }
    Ok(())
}

/// Parse an unsigned decimal token. `None` for empty, non-digit or overflowing input.
fn parse_decimal(token: &[u8]) -> Option<u32> {
    if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
        return None;
    }
    token.iter().try_fold(0u32, |acc, d| {
        acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
    })
}

struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn skip_space(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skip whitespace and `#` comments (which run to end of line).
    fn skip_header_space(&mut self) {
        loop {
            self.skip_space();
            if self.peek() != Some(b'#') {
                break;
            }
            while let Some(b) = self.next_byte() {
                if b == b'\n' || b == b'\r' {
                    break;
                }
            }
        }
    }

    /// Next run of bytes up to whitespace or a comment marker.
    fn token(&mut self) -> Option<&'a [u8]> {
        let data = self.data;
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !b.is_ascii_whitespace() && b != b'#')
        {
            self.pos += 1;
        }
        (self.pos > start).then(|| &data[start..self.pos])
    }

    fn header_number(&mut self, field: &str) -> Result<u32, ParseError> {
        self.skip_header_space();
        let token = self
            .token()
            .ok_or_else(|| ParseError::MalformedHeader(format!("missing {field}")))?;
        parse_decimal(token).ok_or_else(|| {
            ParseError::MalformedHeader(format!(
                "{field} is not a decimal integer: {:?}",
                String::from_utf8_lossy(token)
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(header: &str, payload: &[u8]) -> Vec<u8> {
        let mut bytes = header.as_bytes().to_vec();
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn test_parse_p3() {
        let image = parse(b"P3\n2 2\n255\n1 2 3  4 5 6\n7 8 9 10 11 12\n").unwrap();
        assert_eq!(image.format(), Format::Text);
        assert_eq!((image.width(), image.height(), image.max()), (2, 2, 255));
        assert_eq!(image.pixel(0), Some(&Pixel::new(1, 2, 3)));
        assert_eq!(image.pixel(3), Some(&Pixel::new(10, 11, 12)));
    }

    #[test]
    fn test_parse_header_comments() {
        let image = parse(b"P3 # made by hand\n# size\n1 1\n#max\n15\n1 2 3").unwrap();
        assert_eq!((image.width(), image.height(), image.max()), (1, 1, 15));
        assert_eq!(image.pixel(0), Some(&Pixel::new(1, 2, 3)));
    }

    #[test]
    fn test_parse_p6_single_byte() {
        let bytes = binary("P6\n2 1\n255\n", &[10, 20, 30, 40, 50, 60]);
        let image = parse(&bytes).unwrap();
        assert_eq!(image.format(), Format::Binary);
        assert_eq!(image.pixel(1), Some(&Pixel::new(40, 50, 60)));
    }

    #[test]
    fn test_parse_p6_double_byte_big_endian() {
        let bytes = binary("P6 1 1 1000\n", &[0x03, 0xE8, 0x01, 0x00, 0x00, 0x07]);
        let image = parse(&bytes).unwrap();
        assert_eq!(image.pixel(0), Some(&Pixel::new(1000, 256, 7)));
    }

    #[test]
    fn test_parse_p6_payload_may_start_with_whitespace_value() {
        // 0x0A is a sample, not a second separator.
        let bytes = binary("P6\n1 1\n255\n", &[0x0A, 0x20, 0x09]);
        let image = parse(&bytes).unwrap();
        assert_eq!(image.pixel(0), Some(&Pixel::new(10, 32, 9)));
    }

    #[test]
    fn test_parse_p6_ignores_trailing_bytes() {
        let bytes = binary("P6\n1 1\n255\n", &[1, 2, 3, 4, 5]);
        assert_eq!(parse(&bytes).unwrap().pixel(0), Some(&Pixel::new(1, 2, 3)));
    }

    #[test]
    fn test_unrecognized_format() {
        assert_eq!(parse(b""), Err(ParseError::UnrecognizedFormat));
        assert_eq!(parse(b"   \n"), Err(ParseError::UnrecognizedFormat));
        assert_eq!(parse(b"P5\n1 1\n255\n\0"), Err(ParseError::UnrecognizedFormat));
        assert_eq!(parse(b"P33 1 1 255 0 0 0"), Err(ParseError::UnrecognizedFormat));
        assert_eq!(parse(b"\x89PNG\r\n"), Err(ParseError::UnrecognizedFormat));
    }

    #[test]
    fn test_malformed_header() {
        for input in [
            &b"P3"[..],
            b"P3\n2",
            b"P3\n2 x 255\n",
            b"P3\n2 1\n-5\n",
            b"P3\n0 1\n255\n",
            b"P3\n1 0\n255\n",
            b"P3\n1 1\n0\n",
            b"P3\n1 1\n65536\n",
            b"P3\n99999999999 1\n255\n",
        ] {
            assert!(
                matches!(parse(input), Err(ParseError::MalformedHeader(_))),
                "expected MalformedHeader for {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_p3_truncated() {
        assert_eq!(
            parse(b"P3\n2 1\n255\n1 2 3 4 5\n"),
            Err(ParseError::TruncatedData)
        );
        assert_eq!(parse(b"P3\n1 1\n255\n"), Err(ParseError::TruncatedData));
    }

    #[test]
    fn test_p3_invalid_sample() {
        assert_eq!(
            parse(b"P3\n1 1\n255\n1 two 3\n"),
            Err(ParseError::InvalidSample { index: 1 })
        );
        assert_eq!(
            parse(b"P3\n2 1\n100\n1 2 3 4 5 101\n"),
            Err(ParseError::InvalidSample { index: 5 })
        );
    }

    #[test]
    fn test_p6_truncated() {
        assert_eq!(parse(b"P6\n2 1\n255"), Err(ParseError::TruncatedData));
        let bytes = binary("P6\n2 1\n255\n", &[1, 2, 3, 4, 5]);
        assert_eq!(parse(&bytes), Err(ParseError::TruncatedData));
        let bytes = binary("P6\n1 1\n65535\n", &[0, 1, 0, 2, 0]);
        assert_eq!(parse(&bytes), Err(ParseError::TruncatedData));
    }

    #[test]
    fn test_p6_sample_above_max() {
        let bytes = binary("P6\n1 1\n300\n", &[0, 1, 0x01, 0x2D, 0, 0]);
        assert_eq!(parse(&bytes), Err(ParseError::InvalidSample { index: 1 }));
    }

    #[test]
    fn test_pixel_limit() {
        let limits = Limits { max_pixels: 4 };
        assert_eq!(
            parse_with_limits(b"P6\n3 2\n255\n", &limits),
            Err(ParseError::TooLarge {
                pixels: 6,
                limit: 4
            })
        );
        assert!(parse_with_limits(b"P3\n2 2\n255\n0 0 0 0 0 0 0 0 0 0 0 0", &limits).is_ok());
    }

    #[test]
    fn test_serialize_is_p3_text() {
        let bytes = binary("P6\n2 1\n255\n", &[10, 10, 10, 20, 20, 20]);
        let image = parse(&bytes).unwrap();
        assert_eq!(
            String::from_utf8(serialize(&image)).unwrap(),
            "P3\n2 1\n255\n10 10 10\n20 20 20\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_wide_samples() {
        let input = b"P3\n2 1\n65535\n65535 0 1\n256 512 1024\n";
        let image = parse(input).unwrap();
        let reparsed = parse(&serialize(&image)).unwrap();
        assert_eq!(image, reparsed);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(b"0"), Some(0));
        assert_eq!(parse_decimal(b"4294967295"), Some(u32::MAX));
        assert_eq!(parse_decimal(b"4294967296"), None);
        assert_eq!(parse_decimal(b"+1"), None);
        assert_eq!(parse_decimal(b""), None);
    }
}
