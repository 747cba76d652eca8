use thiserror::Error;

/// Default upper bound on `width * height` accepted by the parser.
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Largest channel value a PPM header may declare.
pub const MAX_CHANNEL_VALUE: u32 = 65_535;

/// Errors raised while constructing a [`PixelBuffer`](crate::PixelBuffer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Pixel count for {width}x{height} does not fit in memory")]
    TooManyPixels { width: u32, height: u32 },

    #[error("Buffer holds {actual} pixels, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Errors raised while constructing an [`Image`](crate::Image).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Maximum channel value must be positive")]
    ZeroMaxValue,

    #[error("Pixel {index} has channel value {value} above maximum {max}")]
    ChannelOutOfRange { index: usize, value: u16, max: u16 },
}

/// Errors raised by the PPM parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unrecognized image format (expected P3 or P6)")]
    UnrecognizedFormat,

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Truncated pixel data")]
    TruncatedData,

    #[error("Invalid sample at channel index {index}")]
    InvalidSample { index: usize },

    #[error("Image has {pixels} pixels, limit is {limit}")]
    TooLarge { pixels: u64, limit: u64 },
}

/// Errors raised by the steganographic encoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Message of {len} bytes does not fit in a carrier of {pixels} pixels")]
    MessageTooLarge { len: usize, pixels: usize },

    #[error("Message byte {byte} exceeds the carrier's maximum channel value {max}")]
    ByteOutOfRange { byte: u8, max: u16 },
}

/// Errors raised by the steganographic decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error(
        "Image dimensions differ: original {original_width}x{original_height}, \
         modified {modified_width}x{modified_height}"
    )]
    DimensionMismatch {
        original_width: u32,
        original_height: u32,
        modified_width: u32,
        modified_height: u32,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Any failure from this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, StegError>;
