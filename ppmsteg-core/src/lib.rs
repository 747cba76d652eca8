//! ppmsteg core - PPM codec and red-channel steganography
//!
//! This crate parses PPM images (text `P3` and binary `P6`), writes them back as
//! `P3`, and hides short messages in the red channel of selected pixels.
//!
//! # Features
//!
//! - Contiguous, shape-checked pixel storage
//! - 8-bit and 16-bit P6 payloads
//! - Explicit generator handle for reproducible encoding
//! - Typed errors; nothing in this crate prints or exits
//!
//! # Example
//!
//! ```
//! use ppmsteg_core::{ppm, stego, SeedSource};
//!
//! let carrier = ppm::parse(b"P3\n2 1\n255\n10 10 10 20 20 20\n")?;
//!
//! let mut rng = SeedSource::Fixed(1).rng();
//! let encoded = stego::encode_with_rng(b"A", &carrier, &mut rng)?;
//!
//! let recovered = stego::decode(&carrier, &encoded)?;
//! assert_eq!(recovered, b"A");
//!
//! let text = ppm::serialize(&encoded);
//! assert!(text.starts_with(b"P3\n2 1\n255\n"));
//! # Ok::<(), ppmsteg_core::StegError>(())
//! ```

pub mod error;
pub mod image;
pub mod pixel;
pub mod ppm;
pub mod stego;

// Re-export main types for convenience
pub use error::{
    BufferError, DecodeError, EncodeError, ImageError, ParseError, Result, StegError,
    DEFAULT_MAX_PIXELS, MAX_CHANNEL_VALUE,
};
pub use image::{Format, Image, ImageHeader};
pub use pixel::{Pixel, PixelBuffer};
pub use ppm::Limits;
pub use stego::SeedSource;
