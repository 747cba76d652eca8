//! Red-channel steganography.
//!
//! A message is hidden by overwriting the red channel of a pseudo-random,
//! strictly increasing sequence of pixels with one message byte each. It is
//! recovered by diffing the modified image against the untouched original.
//!
//! ```
//! use ppmsteg_core::{ppm, stego, SeedSource};
//!
//! let carrier = ppm::parse(b"P3\n4 1\n255\n0 0 0 0 0 0 0 0 0 0 0 0\n")?;
//! let mut rng = SeedSource::Fixed(7).rng();
//! let encoded = stego::encode_with_rng(b"hi", &carrier, &mut rng)?;
//!
//! assert_eq!(stego::decode(&carrier, &encoded)?, b"hi");
//! # Ok::<(), ppmsteg_core::StegError>(())
//! ```

mod decode;
mod encode;
mod seed;

pub use decode::{decode, decode_opt};
pub use encode::{encode, encode_opt, encode_with_rng};
pub use seed::SeedSource;

use crate::image::Image;

/// Longest message `image` can carry under the spacing policy.
///
/// Every message byte needs its own pixel, so this is `width * height`.
/// Messages close to this bound only fit when no probing is needed; half of it
/// leaves room for collisions.
pub fn capacity(image: &Image) -> usize {
    image.pixels().len()
}
