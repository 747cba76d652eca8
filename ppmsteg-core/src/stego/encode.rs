use rand::Rng;
use tracing::{debug, instrument, trace};

use super::SeedSource;
use crate::error::EncodeError;
use crate::image::Image;

/// Hide `message` in a copy of `carrier`, seeding the generator from the clock.
pub fn encode(message: &[u8], carrier: &Image) -> Result<Image, EncodeError> {
    let mut rng = SeedSource::Time.rng();
    encode_with_rng(message, carrier, &mut rng)
}

/// [`encode`] for callers holding an optional carrier.
pub fn encode_opt(message: &[u8], carrier: Option<&Image>) -> Result<Image, EncodeError> {
    let carrier = carrier.ok_or(EncodeError::InvalidInput("missing carrier image"))?;
    encode(message, carrier)
}

/// Hide `message` in a copy of `carrier` using the given generator.
///
/// With `S = pixels / message.len()`, the first position is drawn from `[0, S)`
/// and each following one lies `1 + [0, S)` past the previous write. A pixel
/// whose red channel already equals the byte is skipped (linear probing), so
/// every written pixel differs from the carrier and positions strictly
/// increase. The carrier itself is never modified.
///
/// # Errors
///
/// - [`EncodeError::InvalidInput`] for an empty message
/// - [`EncodeError::ByteOutOfRange`] if a byte exceeds the carrier's maximum value
/// - [`EncodeError::MessageTooLarge`] if the message is longer than the pixel
///   count, or probing runs past the last pixel
#[instrument(level = "debug", skip_all, fields(
    message_len = message.len(),
    pixels = carrier.pixels().len()
))]
pub fn encode_with_rng<R: Rng + ?Sized>(
    message: &[u8],
    carrier: &Image,
    rng: &mut R,
) -> Result<Image, EncodeError> {
    if message.is_empty() {
        return Err(EncodeError::InvalidInput("message is empty"));
    }

    let max = carrier.max();
    if let Some(&byte) = message.iter().find(|b| u16::from(**b) > max) {
        return Err(EncodeError::ByteOutOfRange { byte, max });
    }

    let pixels = carrier.pixels().len();
    let too_large = EncodeError::MessageTooLarge {
        len: message.len(),
        pixels,
    };
    let step = pixels / message.len();
    if step == 0 {
        return Err(too_large);
    }
    debug!(step, "Computed step bound");

    let mut encoded = carrier.clone();
    let mut cursor = rng.gen_range(0..step);

    for (i, &byte) in message.iter().enumerate() {
        let value = u16::from(byte);
        while encoded.pixel(cursor).is_some_and(|p| p.red == value) {
            cursor += 1;
        }
        if cursor >= pixels {
            debug!(index = i, "Probing ran past the last pixel");
            return Err(too_large);
        }

        let stored = encoded.set_red(cursor, value);
        debug_assert!(stored);
        trace!(index = i, position = cursor, "Embedded byte");

        cursor += 1 + rng.gen_range(0..step);
    }

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::image::Format;
    use crate::pixel::{Pixel, PixelBuffer};
    use crate::stego::decode;

    fn image_with_reds(reds: &[u16], max: u16) -> Image {
        let pixels = reds.iter().map(|&r| Pixel::new(r, r, r)).collect();
        let buffer = PixelBuffer::from_pixels(reds.len() as u32, 1, pixels).unwrap();
        Image::new(Format::Text, max, buffer).unwrap()
    }

    fn changed_positions(a: &Image, b: &Image) -> Vec<usize> {
        a.pixels()
            .iter()
            .zip(b.pixels())
            .enumerate()
            .filter(|(_, (x, y))| x != y)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_two_pixel_scenario() {
        let carrier = image_with_reds(&[10, 20], 255);

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let encoded = encode_with_rng(b"A", &carrier, &mut rng).unwrap();

            let changed = changed_positions(&carrier, &encoded);
            assert_eq!(changed.len(), 1, "exactly one pixel must change");
            let position = changed[0];
            let original = carrier.pixel(position).unwrap();
            assert_eq!(
                encoded.pixel(position),
                Some(&Pixel {
                    red: 65,
                    ..*original
                })
            );

            assert_eq!(decode(&carrier, &encoded).unwrap(), b"A");
        }
    }

    #[test]
    fn test_carrier_not_mutated() {
        let carrier = image_with_reds(&[1, 2, 3, 4, 5, 6, 7, 8], 255);
        let before = carrier.clone();
        let mut rng = StdRng::seed_from_u64(3);
        let encoded = encode_with_rng(b"abc", &carrier, &mut rng).unwrap();
        assert_eq!(carrier, before);
        assert_ne!(encoded, carrier);
    }

    #[test]
    fn test_same_seed_same_output() {
        let carrier = image_with_reds(&[0; 64], 255);
        let a = encode_with_rng(b"seeded", &carrier, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = encode_with_rng(b"seeded", &carrier, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_probing_skips_matching_reds() {
        let carrier = image_with_reds(&[65, 65, 65, 0], 255);
        for seed in 0..16 {
            let encoded =
                encode_with_rng(b"A", &carrier, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(changed_positions(&carrier, &encoded), vec![3]);
        }
    }

    #[test]
    fn test_probing_past_end_is_rejected() {
        let carrier = image_with_reds(&[65, 65, 65, 65], 255);
        let err = encode_with_rng(b"A", &carrier, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, EncodeError::MessageTooLarge { len: 1, pixels: 4 });
    }

    #[test]
    fn test_consecutive_bytes_never_share_a_pixel() {
        // Step bound 1 forces every pixel to be used once, in order.
        let carrier = image_with_reds(&[0, 0], 255);
        let encoded = encode_with_rng(b"AB", &carrier, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(encoded.pixel(0).unwrap().red, 65);
        assert_eq!(encoded.pixel(1).unwrap().red, 66);
        assert_eq!(decode(&carrier, &encoded).unwrap(), b"AB");
    }

    #[test]
    fn test_message_longer_than_pixels() {
        let carrier = image_with_reds(&[0, 0, 0], 255);
        assert_eq!(
            encode(b"four", &carrier),
            Err(EncodeError::MessageTooLarge { len: 4, pixels: 3 })
        );
    }

    #[test]
    fn test_empty_message() {
        let carrier = image_with_reds(&[0], 255);
        assert!(matches!(
            encode(b"", &carrier),
            Err(EncodeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_carrier() {
        assert!(matches!(
            encode_opt(b"x", None),
            Err(EncodeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_byte_above_max() {
        let carrier = image_with_reds(&[0; 8], 100);
        assert_eq!(
            encode(b"ok~", &carrier),
            Err(EncodeError::ByteOutOfRange { byte: b'o', max: 100 })
        );
    }
}
