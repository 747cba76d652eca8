use tracing::{debug, instrument};

use crate::error::DecodeError;
use crate::image::Image;

/// Recover a message by diffing the red channels of `original` and `modified`.
///
/// Every pixel whose red channel differs contributes the low byte of the
/// modified value, in row-major order. No differing pixels yields an empty
/// message.
#[instrument(level = "debug", skip_all, fields(
    width = original.width(),
    height = original.height()
))]
pub fn decode(original: &Image, modified: &Image) -> Result<Vec<u8>, DecodeError> {
    if !original.same_dimensions(modified) {
        return Err(DecodeError::DimensionMismatch {
            original_width: original.width(),
            original_height: original.height(),
            modified_width: modified.width(),
            modified_height: modified.height(),
        });
    }

    let message: Vec<u8> = original
        .pixels()
        .iter()
        .zip(modified.pixels())
        .filter(|(before, after)| before.red != after.red)
        .map(|(_, after)| (after.red & 0xFF) as u8)
        .collect();

    debug!(recovered = message.len(), "Decoded message");
    Ok(message)
}

/// [`decode`] for callers holding optional images.
pub fn decode_opt(
    original: Option<&Image>,
    modified: Option<&Image>,
) -> Result<Vec<u8>, DecodeError> {
    match (original, modified) {
        (Some(original), Some(modified)) => decode(original, modified),
        _ => Err(DecodeError::InvalidInput("missing image")),
    }
}
