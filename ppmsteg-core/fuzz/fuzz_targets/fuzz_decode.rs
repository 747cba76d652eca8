#![no_main]

//! Fuzz target for stego::decode()
//!
//! Splits the input in two, parses each half as an image and diffs them.
//! This should never panic, whatever the dimensions.
//!
//! Run with: cargo +nightly fuzz run fuzz_decode

use libfuzzer_sys::fuzz_target;
use ppmsteg_core::{ppm, stego, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits { max_pixels: 1 << 16 };
    let (left, right) = data.split_at(data.len() / 2);
    if let (Ok(original), Ok(modified)) = (
        ppm::parse_with_limits(left, &limits),
        ppm::parse_with_limits(right, &limits),
    ) {
        let _ = stego::decode(&original, &modified);
    }
});
