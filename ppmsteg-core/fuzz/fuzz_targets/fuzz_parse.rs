#![no_main]

//! Fuzz target for ppm::parse()
//!
//! This target exercises the header and payload readers to find:
//! - Panics from malformed input
//! - Oversized allocations from lying headers
//! - Images that do not survive a serialize/parse round trip
//!
//! Run with: cargo +nightly fuzz run fuzz_parse

use libfuzzer_sys::fuzz_target;
use ppmsteg_core::{ppm, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits { max_pixels: 1 << 20 };
    if let Ok(image) = ppm::parse_with_limits(data, &limits) {
        let text = ppm::serialize(&image);
        let reparsed = ppm::parse_with_limits(&text, &limits).expect("serialized image must parse");
        assert_eq!(reparsed.pixels(), image.pixels());
    }
});
