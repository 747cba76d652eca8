//! Example demonstrating the core's tracing instrumentation.
//!
//! Run with: cargo run -p ppmsteg-core --example encode_tracing

use ppmsteg_core::{ppm, stego, SeedSource};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Initialize tracing subscriber with trace level for the core
    fmt()
        .with_env_filter(EnvFilter::new("ppmsteg_core=trace,info"))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    println!("=== ppmsteg Tracing Demo ===\n");

    let mut text = String::from("P3\n8 8\n255\n");
    for i in 0..64u16 {
        let v = 128 + i;
        text.push_str(&format!("{v} {v} {v}\n"));
    }

    let carrier = match ppm::parse(text.as_bytes()) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Failed to parse carrier: {}", e);
            return;
        }
    };

    println!("Carrier: {:?}\n", carrier.header());

    let mut rng = SeedSource::Fixed(42).rng();
    match stego::encode_with_rng(b"traced", &carrier, &mut rng)
        .map_err(ppmsteg_core::StegError::from)
        .and_then(|encoded| Ok(stego::decode(&carrier, &encoded)?))
    {
        Ok(message) => {
            println!("\nRecovered: {}", String::from_utf8_lossy(&message));
        }
        Err(e) => {
            println!("\nFailed: {}", e);
        }
    }
}
