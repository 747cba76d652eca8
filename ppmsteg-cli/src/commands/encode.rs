//! Encode command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use ppmsteg_core::{stego, SeedSource};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::utils::{prompt_message, read_image, write_image, write_stdout};

/// Execute the encode command.
pub fn execute(
    image: PathBuf,
    message: Option<String>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    let carrier = read_image(&image, &config.limits())?;

    let message = match message {
        Some(message) => message.into_bytes(),
        None => prompt_message(quiet)?,
    };

    let capacity = stego::capacity(&carrier);
    if message.len() * 2 > capacity {
        warn!(
            bytes = message.len(),
            capacity, "Message uses more than half the carrier; encoding may run out of room"
        );
    }

    // Resolve once so the seed in the log reproduces this run
    let source = seed.or(config.seed).map_or(SeedSource::Time, SeedSource::Fixed);
    let seed = source.seed();
    debug!(%source, seed, "Seeding pixel selection");

    let mut rng = SeedSource::Fixed(seed).rng();
    let encoded = stego::encode_with_rng(&message, &carrier, &mut rng)
        .context("Failed to encode message")?;

    info!(bytes = message.len(), "Message encoded");

    write_image(&encoded, output.as_deref())?;

    if let Some(path) = output {
        if !quiet {
            let summary = format!(
                "\n{}\n\n   {} {}\n   {} {} bytes\n   {} {}\n",
                "Message hidden in image!".green().bold(),
                "Image saved:".dimmed(),
                path.display(),
                "Message:".dimmed(),
                message.len(),
                "Seed:".dimmed(),
                seed
            );
            write_stdout(summary.as_bytes())?;
        }
    }

    Ok(())
}
