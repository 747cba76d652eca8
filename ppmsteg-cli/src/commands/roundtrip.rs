//! Round-trip test command implementation.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::utils::{read_image, write_image};

/// Execute the test command: parse an image and write it back as P3 text.
pub fn execute(image: PathBuf, config: &Config) -> Result<()> {
    let parsed = read_image(&image, &config.limits())?;

    info!(
        format = %parsed.format(),
        width = parsed.width(),
        height = parsed.height(),
        "Writing image back as P3"
    );

    write_image(&parsed, None)
}
