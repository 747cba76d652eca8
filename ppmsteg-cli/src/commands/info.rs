//! Info command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use ppmsteg_core::{stego, ImageHeader};
use serde::Serialize;

use crate::config::Config;
use crate::utils::{read_image, write_stdout};
use crate::OutputFormat;

#[derive(Debug, Serialize)]
struct InfoReport {
    #[serde(flatten)]
    header: ImageHeader,
    /// Longest message the image can carry
    capacity: usize,
    /// Length that leaves room for probing around colliding pixels
    recommended: usize,
}

/// Execute the info command.
pub fn execute(image: PathBuf, format: OutputFormat, config: &Config) -> Result<()> {
    let parsed = read_image(&image, &config.limits())?;
    let capacity = stego::capacity(&parsed);
    let report = InfoReport {
        header: parsed.header(),
        capacity,
        recommended: capacity / 2,
    };

    let text = match format {
        OutputFormat::Text => format!(
            "   {} {}\n   {} {}x{}\n   {} {}\n   {} {} bytes ({} recommended)\n",
            "Format:".dimmed(),
            report.header.format,
            "Dimensions:".dimmed(),
            report.header.width,
            report.header.height,
            "Max value:".dimmed(),
            report.header.max,
            "Capacity:".dimmed(),
            report.capacity,
            report.recommended
        ),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize image info")?;
            format!("{json}\n")
        }
    };

    write_stdout(text.as_bytes())
}
