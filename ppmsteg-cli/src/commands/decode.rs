//! Decode command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use ppmsteg_core::stego;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::utils::{read_image, write_stdout};
use crate::OutputFormat;

/// JSON report for a decoded message.
#[derive(Debug, Serialize)]
struct DecodeReport<'a> {
    message: &'a str,
    bytes: usize,
    width: u32,
    height: u32,
}

/// Execute the decode command.
pub fn execute(
    original: PathBuf,
    modified: PathBuf,
    format: OutputFormat,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    let limits = config.limits();
    let original_image = read_image(&original, &limits)?;
    let modified_image = read_image(&modified, &limits)?;

    let message = stego::decode(&original_image, &modified_image)
        .context("Failed to decode message")?;

    if message.is_empty() {
        warn!("No differing pixels; the images are identical in the red channel");
    }
    info!(bytes = message.len(), "Message decoded");

    match format {
        OutputFormat::Text => {
            // Raw bytes; the message need not be UTF-8
            let mut out = Vec::with_capacity(message.len() + 32);
            if !quiet {
                out.extend_from_slice(format!("{} ", "The decoded message is:".bold()).as_bytes());
            }
            out.extend_from_slice(&message);
            out.push(b'\n');
            write_stdout(&out)?;
        }
        OutputFormat::Json => {
            let text = String::from_utf8_lossy(&message);
            let report = DecodeReport {
                message: &text,
                bytes: message.len(),
                width: original_image.width(),
                height: original_image.height(),
            };
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize decode report")?;
            write_stdout(format!("{json}\n").as_bytes())?;
        }
    }

    Ok(())
}
