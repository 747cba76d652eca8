//! Common utility functions shared across CLI commands.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ppmsteg_core::{ppm, Image, Limits};
use tracing::{debug, info};

/// Read and parse a PPM file.
pub fn read_image(path: &Path, limits: &Limits) -> Result<Image> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file: {}", path.display()))?;

    info!(path = %path.display(), bytes = bytes.len(), "Read image");

    let image = ppm::parse_with_limits(&bytes, limits)
        .with_context(|| format!("Failed to parse image: {}", path.display()))?;

    debug!(header = ?image.header(), "Parsed image");
    Ok(image)
}

/// Write an image as P3 text to `output`, or to stdout when `None`.
pub fn write_image(image: &Image, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            write_buffered(image, file)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!(path = %path.display(), "Image written");
        }
        None => {
            write_buffered(image, io::stdout().lock())
                .context("Failed to write image to stdout")?;
        }
    }
    Ok(())
}

fn write_buffered(image: &Image, sink: impl Write) -> io::Result<()> {
    let mut writer = BufWriter::new(sink);
    ppm::write_to(image, &mut writer)?;
    writer.flush()
}

/// Write `bytes` to stdout and flush.
pub fn write_stdout(bytes: &[u8]) -> Result<()> {
    write_all_flushed(io::stdout().lock(), bytes)
}

fn write_all_flushed(mut sink: impl Write, bytes: &[u8]) -> Result<()> {
    sink.write_all(bytes)
        .and_then(|()| sink.flush())
        .context("Failed to write to stdout")
}

/// Strip a single trailing `\n` or `\r\n`.
pub fn strip_line_terminator(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(rest) => rest.strip_suffix(b"\r").unwrap_or(rest),
        None => line,
    }
}

/// Read one line of message bytes. Any byte except `\n` is kept.
pub fn read_message_line(mut reader: impl BufRead) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .context("Failed to read message from stdin")?;
    let len = strip_line_terminator(&line).len();
    line.truncate(len);
    Ok(line)
}

/// Prompt on stderr (so stdout stays a clean image) and read the message from stdin.
pub fn prompt_message(quiet: bool) -> Result<Vec<u8>> {
    if !quiet {
        eprint!("Enter message to be encoded: ");
        io::stderr().flush().ok();
    }
    read_message_line(io::stdin().lock())
}
