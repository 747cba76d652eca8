//! Exit codes following sysexits.h conventions.
//!
//! These codes provide semantic meaning for different failure modes,
//! enabling scripts to tell a bad image apart from a missing file.

use ppmsteg_core::{BufferError, DecodeError, EncodeError, ImageError, ParseError};

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (invalid arguments).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Data format error (malformed image, message does not fit, size mismatch).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// I/O error (cannot write output).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// Represents an exit code with optional error context.
#[derive(Debug)]
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Typed core failures first, then I/O by the context we attached
        let is_core_error = err.chain().any(|cause| {
            cause.is::<ParseError>()
                || cause.is::<EncodeError>()
                || cause.is::<DecodeError>()
                || cause.is::<ImageError>()
                || cause.is::<BufferError>()
        });

        let code = if is_core_error {
            DATA_ERROR
        } else if message.starts_with("Failed to read") {
            INPUT_ERROR
        } else if message.starts_with("Failed to write") {
            IO_ERROR
        } else {
            GENERAL_ERROR
        };

        Self {
            code,
            message: Some(message),
        }
    }
}
