//! CLI configuration module
//!
//! Loads settings from environment variables with sensible defaults.
//! Command-line flags take precedence over anything read here.

use ppmsteg_core::{Limits, DEFAULT_MAX_PIXELS};

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Largest image accepted, in pixels (default: 100 000 000)
    pub max_pixels: u64,
    /// Fixed encoder seed used when `--seed` is absent (default: clock-derived)
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_pixels = lookup("PPMSTEG_MAX_PIXELS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|v: &u64| *v > 0)
            .unwrap_or(DEFAULT_MAX_PIXELS);

        let seed = lookup("PPMSTEG_SEED").and_then(|v| v.trim().parse().ok());

        Self { max_pixels, seed }
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_pixels: self.max_pixels,
        }
    }
}
