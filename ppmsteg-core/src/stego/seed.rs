//! Seeding for the pixel-selection generator.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Where the encoder's random seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// Derived from the system clock, different on every run.
    #[default]
    Time,
    /// Caller-provided, reproducible.
    Fixed(u64),
}

impl SeedSource {
    /// Resolve to a concrete seed. `Time` reads the clock on every call.
    pub fn seed(&self) -> u64 {
        match self {
            Self::Fixed(seed) => *seed,
            Self::Time => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default(),
        }
    }

    /// Build a generator from this source.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed())
    }
}

impl std::fmt::Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time => write!(f, "time"),
            Self::Fixed(seed) => write!(f, "fixed({seed})"),
        }
    }
}
