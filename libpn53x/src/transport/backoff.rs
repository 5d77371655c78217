// libpn53x-rs/libpn53x/src/transport/backoff.rs

//! Retry pacing for the power-down recovery path.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shortest wake-up pause in microseconds
pub const WAKE_DELAY_MIN_US: u64 = 6_000;

/// One past the longest wake-up pause in microseconds
pub const WAKE_DELAY_MAX_US: u64 = 10_000;

/// Uniform jitter source for the pause between a power-down write failure
/// and its single retry. Jitter keeps the retry from locking step with the
/// chip's wake timing; seeding makes the sequence reproducible in tests.
#[derive(Debug)]
pub struct RetryDelay {
    rng: StdRng,
}

impl RetryDelay {
    /// Jitter source seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Jitter source with a fixed seed, for deterministic tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample the next pause, uniform in [6 000, 10 000) µs.
    pub fn wake_interval(&mut self) -> Duration {
        Duration::from_micros(self.rng.gen_range(WAKE_DELAY_MIN_US..WAKE_DELAY_MAX_US))
    }
}

impl Default for RetryDelay {
    fn default() -> Self {
        Self::new()
    }
}
