//! Randomness behind the estimate's jitter and confidence terms.
//!
//! The estimators never touch an RNG directly; they draw unit-interval
//! samples from a [`JitterSource`], so tests can pin the noise and get
//! byte-exact results.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Source of uniform samples in `[0, 1)`.
pub trait JitterSource {
    fn sample(&mut self) -> f64;
}

/// OS-seeded randomness for production use.
pub struct OsJitter {
    rng: SmallRng,
}

impl OsJitter {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for OsJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl JitterSource for OsJitter {
    fn sample(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Returns the same sample every time. With the midpoint sample (0.5) the
/// jitter multiplier `0.95 + 0.10 × 0.5` is exactly 1.0, which makes the
/// whole pipeline deterministic for reference tests.
pub struct FixedJitter(f64);

impl FixedJitter {
    /// Samples are clamped into `[0, 1)` so a fixed source can never leave
    /// the range a real one is bound to.
    pub fn new(sample: f64) -> Self {
        Self(sample.clamp(0.0, 0.999_999_999))
    }

    /// The sample that yields a jitter multiplier of exactly 1.0.
    pub fn midpoint() -> Self {
        Self(0.5)
    }
}

impl JitterSource for FixedJitter {
    fn sample(&mut self) -> f64 {
        self.0
    }
}
