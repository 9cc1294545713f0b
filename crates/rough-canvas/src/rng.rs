//! Random number generation for stroke jitter.
//!
//! Sketchy rendering draws from a random source on every stroke. Contexts
//! default to a clock-seeded generator, so two runs look different; pass a
//! seeded [`Rng`] (or any other [`RandomSource`]) to get reproducible output.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Anything that can hand out uniform floats in `[0, 1)`.
///
/// ## Rust Lesson #24: Traits as Seams
///
/// The renderer only needs `next_f64`, so it asks for `impl RandomSource`
/// instead of a concrete generator. Tests plug in a seeded `Rng`; callers
/// with their own generator can wrap it in a two-line impl.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform sample in `[min, max)`. Also accepts `min > max`, which is
    /// how symmetric jitter ranges like `(-j, j)` with negative `j` arrive.
    #[inline]
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }
}

/// 64-bit linear congruential generator.
///
/// Statistically modest but tiny and fully deterministic per seed, which is
/// what stroke jitter needs.
///
/// # Example
/// ```
/// use rough_canvas::rng::{RandomSource, Rng};
///
/// let mut a = Rng::new(2024);
/// let mut b = Rng::new(2024);
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

/// Bumped on every entropy seed so contexts created in the same clock tick
/// still get different streams.
static ENTROPY_COUNTER: AtomicU64 = AtomicU64::new(0);

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1442695040888963407;

impl Rng {
    /// Generator whose stream depends only on `seed`.
    #[inline]
    pub fn new(seed: u64) -> Self {
        // Offset so seed 0 does not start from an all-zero state.
        Self { state: seed.wrapping_add(1) }
    }

    /// Generator seeded from the system clock and a process-wide counter.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        let count = ENTROPY_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::new(nanos ^ count.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Advance the state and return it.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
        self.state
    }
}

impl RandomSource for Rng {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        // Top 53 bits: the low bits of an LCG cycle with short periods.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rng: &mut impl RandomSource, n: usize) -> Vec<f64> {
        (0..n).map(|_| rng.next_f64()).collect()
    }

    #[test]
    fn same_seed_replays_the_stream() {
        assert_eq!(sample(&mut Rng::new(7), 32), sample(&mut Rng::new(7), 32));
    }

    #[test]
    fn neighbouring_seeds_diverge() {
        assert_ne!(sample(&mut Rng::new(7), 8), sample(&mut Rng::new(8), 8));
    }

    #[test]
    fn seed_zero_is_usable() {
        let values = sample(&mut Rng::new(0), 4);
        assert!(values.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn entropy_seeds_differ_between_calls() {
        let mut first = Rng::from_entropy();
        let mut second = Rng::from_entropy();
        assert_ne!(first.next_u64(), second.next_u64());
    }

    #[test]
    fn unit_samples_stay_in_half_open_interval() {
        let mut rng = Rng::new(99);
        assert!(sample(&mut rng, 2000).iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn jitter_ranges_work_in_both_orientations() {
        let mut rng = Rng::new(3);
        for _ in 0..500 {
            let forward = rng.next_range(-2.0, 2.0);
            assert!((-2.0..2.0).contains(&forward));
            let reversed = rng.next_range(2.0, -2.0);
            assert!(reversed > -2.0 && reversed <= 2.0);
        }
    }

    #[test]
    fn empty_range_is_constant() {
        let mut rng = Rng::new(7);
        assert_eq!(rng.next_range(3.0, 3.0), 3.0);
    }
}
