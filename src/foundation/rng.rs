use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable random source threaded through particle generation and randomized effects.
///
/// Two sources built from the same seed produce identical streams, which keeps whole renders
/// bit-reproducible.
#[derive(Clone, Debug)]
pub struct FxRng {
    inner: ChaCha8Rng,
}

impl FxRng {
    /// Create a source from a 64-bit seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Derive an independent child source, advancing this one.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.inner.next_u64())
    }

    /// Uniform value in `[-half, half]`; exactly `0.0` when `half <= 0`.
    pub fn jitter(&mut self, half: f64) -> f64 {
        if half.is_nan() || half <= 0.0 {
            return 0.0;
        }
        self.inner.random_range(-half..=half)
    }

    /// Uniform value in `[lo, hi]`; `lo` when the range is empty.
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        if hi.is_nan() || lo.is_nan() || hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..=hi)
    }

    /// Uniform integer in `[lo, hi]`; `lo` when the range is empty.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..=hi)
    }

    /// `true` with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.inner.random_bool(p.clamp(0.0, 1.0))
    }
}

impl Default for FxRng {
    fn default() -> Self {
        Self::seeded(0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
