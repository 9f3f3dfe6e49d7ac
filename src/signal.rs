//! Deterministic input signal generation.
//!
//! The benchmark input must be bit-reproducible across runs and across
//! implementations, so the generator is the Park–Miller "minimal standard"
//! LCG (`x <- 48271 * x mod (2^31 - 1)`) and uniform doubles are drawn the way
//! `std::generate_canonical` does it: two draws combined into one 53-bit
//! value. Seed `1234` therefore yields the same six samples as a C++
//! `std::minstd_rand` feeding `std::uniform_real_distribution<double>(0, 1)`.

use rand_core::{impls, Error, RngCore, SeedableRng};

use crate::num::Complex64;

const MODULUS: u64 = 2_147_483_647;
const MULTIPLIER: u64 = 48_271;
/// Smallest value the generator emits.
pub const MIN: u32 = 1;
/// Largest value the generator emits.
pub const MAX: u32 = (MODULUS - 1) as u32;
/// Seed used by the benchmark unless overridden.
pub const DEFAULT_SEED: u64 = 1234;

/// Park–Miller minimal standard generator with multiplier 48271.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinStdRand {
    state: u32,
}

impl MinStdRand {
    /// Create a generator; a seed congruent to zero is replaced by `1`.
    pub fn new(seed: u64) -> Self {
        let state = (seed % MODULUS) as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Advance and return the next raw value in `[MIN, MAX]`.
    #[inline]
    pub fn step(&mut self) -> u32 {
        self.state = ((self.state as u64 * MULTIPLIER) % MODULUS) as u32;
        self.state
    }

    /// Uniform double in `[0, 1)` built from two consecutive draws.
    pub fn next_canonical(&mut self) -> f64 {
        let range = (MAX - MIN) as f64 + 1.0;
        let mut sum = 0.0;
        let mut tmp = 1.0;
        for _ in 0..2 {
            sum += (self.step() - MIN) as f64 * tmp;
            tmp *= range;
        }
        let ret = sum / tmp;
        if ret >= 1.0 {
            // largest double below one
            1.0 - f64::EPSILON / 2.0
        } else {
            ret
        }
    }
}

impl Default for MinStdRand {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for MinStdRand {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MinStdRand {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Generate `len` samples with real parts uniform on `[0, 1)` and zero
/// imaginary parts.
pub fn generate(len: usize, seed: u64) -> Vec<Complex64> {
    let mut rng = MinStdRand::seed_from_u64(seed);
    (0..len)
        .map(|_| Complex64::new(rng.next_canonical(), 0.0))
        .collect()
}

/// BLAKE3 digest of the little-endian sample bytes, hex encoded.
///
/// Two runs produced the same input exactly when their digests match.
pub fn digest(signal: &[Complex64]) -> String {
    let mut hasher = blake3::Hasher::new();
    for z in signal {
        hasher.update(&z.re.to_le_bytes());
        hasher.update(&z.im.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
