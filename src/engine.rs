// Per-particle random engine for momentum sampling.
//
// Injection kernels draw momenta for millions of particles concurrently, so
// every particle needs its own engine state: a `PrnStream` is 8 bytes, Copy,
// and derived from (master seed, particle id) so that streams are mutually
// decorrelated without any synchronization between execution contexts.

use rand::{Rng, RngCore, SeedableRng};
use rand_distr::StandardNormal;

/// LCG multiplier (PCG default)
const PRN_MULT: u64 = 6364136223846793005;
/// LCG additive constant (PCG default)
const PRN_ADD: u64 = 1442695040888963407;

/// PCG (RXS-M-XS) random stream with 8 bytes of state.
///
/// Reference: Melissa E. O'Neill, "PCG: A Family of Simple Fast Space-Efficient
/// Statistically Good Algorithms for Random Number Generation"
#[derive(Clone, Copy, Debug)]
pub struct PrnStream {
    state: u64,
}

impl PrnStream {
    /// Create a stream directly from a raw state word.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Derive the stream for one particle from the run's master seed.
    ///
    /// The (seed, id) pair is mixed through a splitmix64 finalizer so that
    /// consecutive particle ids do not produce correlated low bits.
    #[inline]
    pub fn for_particle(master_seed: u64, particle_id: u64) -> Self {
        let mut z = master_seed ^ particle_id.wrapping_mul(0x9e3779b97f4a7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        Self { state: z ^ (z >> 31) }
    }

    /// Uniform f64 in [0, 1).
    #[inline(always)]
    pub fn random(&mut self) -> f64 {
        // ldexp(permuted word, -64)
        (self.next_u64() as f64) * 5.421010862427522e-20
    }
}

impl RngCore for PrnStream {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.state = PRN_MULT.wrapping_mul(self.state).wrapping_add(PRN_ADD);
        let word = ((self.state >> ((self.state >> 59) + 5)) ^ self.state)
            .wrapping_mul(12605985483714917081);
        (word >> 43) ^ word
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut left = dest;
        while left.len() >= 8 {
            let bytes = self.next_u64().to_le_bytes();
            left[..8].copy_from_slice(&bytes);
            left = &mut left[8..];
        }
        if !left.is_empty() {
            let bytes = self.next_u64().to_le_bytes();
            left.copy_from_slice(&bytes[..left.len()]);
        }
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for PrnStream {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self {
            state: u64::from_le_bytes(seed),
        }
    }
}

/// Normal variate with the given mean and standard deviation.
///
/// Scales a standard normal draw instead of constructing a
/// `rand_distr::Normal`, so there is no error path for `std_dev == 0`.
#[inline]
pub fn random_normal<R: Rng + ?Sized>(mean: f64, std_dev: f64, rng: &mut R) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}
