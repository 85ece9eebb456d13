//! Sampling random permutations from explicitly passed generators.
use rand_core::{RngCore, SeedableRng};

use crate::point::{identity, Point};

/// A non-cryptographic pseudo-random number generator with a tiny state.
///
/// Currently implements the wyrand algorithm, but this may change in the future. Seeding it with
/// [`SeedableRng::seed_from_u64`] gives reproducible permutations for tests and benchmarks.
#[derive(Clone, Debug, Default)]
pub struct TinyRng {
    state: u64,
}

impl SeedableRng for TinyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut new = Self {
            state: u64::from_le_bytes(seed),
        };
        new.next_u64();
        new
    }
}

impl RngCore for TinyRng {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // Based on https://github.com/lemire/testingRNG/blob/master/source/wyrand.h
        let state = self.state;
        self.state = self.state.wrapping_add(0xa0761d6478bd642f);
        let xored = state ^ 0xe7037ed1a0b428db;
        let wide_prod = (state as u128) * (xored as u128);
        (wide_prod as u64) ^ ((wide_prod >> 64) as u64)
    }

    #[inline(always)]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }
}

/// `RngCore` extension trait to sample indices without modulo bias.
pub trait Sample: RngCore {
    /// Returns a random index sampled uniformly from `0..bound`.
    ///
    /// Returns `0` when the range is empty.
    #[inline]
    fn next_index(&mut self, bound: usize) -> usize {
        // Based on
        // https://lemire.me/blog/2019/06/06/nearly-divisionless-random-integer-generation-on-various-systems/
        let s = bound as u64;
        let mut m = (self.next_u64() as u128) * (s as u128);
        if (m as u64) < s {
            let t = s.wrapping_neg() % s;
            while (m as u64) < t {
                m = (self.next_u64() as u128) * (s as u128);
            }
        }
        (m >> 64) as usize
    }
}

impl<T: RngCore + ?Sized> Sample for T {}

/// Shuffles `items` in place using the Fisher-Yates algorithm.
pub fn shuffle<T, R: RngCore + ?Sized>(items: &mut [T], rng: &mut R) {
    for last in (1..items.len()).rev() {
        items.swap(last, rng.next_index(last + 1));
    }
}

/// Returns a uniformly random permutation of `0..len`.
///
/// Panics when `len` exceeds `Pt::MAX_DEGREE`.
pub fn random_perm<Pt: Point, R: RngCore + ?Sized>(len: usize, rng: &mut R) -> Vec<Pt> {
    let mut perm = identity(len);
    shuffle(&mut perm, rng);
    perm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lehmer;

    #[test]
    fn random_perms_are_permutations() {
        let mut rng = TinyRng::default();
        for i in 1..=5 {
            let len = i * i * 5;
            for _ in 0..10 {
                let perm: Vec<u32> = random_perm(len, &mut rng);
                let mut sorted = perm.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, identity::<u32>(len));
            }
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let a: Vec<u16> = random_perm(1000, &mut TinyRng::seed_from_u64(123456));
        let b: Vec<u16> = random_perm(1000, &mut TinyRng::seed_from_u64(123456));
        let c: Vec<u16> = random_perm(1000, &mut TinyRng::seed_from_u64(654321));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn index_bounds() {
        let mut rng = TinyRng::seed_from_u64(7);
        assert_eq!(rng.next_index(0), 0);
        assert_eq!(rng.next_index(1), 0);
        for bound in [2, 3, 10, 1 << 20, usize::MAX] {
            for _ in 0..100 {
                assert!(rng.next_index(bound) < bound);
            }
        }
    }

    #[test]
    fn all_small_permutations_occur() {
        // every Lehmer code of length 4 is hit by some shuffle
        let mut rng = TinyRng::seed_from_u64(3);
        let mut hits = [0usize; 24];
        for _ in 0..2400 {
            let perm: Vec<u8> = random_perm(4, &mut rng);
            let code = lehmer::encode(&perm).unwrap();
            let rank = code[0] as usize * 6 + code[1] as usize * 2 + code[2] as usize;
            hits[rank] += 1;
        }
        assert!(hits.iter().all(|&count| count > 50), "{hits:?}");
    }
}
