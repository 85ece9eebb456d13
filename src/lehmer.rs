//! Conversion between permutations and Lehmer codes in `O(n log n)`.
//!
//! The Lehmer code (inversion table) of a permutation `perm` of `0..n` is the sequence `code` where
//! `code[i]` counts the values smaller than `perm[i]` that do not occur in `perm[..i]`, so
//! `code[i] < n - i` and the last digit is always zero. Both directions make a single pass over the
//! input and drive one [`RankIndex`] through `n` select operations, keeping track of the values that
//! were already used.
//!
//! ```
//! use lehmer::lehmer::{decode, encode};
//!
//! let perm: Vec<u32> = vec![2, 0, 3, 1];
//! let code = encode(&perm).unwrap();
//! assert_eq!(code, [2, 0, 1, 0]);
//! assert_eq!(decode(&code).unwrap(), perm);
//! ```

use log::debug;

use crate::{point::check_degree, point::Point, rank_index::RankIndex, Error, Result};

/// Returns the Lehmer code of a permutation of `0..perm.len()`.
///
/// Fails with [`Error::NotAPermutation`] at the first value that is out of range or repeated, and
/// with [`Error::DegreeTooLarge`] when `Pt` cannot describe permutations of this length. Panics
/// when the length exceeds [`crate::rank_index::MAX_LEN`].
pub fn encode<Pt: Point>(perm: &[Pt]) -> Result<Vec<Pt>> {
    let len = perm.len();
    check_degree::<Pt>(len)?;
    debug!("encoding a permutation of length {len}");

    let mut unused = RankIndex::new(len);
    perm.iter()
        .enumerate()
        .map(|(position, &value)| {
            let value = value.index();
            if value >= len || unused.is_claimed(value) {
                return Err(Error::NotAPermutation { position, value });
            }
            // `value` itself is still available, so this is its rank among the unused values
            let digit = unused.available_strictly_left(value);
            let claimed = unused.claim_by_rank(digit)?;
            debug_assert_eq!(claimed, value);
            Ok(Pt::from_index(digit))
        })
        .collect()
}

/// Returns the permutation with the given Lehmer code.
///
/// Fails with [`Error::InvalidLehmerDigit`] at the first position `i` with `code[i] >= n - i`, and
/// with [`Error::DegreeTooLarge`] when `Pt` cannot describe permutations of this length. Panics
/// when the length exceeds [`crate::rank_index::MAX_LEN`].
pub fn decode<Pt: Point>(code: &[Pt]) -> Result<Vec<Pt>> {
    let len = code.len();
    check_degree::<Pt>(len)?;
    debug!("decoding a Lehmer code of length {len}");

    let mut unused = RankIndex::new(len);
    code.iter()
        .enumerate()
        .map(|(position, &digit)| {
            let digit = digit.index();
            unused
                .claim_by_rank(digit)
                .map(Pt::from_index)
                .map_err(|_| Error::InvalidLehmerDigit {
                    position,
                    digit,
                    bound: len - position,
                })
        })
        .collect()
}

/// Returns the number of inversions of the permutation with the given Lehmer code.
///
/// An inversion is a pair of positions `i < j` with `perm[i] > perm[j]`; the digit `code[i]` counts
/// exactly the inversions starting at `i`.
pub fn inversions<Pt: Point>(code: &[Pt]) -> u64 {
    code.iter().map(|digit| digit.index() as u64).sum()
}

/// Returns `true` when the permutation with the given Lehmer code is even.
pub fn is_even<Pt: Point>(code: &[Pt]) -> bool {
    code.iter().fold(true, |even, digit| even ^ (digit.index() & 1 == 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::identity;

    #[test]
    fn worked_example() {
        assert_eq!(encode::<u8>(&[2, 0, 3, 1]), Ok(vec![2, 0, 1, 0]));
        assert_eq!(decode::<u8>(&[2, 0, 1, 0]), Ok(vec![2, 0, 3, 1]));
        assert_eq!(
            encode::<u16>(&[3, 5, 1, 0, 4, 2]),
            Ok(vec![3, 4, 1, 0, 1, 0])
        );
    }

    #[test]
    fn identity_and_reversal() {
        for len in 0..50 {
            let id = identity::<u32>(len);
            assert_eq!(encode(&id), Ok(vec![0; len]));
            assert_eq!(decode(&vec![0u32; len]), Ok(id.clone()));

            let rev: Vec<u32> = id.iter().rev().copied().collect();
            assert_eq!(encode(&rev), Ok(rev.clone()));
            assert_eq!(decode(&rev), Ok(rev));
        }
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(encode::<u8>(&[]), Ok(vec![]));
        assert_eq!(decode::<u8>(&[]), Ok(vec![]));
        assert_eq!(encode::<u8>(&[0]), Ok(vec![0]));
        assert_eq!(decode::<u8>(&[0]), Ok(vec![0]));
    }

    #[test]
    fn all_permutations_of_five() {
        let mut perms = vec![];
        let mut code = [0u8; 5];
        // enumerate every Lehmer code in lexicographic order
        loop {
            let perm = decode(&code).unwrap();
            assert_eq!(encode(&perm).unwrap(), code);
            perms.push(perm);

            let Some(i) = (0..5).rev().find(|&i| (code[i] as usize) + 1 < 5 - i) else {
                break;
            };
            code[i] += 1;
            code[i + 1..].fill(0);
        }
        assert_eq!(perms.len(), 120);
        // lexicographic order of codes is lexicographic order of permutations
        assert!(perms.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rejects_non_permutations() {
        assert_eq!(
            encode::<u8>(&[0, 4, 1]),
            Err(Error::NotAPermutation {
                position: 1,
                value: 4
            })
        );
        assert_eq!(
            encode::<u8>(&[2, 0, 2]),
            Err(Error::NotAPermutation {
                position: 2,
                value: 2
            })
        );
    }

    #[test]
    fn rejects_invalid_digits() {
        assert_eq!(
            decode::<u8>(&[1, 2, 0]),
            Err(Error::InvalidLehmerDigit {
                position: 1,
                digit: 2,
                bound: 2
            })
        );
        assert_eq!(
            decode::<u8>(&[0, 0, 1]),
            Err(Error::InvalidLehmerDigit {
                position: 2,
                digit: 1,
                bound: 1
            })
        );
    }

    #[test]
    fn too_long_for_point_type() {
        let code = vec![0u8; 300];
        assert_eq!(
            decode(&code),
            Err(Error::DegreeTooLarge { len: 300, max: 256 })
        );
    }

    #[test]
    fn parity() {
        // a single transposition is odd
        let code = encode::<u8>(&[1, 0, 2]).unwrap();
        assert_eq!(inversions(&code), 1);
        assert!(!is_even(&code));
        // a 3-cycle is even
        let code = encode::<u8>(&[1, 2, 0]).unwrap();
        assert_eq!(inversions(&code), 2);
        assert!(is_even(&code));
        assert!(is_even::<u8>(&[]));
        // the reversal of 0..n has n(n-1)/2 inversions
        let rev: Vec<u32> = (0..100).rev().collect();
        assert_eq!(inversions(&encode(&rev).unwrap()), 4950);
    }
}
