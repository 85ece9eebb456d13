//! Quadratic reference implementations of the Lehmer code conversions.
//!
//! These are the textbook `O(n^2)` algorithms. They are kept as an independent oracle for testing
//! and as a baseline for benchmarks, and report malformed input the same way as
//! [`crate::lehmer`].

use smallvec::{smallvec, SmallVec};

use crate::{point::check_degree, point::Point, Error, Result};

/// Returns the Lehmer code of a permutation by counting, for each position, the smaller values to
/// its right.
pub fn encode<Pt: Point>(perm: &[Pt]) -> Result<Vec<Pt>> {
    let len = perm.len();
    check_degree::<Pt>(len)?;

    let mut seen: SmallVec<[bool; 256]> = smallvec![false; len]; // TUNE
    for (position, value) in perm.iter().map(|pt| pt.index()).enumerate() {
        if value >= len || seen[value] {
            return Err(Error::NotAPermutation { position, value });
        }
        seen[value] = true;
    }

    Ok(perm
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let smaller = perm[i + 1..].iter().filter(|&&later| later < value).count();
            Pt::from_index(smaller)
        })
        .collect())
}

/// Returns the permutation with the given Lehmer code by scanning for the `k`-th unused value at
/// each position.
pub fn decode<Pt: Point>(code: &[Pt]) -> Result<Vec<Pt>> {
    let len = code.len();
    check_degree::<Pt>(len)?;

    let mut used: SmallVec<[bool; 256]> = smallvec![false; len]; // TUNE
    code.iter()
        .enumerate()
        .map(|(position, &digit)| {
            let digit = digit.index();
            let value = (0..len)
                .filter(|&value| !used[value])
                .nth(digit)
                .ok_or(Error::InvalidLehmerDigit {
                    position,
                    digit,
                    bound: len - position,
                })?;
            used[value] = true;
            Ok(Pt::from_index(value))
        })
        .collect()
}
