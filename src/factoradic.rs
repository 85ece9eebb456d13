//! Ranking permutations by a single integer via the factorial number system.
//!
//! A Lehmer code `code` of length `n` is a mixed-radix number whose digit `code[i]` has weight
//! `(n - 1 - i)!`. Its value is the lexicographic rank of the encoded permutation among all
//! permutations of `0..n`, which quickly exceeds any machine word, hence [`BigUint`].

use log::trace;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::{point::check_degree, point::Point, Error, Result};

/// Returns the factoradic value `sum(code[i] * (n - 1 - i)!)` of a Lehmer code.
///
/// Digits are not checked against their radix, so an invalid code yields the value of the
/// corresponding (non-canonical) mixed-radix digit string.
///
/// ```
/// use lehmer::factoradic::to_factoradic;
/// use num_bigint::BigUint;
///
/// // 2 * 3! + 0 * 2! + 1 * 1! + 0 * 0!
/// assert_eq!(to_factoradic::<u8>(&[2, 0, 1, 0]), BigUint::from(13u32));
/// ```
pub fn to_factoradic<Pt: Point>(code: &[Pt]) -> BigUint {
    let len = code.len();
    trace!("converting a Lehmer code of length {len} to a factoradic number");
    code.iter()
        .enumerate()
        .fold(BigUint::zero(), |value, (i, digit)| {
            value * (len - i) as u64 + digit.index() as u64
        })
}

/// Returns the Lehmer code of length `len` with the given factoradic value.
///
/// Fails with [`Error::FactoradicOverflow`] when `value >= len!`.
pub fn from_factoradic<Pt: Point>(value: &BigUint, len: usize) -> Result<Vec<Pt>> {
    check_degree::<Pt>(len)?;
    trace!("converting a factoradic number to a Lehmer code of length {len}");

    let mut value = value.clone();
    let mut code = vec![Pt::default(); len];
    for (radix, digit) in (1..).zip(code.iter_mut().rev()) {
        *digit = Pt::from_index(take_digit(&mut value, radix));
    }
    if value.is_zero() {
        Ok(code)
    } else {
        Err(Error::FactoradicOverflow { len })
    }
}

/// Returns the shortest Lehmer code with the given factoradic value.
///
/// Leading zero digits do not change the value, so every permutation of `0..n` with the same rank
/// among all permutations of a shorter prefix maps to the same number. The result always has at
/// least one digit, the trailing zero of every Lehmer code.
pub fn from_factoradic_min<Pt: Point>(value: &BigUint) -> Result<Vec<Pt>> {
    let mut value = value.clone();
    let mut code = vec![];
    for radix in 1.. {
        code.push(take_digit(&mut value, radix));
        if value.is_zero() {
            break;
        }
    }
    check_degree::<Pt>(code.len())?;
    trace!("converted a factoradic number to a Lehmer code of length {}", code.len());
    Ok(code.into_iter().rev().map(Pt::from_index).collect())
}

/// Replaces `perm` by its lexicographic successor, so that its factoradic rank grows by one.
///
/// Returns `false` when `perm` was the last permutation, the decreasing one, in which case it wraps
/// around to the first, the identity.
///
/// ```
/// use lehmer::factoradic::next_permutation;
///
/// let mut perm: Vec<u8> = vec![0, 2, 1];
/// assert!(next_permutation(&mut perm));
/// assert_eq!(perm, [1, 0, 2]);
///
/// let mut perm: Vec<u8> = vec![2, 1, 0];
/// assert!(!next_permutation(&mut perm));
/// assert_eq!(perm, [0, 1, 2]);
/// ```
pub fn next_permutation<Pt: Point>(perm: &mut [Pt]) -> bool {
    // the longest decreasing suffix is already the last arrangement of its values
    let Some(pivot) = perm.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        perm.reverse();
        return false;
    };
    let value = perm[pivot];
    let swap_with = match perm[pivot + 1..].iter().rposition(|&x| x > value) {
        Some(offset) => pivot + 1 + offset,
        None => unreachable!("the pivot is smaller than its successor"),
    };
    perm.swap(pivot, swap_with);
    perm[pivot + 1..].reverse();
    true
}

/// Splits off the least significant digit of radix `radix`.
fn take_digit(value: &mut BigUint, radix: u64) -> usize {
    let digit = (&*value % radix).to_usize().unwrap_or_default();
    *value /= radix;
    digit
}
