//! Unsigned integer types used for permutation entries and Lehmer digits.
use std::{fmt, hash::Hash};

pub(crate) mod sealed {
    pub trait Sealed {}
}

#[cfg(not(any(target_pointer_width = "64", target_pointer_width = "32")))]
compile_error!(
    r#"The lehmer crate only supports target_pointer_width = "32" and target_pointer_width = "64""#
);

/// Unsigned primitive integer types used to store the entries of permutations and Lehmer codes.
///
/// A permutation of length `n` stores the values `0..n`, and a Lehmer code of length `n` stores
/// digits below `n`, so both fit any `Point` type with `n <= Point::MAX_DEGREE`. This trait is
/// sealed and only implemented for `u8`, `u16`, `u32` and (on 64-bit targets) `u64`.
pub trait Point:
    Copy
    + Default
    + Ord
    + Hash
    + fmt::Display
    + fmt::Debug
    + sealed::Sealed
    + 'static
{
    /// Maximal length of a sequence of points of this type.
    const MAX_DEGREE: usize;

    /// Returns the point as a `usize`.
    fn index(self) -> usize;

    /// Returns the point with a given index.
    ///
    /// Indices exceeding [`Self::MAX_DEGREE`] are truncated.
    fn from_index(index: usize) -> Self;
}

macro_rules! impl_pt {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Point for $t {
                const MAX_DEGREE: usize = {
                    if (<$t>::MAX as usize) < (isize::MAX as usize) / std::mem::size_of::<$t>() {
                        (<$t>::MAX as usize).wrapping_add(1)
                    } else {
                        ((isize::MAX as usize) / std::mem::size_of::<$t>())
                    }
                };

                #[inline(always)]
                fn index(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn from_index(index: usize) -> Self {
                    index as $t
                }
            }
        )*
    };
}

impl_pt!(u8, u16, u32);

#[cfg(target_pointer_width = "64")]
impl_pt!(u64);

/// Returns an error when `len` points cannot be stored using `Pt`.
#[inline]
pub(crate) fn check_degree<Pt: Point>(len: usize) -> crate::Result<()> {
    if len > Pt::MAX_DEGREE {
        Err(crate::Error::DegreeTooLarge {
            len,
            max: Pt::MAX_DEGREE,
        })
    } else {
        Ok(())
    }
}

/// Returns the identity permutation `[0, 1, ..., len - 1]`.
///
/// Panics when `len` exceeds `Pt::MAX_DEGREE`.
pub fn identity<Pt: Point>(len: usize) -> Vec<Pt> {
    assert!(len <= Pt::MAX_DEGREE);
    (0..len).map(Pt::from_index).collect()
}
