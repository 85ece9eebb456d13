//! Cycle decomposition of permutations.
//!
//! This is the `O(n)` alternative to [`crate::lehmer::is_even`] for computing the parity of a
//! permutation, and gives a compact, readable notation for small permutations.
use std::{
    borrow::Borrow,
    fmt::{self, Write},
};

use smallvec::{smallvec, SmallVec};

use crate::{point::check_degree, point::Point, Error, Result};

/// A list of disjoint cycles, each of length at least two.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Cycles<Pt: Point> {
    points: Vec<Pt>,
    ends: Vec<usize>,
}

impl<Pt: Point> Cycles<Pt> {
    /// Decomposes a permutation of `0..perm.len()` into its cycles, omitting fixed points.
    ///
    /// Cycles are listed by their smallest point, each starting at that point.
    ///
    /// Fails with [`Error::NotAPermutation`] when `perm` is not a permutation.
    pub fn of(perm: &[Pt]) -> Result<Self> {
        let len = perm.len();
        check_degree::<Pt>(len)?;

        let mut seen: SmallVec<[bool; 256]> = smallvec![false; len]; // TUNE
        let mut cycle: SmallVec<[Pt; 16]> = SmallVec::new();
        let mut cycles = Self::default();
        for start in 0..len {
            if seen[start] {
                continue;
            }
            cycle.clear();
            let mut current = start;
            loop {
                seen[current] = true;
                cycle.push(Pt::from_index(current));
                let next = perm[current].index();
                if next == start {
                    break;
                }
                if next >= len || seen[next] {
                    return Err(Error::NotAPermutation {
                        position: current,
                        value: next,
                    });
                }
                current = next;
            }
            cycles.push(&cycle);
        }
        Ok(cycles)
    }

    /// Appends a cycle, ignoring cycles of length zero or one.
    ///
    /// The points are not checked to be disjoint from previously pushed cycles.
    #[inline]
    pub fn push(&mut self, cycle: impl IntoIterator<Item = impl Borrow<Pt>>) {
        let last_end = self.points.len();
        self.points.extend(cycle.into_iter().map(|x| *x.borrow()));
        let new_end = self.points.len();
        if last_end + 1 >= new_end {
            self.points.truncate(last_end);
        } else {
            self.ends.push(self.points.len());
        }
    }

    /// Permutes `items` in place along the cycles.
    ///
    /// Within every cycle `c`, `items[c[i]]` receives the previous value of `items[c[i + 1]]` and the
    /// last point receives the value of the first. Items at positions outside all cycles are kept,
    /// so applying `Cycles::of(perm)` to the identity gives back `perm`.
    ///
    /// Panics when a point is out of bounds for `items`.
    pub fn apply<T>(&self, items: &mut [T]) {
        for cycle in self {
            for pair in cycle.windows(2) {
                items.swap(pair[0].index(), pair[1].index());
            }
        }
    }

    /// Returns `true` when the product of the cycles is an even permutation.
    ///
    /// A cycle of length `k` is a product of `k - 1` transpositions.
    pub fn is_even(&self) -> bool {
        // every cycle ends where the next one starts, so summing `len - 1` over all cycles gives
        // the number of points minus the number of cycles
        (self.points.len() - self.ends.len()) % 2 == 0
    }

    /// Iterates over the cycles.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Pt> {
        Iter {
            points: &self.points,
            offset: 0,
            ends: &self.ends,
        }
    }

    /// Number of cycles.
    #[inline]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Returns `true` for the identity permutation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}

impl<'a, Pt: Point> IntoIterator for &'a Cycles<Pt> {
    type Item = &'a [Pt];

    type IntoIter = Iter<'a, Pt>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cycles of a [`Cycles`] list.
pub struct Iter<'a, Pt: Point> {
    points: &'a [Pt],
    ends: &'a [usize],
    offset: usize,
}

impl<'a, Pt: Point> Iterator for Iter<'a, Pt> {
    type Item = &'a [Pt];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (&next_end, ends) = self.ends.split_first()?;
        let len = next_end - self.offset;
        self.ends = ends;
        self.offset = next_end;

        let (next_cycle, points) = self.points.split_at(len);
        self.points = points;

        Some(next_cycle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ends.len(), Some(self.ends.len()))
    }
}

impl<Pt: Point> ExactSizeIterator for Iter<'_, Pt> {}

impl<Pt: Point> fmt::Debug for Cycles<Pt> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<Pt: Point> fmt::Display for Cycles<Pt> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("()");
        }
        for cycle in self {
            let mut sep = '(';
            for pt in cycle {
                f.write_char(sep)?;
                sep = ' ';
                fmt::Display::fmt(pt, f)?;
            }
            f.write_char(')')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lehmer;

    #[test]
    fn push_iter_display() {
        let mut c = Cycles::<u32>::default();

        c.push([0, 1, 2]);
        c.push(&[10, 11, 12]);
        c.push([6]);
        c.push(&[]);
        c.push([13, 15]);

        let mut it = c.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some([0, 1, 2].as_slice()));
        assert_eq!(it.next(), Some([10, 11, 12].as_slice()));
        assert_eq!(it.next(), Some([13, 15].as_slice()));
        assert_eq!(it.next(), None);

        assert_eq!(c.to_string(), "(0 1 2)(10 11 12)(13 15)");
    }

    #[test]
    fn decompose() {
        let cycles = Cycles::<u8>::of(&[1, 2, 0, 3, 5, 4]).unwrap();
        assert_eq!(cycles.to_string(), "(0 1 2)(4 5)");
        assert_eq!(cycles.len(), 2);
        assert!(!cycles.is_even());

        let identity = Cycles::<u8>::of(&[0, 1, 2]).unwrap();
        assert!(identity.is_empty());
        assert!(identity.is_even());
        assert_eq!(identity.to_string(), "()");
    }

    #[test]
    fn apply_rotates_within_cycles() {
        let mut items = ['a', 'b', 'c', 'd', 'e', 'f'];
        Cycles::<u8>::of(&[1, 2, 0, 3, 5, 4]).unwrap().apply(&mut items);
        assert_eq!(items, ['b', 'c', 'a', 'd', 'f', 'e']);

        let mut c = Cycles::<u32>::default();
        c.push([4, 0]);
        let mut items = [10, 11, 12, 13, 14];
        c.apply(&mut items);
        assert_eq!(items, [14, 11, 12, 13, 10]);
    }

    #[test]
    fn apply_to_identity_rebuilds_permutation() {
        let mut code = [0u8; 5];
        loop {
            let perm = lehmer::decode(&code).unwrap();
            let mut rebuilt = crate::point::identity::<u8>(5);
            Cycles::of(&perm).unwrap().apply(&mut rebuilt);
            assert_eq!(rebuilt, perm);

            let Some(i) = (0..5).rev().find(|&i| (code[i] as usize) + 1 < 5 - i) else {
                break;
            };
            code[i] += 1;
            code[i + 1..].fill(0);
        }
    }

    #[test]
    fn rejects_non_permutations() {
        assert_eq!(
            Cycles::<u8>::of(&[1, 3, 0]),
            Err(Error::NotAPermutation {
                position: 1,
                value: 3
            })
        );
        assert!(Cycles::<u8>::of(&[1, 0, 0]).is_err());
        assert!(Cycles::<u8>::of(&[1, 1]).is_err());
    }

    #[test]
    fn parity_agrees_with_lehmer_code() {
        let mut code = [0u8; 6];
        loop {
            let perm = lehmer::decode(&code).unwrap();
            assert_eq!(
                Cycles::of(&perm).unwrap().is_even(),
                lehmer::is_even(&code),
                "{perm:?}"
            );
            let Some(i) = (0..6).rev().find(|&i| (code[i] as usize) + 1 < 6 - i) else {
                break;
            };
            code[i] += 1;
            code[i + 1..].fill(0);
        }
    }
}
