//! Shape of the implicit bisected range tree.
//!
//! The universe `0..len` is split recursively: a range `start..=end` with `start < end` is an inner
//! node whose midpoint is `mid = start + (end - start) / 2`, with the left child `start..=mid` and
//! the right child `mid + 1..=end`. Single element ranges are leaves. Every index is the midpoint of
//! at most one inner node, so per-node data can be stored in a plain array indexed by midpoint,
//! without padding the universe to a power of two.

/// Largest supported universe size, per-node counts are stored as `u32`.
pub const MAX_LEN: usize = u32::MAX as usize;

/// An inner node of the tree, as seen during a descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// First index covered by the node.
    pub start: usize,
    /// Last index of the left child, used to index per-node data.
    pub mid: usize,
    /// Last index covered by the node.
    pub end: usize,
    /// Number of indices covered by the left child.
    pub left_len: usize,
}

/// Child chosen at an inner node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    /// Continue in `start..=mid`.
    Left,
    /// Continue in `mid + 1..=end`.
    Right,
}

/// Immutable per-node metadata of a bisected range tree over `0..len`.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Size of the left child of the node with a given midpoint, zero for indices that are not the
    /// midpoint of any inner node.
    left_len: Box<[u32]>,
    height: usize,
}

#[inline(always)]
fn midpoint(start: usize, end: usize) -> usize {
    start + (end - start) / 2
}

impl Layout {
    /// Builds the layout for the universe `0..len` in `O(len)`.
    ///
    /// Panics when `len` exceeds [`MAX_LEN`].
    pub fn build(len: usize) -> Self {
        assert!(
            len <= MAX_LEN,
            "rank index length {len} exceeds the maximum of {MAX_LEN}"
        );
        let mut left_len = vec![0; len].into_boxed_slice();
        let height = match len {
            0 => 0,
            _ => Self::fill(&mut left_len, 0, len - 1),
        };
        Self { left_len, height }
    }

    /// Records the left child sizes below `start..=end` and returns the subtree height.
    fn fill(left_len: &mut [u32], start: usize, end: usize) -> usize {
        if start == end {
            return 0;
        }
        let mid = midpoint(start, end);
        left_len[mid] = (mid - start + 1) as u32;
        let left = Self::fill(left_len, start, mid);
        let right = Self::fill(left_len, mid + 1, end);
        1 + left.max(right)
    }

    /// Size of the universe.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.left_len.len()
    }

    /// Number of inner nodes on the longest root-to-leaf path.
    ///
    /// This is `ceil(log2(len))` for a non-empty universe.
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Left child sizes indexed by midpoint.
    ///
    /// These are the per-node counts of a tree where every slot is tracked.
    #[inline(always)]
    pub fn left_lens(&self) -> &[u32] {
        &self.left_len
    }

    /// Walks from the root to a leaf, letting `choose` pick the child at every inner node, and
    /// returns the index of the reached leaf.
    ///
    /// Must not be called on an empty layout.
    #[inline]
    pub fn descend(&self, mut choose: impl FnMut(Node) -> Branch) -> usize {
        debug_assert!(!self.left_len.is_empty());
        let mut start = 0;
        let mut end = self.len() - 1;
        while start != end {
            let mid = midpoint(start, end);
            let node = Node {
                start,
                mid,
                end,
                left_len: self.left_len[mid] as usize,
            };
            match choose(node) {
                Branch::Left => end = mid,
                Branch::Right => start = mid + 1,
            }
        }
        start
    }

    /// Iterates over all inner nodes in pre-order.
    #[cfg(test)]
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        let mut stack = match self.len() {
            0 => vec![],
            len => vec![(0, len - 1)],
        };
        std::iter::from_fn(move || loop {
            let (start, end) = stack.pop()?;
            if start == end {
                continue;
            }
            let mid = midpoint(start, end);
            stack.push((mid + 1, end));
            stack.push((start, mid));
            return Some(Node {
                start,
                mid,
                end,
                left_len: self.left_len[mid] as usize,
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ceil_log2(n: usize) -> usize {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }

    #[test]
    fn seven_slots() {
        let layout = Layout::build(7);
        // root 0..=6 splits at 3, then 0..=3 at 1 and 4..=6 at 5, then 0..=1 at 0, 2..=3 at 2, 4..=5
        // at 4
        assert_eq!(layout.left_lens(), &[1, 2, 1, 4, 1, 2, 0]);
        assert_eq!(layout.height(), 3);
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(Layout::build(0).height(), 0);
        let single = Layout::build(1);
        assert_eq!(single.height(), 0);
        assert_eq!(single.left_lens(), &[0]);
        assert_eq!(single.descend(|_| unreachable!()), 0);
    }

    #[test]
    fn height_is_ceil_log2() {
        for len in 1..=300 {
            assert_eq!(Layout::build(len).height(), ceil_log2(len), "len {len}");
        }
    }

    #[test]
    fn descend_reaches_every_leaf() {
        for len in 1..=64 {
            let layout = Layout::build(len);
            for target in 0..len {
                let mut steps = 0;
                let leaf = layout.descend(|node| {
                    steps += 1;
                    assert!(node.start <= node.mid && node.mid < node.end);
                    assert_eq!(node.left_len, node.mid - node.start + 1);
                    if target <= node.mid {
                        Branch::Left
                    } else {
                        Branch::Right
                    }
                });
                assert_eq!(leaf, target);
                assert!(steps <= layout.height());
            }
        }
    }

    #[test]
    fn nodes_match_descent() {
        for len in 1..=100 {
            let layout = Layout::build(len);
            let mut seen = vec![None; len];
            for target in 0..len {
                layout.descend(|node| {
                    seen[node.mid] = Some(node);
                    if target <= node.mid {
                        Branch::Left
                    } else {
                        Branch::Right
                    }
                });
            }
            let mut listed = vec![None; len];
            for node in layout.nodes() {
                assert!(listed[node.mid].replace(node).is_none());
            }
            assert_eq!(listed, seen, "len {len}");
        }
    }
}
