//! Dynamic rank/select over a fixed universe of toggles.
//!
//! A [`RankIndex`] tracks, for every index in `0..len`, whether the slot is
//! [available][`Slot::Available`] or [claimed][`Slot::Claimed`]. It answers how many slots of either
//! state lie left or right of an index (rank) and finds the `k`-th slot of a given state (select),
//! flipping it on the way, all in `O(log len)`.
//!
//! The index is an implicit balanced tree obtained by recursively bisecting `0..len`. Each
//! inner node stores the number of claimed slots in its left child. Queries and mutations are the
//! same root-to-leaf descent, they only differ in the choice made at each node and in whether the
//! visited counts are adjusted.

use log::debug;

use crate::{Error, Result};

mod layout;

pub use layout::MAX_LEN;
use layout::{Branch, Layout, Node};

/// State of a single slot of a [`RankIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Not yet taken.
    Available,
    /// Taken.
    Claimed,
}

impl Slot {
    #[inline(always)]
    fn flipped(self) -> Self {
        match self {
            Slot::Available => Slot::Claimed,
            Slot::Claimed => Slot::Available,
        }
    }
}

/// Number of slots in `state` within the left child of `node`, given the number of claimed ones.
#[inline(always)]
fn left_count(state: Slot, node: Node, claimed_left: u32) -> usize {
    match state {
        Slot::Claimed => claimed_left as usize,
        Slot::Available => node.left_len - claimed_left as usize,
    }
}

/// A set of toggles over `0..len` supporting rank and select in `O(log len)`.
///
/// # Examples
///
/// ```
/// use lehmer::rank_index::RankIndex;
///
/// let mut index = RankIndex::new(5);
/// assert_eq!(index.claim_by_rank(2), Ok(2));
/// assert_eq!(index.claim_by_rank(2), Ok(3));
/// assert_eq!(index.available_strictly_left(4), 2);
/// assert_eq!(index.claimed_from_including(3), 1);
/// assert_eq!(index.index_of_claimed_rank(0), Ok(2));
/// ```
#[derive(Clone, Debug)]
pub struct RankIndex {
    layout: Layout,
    /// Claimed slots within the left child of the node with a given midpoint.
    claimed_left: Box<[u32]>,
    slots: Box<[Slot]>,
    claimed_total: usize,
}

impl RankIndex {
    /// Creates an index over `0..len` with every slot available.
    ///
    /// Panics when `len` exceeds [`MAX_LEN`].
    pub fn new(len: usize) -> Self {
        let layout = Layout::build(len);
        debug!(
            "built rank index of length {len} and height {}",
            layout.height()
        );
        Self {
            claimed_left: vec![0; len].into_boxed_slice(),
            slots: vec![Slot::Available; len].into_boxed_slice(),
            claimed_total: 0,
            layout,
        }
    }

    /// Size of the universe.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` for an index over the empty universe.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total number of claimed slots.
    #[inline(always)]
    pub fn claimed_total(&self) -> usize {
        self.claimed_total
    }

    /// Total number of available slots.
    #[inline(always)]
    pub fn available_total(&self) -> usize {
        self.len() - self.claimed_total
    }

    /// State of the slot at `index`.
    ///
    /// Panics when `index >= self.len()`.
    #[inline]
    pub fn slot(&self, index: usize) -> Slot {
        self.check_index(index);
        self.slots[index]
    }

    /// Returns `true` when the slot at `index` is claimed.
    ///
    /// Panics when `index >= self.len()`.
    #[inline]
    pub fn is_claimed(&self, index: usize) -> bool {
        self.slot(index) == Slot::Claimed
    }

    /// Makes every slot available.
    pub fn mark_all_available(&mut self) {
        self.slots.fill(Slot::Available);
        self.claimed_left.fill(0);
        self.claimed_total = 0;
    }

    /// Claims every slot.
    pub fn mark_all_claimed(&mut self) {
        self.slots.fill(Slot::Claimed);
        self.claimed_left.copy_from_slice(self.layout.left_lens());
        self.claimed_total = self.len();
    }

    /// Number of claimed slots in `0..index`.
    ///
    /// All other rank queries are derived from this one.
    ///
    /// Panics when `index >= self.len()`.
    pub fn claimed_strictly_left(&self, index: usize) -> usize {
        self.check_index(index);
        let mut claimed = 0;
        self.layout.descend(|node| {
            debug_assert!(node.start <= index && index <= node.end);
            if index <= node.mid {
                Branch::Left
            } else {
                claimed += self.claimed_left[node.mid] as usize;
                Branch::Right
            }
        });
        claimed
    }

    /// Number of claimed slots in `0..=index`.
    ///
    /// Panics when `index >= self.len()`.
    pub fn claimed_up_to_including(&self, index: usize) -> usize {
        self.claimed_strictly_left(index) + self.is_claimed(index) as usize
    }

    /// Number of claimed slots in `index + 1..len`.
    ///
    /// Panics when `index >= self.len()`.
    pub fn claimed_strictly_right(&self, index: usize) -> usize {
        self.claimed_total - self.claimed_up_to_including(index)
    }

    /// Number of claimed slots in `index..len`.
    ///
    /// Panics when `index >= self.len()`.
    pub fn claimed_from_including(&self, index: usize) -> usize {
        self.claimed_total - self.claimed_strictly_left(index)
    }

    /// Number of available slots in `0..index`.
    ///
    /// For an available slot this is its 0-based rank among the available slots.
    ///
    /// Panics when `index >= self.len()`.
    pub fn available_strictly_left(&self, index: usize) -> usize {
        index - self.claimed_strictly_left(index)
    }

    /// Number of available slots in `0..=index`.
    ///
    /// Panics when `index >= self.len()`.
    pub fn available_up_to_including(&self, index: usize) -> usize {
        self.available_strictly_left(index) + !self.is_claimed(index) as usize
    }

    /// Number of available slots in `index + 1..len`.
    ///
    /// Panics when `index >= self.len()`.
    pub fn available_strictly_right(&self, index: usize) -> usize {
        self.available_total() - self.available_up_to_including(index)
    }

    /// Number of available slots in `index..len`.
    ///
    /// Panics when `index >= self.len()`.
    pub fn available_from_including(&self, index: usize) -> usize {
        self.available_total() - self.available_strictly_left(index)
    }

    /// Claims the `rank`-th (0-based, in index order) available slot and returns its index.
    ///
    /// Fails with [`Error::RankOutOfRange`] when `rank >= self.available_total()`.
    pub fn claim_by_rank(&mut self, rank: usize) -> Result<usize> {
        let count = self.available_total();
        if rank >= count {
            return Err(Error::RankOutOfRange { rank, count });
        }
        Ok(self.toggle(Slot::Available, rank))
    }

    /// Releases the `rank`-th (0-based, in index order) claimed slot and returns its index.
    ///
    /// Fails with [`Error::RankOutOfRange`] when `rank >= self.claimed_total()`.
    pub fn release_by_rank(&mut self, rank: usize) -> Result<usize> {
        let count = self.claimed_total;
        if rank >= count {
            return Err(Error::RankOutOfRange { rank, count });
        }
        Ok(self.toggle(Slot::Claimed, rank))
    }

    /// Returns the index of the `rank`-th (0-based, in index order) claimed slot.
    ///
    /// Fails with [`Error::RankOutOfRange`] when `rank >= self.claimed_total()`.
    pub fn index_of_claimed_rank(&self, rank: usize) -> Result<usize> {
        let count = self.claimed_total;
        if rank >= count {
            return Err(Error::RankOutOfRange { rank, count });
        }
        Ok(self.locate(Slot::Claimed, rank))
    }

    /// Finds the `rank`-th slot in `state`, which must exist.
    fn locate(&self, state: Slot, mut rank: usize) -> usize {
        let claimed_left = &self.claimed_left;
        let index = self.layout.descend(|node| {
            let count = left_count(state, node, claimed_left[node.mid]);
            if rank < count {
                Branch::Left
            } else {
                rank -= count;
                Branch::Right
            }
        });
        debug_assert_eq!(self.slots[index], state);
        index
    }

    /// Finds the `rank`-th slot in `state`, which must exist, and flips it.
    ///
    /// Every node whose left child contains the slot has its count adjusted on the way down.
    fn toggle(&mut self, state: Slot, mut rank: usize) -> usize {
        let claimed_left = &mut self.claimed_left;
        let index = self.layout.descend(|node| {
            let claimed = &mut claimed_left[node.mid];
            let count = left_count(state, node, *claimed);
            if rank < count {
                match state {
                    Slot::Available => *claimed += 1,
                    Slot::Claimed => *claimed -= 1,
                }
                Branch::Left
            } else {
                rank -= count;
                Branch::Right
            }
        });

        let slot = &mut self.slots[index];
        debug_assert_eq!(*slot, state);
        *slot = state.flipped();
        match state {
            Slot::Available => self.claimed_total += 1,
            Slot::Claimed => self.claimed_total -= 1,
        }
        index
    }

    #[inline(always)]
    fn check_index(&self, index: usize) {
        if index >= self.len() {
            self.index_out_of_bounds(index)
        }
    }

    #[inline(never)]
    #[cold]
    fn index_out_of_bounds(&self, index: usize) -> ! {
        panic!(
            "index {index} out of bounds for a rank index of length {}",
            self.len()
        )
    }

    /// Recomputes every node count and the total from the slot states and compares.
    #[cfg(test)]
    fn assert_consistent(&self) {
        for node in self.layout.nodes() {
            let claimed = self.slots[node.start..=node.mid]
                .iter()
                .filter(|&&slot| slot == Slot::Claimed)
                .count();
            assert_eq!(
                self.claimed_left[node.mid] as usize, claimed,
                "count of node {node:?}"
            );
        }
        let total = self.slots.iter().filter(|&&s| s == Slot::Claimed).count();
        assert_eq!(self.claimed_total, total);
    }
}
