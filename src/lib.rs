//! Lehmer is a permutation ranking library for Rust.
//!
//! It converts permutations of `0..n` to and from their Lehmer codes (inversion tables) in
//! `O(n log n)`, which keeps permutations with tens of millions of entries practical. The
//! conversions in [`lehmer`] are built on [`rank_index::RankIndex`], a rank/select structure over a
//! fixed universe of toggles.
//!
//! Around this core, [`factoradic`] maps Lehmer codes to lexicographic ranks, [`cycles`] computes
//! cycle decompositions and parities, [`rand`] samples random permutations from explicitly seeded
//! generators and [`naive`] contains quadratic reference implementations.

#![warn(missing_docs)]

pub mod cycles;
pub mod error;
pub mod factoradic;
pub mod lehmer;
pub mod naive;
pub mod point;
pub mod rand;
pub mod rank_index;

pub use error::{Error, Result};
pub use point::Point;
pub use rank_index::{RankIndex, Slot};
