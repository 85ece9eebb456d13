//! Error types for rank indices and permutation codecs.

use thiserror::Error;

/// Error variants for rank index mutations and permutation conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A select query asked for a rank not below the number of slots in the searched state.
    #[error("rank {rank} out of range: only {count} matching slots")]
    RankOutOfRange {
        /// The requested 0-based rank.
        rank: usize,
        /// The number of slots in the searched state.
        count: usize,
    },

    /// The input to a Lehmer code encoder is not a permutation of `0..len`.
    #[error("not a permutation: value {value} at position {position} is out of range or repeated")]
    NotAPermutation {
        /// Position of the offending value.
        position: usize,
        /// The offending value.
        value: usize,
    },

    /// A Lehmer code digit is not below the number of values left at its position.
    #[error("invalid Lehmer digit {digit} at position {position}: must be below {bound}")]
    InvalidLehmerDigit {
        /// Position of the offending digit.
        position: usize,
        /// The offending digit.
        digit: usize,
        /// The exclusive upper bound for this position.
        bound: usize,
    },

    /// A factoradic number is too large for a Lehmer code of the requested length.
    #[error("factoradic number does not fit a Lehmer code of length {len}")]
    FactoradicOverflow {
        /// The requested Lehmer code length.
        len: usize,
    },

    /// A sequence is too long to be stored using the requested point type.
    #[error("length {len} exceeds the maximal degree {max} of the point type")]
    DegreeTooLarge {
        /// The sequence length.
        len: usize,
        /// The maximal supported length.
        max: usize,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
