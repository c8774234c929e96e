//! Error types for the knockoff-chain crate.

/// Error type for all fallible operations in the knockoff-chain crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChainError {
    /// Returned when the initial distribution has no states.
    #[error("initial distribution is empty")]
    EmptyInitial,

    /// Returned when no transition matrix is supplied (the chain needs at least two positions).
    #[error("at least one transition matrix is required")]
    NoTransitions,

    /// Returned when a chain is requested with fewer than two positions.
    #[error("chain length must be at least 2, got {length}")]
    TooShort {
        /// Requested number of positions.
        length: usize,
    },

    /// Returned when a transition matrix does not match the alphabet size.
    #[error("transition matrix {step} is {rows}x{cols}, expected {n_states}x{n_states}")]
    MatrixShape {
        /// Index of the offending matrix (step `step -> step + 1`).
        step: usize,
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns supplied (of the first offending row).
        cols: usize,
        /// Alphabet size taken from the initial distribution.
        n_states: usize,
    },

    /// Returned when the rows of a matrix have different lengths.
    #[error("ragged matrix: row {row} has {got} entries, expected {expected}")]
    RaggedMatrix {
        /// Index of the offending row.
        row: usize,
        /// Expected row length.
        expected: usize,
        /// Actual row length.
        got: usize,
    },

    /// Returned when a sequence does not have one entry per chain position.
    #[error("sequence has {got} positions, model expects {expected}")]
    SequenceLength {
        /// Number of positions in the model.
        expected: usize,
        /// Number of entries in the sequence.
        got: usize,
    },

    /// Returned when a sequence entry is not a valid state index.
    #[error("state {state} at position {position} is outside 0..{n_states}")]
    StateOutOfRange {
        /// Position of the offending entry.
        position: usize,
        /// The offending state index.
        state: usize,
        /// Alphabet size.
        n_states: usize,
    },

    /// Returned when a probability is non-finite or outside `[0, 1]`.
    #[error("invalid probability {value} in {location}")]
    InvalidProbability {
        /// Where the value was found, e.g. `"init_p[2]"` or `"Q[0][1][2]"`.
        location: String,
        /// The invalid value.
        value: f64,
    },

    /// Returned when a distribution does not sum to one within tolerance.
    #[error("{location} sums to {sum}, expected 1 within {tolerance}")]
    NotNormalized {
        /// Which distribution failed, e.g. `"init_p"` or `"Q[3] row 1"`.
        location: String,
        /// The actual sum.
        sum: f64,
        /// Tolerance that was applied.
        tolerance: f64,
    },

    /// Returned when a pre-allocated buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLength {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
}
