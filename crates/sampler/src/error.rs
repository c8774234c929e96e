//! Error types for the knockoff-sampler crate.

use knockoff_chain::ChainError;

/// Error type for all fallible operations in the knockoff-sampler crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnockoffError {
    /// A partition function or weight normalizer collapsed to zero (or NaN/Inf).
    ///
    /// This means the observed sequence has (numerically) zero probability
    /// under the model, so no knockoff distribution exists at `position`.
    #[error("degenerate distribution at position {position}: normalizer {value}")]
    DegenerateDistribution {
        /// Sequence position whose weights could not be formed.
        position: usize,
        /// The offending normalizer or weight sum.
        value: f64,
    },

    /// Returned when a sequence in a batch fails; wraps the row's own error.
    #[error("row {row}: {source}")]
    Row {
        /// Zero-based index of the failing row.
        row: usize,
        /// The error raised while sampling that row.
        #[source]
        source: Box<KnockoffError>,
    },

    /// Returned when a pre-allocated output buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLength {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Invalid input sequence or malformed model.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl KnockoffError {
    /// Wraps `self` as the failure of batch row `row`.
    pub(crate) fn at_row(self, row: usize) -> Self {
        Self::Row {
            row,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, unwrapping any [`KnockoffError::Row`] layers.
    pub fn root(&self) -> &KnockoffError {
        match self {
            Self::Row { source, .. } => source.root(),
            other => other,
        }
    }
}
