//! Square transition matrices over a finite state alphabet.

use crate::error::ChainError;

/// A K×K transition matrix stored contiguously in row-major order.
///
/// Entry `(a, b)` is the probability of moving from state `a` to state `b`.
/// Rows are expected to sum to 1.0 but this is not enforced on construction;
/// see [`TransitionMatrix::check_probabilities`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    n_states: usize,
    probs: Vec<f64>,
}

impl TransitionMatrix {
    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::RaggedMatrix`] if the rows differ in length from
    /// the number of rows (the matrix must be square).
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, ChainError> {
        let n_states = rows.len();
        let mut probs = Vec::with_capacity(n_states * n_states);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_states {
                return Err(ChainError::RaggedMatrix {
                    row: i,
                    expected: n_states,
                    got: row.len(),
                });
            }
            probs.extend_from_slice(row);
        }
        Ok(Self { n_states, probs })
    }

    /// Builds a matrix from a flat row-major buffer of `n_states * n_states` values.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::BufferLength`] if the buffer has the wrong length.
    pub fn from_flat(n_states: usize, probs: Vec<f64>) -> Result<Self, ChainError> {
        if probs.len() != n_states * n_states {
            return Err(ChainError::BufferLength {
                expected: n_states * n_states,
                got: probs.len(),
            });
        }
        Ok(Self { n_states, probs })
    }

    /// Number of states (rows and columns).
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Returns the transition probabilities out of state `from`.
    ///
    /// # Panics
    ///
    /// Panics if `from >= n_states()`.
    #[inline]
    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.n_states;
        &self.probs[start..start + self.n_states]
    }

    /// Returns the probability of moving from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= n_states()`.
    #[inline]
    pub fn prob(&self, from: usize, to: usize) -> f64 {
        debug_assert!(to < self.n_states);
        self.probs[from * self.n_states + to]
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics; an empty matrix has no rows anyway
        self.probs.chunks_exact(self.n_states.max(1))
    }

    /// Validates that the matrix is row-stochastic.
    ///
    /// Checks that all values are finite and in `[0, 1]`, and that each row
    /// sums to 1.0 within `tolerance`. `step` only labels error messages.
    pub fn check_probabilities(&self, step: usize, tolerance: f64) -> Result<(), ChainError> {
        for (i, row) in self.rows().enumerate() {
            let mut sum = 0.0;
            for (j, &p) in row.iter().enumerate() {
                if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                    return Err(ChainError::InvalidProbability {
                        location: format!("Q[{step}][{i}][{j}]"),
                        value: p,
                    });
                }
                sum += p;
            }
            if (sum - 1.0).abs() > tolerance {
                return Err(ChainError::NotNormalized {
                    location: format!("Q[{step}] row {i}"),
                    sum,
                    tolerance,
                });
            }
        }
        Ok(())
    }
}
