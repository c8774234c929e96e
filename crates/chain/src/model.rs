//! The immutable chain model: initial distribution plus per-step transitions.

use crate::error::ChainError;
use crate::matrix::TransitionMatrix;

/// A discrete-state, first-order Markov chain with time-varying transitions.
///
/// Holds the initial distribution `init_p` (length K) and `p - 1` transition
/// matrices, where matrix `j` governs the step from position `j` to `j + 1`.
/// The model is immutable once built and is `Sync`, so one instance can be
/// shared by reference across any number of samplers and threads.
///
/// Construction checks shapes only. Probability values are the caller's
/// responsibility; [`ChainModel::check_probabilities`] is available as an
/// explicit opt-in check.
///
/// # Example
///
/// ```
/// use knockoff_chain::{ChainModel, TransitionMatrix};
///
/// let q = TransitionMatrix::from_rows(&[[0.9, 0.1], [0.1, 0.9]]).unwrap();
/// let model = ChainModel::homogeneous(vec![0.5, 0.5], q, 3).unwrap();
/// assert_eq!(model.n_positions(), 3);
/// assert_eq!(model.n_states(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChainModel {
    init_p: Vec<f64>,
    transitions: Vec<TransitionMatrix>,
}

impl ChainModel {
    /// Builds a model from an initial distribution and per-step transition matrices.
    ///
    /// # Errors
    ///
    /// - [`ChainError::EmptyInitial`] if `init_p` is empty.
    /// - [`ChainError::NoTransitions`] if `transitions` is empty.
    /// - [`ChainError::MatrixShape`] if any matrix is not K×K with `K = init_p.len()`.
    pub fn new(init_p: Vec<f64>, transitions: Vec<TransitionMatrix>) -> Result<Self, ChainError> {
        if init_p.is_empty() {
            return Err(ChainError::EmptyInitial);
        }
        if transitions.is_empty() {
            return Err(ChainError::NoTransitions);
        }
        let n_states = init_p.len();
        for (step, q) in transitions.iter().enumerate() {
            if q.n_states() != n_states {
                return Err(ChainError::MatrixShape {
                    step,
                    rows: q.n_states(),
                    cols: q.n_states(),
                    n_states,
                });
            }
        }
        Ok(Self {
            init_p,
            transitions,
        })
    }

    /// Builds a model from nested rows, one `K×K` block per step.
    ///
    /// # Errors
    ///
    /// Same as [`ChainModel::new`], plus [`ChainError::MatrixShape`] for
    /// non-square blocks.
    pub fn from_nested(init_p: Vec<f64>, transitions: &[Vec<Vec<f64>>]) -> Result<Self, ChainError> {
        let n_states = init_p.len();
        let matrices = transitions
            .iter()
            .enumerate()
            .map(|(step, rows)| {
                TransitionMatrix::from_rows(rows).map_err(|e| match e {
                    ChainError::RaggedMatrix { got, .. } => ChainError::MatrixShape {
                        step,
                        rows: rows.len(),
                        cols: got,
                        n_states,
                    },
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(init_p, matrices)
    }

    /// Builds a time-homogeneous model that repeats `matrix` for every step.
    ///
    /// # Errors
    ///
    /// - [`ChainError::TooShort`] if `length < 2`.
    /// - Any error from [`ChainModel::new`].
    pub fn homogeneous(
        init_p: Vec<f64>,
        matrix: TransitionMatrix,
        length: usize,
    ) -> Result<Self, ChainError> {
        if length < 2 {
            return Err(ChainError::TooShort { length });
        }
        Self::new(init_p, vec![matrix; length - 1])
    }

    /// Initial state distribution (length K).
    pub fn init_p(&self) -> &[f64] {
        &self.init_p
    }

    /// All `p - 1` transition matrices, in step order.
    pub fn transitions(&self) -> &[TransitionMatrix] {
        &self.transitions
    }

    /// Transition matrix for the step `step -> step + 1`.
    ///
    /// # Panics
    ///
    /// Panics if `step >= n_positions() - 1`.
    #[inline]
    pub fn transition(&self, step: usize) -> &TransitionMatrix {
        &self.transitions[step]
    }

    /// Sequence length `p` (number of transition matrices plus one).
    pub fn n_positions(&self) -> usize {
        self.transitions.len() + 1
    }

    /// Alphabet size `K`.
    pub fn n_states(&self) -> usize {
        self.init_p.len()
    }

    /// Checks that `sequence` has one valid state index per position.
    ///
    /// # Errors
    ///
    /// Returns the first violation: [`ChainError::SequenceLength`] or
    /// [`ChainError::StateOutOfRange`].
    pub fn check_sequence(&self, sequence: &[usize]) -> Result<(), ChainError> {
        if sequence.len() != self.n_positions() {
            return Err(ChainError::SequenceLength {
                expected: self.n_positions(),
                got: sequence.len(),
            });
        }
        let n_states = self.n_states();
        if let Some((position, &state)) = sequence.iter().enumerate().find(|(_, s)| **s >= n_states)
        {
            return Err(ChainError::StateOutOfRange {
                position,
                state,
                n_states,
            });
        }
        Ok(())
    }

    /// Validates that the model describes a proper stochastic process.
    ///
    /// All values must be finite and in `[0, 1]`; `init_p` and every row of
    /// every transition matrix must sum to 1.0 within `tolerance`. Not called
    /// by any constructor.
    pub fn check_probabilities(&self, tolerance: f64) -> Result<(), ChainError> {
        let mut sum = 0.0;
        for (i, &p) in self.init_p.iter().enumerate() {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(ChainError::InvalidProbability {
                    location: format!("init_p[{i}]"),
                    value: p,
                });
            }
            sum += p;
        }
        if (sum - 1.0).abs() > tolerance {
            return Err(ChainError::NotNormalized {
                location: "init_p".to_string(),
                sum,
                tolerance,
            });
        }
        for (step, q) in self.transitions.iter().enumerate() {
            q.check_probabilities(step, tolerance)?;
        }
        Ok(())
    }

    /// Natural-log probability of `sequence` under the chain.
    ///
    /// Returns `f64::NEG_INFINITY` when the sequence is impossible, i.e. the
    /// initial state or any transition along it has zero probability.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence fails [`ChainModel::check_sequence`].
    pub fn log_probability(&self, sequence: &[usize]) -> Result<f64, ChainError> {
        self.check_sequence(sequence)?;
        let mut log_p = self.init_p[sequence[0]].ln();
        for (step, pair) in sequence.windows(2).enumerate() {
            log_p += self.transitions[step].prob(pair[0], pair[1]).ln();
        }
        Ok(log_p)
    }
}
