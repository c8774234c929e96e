//! Sequential knockoff sampling for one chain realisation.

use knockoff_chain::{ChainModel, weighted_choice};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::SamplerConfig;
use crate::error::KnockoffError;

/// Partition-function and weight buffers, sized once from the alphabet size.
#[derive(Debug, Clone)]
struct Scratch {
    /// Partition function at the current position.
    z: Vec<f64>,
    /// Partition function carried over from the previous position.
    z_old: Vec<f64>,
    /// Unnormalized weights for the state being drawn.
    w: Vec<f64>,
}

impl Scratch {
    fn new(n_states: usize) -> Self {
        Self {
            z: vec![0.0; n_states],
            z_old: vec![0.0; n_states],
            w: vec![0.0; n_states],
        }
    }

    fn reset(&mut self) {
        self.z.fill(0.0);
        self.z_old.fill(0.0);
        self.w.fill(0.0);
    }
}

/// Draws knockoff copies of sequences from a [`ChainModel`].
///
/// Each call to [`sample`](Self::sample) runs a left-to-right recursion over
/// the sequence: a partition function `Z` is carried from one position to the
/// next, and at every position the knockoff state is drawn from weights that
/// couple the observed transition out of `X[j-1]`, the knockoff's own
/// transition out of `Xt[j-1]`, and the observed state `X[j+1]` ahead.
///
/// The sampler owns its random generator and scratch buffers. The generator
/// advances by one uniform draw per sampled position and persists across
/// calls, so repeated calls give independent knockoffs. Sampling takes
/// `&mut self`; run independent samplers (each with its own seed) to use
/// several threads.
///
/// # Example
///
/// ```
/// use knockoff_chain::{ChainModel, TransitionMatrix};
/// use knockoff_sampler::KnockoffSampler;
///
/// let q = TransitionMatrix::from_rows(&[[0.9, 0.1], [0.1, 0.9]]).unwrap();
/// let model = ChainModel::homogeneous(vec![0.5, 0.5], q, 3).unwrap();
///
/// let mut sampler = KnockoffSampler::new(&model, 42);
/// let xt = sampler.sample(&[0, 0, 1]).unwrap();
/// assert_eq!(xt.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KnockoffSampler<'a, R = StdRng> {
    model: &'a ChainModel,
    rng: R,
    scratch: Scratch,
    config: SamplerConfig,
}

impl<'a> KnockoffSampler<'a, StdRng> {
    /// Creates a sampler whose stream is seeded from `seed`.
    pub fn new(model: &'a ChainModel, seed: u64) -> Self {
        Self::with_rng(model, StdRng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> KnockoffSampler<'a, R> {
    /// Creates a sampler drawing from a caller-supplied generator.
    pub fn with_rng(model: &'a ChainModel, rng: R) -> Self {
        Self {
            model,
            rng,
            scratch: Scratch::new(model.n_states()),
            config: SamplerConfig::default(),
        }
    }

    /// Installs a configuration after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`KnockoffError::InvalidConfig`] if the configuration is invalid.
    pub fn with_config(mut self, config: SamplerConfig) -> Result<Self, KnockoffError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// The model this sampler draws knockoffs for.
    pub fn model(&self) -> &'a ChainModel {
        self.model
    }

    /// The active configuration.
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Samples a knockoff copy of `x`.
    ///
    /// # Errors
    ///
    /// - [`KnockoffError::Chain`] if `x` does not have one state in
    ///   `0..K` per position; no random draws are consumed in that case.
    /// - [`KnockoffError::DegenerateDistribution`] if `x` has (numerically)
    ///   zero probability under the model.
    pub fn sample(&mut self, x: &[usize]) -> Result<Vec<usize>, KnockoffError> {
        let mut out = vec![0; self.model.n_positions()];
        self.sample_into(x, &mut out)?;
        Ok(out)
    }

    /// Samples a knockoff copy of `x` into a pre-allocated buffer.
    ///
    /// # Errors
    ///
    /// Same as [`sample`](Self::sample), plus [`KnockoffError::BufferLength`]
    /// if `out.len()` differs from the chain length.
    pub fn sample_into(&mut self, x: &[usize], out: &mut [usize]) -> Result<(), KnockoffError> {
        self.model.check_sequence(x)?;
        if out.len() != x.len() {
            return Err(KnockoffError::BufferLength {
                expected: x.len(),
                got: out.len(),
            });
        }
        self.scratch.reset();
        self.recurse(x, out)
            .inspect_err(|e| debug!(error = %e, "knockoff recursion failed"))
    }

    /// Runs the three phases of the recursion. Inputs are already validated.
    fn recurse(&mut self, x: &[usize], out: &mut [usize]) -> Result<(), KnockoffError> {
        let model = self.model;
        let min = self.config.min_partition();
        let n_states = model.n_states();
        let last = model.n_positions() - 1;
        let Scratch { z, z_old, w } = &mut self.scratch;
        let rng = &mut self.rng;

        // Position 0: one-step-ahead marginal, coupled to the observed X[1].
        let init_p = model.init_p();
        let q0 = model.transition(0);
        for (&pu, row) in init_p.iter().zip(q0.rows()) {
            for (zk, &q) in z.iter_mut().zip(row) {
                *zk += pu * q;
            }
        }
        let ahead = x[1];
        let norm = normalizer(z[ahead], min, 0)?;
        for (k, wk) in w.iter_mut().enumerate() {
            *wk = init_p[k] * q0.prob(k, ahead) / norm;
        }
        z_old.copy_from_slice(z);
        out[0] = draw(rng, w, 0)?;

        // Interior positions.
        for j in 1..last {
            let prev = model.transition(j - 1);
            let cur = model.transition(j);
            let observed = prev.row(x[j - 1]);
            let knockoff = prev.row(out[j - 1]);

            z.fill(0.0);
            for u in 0..n_states {
                let coupling = quotient(observed[u] * knockoff[u], z_old[u], min, j)?;
                if coupling == 0.0 {
                    continue;
                }
                for (zk, &q) in z.iter_mut().zip(cur.row(u)) {
                    *zk += coupling * q;
                }
            }

            let ahead = x[j + 1];
            let norm = normalizer(z[ahead], min, j)?;
            for k in 0..n_states {
                let num = observed[k] * knockoff[k] * cur.prob(k, ahead);
                w[k] = quotient(num, z_old[k], min, j)? / norm;
            }
            z_old.copy_from_slice(z);
            out[j] = draw(rng, w, j)?;
        }

        // Last position: no matrix ahead, so the partition function is a scalar.
        let q = model.transition(last - 1);
        let observed = q.row(x[last - 1]);
        let knockoff = q.row(out[last - 1]);
        let mut z_last = 0.0;
        for u in 0..n_states {
            z_last += quotient(observed[u] * knockoff[u], z_old[u], min, last)?;
        }
        let norm = normalizer(z_last, min, last)?;
        for k in 0..n_states {
            w[k] = quotient(observed[k] * knockoff[k], z_old[k], min, last)? / norm;
        }
        out[last] = draw(rng, w, last)?;

        Ok(())
    }
}

/// Accepts a scalar normalizer only if it is finite and above `min`.
#[inline]
fn normalizer(value: f64, min: f64, position: usize) -> Result<f64, KnockoffError> {
    if value.is_finite() && value > min {
        Ok(value)
    } else {
        Err(KnockoffError::DegenerateDistribution { position, value })
    }
}

/// `num / den`, where a zero numerator contributes zero whatever the denominator.
#[inline]
fn quotient(num: f64, den: f64, min: f64, position: usize) -> Result<f64, KnockoffError> {
    if num == 0.0 {
        return Ok(0.0);
    }
    Ok(num / normalizer(den, min, position)?)
}

/// Draws one state from the weights after checking they form a distribution.
#[inline]
fn draw(rng: &mut impl Rng, w: &[f64], position: usize) -> Result<usize, KnockoffError> {
    debug_assert!(
        !w.iter().any(|&v| v < 0.0),
        "negative weight at position {position}: {w:?}"
    );
    let total: f64 = w.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(KnockoffError::DegenerateDistribution {
            position,
            value: total,
        });
    }
    Ok(weighted_choice(rng.random(), w))
}
