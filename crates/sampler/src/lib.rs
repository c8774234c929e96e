//! Knockoff sampling for discrete Markov chains.
//!
//! Given a [`ChainModel`](knockoff_chain::ChainModel) and an observed
//! sequence `X`, a [`KnockoffSampler`] draws a knockoff `Xt` of the same
//! length such that swapping any subset of positions between `X` and `Xt`
//! leaves their joint law unchanged. The draw is sequential: one state per
//! position, left to right, each conditioned on the knockoff drawn so far.
//!
//! | Position | Weights for state `k` | Normalizer |
//! |----------|-----------------------|------------|
//! | `0` | `initP[k] Q0[k][X1]` | `Z[X1]` |
//! | `0 < j < p-1` | `Q[X[j-1]][k] Q[Xt[j-1]][k] Qj[k][X[j+1]] / Z_old[k]` | `Z[X[j+1]]` |
//! | `p-1` | `Q[X[p-2]][k] Q[Xt[p-2]][k] / Z_old[k]` | `Σ` of the same |
//!
//! # Quick start
//!
//! ```
//! use knockoff_chain::{ChainModel, TransitionMatrix};
//! use knockoff_sampler::KnockoffSampler;
//!
//! let q = TransitionMatrix::from_rows(&[[0.9, 0.1], [0.1, 0.9]]).unwrap();
//! let model = ChainModel::homogeneous(vec![0.5, 0.5], q, 3).unwrap();
//!
//! let mut sampler = KnockoffSampler::new(&model, 42);
//! let knockoffs = sampler.sample_batch(&[[0usize, 0, 1], [1, 1, 1]]).unwrap();
//! assert_eq!(knockoffs.len(), 2);
//! ```
//!
//! # Architecture
//!
//! ```text
//! KnockoffSampler::sample()
//!   ├─ check_sequence()          (knockoff-chain)
//!   ├─ position 0                (sampler.rs)
//!   ├─ positions 1..p-1          (sampler.rs)
//!   ├─ position p-1              (sampler.rs)
//!   └─ weighted_choice()         (knockoff-chain)
//!
//! sample_batch / sample_batch_report   (batch.rs)
//! sample_batch_parallel                (parallel.rs, one sampler per chunk)
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod parallel;
pub mod sampler;

pub use batch::BatchReport;
pub use config::SamplerConfig;
pub use error::KnockoffError;
pub use parallel::sample_batch_parallel;
pub use sampler::KnockoffSampler;
