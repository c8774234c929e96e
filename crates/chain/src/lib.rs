//! Discrete-state, first-order Markov chain model.
//!
//! This crate holds the immutable chain description consumed by the knockoff
//! sampler: an initial distribution over `K` states and one `K×K` transition
//! matrix per step of a length-`p` sequence. It also provides the discrete
//! sampling primitive shared by forward simulation and knockoff sampling.
//!
//! # Components
//!
//! ```text
//!  ┌──────────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │ TransitionMatrix  │────▶│   ChainModel   │────▶│    simulate      │
//!  │  (K×K, row-major) │     │ (init_p + Q[]) │     │ (forward draws)  │
//!  └──────────────────┘     └────────────────┘     └──────────────────┘
//!                                                          │
//!                                                  weighted_choice()
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use knockoff_chain::{ChainModel, TransitionMatrix, simulate};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let q = TransitionMatrix::from_rows(&[[0.9, 0.1], [0.1, 0.9]]).unwrap();
//! let model = ChainModel::homogeneous(vec![0.5, 0.5], q, 10).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let x = simulate(&model, &mut rng);
//! assert_eq!(x.len(), 10);
//! assert!(model.log_probability(&x).unwrap().is_finite());
//! ```

pub mod choice;
pub mod error;
pub mod matrix;
pub mod model;
pub mod simulate;

pub use choice::weighted_choice;
pub use error::ChainError;
pub use matrix::TransitionMatrix;
pub use model::ChainModel;
pub use simulate::{simulate, simulate_into};
