//! Fixed-seed regression values for the default `StdRng` stream.

use knockoff_chain::{ChainModel, TransitionMatrix};
use knockoff_sampler::KnockoffSampler;

fn persistent_model(length: usize) -> ChainModel {
    let q = TransitionMatrix::from_rows(&[[0.9, 0.1], [0.1, 0.9]]).unwrap();
    ChainModel::homogeneous(vec![0.5, 0.5], q, length).unwrap()
}

/// K=2, p=3, seed 42.
#[test]
fn two_state_seed_42() {
    let model = persistent_model(3);
    let mut sampler = KnockoffSampler::new(&model, 42);
    assert_eq!(sampler.sample(&[0, 0, 1]).unwrap(), vec![0, 0, 0]);
    // Second call continues the same stream.
    assert_eq!(sampler.sample(&[0, 0, 1]).unwrap(), vec![0, 0, 0]);
}

/// K=3, p=8, seed 7: two consecutive knockoffs of the same sequence.
#[test]
fn three_state_seed_7() {
    let q = TransitionMatrix::from_rows(&[
        [0.6, 0.3, 0.1],
        [0.2, 0.5, 0.3],
        [0.3, 0.3, 0.4],
    ])
    .unwrap();
    let model = ChainModel::homogeneous(vec![0.2, 0.5, 0.3], q, 8).unwrap();
    let x = [1, 1, 2, 0, 0, 1, 2, 2];

    let mut sampler = KnockoffSampler::new(&model, 7);
    assert_eq!(sampler.sample(&x).unwrap(), vec![0, 1, 0, 0, 0, 2, 1, 1]);
    assert_eq!(sampler.sample(&x).unwrap(), vec![0, 1, 2, 0, 0, 0, 1, 2]);
}

/// p=2 goes straight from the first position to the last.
#[test]
fn two_positions_seed_42() {
    let model = persistent_model(2);
    let mut sampler = KnockoffSampler::new(&model, 42);
    assert_eq!(sampler.sample(&[0, 1]).unwrap(), vec![1, 1]);
}
