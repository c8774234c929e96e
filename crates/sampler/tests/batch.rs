//! Batch wrappers against repeated single-sequence sampling.

use knockoff_chain::{ChainModel, TransitionMatrix, simulate};
use knockoff_sampler::{KnockoffError, KnockoffSampler, SamplerConfig, sample_batch_parallel};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn model() -> ChainModel {
    let q = TransitionMatrix::from_rows(&[
        [0.6, 0.3, 0.1],
        [0.2, 0.5, 0.3],
        [0.3, 0.3, 0.4],
    ])
    .unwrap();
    ChainModel::homogeneous(vec![0.2, 0.5, 0.3], q, 12).unwrap()
}

fn rows(model: &ChainModel, n: usize, seed: u64) -> Vec<Vec<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| simulate(model, &mut rng)).collect()
}

fn identity_model() -> ChainModel {
    let q = TransitionMatrix::from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
    ChainModel::homogeneous(vec![0.5, 0.5], q, 4).unwrap()
}

#[test]
fn batch_matches_single_calls() {
    let model = model();
    let rows = rows(&model, 50, 1);

    let mut batched = KnockoffSampler::new(&model, 42);
    let out = batched.sample_batch(&rows).unwrap();

    let mut single = KnockoffSampler::new(&model, 42);
    let expected: Vec<Vec<usize>> = rows.iter().map(|x| single.sample(x).unwrap()).collect();

    assert_eq!(out, expected);
}

#[test]
fn report_matches_batch_when_nothing_fails() {
    let model = model();
    let rows = rows(&model, 20, 2);

    let mut a = KnockoffSampler::new(&model, 3);
    let out = a.sample_batch(&rows).unwrap();

    let mut b = KnockoffSampler::new(&model, 3);
    let report = b.sample_batch_report(&rows);
    assert!(report.is_complete());

    let (knockoffs, _) = report.into_parts();
    let indices: Vec<usize> = knockoffs.iter().map(|(row, _)| *row).collect();
    assert_eq!(indices, (0..20).collect::<Vec<_>>());
    let sequences: Vec<Vec<usize>> = knockoffs.into_iter().map(|(_, xt)| xt).collect();
    assert_eq!(sequences, out);
}

#[test]
fn report_continues_past_failures() {
    let model = identity_model();
    let rows: Vec<Vec<usize>> = vec![
        vec![1, 1, 1, 1],
        vec![0, 0, 1, 1],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 7],
        vec![1, 1, 1, 1],
    ];
    let mut sampler = KnockoffSampler::new(&model, 9);
    let report = sampler.sample_batch_report(&rows);

    let ok: Vec<usize> = report.knockoffs().iter().map(|(row, _)| *row).collect();
    assert_eq!(ok, vec![0, 2, 4]);
    for (row, xt) in report.knockoffs() {
        assert_eq!(xt, &rows[*row]);
    }

    let failures = report.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].0, 1);
    assert!(matches!(
        failures[0].1,
        KnockoffError::DegenerateDistribution { .. }
    ));
    assert_eq!(failures[1].0, 3);
    assert!(matches!(failures[1].1, KnockoffError::Chain(_)));
}

#[test]
fn parallel_is_deterministic() {
    let model = model();
    let rows = rows(&model, 300, 4);
    let config = SamplerConfig::new().with_chunk_size(32);

    let a = sample_batch_parallel(&model, &rows, 77, &config).unwrap();
    let b = sample_batch_parallel(&model, &rows, 77, &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 300);
    assert!(a.iter().all(|xt| xt.len() == 12 && xt.iter().all(|&s| s < 3)));

    let c = sample_batch_parallel(&model, &rows, 78, &config).unwrap();
    assert_ne!(a, c);
}

#[test]
fn parallel_independent_of_thread_count() {
    let model = model();
    let rows = rows(&model, 200, 5);
    let config = SamplerConfig::new().with_chunk_size(16);

    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| sample_batch_parallel(&model, &rows, 123, &config).unwrap())
    };

    assert_eq!(run(1), run(4));
}

#[test]
fn parallel_reports_lowest_failing_row() {
    let model = identity_model();
    let mut rows: Vec<Vec<usize>> = (0..40).map(|i| vec![i % 2; 4]).collect();
    rows[5] = vec![0, 1, 1, 1];
    rows[17] = vec![1, 0, 0, 0];
    let config = SamplerConfig::new().with_chunk_size(4);

    let err = sample_batch_parallel(&model, &rows, 0, &config).unwrap_err();
    assert!(
        matches!(err, KnockoffError::Row { row: 5, .. }),
        "unexpected error {err:?}"
    );
    assert!(matches!(
        err.root(),
        KnockoffError::DegenerateDistribution { .. }
    ));
}
