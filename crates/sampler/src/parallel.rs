//! Chunked parallel batch sampling.

use knockoff_chain::ChainModel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::config::SamplerConfig;
use crate::error::KnockoffError;
use crate::sampler::KnockoffSampler;

/// Samples one knockoff per row across threads.
///
/// Rows are split into chunks of `config.chunk_size()`. Each chunk gets its
/// own [`KnockoffSampler`] seeded from a master generator built from `seed`,
/// with chunk seeds drawn in chunk order. The result therefore depends only
/// on `seed`, the chunk size and the input, never on thread count or
/// scheduling.
///
/// # Errors
///
/// - [`KnockoffError::InvalidConfig`] if `config` is invalid.
/// - [`KnockoffError::Row`] for the lowest-indexed failing row.
#[tracing::instrument(skip_all, fields(n_rows = rows.len(), chunk_size = config.chunk_size()))]
pub fn sample_batch_parallel<S: AsRef<[usize]> + Sync>(
    model: &ChainModel,
    rows: &[S],
    seed: u64,
    config: &SamplerConfig,
) -> Result<Vec<Vec<usize>>, KnockoffError> {
    config.validate()?;
    let chunk_size = config.chunk_size();

    let mut master = StdRng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..rows.len().div_ceil(chunk_size))
        .map(|_| master.random())
        .collect();

    let chunks: Vec<Result<Vec<Vec<usize>>, KnockoffError>> = rows
        .par_chunks(chunk_size)
        .zip(seeds.par_iter())
        .enumerate()
        .map(|(chunk, (chunk_rows, &chunk_seed))| {
            let mut sampler =
                KnockoffSampler::new(model, chunk_seed).with_config(config.clone())?;
            let out = sampler.sample_batch(chunk_rows).map_err(|e| match e {
                KnockoffError::Row { row, source } => KnockoffError::Row {
                    row: chunk * chunk_size + row,
                    source,
                },
                other => other,
            })?;
            debug!(chunk, rows = out.len(), "chunk sampled");
            Ok(out)
        })
        .collect();

    // Chunks are in row order, so the first error is the lowest failing row.
    let mut out = Vec::with_capacity(rows.len());
    for chunk in chunks {
        out.extend(chunk?);
    }
    Ok(out)
}
