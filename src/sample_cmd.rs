//! Sample command: draw one knockoff per input sequence.

use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, info_span, warn};

use knockoff_chain::ChainModel;
use knockoff_sampler::{KnockoffSampler, SamplerConfig, sample_batch_parallel};

use crate::cli::SampleArgs;
use crate::config;
use crate::convert::{self, RowErrorPolicy};
use crate::sequences;

/// Run the sampling pipeline.
pub fn run(args: SampleArgs) -> Result<()> {
    let _cmd = info_span!("sample").entered();

    let cfg = config::load(&args.config)?;
    let model = convert::build_model(&cfg.model)?;
    let sampler_config = convert::build_sampler_config(&cfg.sampler)?;
    let policy = convert::parse_row_error_policy(&cfg.sampler.on_row_error)?;
    info!(
        n_states = model.n_states(),
        n_positions = model.n_positions(),
        "model loaded"
    );

    let rows = sequences::read_sequences(&args.input)?;
    info!(path = %args.input.display(), n_rows = rows.len(), "read sequences");

    let seed = args.seed.or(cfg.seed);
    let knockoffs = if cfg.sampler.parallel {
        if policy == RowErrorPolicy::Skip {
            bail!("on_row_error = \"skip\" is not supported with parallel = true");
        }
        let seed = seed.unwrap_or_else(|| StdRng::from_os_rng().random());
        sample_batch_parallel(&model, &rows, seed, &sampler_config)?
    } else {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        sample_sequential(&model, rng, sampler_config, &rows, policy)?
    };

    sequences::write_output(args.output.as_deref(), &knockoffs)?;
    info!(n_knockoffs = knockoffs.len(), "knockoffs written");
    Ok(())
}

/// Samples all rows on one sampler, applying the row-error policy.
fn sample_sequential(
    model: &ChainModel,
    rng: StdRng,
    config: SamplerConfig,
    rows: &[Vec<usize>],
    policy: RowErrorPolicy,
) -> Result<Vec<Vec<usize>>> {
    let mut sampler = KnockoffSampler::with_rng(model, rng).with_config(config)?;
    match policy {
        RowErrorPolicy::Abort => Ok(sampler.sample_batch(rows)?),
        RowErrorPolicy::Skip => {
            let report = sampler.sample_batch_report(rows);
            if !report.is_complete() {
                warn!(
                    skipped = report.failures().len(),
                    "some rows had no knockoff and were left out"
                );
            }
            let (knockoffs, _) = report.into_parts();
            Ok(knockoffs.into_iter().map(|(_, xt)| xt).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knockoff_chain::TransitionMatrix;

    fn identity_model() -> ChainModel {
        let q = TransitionMatrix::from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
        ChainModel::homogeneous(vec![0.5, 0.5], q, 3).unwrap()
    }

    #[test]
    fn skip_policy_drops_failed_rows() {
        let model = identity_model();
        let rows = vec![vec![0, 0, 0], vec![0, 1, 1], vec![1, 1, 1]];
        let out = sample_sequential(
            &model,
            StdRng::seed_from_u64(0),
            SamplerConfig::default(),
            &rows,
            RowErrorPolicy::Skip,
        )
        .unwrap();
        assert_eq!(out, vec![vec![0, 0, 0], vec![1, 1, 1]]);
    }

    #[test]
    fn abort_policy_reports_row() {
        let model = identity_model();
        let rows = vec![vec![0, 0, 0], vec![0, 1, 1]];
        let err = sample_sequential(
            &model,
            StdRng::seed_from_u64(0),
            SamplerConfig::default(),
            &rows,
            RowErrorPolicy::Abort,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("row 1: degenerate distribution"), "{err}");
    }
}
