//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};

use knockoff_chain::{ChainModel, TransitionMatrix};
use knockoff_sampler::SamplerConfig;

use crate::config::{ModelToml, SamplerToml};

/// What a batch does when one row cannot be sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowErrorPolicy {
    /// Stop and report the failing row.
    Abort,
    /// Leave the row out of the output and keep going.
    Skip,
}

/// Parses an `on_row_error` string into a [`RowErrorPolicy`].
pub fn parse_row_error_policy(s: &str) -> Result<RowErrorPolicy> {
    match s.to_lowercase().as_str() {
        "abort" => Ok(RowErrorPolicy::Abort),
        "skip" => Ok(RowErrorPolicy::Skip),
        other => bail!("unknown on_row_error policy: {other:?}"),
    }
}

/// Builds a [`ChainModel`] from the `[model]` section.
///
/// Exactly one of `transitions` or `matrix` (with `length`) must be set.
pub fn build_model(t: &ModelToml) -> Result<ChainModel> {
    let model = match (&t.transitions, &t.matrix, t.length) {
        (Some(transitions), None, None) => {
            ChainModel::from_nested(t.init_p.clone(), transitions)?
        }
        (None, Some(matrix), Some(length)) => {
            let q = TransitionMatrix::from_rows(matrix).context("invalid model.matrix")?;
            ChainModel::homogeneous(t.init_p.clone(), q, length)?
        }
        (None, Some(_), None) => bail!("model.matrix requires model.length"),
        (Some(_), Some(_), _) => {
            bail!("model must have exactly one of transitions or matrix, got both")
        }
        (Some(_), None, Some(_)) => bail!("model.length only applies with model.matrix"),
        (None, None, _) => {
            bail!("model must have exactly one of transitions or matrix, got neither")
        }
    };

    if t.check_probabilities {
        model
            .check_probabilities(t.tolerance)
            .context("model probabilities failed validation")?;
    }
    Ok(model)
}

/// Builds a validated [`SamplerConfig`] from the `[sampler]` section.
pub fn build_sampler_config(t: &SamplerToml) -> Result<SamplerConfig> {
    let config = SamplerConfig::new()
        .with_min_partition(t.min_partition)
        .with_chunk_size(t.chunk_size);
    config.validate()?;
    Ok(config)
}
