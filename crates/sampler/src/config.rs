//! Configuration for knockoff sampling.

use crate::error::KnockoffError;

/// Configuration for a [`KnockoffSampler`](crate::KnockoffSampler) and the batch helpers.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use knockoff_sampler::SamplerConfig;
///
/// let config = SamplerConfig::new()
///     .with_min_partition(1e-300)
///     .with_chunk_size(64);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Partition values at or below this are treated as zero.
    min_partition: f64,
    /// Rows per independent sampler in parallel batches.
    chunk_size: usize,
}

impl SamplerConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `min_partition = f64::MIN_POSITIVE`, `chunk_size = 256`.
    pub fn new() -> Self {
        Self {
            min_partition: f64::MIN_POSITIVE,
            chunk_size: 256,
        }
    }

    /// Sets the degeneracy threshold for partition functions.
    ///
    /// A normalizer that is not strictly greater than this value aborts the
    /// sequence with [`KnockoffError::DegenerateDistribution`].
    pub fn with_min_partition(mut self, min_partition: f64) -> Self {
        self.min_partition = min_partition;
        self
    }

    /// Sets the number of rows handled by each sampler in a parallel batch.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Returns the degeneracy threshold.
    pub fn min_partition(&self) -> f64 {
        self.min_partition
    }

    /// Returns the parallel chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates this configuration.
    ///
    /// `min_partition` must be finite and non-negative; `chunk_size` must be at least 1.
    pub fn validate(&self) -> Result<(), KnockoffError> {
        if !self.min_partition.is_finite() || self.min_partition < 0.0 {
            return Err(KnockoffError::InvalidConfig {
                reason: format!(
                    "min_partition must be finite and non-negative, got {}",
                    self.min_partition
                ),
            });
        }
        if self.chunk_size < 1 {
            return Err(KnockoffError::InvalidConfig {
                reason: "chunk_size must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new()
    }
}
