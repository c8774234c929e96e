//! Row-by-row batch sampling on one sampler.

use rand::Rng;
use tracing::{debug, warn};

use crate::error::KnockoffError;
use crate::sampler::KnockoffSampler;

/// Outcome of a skip-and-report batch.
///
/// Successful knockoffs and failures are both kept in row order, each
/// tagged with the zero-based index of the input row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    knockoffs: Vec<(usize, Vec<usize>)>,
    failures: Vec<(usize, KnockoffError)>,
}

impl BatchReport {
    /// Successfully sampled `(row, knockoff)` pairs.
    pub fn knockoffs(&self) -> &[(usize, Vec<usize>)] {
        &self.knockoffs
    }

    /// Failed `(row, error)` pairs.
    pub fn failures(&self) -> &[(usize, KnockoffError)] {
        &self.failures
    }

    /// `true` when no row failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consumes the report, returning `(knockoffs, failures)`.
    pub fn into_parts(self) -> (Vec<(usize, Vec<usize>)>, Vec<(usize, KnockoffError)>) {
        (self.knockoffs, self.failures)
    }
}

impl<R: Rng> KnockoffSampler<'_, R> {
    /// Samples one knockoff per row, in order, on this sampler's stream.
    ///
    /// Equivalent to calling [`sample`](Self::sample) on each row in turn.
    ///
    /// # Errors
    ///
    /// Stops at the first failing row and returns [`KnockoffError::Row`]
    /// wrapping that row's error.
    #[tracing::instrument(skip_all, fields(n_rows = rows.len()))]
    pub fn sample_batch<S: AsRef<[usize]>>(
        &mut self,
        rows: &[S],
    ) -> Result<Vec<Vec<usize>>, KnockoffError> {
        let mut out = Vec::with_capacity(rows.len());
        for (row, x) in rows.iter().enumerate() {
            let xt = self.sample(x.as_ref()).map_err(|e| e.at_row(row))?;
            out.push(xt);
        }
        debug!(n_rows = out.len(), "batch complete");
        Ok(out)
    }

    /// Samples every row, collecting failures instead of stopping.
    ///
    /// A failing row may have consumed some draws before failing; later
    /// rows continue from the advanced stream.
    #[tracing::instrument(skip_all, fields(n_rows = rows.len()))]
    pub fn sample_batch_report<S: AsRef<[usize]>>(&mut self, rows: &[S]) -> BatchReport {
        let mut report = BatchReport::default();
        for (row, x) in rows.iter().enumerate() {
            match self.sample(x.as_ref()) {
                Ok(xt) => report.knockoffs.push((row, xt)),
                Err(e) => {
                    warn!(row, error = %e, "skipping row");
                    report.failures.push((row, e));
                }
            }
        }
        debug!(
            sampled = report.knockoffs.len(),
            failed = report.failures.len(),
            "batch complete"
        );
        report
    }
}
