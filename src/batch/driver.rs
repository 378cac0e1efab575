use std::io::Write;

use tracing::{info, instrument, warn};

use super::error::StoreResult;
use super::record::{BatchFilter, VerdictUpdate};
use super::store::ReviewStore;
use crate::service::ReviewVerifier;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counters reported at the end of a batch run.
pub struct BatchSummary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub errors: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {} | Approved: {} | Rejected: {} | Errors: {}",
            self.total, self.approved, self.rejected, self.errors
        )
    }
}

/// Verifies stored reviews and writes the verdicts back.
pub struct BatchDriver<'a> {
    verifier: &'a ReviewVerifier,
}

impl<'a> BatchDriver<'a> {
    pub fn new(verifier: &'a ReviewVerifier) -> Self {
        Self { verifier }
    }

    /// Runs one pass over the reviews selected by `filter`.
    ///
    /// Prints one line per review and the summary to `out`. A review whose verdict cannot be
    /// saved is counted under `errors`; the run goes on. Only failing to list candidates or to
    /// flush the store aborts the run.
    #[instrument(skip(self, store, out))]
    pub fn run<S, W>(
        &self,
        store: &mut S,
        filter: &BatchFilter,
        out: &mut W,
    ) -> StoreResult<BatchSummary>
    where
        S: ReviewStore + ?Sized,
        W: Write,
    {
        let candidates = store.candidates(filter)?;
        info!(reviews = candidates.len(), "Starting batch verification");
        writeln!(out, "Verifying {} reviews...", candidates.len())?;

        let mut summary = BatchSummary {
            total: candidates.len(),
            ..Default::default()
        };

        for record in &candidates {
            let verdict = self.verifier.verify(&record.content());
            let update = VerdictUpdate::from_verdict(&verdict);

            match store.save_verdict(record.id, &update) {
                Ok(()) => {
                    if verdict.is_appropriate {
                        summary.approved += 1;
                    } else {
                        summary.rejected += 1;
                    }
                    writeln!(out, "Review #{}: {}", record.id, verdict)?;
                }
                Err(e) => {
                    warn!(review_id = record.id, error = %e, "Failed to save verdict");
                    summary.errors += 1;
                    writeln!(out, "Review #{}: ERROR {}", record.id, e)?;
                }
            }
        }

        store.flush()?;

        info!(
            total = summary.total,
            approved = summary.approved,
            rejected = summary.rejected,
            errors = summary.errors,
            "Batch verification finished"
        );
        writeln!(out, "{summary}")?;
        Ok(summary)
    }
}
