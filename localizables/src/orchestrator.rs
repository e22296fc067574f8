//! Runs many destination/update merges concurrently.
//!
//! Every [`FilePair`] gets its own task owning its two documents. A single
//! collector drains finished tasks one at a time, so outcomes are recorded
//! (and reported through the callback) sequentially. A failing pair never
//! stops the others.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::{document::ResourceDocument, error::Error, options::ApplyOptions, types::FilePair};

/// Result of one successful destination/update merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub destination: PathBuf,
    pub update: PathBuf,
    /// Unique keys in the destination, unchanged by the merge.
    pub destination_keys: usize,
    /// Unique keys in the update.
    pub update_keys: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub destination_duplicates: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub update_duplicates: Vec<String>,
    /// Destination keys the update did not provide; their values were kept.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub missing_keys: Vec<String>,
    /// `false` when running in dry-run mode.
    pub written: bool,
}

/// A pair whose load, merge or save failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairFailure {
    pub destination: PathBuf,
    pub update: PathBuf,
    pub error: String,
}

/// Outcome of one pair, as delivered to the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    Merged(MergeReport),
    Failed(PairFailure),
}

/// Aggregate of every pair handled by [`apply_all`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ApplySummary {
    pub reports: Vec<MergeReport>,
    pub failures: Vec<PairFailure>,
}

impl ApplySummary {
    pub fn success_count(&self) -> usize {
        self.reports.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// `(success_count, failure_count)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.success_count(), self.failure_count())
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: PairOutcome) {
        match outcome {
            PairOutcome::Merged(report) => self.reports.push(report),
            PairOutcome::Failed(failure) => self.failures.push(failure),
        }
    }
}

/// Loads both files of `pair`, merges the update into the destination and
/// saves the destination (unless `options.dry_run`).
pub async fn merge_pair(pair: &FilePair, options: &ApplyOptions) -> Result<MergeReport, Error> {
    let (mut destination, update) = tokio::try_join!(
        ResourceDocument::load_async(&pair.destination),
        ResourceDocument::load_async(&pair.update),
    )?;

    let missing_keys = destination.merge(&update).to_vec();

    let mut report = MergeReport {
        destination: pair.destination.clone(),
        update: pair.update.clone(),
        destination_keys: destination.len(),
        update_keys: update.len(),
        destination_duplicates: destination.sorted_duplicated_keys(),
        update_duplicates: update.sorted_duplicated_keys(),
        missing_keys,
        written: false,
    };

    if !options.dry_run {
        tokio::task::spawn_blocking(move || destination.save()).await??;
        report.written = true;
    }

    Ok(report)
}

/// Merges every pair and returns the aggregated outcome.
pub async fn apply_all(pairs: Vec<FilePair>, options: &ApplyOptions) -> ApplySummary {
    apply_all_with(pairs, options, |_| {}).await
}

/// Like [`apply_all`], calling `on_outcome` from the collector as each pair
/// finishes.
pub async fn apply_all_with<F>(
    pairs: Vec<FilePair>,
    options: &ApplyOptions,
    mut on_outcome: F,
) -> ApplySummary
where
    F: FnMut(&PairOutcome),
{
    // A zero limit would never hand out a permit.
    let limiter = options
        .max_concurrency
        .filter(|&limit| limit > 0)
        .map(|limit| Arc::new(Semaphore::new(limit)));

    let mut tasks = JoinSet::new();
    let mut in_flight = HashMap::with_capacity(pairs.len());

    for pair in pairs {
        let limiter = limiter.clone();
        let options = options.clone();
        let task_pair = pair.clone();

        let handle = tasks.spawn(async move {
            let _permit = match limiter {
                Some(limiter) => limiter.acquire_owned().await.ok(),
                None => None,
            };
            merge_pair(&task_pair, &options).await
        });
        in_flight.insert(handle.id(), pair);
    }

    let mut summary = ApplySummary::default();

    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result),
            Err(join_error) => (join_error.id(), Err(Error::from(join_error))),
        };
        let Some(pair) = in_flight.remove(&id) else {
            continue;
        };

        let outcome = match result {
            Ok(report) => {
                log_report(&report);
                PairOutcome::Merged(report)
            }
            Err(err) => failure(pair, err.to_string()),
        };
        on_outcome(&outcome);
        summary.record(outcome);
    }

    let (succeeded, failed) = summary.counts();
    tracing::info!(succeeded, failed, "applied updates");
    summary
}

fn failure(pair: FilePair, error: String) -> PairOutcome {
    tracing::error!(
        destination = %pair.destination.display(),
        error = %error,
        "failed to update file"
    );
    PairOutcome::Failed(PairFailure {
        destination: pair.destination,
        update: pair.update,
        error,
    })
}

fn log_report(report: &MergeReport) {
    tracing::info!(
        destination = %report.destination.display(),
        update = %report.update.display(),
        keys = report.destination_keys,
        written = report.written,
        "updated file"
    );
    if !report.missing_keys.is_empty() {
        tracing::warn!(
            destination = %report.destination.display(),
            count = report.missing_keys.len(),
            "keys missing from update, original values kept"
        );
    }
    if !report.destination_duplicates.is_empty() || !report.update_duplicates.is_empty() {
        tracing::warn!(
            destination = %report.destination.display(),
            destination_duplicates = report.destination_duplicates.len(),
            update_duplicates = report.update_duplicates.len(),
            "duplicated keys found"
        );
    }
}
