// Concurrent comparison: one blocking worker per condition.
//
// Extraction and counting are CPU-bound, so each condition runs on
// `spawn_blocking`. `buffered` (not `buffer_unordered`) keeps results in
// condition order, which makes the reduction identical to the sequential
// engine. Workers poll the shared `CancelToken`; cancelling makes the whole
// comparison return `AnalysisError::Cancelled`.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::compare::engine::{ComparisonEngine, ComparisonResult, NamedCondition};
use crate::corpus::CorpusSources;
use crate::error::AnalysisError;
use crate::text::traits::TextTokenizer;

use super::analysis::AnalysisResult;
use super::cancel::CancelToken;

/// Run all conditions with at most `concurrency` workers in flight.
pub async fn compare_concurrent<T>(
    engine: Arc<ComparisonEngine<T>>,
    sources: Arc<CorpusSources>,
    conditions: Vec<NamedCondition>,
    top_n: usize,
    concurrency: usize,
    cancel: CancelToken,
) -> Result<ComparisonResult, AnalysisError>
where
    T: TextTokenizer + 'static,
{
    ComparisonEngine::<T>::validate(&conditions, top_n)?;

    let concurrency = concurrency.max(1);
    info!(
        conditions = conditions.len(),
        concurrency, "Running comparison conditions concurrently"
    );

    let runs: Vec<Result<AnalysisResult, AnalysisError>> =
        stream::iter(conditions.iter().cloned().map(|named| {
            let engine = Arc::clone(&engine);
            let sources = Arc::clone(&sources);
            let cancel = cancel.clone();
            async move {
                debug!(condition = %named.name, "Worker started");
                tokio::task::spawn_blocking(move || {
                    engine
                        .analyzer()
                        .analyze_with_cancel(&sources, &named.condition, top_n, &cancel)
                })
                .await?
            }
        }))
        .buffered(concurrency)
        .collect()
        .await;

    let results = runs.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(ComparisonResult::assemble(&conditions, results))
}
