use crate::modules::provider::AnimeSource;
use crate::shared::errors::{AppError, AppResult};
use futures::future::{join_all, BoxFuture};
use tracing::warn;

/// One pending provider operation, tagged with the source it targets.
pub type SourceOp<'a, T> = (AnimeSource, BoxFuture<'a, AppResult<T>>);

/// Issues the same logical request to all applicable sources concurrently
/// and collects per-source outcomes without letting any failure abort the
/// batch.
pub struct FanOutCoordinator;

impl FanOutCoordinator {
    /// Run every operation concurrently and return one `(source, Result)`
    /// slot per input, in input order regardless of completion order.
    ///
    /// Zero applicable operations is a caller error: it means no per-source
    /// identifier was supplied, and no provider is contacted.
    pub async fn collect<T>(ops: Vec<SourceOp<'_, T>>) -> AppResult<Vec<(AnimeSource, AppResult<T>)>> {
        if ops.is_empty() {
            return Err(AppError::ValidationError(
                "At least one source ID must be provided".to_string(),
            ));
        }

        let outcomes = join_all(ops.into_iter().map(|(source, operation)| async move {
            let result = operation.await;
            if let Err(err) = &result {
                // Contained here: the failed source degrades to empty/unavailable
                warn!("Provider {} failed: {}", source, err);
            }
            (source, result)
        }))
        .await;

        Ok(outcomes)
    }
}
