//! Per-call storage deadlines.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::domain::{DomainError, InfraErrorKind, StorageOp};

/// Run one storage call, failing it with a `Timeout` if it outlives `limit`.
///
/// `what` names the call in the error detail, e.g. `"Failed to load round"`.
pub async fn bounded<T, F>(
    limit: Duration,
    op: StorageOp,
    what: &str,
    fut: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            let limit_ms = limit.as_millis();
            warn!(?op, limit_ms, call = what, "Storage call timed out");
            Err(DomainError::storage(
                op,
                InfraErrorKind::Timeout,
                format!("{what}: timed out after {limit_ms}ms"),
            ))
        }
    }
}
