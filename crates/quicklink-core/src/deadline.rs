//! Caller-supplied deadlines for store operations.
//!
//! Dropping a store future already aborts the in-flight query; these helpers
//! turn an elapsed deadline into [`StoreError::Cancelled`] so callers get a
//! typed error instead of a bare timeout.

use crate::error::{Result, StoreError};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Runs `fut` until `deadline`, failing with `Cancelled { op }` once it passes.
pub async fn with_deadline<T, F>(op: &'static str, deadline: Instant, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout_at(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Cancelled { op }),
    }
}

/// Runs `fut` for at most `timeout`, failing with `Cancelled { op }` afterwards.
pub async fn with_timeout<T, F>(op: &'static str, timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    with_deadline(op, Instant::now() + timeout, fut).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_before_deadline() {
        let value = with_timeout("get", Duration::from_secs(5), async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn inner_error_passes_through() {
        let err = with_timeout::<(), _>("get", Duration::from_secs(5), async {
            Err(StoreError::NotFound {
                op: "get",
                alias: "ex".to_string(),
            })
        })
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn elapsed_deadline_is_cancelled() {
        let err = with_timeout("save", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Cancelled { op: "save" }));
    }

    #[tokio::test]
    async fn past_deadline_cancels_pending_work() {
        let deadline = Instant::now();
        let err = with_deadline("delete", deadline, std::future::pending::<Result<()>>())
            .await
            .unwrap_err();
        assert_eq!(err.op(), "delete");
    }
}
