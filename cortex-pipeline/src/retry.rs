use std::future::Future;
use std::time::Duration;

use cortex_core::errors::CortexResult;

/// Retry a fallible async operation up to `max_retries` times on
/// `BACKEND_TRANSIENT` failures, with linear backoff `retry_delay_ms *
/// (attempt + 1)` (spec.md §4.1). Any other error kind is surfaced
/// immediately without retrying.
pub async fn retry_with_backoff<F, Fut, T>(
    operation: &str,
    max_retries: u32,
    retry_delay_ms: u64,
    mut attempt_fn: F,
) -> CortexResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CortexResult<T>>,
{
    let mut attempt = 0;
    loop {
        match attempt_fn().await {
            Ok(value) => return Ok(value),
            Err(err) if err.retryable() && attempt < max_retries => {
                let delay = Duration::from_millis(retry_delay_ms * (attempt as u64 + 1));
                tracing::debug!(operation, attempt, delay_ms = delay.as_millis() as u64, error = %err, "retrying transient failure");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::errors::CortexError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_without_retry_on_first_try() {
        let calls = AtomicU32::new(0);
        let result: CortexResult<i32> = retry_with_backoff("test", 3, 1, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_up_to_the_limit() {
        let calls = AtomicU32::new(0);
        let result: CortexResult<i32> = retry_with_backoff("test", 2, 1, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(CortexError::BackendTransient {
                        operation: "test".to_string(),
                        reason: "timeout".to_string(),
                    })
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn terminal_error_is_surfaced_without_retry() {
        let calls = AtomicU32::new(0);
        let result: CortexResult<i32> = retry_with_backoff("test", 3, 1, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(CortexError::invalid_input("test", "bad input")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausting_retries_surfaces_the_last_error() {
        let calls = AtomicU32::new(0);
        let result: CortexResult<i32> = retry_with_backoff("test", 1, 1, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(CortexError::BackendTransient {
                    operation: "test".to_string(),
                    reason: "still down".to_string(),
                })
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
