use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cortex_core::errors::{CortexError, CortexResult};
use tokio::sync::{Notify, Semaphore, SemaphorePermit};

/// Gates every externally visible pipeline operation behind a permit pool of
/// size `max_concurrent_operations` (spec.md §4.1: "operations beyond the
/// limit are queued FIFO and admitted as permits free").
///
/// Also tracks in-flight operation count so `shutdown` can wait for drain
/// (spec.md §4.1 Shutdown, SPEC_FULL §5 ordering guarantees).
pub struct PermitPool {
    semaphore: Semaphore,
    in_flight: AtomicUsize,
    shut_down: AtomicBool,
    drained: Notify,
}

/// A held permit; dropping it releases the semaphore slot and decrements
/// the in-flight counter, notifying any pending shutdown wait if it reaches
/// zero.
pub struct OperationGuard<'a> {
    _permit: SemaphorePermit<'a>,
    pool: &'a PermitPool,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        if self.pool.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.pool.drained.notify_waiters();
        }
    }
}

impl PermitPool {
    pub fn new(max_concurrent_operations: usize) -> Self {
        Self {
            semaphore: Semaphore::new(max_concurrent_operations.max(1)),
            in_flight: AtomicUsize::new(0),
            shut_down: AtomicBool::new(false),
            drained: Notify::new(),
        }
    }

    /// Acquire a permit for `operation`. Fails with `SHUTDOWN` immediately
    /// if shutdown has begun, without joining the FIFO queue.
    pub async fn acquire(&self, operation: &str) -> CortexResult<OperationGuard<'_>> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(CortexError::shutdown(operation));
        }
        let permit = self
            .semaphore
            .acquire()
            .await
            .expect("permit semaphore is never closed");
        if self.shut_down.load(Ordering::Acquire) {
            drop(permit);
            return Err(CortexError::shutdown(operation));
        }
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        Ok(OperationGuard { _permit: permit, pool: self })
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    /// Stop accepting new operations and wait (bounded by `timeout`) for
    /// in-flight operations to drain.
    pub async fn begin_shutdown(&self, timeout: Duration) {
        self.shut_down.store(true, Ordering::Release);
        if self.in_flight() == 0 {
            return;
        }
        let wait = self.drained.notified();
        if tokio::time::timeout(timeout, wait).await.is_err() {
            tracing::warn!(
                in_flight = self.in_flight(),
                "shutdown drain timed out with operations still in flight"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_then_drop_returns_to_zero_in_flight() {
        let pool = PermitPool::new(2);
        {
            let _guard = pool.acquire("test").await.unwrap();
            assert_eq!(pool.in_flight(), 1);
        }
        assert_eq!(pool.in_flight(), 0);
    }

    #[tokio::test]
    async fn acquire_after_shutdown_fails() {
        let pool = PermitPool::new(2);
        pool.begin_shutdown(Duration::from_millis(10)).await;
        let err = pool.acquire("create").await.unwrap_err();
        assert_eq!(err.kind(), cortex_core::errors::ErrorKind::Shutdown);
    }

    #[tokio::test]
    async fn shutdown_waits_for_in_flight_to_drain() {
        let pool = Arc::new(PermitPool::new(1));
        let guard_pool = pool.clone();
        let guard = guard_pool.acquire("create").await.unwrap();

        let shutdown_pool = pool.clone();
        let shutdown_task = tokio::spawn(async move {
            shutdown_pool.begin_shutdown(Duration::from_secs(1)).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(guard);
        shutdown_task.await.unwrap();
        assert_eq!(pool.in_flight(), 0);
    }
}
