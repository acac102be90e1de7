use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

/// A named rayon thread pool with a bounded admission queue.
///
/// Submitting beyond `queue_capacity` in-flight tasks runs the task on the
/// caller's thread instead of queueing it further (SPEC_FULL §5's
/// "caller-runs back-pressure on overflow"), so a saturated pool degrades
/// gracefully to synchronous execution rather than building unbounded
/// backlog.
pub struct ExecutionPool {
    name: &'static str,
    pool: rayon::ThreadPool,
    queue_capacity: usize,
    in_flight: Arc<AtomicUsize>,
}

impl ExecutionPool {
    pub fn new(name: &'static str, num_threads: usize, queue_capacity: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .thread_name(move |i| format!("cortex-{name}-{i}"))
            .build()
            .expect("failed to build rayon thread pool");
        Self {
            name,
            pool,
            queue_capacity,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            name: self.name,
            thread_count: self.thread_count(),
            in_flight: self.in_flight(),
            queue_capacity: self.queue_capacity,
        }
    }

    /// Run `task` on the pool, blocking the caller until it completes.
    ///
    /// If the pool already has `queue_capacity` tasks in flight, `task` runs
    /// directly on the calling thread instead of being queued.
    pub fn submit<F, R>(&self, task: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        let current = self.in_flight.fetch_add(1, Ordering::AcqRel);
        if current >= self.queue_capacity {
            debug!(pool = self.name, in_flight = current, "caller-runs backpressure");
            self.in_flight.fetch_sub(1, Ordering::AcqRel);
            return task();
        }
        let guard = InFlightGuard {
            counter: self.in_flight.clone(),
        };
        let result = self.pool.install(move || {
            let result = task();
            drop(guard);
            result
        });
        result
    }
}

/// Point-in-time occupancy snapshot of one pool, folded into
/// `ExecutionManager::stats()` (SPEC_FULL §2 "execution-manager
/// utilization").
#[derive(Debug, Clone, Copy)]
pub struct PoolStats {
    pub name: &'static str,
    pub thread_count: usize,
    pub in_flight: usize,
    pub queue_capacity: usize,
}

impl PoolStats {
    /// Fraction of `queue_capacity` currently occupied, clamped to `[0, 1]`
    /// even though `in_flight` can briefly exceed `queue_capacity` once
    /// caller-runs backpressure kicks in.
    pub fn utilization(&self) -> f64 {
        if self.queue_capacity == 0 {
            return 0.0;
        }
        (self.in_flight as f64 / self.queue_capacity as f64).min(1.0)
    }
}

struct InFlightGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn submit_runs_task_and_returns_result() {
        let pool = ExecutionPool::new("test", 2, 8);
        let result = pool.submit(|| 2 + 2);
        assert_eq!(result, 4);
    }

    #[test]
    fn in_flight_returns_to_zero_after_completion() {
        let pool = ExecutionPool::new("test", 2, 8);
        pool.submit(|| 1);
        assert_eq!(pool.in_flight(), 0);
    }

    #[test]
    fn many_sequential_submits_complete() {
        let pool = ExecutionPool::new("test", 4, 8);
        let counter = AtomicU32::new(0);
        for _ in 0..100 {
            pool.submit(|| {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
        assert_eq!(counter.load(Ordering::Relaxed), 100);
    }
}
