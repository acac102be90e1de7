use crossbeam_queue::ArrayQueue;

/// A bounded, lock-free object pool (spec.md §4.6/§9: "Object pools are
/// lock-free MPMC queues; over-capacity releases discard").
///
/// `reset` is applied to a returned object before it's made available for
/// reuse; if it returns `false` the object is dropped instead of pooled,
/// per spec.md §4.6 ("if reset fails the buffer is discarded, not pooled").
pub struct ObjectPool<T> {
    queue: ArrayQueue<T>,
    factory: Box<dyn Fn() -> T + Send + Sync>,
    reset: Box<dyn Fn(&mut T) -> bool + Send + Sync>,
}

impl<T> ObjectPool<T> {
    pub fn new(
        capacity: usize,
        factory: impl Fn() -> T + Send + Sync + 'static,
        reset: impl Fn(&mut T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            queue: ArrayQueue::new(capacity),
            factory: Box::new(factory),
            reset: Box::new(reset),
        }
    }

    /// Take a pooled object, or construct a fresh one if the pool is empty.
    pub fn acquire(&self) -> T {
        self.queue.pop().unwrap_or_else(|| (self.factory)())
    }

    /// Return an object to the pool. Resets it first; if reset fails, or
    /// the pool is at capacity, the object is simply dropped.
    pub fn release(&self, mut value: T) {
        if !(self.reset)(&mut value) {
            return;
        }
        let _ = self.queue.push(value);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_builds_fresh_when_empty() {
        let pool: ObjectPool<Vec<f32>> = ObjectPool::new(
            4,
            || Vec::with_capacity(8),
            |v| {
                v.clear();
                true
            },
        );
        let v = pool.acquire();
        assert!(v.is_empty());
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn release_then_acquire_reuses_buffer() {
        let pool: ObjectPool<Vec<f32>> = ObjectPool::new(
            4,
            || Vec::with_capacity(8),
            |v| {
                v.clear();
                true
            },
        );
        let mut v = pool.acquire();
        v.push(1.0);
        pool.release(v);
        assert_eq!(pool.len(), 1);
        let reused = pool.acquire();
        assert!(reused.is_empty());
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn failed_reset_discards_object() {
        let pool: ObjectPool<Vec<f32>> = ObjectPool::new(4, Vec::new, |_| false);
        pool.release(vec![1.0, 2.0]);
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn over_capacity_release_is_discarded() {
        let pool: ObjectPool<i32> = ObjectPool::new(1, || 0, |_| true);
        pool.release(1);
        pool.release(2);
        assert_eq!(pool.len(), 1);
    }
}
