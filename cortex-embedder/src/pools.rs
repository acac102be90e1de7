use std::collections::HashMap;

use cortex_cache::ObjectPool;

pub fn vector_pool(dimension: usize, capacity: usize) -> ObjectPool<Vec<f32>> {
    ObjectPool::new(
        capacity,
        move || vec![0.0f32; dimension],
        |buf| {
            if buf.len() != dimension {
                return false;
            }
            buf.iter_mut().for_each(|x| *x = 0.0);
            true
        },
    )
}

pub fn term_freq_pool(capacity: usize) -> ObjectPool<HashMap<String, f64>> {
    ObjectPool::new(
        capacity,
        HashMap::new,
        |map| {
            map.clear();
            true
        },
    )
}
