use std::collections::HashMap;

const CAPACITY: usize = 200;

fn cache_key(z: usize, slab_half_size: usize) -> String {
    format!("{z}_{slab_half_size}")
}

/// Slice-result cache keyed by `"z_slab"`. Insertion-order eviction, capacity 200, same FIFO
/// shape as [`mpr_sampler::WindowLevelCache`].
#[derive(Debug, Default)]
pub struct SliceCache {
    order: Vec<String>,
    entries: HashMap<String, Vec<i16>>,
}

impl SliceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, z: usize, slab_half_size: usize) -> Option<&[i16]> {
        self.entries.get(&cache_key(z, slab_half_size)).map(Vec::as_slice)
    }

    pub fn contains(&self, z: usize, slab_half_size: usize) -> bool {
        self.entries.contains_key(&cache_key(z, slab_half_size))
    }

    pub fn insert(&mut self, z: usize, slab_half_size: usize, bytes: Vec<i16>) {
        let key = cache_key(z, slab_half_size);
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.insert(key, bytes);
        while self.order.len() > CAPACITY {
            let evicted = self.order.remove(0);
            self.entries.remove(&evicted);
        }
    }

    /// Clears the cache on volume change.
    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_entry() {
        let mut cache = SliceCache::new();
        cache.insert(1, 1, vec![5, 5, 5, 5]);
        assert_eq!(cache.get(1, 1), Some(&[5, 5, 5, 5][..]));
    }

    #[test]
    fn distinguishes_by_slab_half_size() {
        let mut cache = SliceCache::new();
        cache.insert(1, 0, vec![1]);
        cache.insert(1, 1, vec![2]);
        assert_eq!(cache.get(1, 0), Some(&[1][..]));
        assert_eq!(cache.get(1, 1), Some(&[2][..]));
    }

    #[test]
    fn evicts_fifo_beyond_capacity() {
        let mut cache = SliceCache::new();
        for z in 0..CAPACITY {
            cache.insert(z, 0, vec![z as i16]);
        }
        assert!(cache.contains(0, 0));
        cache.insert(CAPACITY, 0, vec![CAPACITY as i16]);
        assert!(!cache.contains(0, 0));
        assert!(cache.contains(1, 0));
        assert!(cache.contains(CAPACITY, 0));
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = SliceCache::new();
        cache.insert(0, 0, vec![1]);
        cache.clear();
        assert!(!cache.contains(0, 0));
    }
}
