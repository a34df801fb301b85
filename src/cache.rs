//! Memoising wrapper for travel estimators.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::traits::{Coordinate, TravelEstimate, TravelEstimator};

type Key = (u64, u64, u64, u64);

/// Caches estimates per ordered coordinate pair, keyed on the exact bit
/// pattern of the coordinates.
pub struct CachingEstimator<E> {
    inner: E,
    entries: Mutex<HashMap<Key, TravelEstimate>>,
}

impl<E: TravelEstimator> CachingEstimator<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn key(from: Coordinate, to: Coordinate) -> Key {
        (
            from.lat.to_bits(),
            from.lng.to_bits(),
            to.lat.to_bits(),
            to.lng.to_bits(),
        )
    }
}

impl<E: TravelEstimator> TravelEstimator for CachingEstimator<E> {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        let key = Self::key(from, to);
        if let Some(hit) = self.entries.lock().get(&key) {
            return *hit;
        }

        // Lock is released while the inner estimator runs; a racing miss on
        // the same key just computes it twice.
        let estimate = self.inner.estimate(from, to);
        self.entries.lock().insert(key, estimate);
        estimate
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counting {
        calls: AtomicUsize,
    }

    impl TravelEstimator for Counting {
        fn estimate(&self, _from: Coordinate, _to: Coordinate) -> TravelEstimate {
            self.calls.fetch_add(1, Ordering::SeqCst);
            TravelEstimate::new(7, 3.5)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_repeated_lookup_hits_cache() {
        let cache = CachingEstimator::new(Counting {
            calls: AtomicUsize::new(0),
        });
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(3.0, 4.0);

        assert_eq!(cache.estimate(a, b), TravelEstimate::new(7, 3.5));
        assert_eq!(cache.estimate(a, b), TravelEstimate::new(7, 3.5));
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_direction_is_part_of_key() {
        let cache = CachingEstimator::new(Counting {
            calls: AtomicUsize::new(0),
        });
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(3.0, 4.0);

        cache.estimate(a, b);
        cache.estimate(b, a);
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.name(), "counting");
    }
}
