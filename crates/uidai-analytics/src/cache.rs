//! Memoization of parameterized query results.
//!
//! Datasets never change within a process, so entries are never invalidated.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uidai_core::error::Result;

use crate::models::{AgeDistribution, AllStates, MetricsSnapshot, TopStates, TrendSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Metrics,
    Trends,
    TopStates,
    AllStates,
    Demographics,
}

/// Cache key: query kind plus its numeric parameter, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: QueryKind,
    pub param: Option<i64>,
}

impl QueryKey {
    pub fn new(kind: QueryKind) -> Self {
        Self { kind, param: None }
    }

    pub fn with_param(kind: QueryKind, param: i64) -> Self {
        Self {
            kind,
            param: Some(param),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CachedValue {
    Metrics(MetricsSnapshot),
    Trends(TrendSeries),
    TopStates(TopStates),
    AllStates(AllStates),
    Demographics(AgeDistribution),
}

/// Result types that can live in the cache
pub trait Cacheable: Clone {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedValue {
                CachedValue::$variant(self)
            }

            fn from_cached(value: &CachedValue) -> Option<Self> {
                match value {
                    CachedValue::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(MetricsSnapshot, Metrics);
cacheable!(TrendSeries, Trends);
cacheable!(TopStates, TopStates);
cacheable!(AllStates, AllStates);
cacheable!(AgeDistribution, Demographics);

/// Thread-safe query cache; a disabled cache always recomputes
#[derive(Debug)]
pub struct QueryCache {
    enabled: bool,
    entries: RwLock<HashMap<QueryKey, CachedValue>>,
}

impl QueryCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached value for `key`, computing and storing it on a miss
    pub fn get_or_insert<T, F>(&self, key: QueryKey, compute: F) -> T
    where
        T: Cacheable,
        F: FnOnce() -> T,
    {
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }
        let value = compute();
        self.store(key, &value);
        value
    }

    /// Like [`get_or_insert`](Self::get_or_insert) for fallible queries.
    ///
    /// Errors from `compute` are returned and nothing is stored.
    pub fn get_or_try_insert<T, F>(&self, key: QueryKey, compute: F) -> Result<T>
    where
        T: Cacheable,
        F: FnOnce() -> Result<T>,
    {
        if let Some(hit) = self.lookup(&key) {
            return Ok(hit);
        }
        let value = compute()?;
        self.store(key, &value);
        Ok(value)
    }

    // Entries are immutable once written, so a poisoned lock still holds valid data

    fn lookup<T: Cacheable>(&self, key: &QueryKey) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let hit = entries.get(key).and_then(T::from_cached);
        if hit.is_some() {
            tracing::trace!(?key, "Query cache hit");
        }
        hit
    }

    fn store<T: Cacheable>(&self, key: QueryKey, value: &T) {
        if !self.enabled {
            return;
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.clone().into_cached());
        tracing::trace!(?key, "Query cache store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use uidai_core::error::UidaiError;

    fn distribution(total: u64) -> AgeDistribution {
        AgeDistribution {
            age_distribution: Vec::new(),
            total,
        }
    }

    #[test]
    fn test_second_lookup_hits_cache() {
        let cache = QueryCache::new(true);
        let calls = Cell::new(0);
        let key = QueryKey::new(QueryKind::Demographics);

        for _ in 0..3 {
            let value = cache
                .get_or_try_insert(key, || {
                    calls.set(calls.get() + 1);
                    Ok(distribution(7))
                })
                .unwrap();
            assert_eq!(value.total, 7);
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_params_are_separate_entries() {
        let cache = QueryCache::new(true);
        cache.get_or_insert(QueryKey::with_param(QueryKind::Demographics, 1), || distribution(1));
        let second =
            cache.get_or_insert(QueryKey::with_param(QueryKind::Demographics, 2), || distribution(2));

        assert_eq!(second.total, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = QueryCache::new(true);
        let key = QueryKey::with_param(QueryKind::Trends, 0);

        let result: Result<TrendSeries> =
            cache.get_or_try_insert(key, || Err(UidaiError::invalid_parameter("days", "zero")));
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_poisoned_lock_still_serves_entries() {
        let cache = QueryCache::new(true);
        cache.get_or_insert(QueryKey::new(QueryKind::Demographics), || distribution(5));

        std::thread::scope(|scope| {
            let result = scope
                .spawn(|| {
                    let _guard = cache.entries.write().unwrap();
                    panic!("writer died holding the lock");
                })
                .join();
            assert!(result.is_err());
        });
        assert!(cache.entries.is_poisoned());

        let hit = cache.get_or_insert(QueryKey::new(QueryKind::Demographics), || distribution(9));
        assert_eq!(hit.total, 5);
        cache.get_or_insert(QueryKey::with_param(QueryKind::Demographics, 1), || distribution(1));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_disabled_cache_always_recomputes() {
        let cache = QueryCache::new(false);
        let calls = Cell::new(0);
        let key = QueryKey::new(QueryKind::Demographics);

        for _ in 0..2 {
            cache.get_or_insert(key, || {
                calls.set(calls.get() + 1);
                distribution(0)
            });
        }

        assert_eq!(calls.get(), 2);
        assert!(cache.is_empty());
    }
}
