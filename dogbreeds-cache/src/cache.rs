//! In-memory memoization for sub-breed lookups.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use dogbreeds_core::error::{BreedError, Result};
use dogbreeds_core::normalize::normalize_breed;
use dogbreeds_core::traits::{BreedFetcher, SubBreeds};

/// Caching decorator over a [`BreedFetcher`].
///
/// Lookups are keyed by the normalized breed name (see [`normalize_breed`]),
/// and the wrapped fetcher is always called with that normalized key.
///
/// # Caching rules
///
/// - Successful results are stored once and never updated or evicted.
/// - Failures are passed through untouched and never cached, so a failing
///   breed is retried against the wrapped fetcher on every lookup.
/// - Every call to the wrapped fetcher bumps [`calls_made`](Self::calls_made),
///   whatever its outcome. Cache hits do not.
///
/// # Thread Safety
///
/// The check/fetch/store sequence runs under a per-breed lock: concurrent
/// lookups of the same breed share one upstream call, while lookups of
/// different breeds never wait on each other.
pub struct CachingBreedFetcher {
    delegate: Arc<dyn BreedFetcher>,
    /// Normalized breed → read-only sub-breed list
    entries: RwLock<HashMap<String, SubBreeds>>,
    /// Normalized breed → lock held while that breed is being fetched
    key_locks: DashMap<String, Arc<Mutex<()>>>,
    calls_made: AtomicU64,
}

impl CachingBreedFetcher {
    /// Creates a cache in front of `delegate`.
    ///
    /// Fails with [`BreedError::InvalidArgument`] when no delegate is given.
    pub fn new(delegate: Option<Arc<dyn BreedFetcher>>) -> Result<Self> {
        let delegate = delegate.ok_or_else(|| {
            BreedError::InvalidArgument("underlying BreedFetcher cannot be absent".into())
        })?;
        Ok(Self::from_shared(delegate))
    }

    /// Creates a cache that owns `delegate`.
    pub fn wrap(delegate: impl BreedFetcher + 'static) -> Self {
        Self::from_shared(Arc::new(delegate))
    }

    fn from_shared(delegate: Arc<dyn BreedFetcher>) -> Self {
        Self {
            delegate,
            entries: RwLock::new(HashMap::new()),
            key_locks: DashMap::new(),
            calls_made: AtomicU64::new(0),
        }
    }

    /// Looks up the sub-breeds of `breed`, consulting the cache first.
    ///
    /// An absent name is looked up as the empty string.
    #[instrument(skip(self))]
    pub async fn get(&self, breed: Option<&str>) -> Result<SubBreeds> {
        let key = normalize_breed(breed);

        if let Some(hit) = self.cached(&key) {
            debug!(breed = %key, "Cache hit");
            return Ok(hit);
        }

        let key_lock = self.key_lock(&key);
        let _guard = key_lock.lock.lock().await;
        self.fetch_and_store(&key).await
    }

    /// Number of calls made to the wrapped fetcher so far.
    pub fn calls_made(&self) -> u64 {
        self.calls_made.load(Ordering::SeqCst)
    }

    /// Returns true if `breed` has a cached result.
    pub fn contains(&self, breed: Option<&str>) -> bool {
        self.entries.read().contains_key(&normalize_breed(breed))
    }

    /// Returns the number of cached breeds.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cached_breeds: self.len(),
            calls_made: self.calls_made(),
        }
    }

    fn cached(&self, key: &str) -> Option<SubBreeds> {
        self.entries.read().get(key).cloned()
    }

    /// Must be called with the key lock for `key` held.
    async fn fetch_and_store(&self, key: &str) -> Result<SubBreeds> {
        // A concurrent lookup may have filled the entry while we waited.
        if let Some(hit) = self.cached(key) {
            debug!(breed = %key, "Cache hit after wait");
            return Ok(hit);
        }

        let call = self.calls_made.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(breed = %key, call, "Cache miss, calling delegate");

        let subs: SubBreeds = match self.delegate.sub_breeds(key).await {
            Ok(subs) => subs.into(),
            Err(err) => {
                debug!(breed = %key, error = %err, "Delegate failed, not caching");
                return Err(err);
            }
        };

        let stored = Arc::clone(
            self.entries
                .write()
                .entry(key.to_string())
                .or_insert(subs),
        );
        info!(breed = %key, sub_breeds = stored.len(), "Cached sub-breeds");

        Ok(stored)
    }

    fn key_lock(&self, key: &str) -> KeyLock<'_> {
        let lock = Arc::clone(&*self.key_locks.entry(key.to_string()).or_default());
        KeyLock {
            locks: &self.key_locks,
            key: key.to_string(),
            lock,
        }
    }
}

/// Handle on a per-breed lock; drops the map entry once no other lookup
/// holds it, including when the lookup future is abandoned.
struct KeyLock<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    key: String,
    lock: Arc<Mutex<()>>,
}

impl Drop for KeyLock<'_> {
    fn drop(&mut self) {
        // One reference is the map's, one is ours.
        self.locks.remove_if(&self.key, |_, lock| {
            Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) <= 2
        });
    }
}

#[async_trait]
impl BreedFetcher for CachingBreedFetcher {
    async fn sub_breeds(&self, breed: &str) -> Result<Vec<String>> {
        self.get(Some(breed)).await.map(|subs| subs.to_vec())
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Breeds with a cached result
    pub cached_breeds: usize,
    /// Calls made to the wrapped fetcher
    pub calls_made: u64,
}
