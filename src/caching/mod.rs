//! # Caching Module
//!
//! A generation evaluates the same chromosome several times: once while
//! ranking, again in every tournament it is drawn into, and again when the
//! run controller looks for the best individual of the new population.
//! Evaluation is deterministic, so its result can be memoized per chromosome.
//!
//! Two wrappers are provided: [`CachedChallenge`] shares one mutex-guarded map
//! across threads, and [`ThreadLocalCachedChallenge`] keeps one map per thread
//! for contention-free parallel scoring.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use thread_local::ThreadLocal;

use crate::evolution::Challenge;
use crate::phenotype::Phenotype;

/// A phenotype that can be used as a cache key.
///
/// Phenotypes that would have the same fitness score should have the same key.
pub trait CacheKey: Phenotype {
    type Key: Eq + Hash + Clone + Debug + Send + Sync;

    fn cache_key(&self) -> Self::Key;
}

/// A challenge wrapper that caches scores in a map shared by all threads.
#[derive(Debug, Clone)]
pub struct CachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    challenge: C,
    cache: Arc<Mutex<HashMap<P::Key, f64>>>,
    _marker: PhantomData<P>,
}

impl<P, C> CachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    pub fn new(challenge: C) -> Self {
        Self {
            challenge,
            cache: Arc::new(Mutex::new(HashMap::new())),
            _marker: PhantomData,
        }
    }

    /// Creates a cached challenge with a pre-populated cache.
    pub fn with_cache(challenge: C, cache: HashMap<P::Key, f64>) -> Self {
        Self {
            challenge,
            cache: Arc::new(Mutex::new(cache)),
            _marker: PhantomData,
        }
    }

    pub fn inner(&self) -> &C {
        &self.challenge
    }

    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    pub fn get_cache(&self) -> HashMap<P::Key, f64> {
        self.lock().clone()
    }

    // Scores are plain values, so a map left behind by a panicking thread is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<P::Key, f64>> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<P, C> Challenge<P> for CachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    fn score(&self, phenotype: &P) -> f64 {
        let key = phenotype.cache_key();

        if let Some(score) = self.lock().get(&key) {
            return *score;
        }

        // Evaluate outside the lock so parallel scoring is not serialized.
        let score = self.challenge.score(phenotype);
        self.lock().insert(key, score);

        score
    }
}

/// One score map per thread.
#[derive(Debug)]
pub struct ThreadLocalCache<P>
where
    P: CacheKey,
{
    cache: ThreadLocal<RefCell<HashMap<P::Key, f64>>>,
}

impl<P> ThreadLocalCache<P>
where
    P: CacheKey,
{
    pub fn new() -> Self {
        Self {
            cache: ThreadLocal::new(),
        }
    }

    pub fn get(&self, key: &P::Key) -> Option<f64> {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .and_then(|cache| cache.get(key).copied())
    }

    pub fn insert(&self, key: P::Key, value: f64) {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));
        if let Ok(mut cache) = cell.try_borrow_mut() {
            cache.insert(key, value);
        }
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }

    /// Number of entries cached by the current thread.
    pub fn len(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P> Default for ThreadLocalCache<P>
where
    P: CacheKey,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A challenge wrapper with a separate cache per thread.
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    challenge: C,
    cache: Arc<ThreadLocalCache<P>>,
    _marker: PhantomData<P>,
}

impl<P, C> ThreadLocalCachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    pub fn new(challenge: C) -> Self {
        Self {
            challenge,
            cache: Arc::new(ThreadLocalCache::new()),
            _marker: PhantomData,
        }
    }

    pub fn inner(&self) -> &C {
        &self.challenge
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<P, C> Challenge<P> for ThreadLocalCachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    fn score(&self, phenotype: &P) -> f64 {
        let key = phenotype.cache_key();

        if let Some(score) = self.cache.get(&key) {
            return score;
        }

        let score = self.challenge.score(phenotype);
        self.cache.insert(key, score);

        score
    }
}
