use crate::{
    caching::{CacheKey, CachedChallenge, ThreadLocalCachedChallenge},
    evolution::{CacheType, Challenge},
    phenotype::Phenotype,
};

/// A challenge usable from the parallel scoring path.
pub type SharedChallenge<P> = Box<dyn Challenge<P> + Send + Sync>;

/// Wraps a challenge with the caching selected by [`CacheType`].
///
/// # Example
///
/// ```
/// use lsystem_evolver::chromosome::Chromosome;
/// use lsystem_evolver::evolution::{caching_challenge::CachingChallenge, CacheType, Challenge};
/// use lsystem_evolver::fitness::GrammarChallenge;
/// use lsystem_evolver::symbol::parse_symbols;
///
/// let challenge = GrammarChallenge::new(parse_symbols("G").unwrap(), 1);
/// let cached = challenge.with_cache(CacheType::Global);
///
/// let candidate = Chromosome::from_rule("F[+G][-G][+G][-G]").unwrap();
/// assert_eq!(cached.score(&candidate), challenge.score(&candidate));
/// ```
pub trait CachingChallenge<P: Phenotype>: Challenge<P> + Sized + Clone {
    fn with_global_cache(&self) -> CachedChallenge<P, Self>
    where
        P: CacheKey;

    fn with_thread_local_cache(&self) -> ThreadLocalCachedChallenge<P, Self>
    where
        P: CacheKey;

    /// Boxes this challenge, wrapped in the requested cache.
    fn with_cache(&self, cache_type: CacheType) -> SharedChallenge<P>
    where
        P: CacheKey + 'static,
        Self: Send + Sync + 'static,
    {
        match cache_type {
            CacheType::None => Box::new(self.clone()),
            CacheType::Global => Box::new(self.with_global_cache()),
            CacheType::ThreadLocal => Box::new(self.with_thread_local_cache()),
        }
    }
}

impl<P, C> CachingChallenge<P> for C
where
    P: Phenotype,
    C: Challenge<P> + Clone,
{
    fn with_global_cache(&self) -> CachedChallenge<P, Self>
    where
        P: CacheKey,
    {
        CachedChallenge::new(self.clone())
    }

    fn with_thread_local_cache(&self) -> ThreadLocalCachedChallenge<P, Self>
    where
        P: CacheKey,
    {
        ThreadLocalCachedChallenge::new(self.clone())
    }
}
