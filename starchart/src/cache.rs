//! Identity cache for resolved star systems.
//!
//! Two independent caches, keyed by name and by id64. Entries live for the
//! process lifetime: no TTL, no eviction, and once set they are never
//! overwritten. The same physical system resolved by name and later by
//! id64 occupies two entries; unifying them is an explicitly open product
//! decision, not a bug.
//!
//! Resolution goes through `moka`'s single-flight path: concurrent callers
//! for one unresolved key share exactly one resolution, and a failed
//! resolution is handed to all waiters without being cached, so the next
//! call retries the backend.

use std::future::Future;
use std::sync::Arc;

use moka::future::Cache as MokaCache;

use crate::domain::StarSystem;
use crate::error::ResolveError;

/// Cache of resolved systems, keyed independently by name and by id64.
///
/// An explicit object owned by the resolver — construct one per process
/// (or per test, for isolation). Dropping it is the only teardown.
pub struct SystemCache {
    by_name: MokaCache<String, Arc<StarSystem>>,
    by_id64: MokaCache<u64, Arc<StarSystem>>,
}

impl SystemCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            by_name: MokaCache::builder().build(),
            by_id64: MokaCache::builder().build(),
        }
    }

    /// Get the entry for a name, resolving it with `init` on a miss.
    ///
    /// Single-flight: concurrent calls for the same missing name run
    /// exactly one `init`; all callers get the same record or the same
    /// (uncached) failure.
    pub async fn get_or_resolve_by_name<F>(
        &self,
        name: &str,
        init: F,
    ) -> Result<Arc<StarSystem>, ResolveError>
    where
        F: Future<Output = Result<Arc<StarSystem>, ResolveError>>,
    {
        self.by_name
            .try_get_with(name.to_owned(), init)
            .await
            .map_err(shared_failure)
    }

    /// Get the entry for an id64, resolving it with `init` on a miss.
    pub async fn get_or_resolve_by_id64<F>(
        &self,
        id64: u64,
        init: F,
    ) -> Result<Arc<StarSystem>, ResolveError>
    where
        F: Future<Output = Result<Arc<StarSystem>, ResolveError>>,
    {
        self.by_id64
            .try_get_with(id64, init)
            .await
            .map_err(shared_failure)
    }

    /// Number of name-keyed entries (for monitoring; may lag).
    pub fn name_entry_count(&self) -> u64 {
        self.by_name.entry_count()
    }

    /// Number of id64-keyed entries (for monitoring; may lag).
    pub fn id64_entry_count(&self) -> u64 {
        self.by_id64.entry_count()
    }
}

impl Default for SystemCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Unwrap the `Arc` moka puts around a shared init failure.
fn shared_failure(err: Arc<ResolveError>) -> ResolveError {
    err.as_ref().clone()
}
