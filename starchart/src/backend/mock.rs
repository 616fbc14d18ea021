//! In-memory mock backends for testing without network access.
//!
//! Each mock serves canned records from a map and counts how often each
//! operation is invoked, so tests can assert single-flight behavior and
//! fallback order.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::Location;
use crate::error::ResolveError;

use super::{
    CatalogActivity, CatalogSystem, CatalogSystems, CommanderRecord, NearbySystem,
    ProceduralPositions, ProceduralSystem, SearchCenter,
};

/// Shared invocation counter handed out to tests.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    /// How many calls have been recorded.
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Mock systems catalog serving canned records.
#[derive(Clone, Default)]
pub struct MockCatalog {
    by_name: HashMap<String, Result<CatalogSystem, ResolveError>>,
    by_id64: HashMap<u64, Result<CatalogSystem, ResolveError>>,
    nearby: Vec<NearbySystem>,
    name_calls: CallCounter,
    id64_calls: CallCounter,
    delay: Option<Duration>,
}

impl MockCatalog {
    /// An empty catalog; every lookup is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system, keyed by its name and (if present) its id64.
    pub fn with_system(mut self, system: CatalogSystem) -> Self {
        if let Some(id64) = system.id64 {
            self.by_id64.insert(id64, Ok(system.clone()));
        }
        self.by_name.insert(system.name.clone(), Ok(system));
        self
    }

    /// Make a name lookup fail with the given error.
    pub fn with_name_failure(mut self, name: &str, error: ResolveError) -> Self {
        self.by_name.insert(name.to_owned(), Err(error));
        self
    }

    /// Serve the given results from neighborhood searches.
    pub fn with_nearby(mut self, nearby: Vec<NearbySystem>) -> Self {
        self.nearby = nearby;
        self
    }

    /// Delay every response, widening the single-flight window.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Counter for name lookups.
    pub fn name_calls(&self) -> CallCounter {
        self.name_calls.clone()
    }

    /// Counter for id64 lookups.
    pub fn id64_calls(&self) -> CallCounter {
        self.id64_calls.clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl CatalogSystems for MockCatalog {
    async fn find_by_name(&self, name: &str) -> Result<CatalogSystem, ResolveError> {
        self.name_calls.bump();
        self.pause().await;
        self.by_name
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(ResolveError::not_found(name)))
    }

    async fn find_by_id64(&self, id64: u64) -> Result<CatalogSystem, ResolveError> {
        self.id64_calls.bump();
        self.pause().await;
        self.by_id64
            .get(&id64)
            .cloned()
            .unwrap_or_else(|| Err(ResolveError::not_found(id64.to_string())))
    }

    async fn search_partial(&self, prefix: &str) -> Result<Vec<CatalogSystem>, ResolveError> {
        self.pause().await;
        let matches: Vec<_> = self
            .by_name
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .filter_map(|(_, result)| result.as_ref().ok().cloned())
            .collect();
        if matches.is_empty() {
            return Err(ResolveError::not_found(prefix));
        }
        Ok(matches)
    }

    async fn find_in_sphere(
        &self,
        center: &SearchCenter,
        min_radius: f64,
        radius: f64,
    ) -> Result<Vec<NearbySystem>, ResolveError> {
        self.pause().await;
        let matches: Vec<_> = self
            .nearby
            .iter()
            .filter(|n| n.distance >= min_radius && n.distance <= radius)
            .cloned()
            .collect();
        if matches.is_empty() {
            return Err(ResolveError::not_found(center.to_string()));
        }
        Ok(matches)
    }

    async fn find_in_cube(
        &self,
        center: &SearchCenter,
        size: f64,
    ) -> Result<Vec<NearbySystem>, ResolveError> {
        self.pause().await;
        let matches: Vec<_> = self
            .nearby
            .iter()
            .filter(|n| n.distance <= size / 2.0)
            .cloned()
            .collect();
        if matches.is_empty() {
            return Err(ResolveError::not_found(center.to_string()));
        }
        Ok(matches)
    }
}

/// Mock activity log serving canned commander records.
#[derive(Clone, Default)]
pub struct MockActivity {
    commanders: HashMap<String, Result<CommanderRecord, ResolveError>>,
    calls: CallCounter,
}

impl MockActivity {
    /// An empty log; every lookup is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commander record.
    pub fn with_commander(mut self, name: &str, record: CommanderRecord) -> Self {
        self.commanders.insert(name.to_owned(), Ok(record));
        self
    }

    /// Make a commander lookup fail with the given error.
    pub fn with_failure(mut self, name: &str, error: ResolveError) -> Self {
        self.commanders.insert(name.to_owned(), Err(error));
        self
    }

    /// Counter for commander lookups.
    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

impl CatalogActivity for MockActivity {
    async fn find_commander(
        &self,
        name: &str,
        _api_key: Option<&str>,
    ) -> Result<CommanderRecord, ResolveError> {
        self.calls.bump();
        self.commanders
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(ResolveError::not_found(name)))
    }
}

/// Mock procedural calculator serving canned positions.
#[derive(Clone, Default)]
pub struct MockProcedural {
    systems: HashMap<String, ProceduralSystem>,
    calls: CallCounter,
}

impl MockProcedural {
    /// An empty calculator; every lookup is `InvalidKey`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a computable system position.
    pub fn with_system(mut self, name: &str, location: Location) -> Self {
        self.systems.insert(
            name.to_owned(),
            ProceduralSystem {
                name: name.to_owned(),
                location,
            },
        );
        self
    }

    /// Counter for position lookups.
    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

impl ProceduralPositions for MockProcedural {
    async fn find_by_name(&self, name: &str) -> Result<ProceduralSystem, ResolveError> {
        self.calls.bump();
        self.systems.get(name).cloned().ok_or_else(|| {
            ResolveError::invalid_key(name, "name does not decode to a procedural position")
        })
    }
}
