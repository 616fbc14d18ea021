//! Resolution strategy tying the backends and the identity cache together.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::{
    CatalogActivity, CatalogSystem, CatalogSystems, NearbySystem, ProceduralPositions,
    ProceduralSystem, SearchCenter,
};
use crate::cache::SystemCache;
use crate::domain::{Commander, Location, ProcGenName, StarSystem};
use crate::error::ResolveError;

/// Resolves star systems and commanders against the configured backends.
///
/// Lookup order for a name: the curated catalog first; if the catalog has
/// no record *and* the name is procedurally shaped, the procedural
/// calculator computes an approximate position. Any other catalog failure
/// surfaces unchanged — the fallback never masks a more severe failure.
/// id64 lookups consult the catalog only, since procedural positions have
/// no id64 concept.
///
/// Successful system resolutions are cached for the process lifetime;
/// failures are shared with concurrent waiters but never cached.
pub struct Resolver<C, A, P> {
    catalog: C,
    activity: A,
    procedural: P,
    cache: SystemCache,
}

impl<C, A, P> Resolver<C, A, P>
where
    C: CatalogSystems,
    A: CatalogActivity,
    P: ProceduralPositions,
{
    /// Create a resolver with a fresh identity cache.
    pub fn new(catalog: C, activity: A, procedural: P) -> Self {
        Self {
            catalog,
            activity,
            procedural,
            cache: SystemCache::new(),
        }
    }

    /// Resolve a system by name.
    ///
    /// Names are not unique; this returns whatever single record the
    /// catalog (or the procedural fallback) considers the match. Use
    /// [`Resolver::search_partial`] to surface ambiguity instead.
    pub async fn system_by_name(&self, name: &str) -> Result<Arc<StarSystem>, ResolveError> {
        self.cache
            .get_or_resolve_by_name(name, self.resolve_name_miss(name))
            .await
    }

    /// Resolve a system by id64.
    pub async fn system_by_id64(&self, id64: u64) -> Result<Arc<StarSystem>, ResolveError> {
        self.cache
            .get_or_resolve_by_id64(id64, async {
                debug!(id64, "resolving system against the catalog");
                let found = self.catalog.find_by_id64(id64).await?;
                Ok(Arc::new(from_catalog(found)))
            })
            .await
    }

    /// Look up a commander's last known whereabouts.
    ///
    /// Not cached: activity moves. The commander's current system is
    /// resolved through the id64 cache where possible; if that
    /// sub-resolution fails, the commander is still returned without it.
    pub async fn commander(
        &self,
        name: &str,
        api_key: Option<&str>,
    ) -> Result<Commander, ResolveError> {
        let record = self.activity.find_commander(name, api_key).await?;

        let current_system = match record.system_id64 {
            Some(id64) => match self.system_by_id64(id64).await {
                Ok(system) => Some(system),
                Err(error) => {
                    warn!(
                        commander = name,
                        id64,
                        %error,
                        "could not resolve the commander's current system"
                    );
                    None
                }
            },
            None => None,
        };

        Ok(Commander {
            name: name.to_owned(),
            profile_url: record.profile_url,
            last_active_at: record.last_active_at,
            first_discover: record.first_discover,
            current_system,
            location: record.location,
            is_docked: record.is_docked,
            station: record.station,
            ship_type: record.ship_type,
        })
    }

    /// Find all catalog systems whose name starts with the prefix.
    /// Uncached pass-through.
    pub async fn search_partial(&self, prefix: &str) -> Result<Vec<CatalogSystem>, ResolveError> {
        self.catalog.search_partial(prefix).await
    }

    /// Find all catalog systems in a sphere around the center.
    /// Uncached pass-through; bounds are enforced by the adapter.
    pub async fn find_in_sphere(
        &self,
        center: &SearchCenter,
        min_radius: f64,
        radius: f64,
    ) -> Result<Vec<NearbySystem>, ResolveError> {
        self.catalog.find_in_sphere(center, min_radius, radius).await
    }

    /// Find all catalog systems in a cube centered on the center.
    /// Uncached pass-through; bounds are enforced by the adapter.
    pub async fn find_in_cube(
        &self,
        center: &SearchCenter,
        size: f64,
    ) -> Result<Vec<NearbySystem>, ResolveError> {
        self.catalog.find_in_cube(center, size).await
    }

    /// The identity cache, for monitoring.
    pub fn cache(&self) -> &SystemCache {
        &self.cache
    }

    async fn resolve_name_miss(&self, name: &str) -> Result<Arc<StarSystem>, ResolveError> {
        debug!(system = name, "resolving system against the catalog");

        match self.catalog.find_by_name(name).await {
            Ok(found) => Ok(Arc::new(from_catalog(found))),
            Err(ResolveError::NotFound { .. }) if ProcGenName::parse(name).is_ok() => {
                debug!(system = name, "not in the catalog, computing a procedural position");
                let computed = self.procedural.find_by_name(name).await?;
                Ok(Arc::new(from_procedural(computed)))
            }
            Err(error) => Err(error),
        }
    }
}

fn from_catalog(found: CatalogSystem) -> StarSystem {
    StarSystem {
        name: found.name,
        id64: found.id64,
        location: found.location,
        requires_permit: found.requires_permit,
        permit_name: found.permit_name,
        information: found.information,
        primary_star: found.primary_star,
    }
}

fn from_procedural(computed: ProceduralSystem) -> StarSystem {
    // Procedural positions are always approximate; a claimed precision of
    // 0 is clamped to 1 ly so the coordinate never pretends to be exact.
    let location = computed.location;
    let precision = location.precision().max(1);

    StarSystem {
        name: computed.name,
        id64: None,
        location: Location::new(location.x(), location.y(), location.z(), precision),
        requires_permit: false,
        permit_name: None,
        information: None,
        primary_star: None,
    }
}
