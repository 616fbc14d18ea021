//! EDSM systems catalog HTTP client.
//!
//! Provides async lookups against the `api-v1` system endpoints. Handles
//! the catalog's "empty array means not found" convention and translates
//! everything into the shared error taxonomy.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::backend::{CatalogSystem, CatalogSystems, NearbySystem, SearchCenter};
use crate::domain::{Location, PrimaryStar, SystemInformation};
use crate::error::ResolveError;

use super::types::ApiSystem;

/// Default base URL for the EDSM systems catalog.
const DEFAULT_BASE_URL: &str = "https://www.edsm.net/api-v1";

/// Default maximum concurrent requests. EDSM rate-limits aggressively.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Upstream hard limit on spherical search radius.
pub const MAX_SPHERE_RADIUS_LY: f64 = 100.0;

/// Upstream hard limit on cubic search edge length.
pub const MAX_CUBE_SIZE_LY: f64 = 200.0;

/// Query flags sent with every request so one decode yields the full
/// record.
const SHOW_FLAGS: [(&str, &str); 5] = [
    ("showId", "1"),
    ("showCoordinates", "1"),
    ("showPermit", "1"),
    ("showInformation", "1"),
    ("showPrimaryStar", "1"),
];

/// Configuration for the systems catalog client.
#[derive(Debug, Clone)]
pub struct SystemsConfig {
    /// Base URL for the API (defaults to production EDSM).
    pub base_url: String,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SystemsConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SystemsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// EDSM systems catalog client.
///
/// Stateless apart from the shared HTTP client and a semaphore bounding
/// concurrent requests; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct SystemsClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl SystemsClient {
    /// Create a new catalog client with the given configuration.
    pub fn new(config: SystemsConfig) -> Result<Self, ResolveError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Issue a GET against an endpoint and return the raw body.
    ///
    /// Suspends on the semaphore so at most `max_concurrent` requests are
    /// in flight against the upstream service.
    async fn get_body(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<String, ResolveError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ResolveError::transient("semaphore closed"))?;

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, "querying EDSM systems catalog");

        let response = self
            .http
            .get(&url)
            .query(&SHOW_FLAGS)
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResolveError::transient("rate limited by EDSM"));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::transient(format!(
                "EDSM returned status {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        Ok(response.text().await?)
    }

    /// Decode a single-system body, treating the catalog's empty-array
    /// convention as `NotFound`.
    fn decode_system(body: &str, key: &str) -> Result<CatalogSystem, ResolveError> {
        if body.trim() == "[]" {
            return Err(ResolveError::not_found(key));
        }

        let dto: ApiSystem = serde_json::from_str(body).map_err(|e| {
            ResolveError::transient(format!("EDSM system response did not parse: {e}"))
        })?;

        catalog_system(dto, key)
    }

    /// Decode a system-list body, treating an empty result as `NotFound`.
    fn decode_systems(body: &str, key: &str) -> Result<Vec<ApiSystem>, ResolveError> {
        let dtos: Vec<ApiSystem> = serde_json::from_str(body).map_err(|e| {
            ResolveError::transient(format!("EDSM systems response did not parse: {e}"))
        })?;

        if dtos.is_empty() {
            return Err(ResolveError::not_found(key));
        }

        Ok(dtos)
    }

    fn center_params(center: &SearchCenter) -> Vec<(&'static str, String)> {
        match center {
            SearchCenter::System(name) => vec![("systemName", name.clone())],
            SearchCenter::Point { x, y, z } => vec![
                ("x", x.to_string()),
                ("y", y.to_string()),
                ("z", z.to_string()),
            ],
        }
    }
}

impl CatalogSystems for SystemsClient {
    async fn find_by_name(&self, name: &str) -> Result<CatalogSystem, ResolveError> {
        let body = self
            .get_body("system", &[("systemName", name.to_owned())])
            .await?;
        Self::decode_system(&body, name)
    }

    async fn find_by_id64(&self, id64: u64) -> Result<CatalogSystem, ResolveError> {
        let key = id64.to_string();
        let body = self
            .get_body("system", &[("systemId64", key.clone())])
            .await?;
        Self::decode_system(&body, &key)
    }

    async fn search_partial(&self, prefix: &str) -> Result<Vec<CatalogSystem>, ResolveError> {
        let body = self
            .get_body("systems", &[("systemName", prefix.to_owned())])
            .await?;

        // Partial matches can include systems without trilaterated
        // coordinates; those are skipped rather than failing the search.
        Ok(Self::decode_systems(&body, prefix)?
            .into_iter()
            .filter_map(|dto| {
                let name = dto.name.clone();
                catalog_system(dto, &name).ok()
            })
            .collect())
    }

    async fn find_in_sphere(
        &self,
        center: &SearchCenter,
        min_radius: f64,
        radius: f64,
    ) -> Result<Vec<NearbySystem>, ResolveError> {
        if !(0.0..=MAX_SPHERE_RADIUS_LY).contains(&radius) || radius == 0.0 {
            return Err(ResolveError::invalid_key(
                center.to_string(),
                format!("search radius must be positive and at most {MAX_SPHERE_RADIUS_LY} ly"),
            ));
        }
        if !(0.0..=radius).contains(&min_radius) {
            return Err(ResolveError::invalid_key(
                center.to_string(),
                "minimum radius must lie between 0 and the search radius",
            ));
        }

        let mut params = Self::center_params(center);
        params.push(("minRadius", min_radius.to_string()));
        params.push(("radius", radius.to_string()));

        let body = self.get_body("sphere-systems", &params).await?;
        let key = center.to_string();
        Ok(nearby_systems(Self::decode_systems(&body, &key)?))
    }

    async fn find_in_cube(
        &self,
        center: &SearchCenter,
        size: f64,
    ) -> Result<Vec<NearbySystem>, ResolveError> {
        if !(0.0..=MAX_CUBE_SIZE_LY).contains(&size) || size == 0.0 {
            return Err(ResolveError::invalid_key(
                center.to_string(),
                format!("cube size must be positive and at most {MAX_CUBE_SIZE_LY} ly"),
            ));
        }

        let mut params = Self::center_params(center);
        params.push(("size", size.to_string()));

        let body = self.get_body("cube-systems", &params).await?;
        let key = center.to_string();
        Ok(nearby_systems(Self::decode_systems(&body, &key)?))
    }
}

/// Convert a catalog DTO into a `CatalogSystem`.
///
/// A record without coordinates is reported as `NotFound` for the given
/// key: the caller needs a position, and the procedural fallback may still
/// provide one.
fn catalog_system(dto: ApiSystem, key: &str) -> Result<CatalogSystem, ResolveError> {
    let coords = dto.coords.ok_or_else(|| ResolveError::not_found(key))?;

    Ok(CatalogSystem {
        name: dto.name,
        id64: dto.id64,
        location: Location::exact(coords.x, coords.y, coords.z),
        requires_permit: dto.require_permit.unwrap_or(false),
        permit_name: dto.permit_name,
        information: dto.information.map(|i| SystemInformation {
            allegiance: i.allegiance,
            government: i.government,
            faction: i.faction,
            faction_state: i.faction_state,
            population: i.population,
            security: i.security,
            economy: i.economy,
            second_economy: i.second_economy,
            reserve: i.reserve,
        }),
        primary_star: dto.primary_star.map(|s| PrimaryStar {
            name: s.name,
            star_type: s.star_type,
            is_scoopable: s.is_scoopable.unwrap_or(false),
        }),
    })
}

/// Convert search-result DTOs, skipping entries without coordinates or a
/// reported distance.
fn nearby_systems(dtos: Vec<ApiSystem>) -> Vec<NearbySystem> {
    dtos.into_iter()
        .filter_map(|dto| {
            let distance = dto.distance?;
            let body_count = dto.body_count;
            let name = dto.name.clone();
            let system = catalog_system(dto, &name).ok()?;
            Some(NearbySystem {
                system,
                distance,
                body_count,
            })
        })
        .collect()
}
