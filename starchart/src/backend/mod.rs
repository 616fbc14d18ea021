//! Backend capability traits and the records they yield.
//!
//! The resolver is generic over these three narrow capabilities, so the
//! HTTP clients in [`crate::edsm`] and [`crate::edts`] can be swapped for
//! the in-memory [`mock`] backends in tests. Every method translates its
//! source's failures into [`ResolveError`] before returning.

pub mod mock;

use std::fmt;
use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::Location;
use crate::error::ResolveError;

/// A star system as the catalog knows it.
///
/// Decoded at the adapter boundary: coordinates are always present (a
/// catalog record without usable coordinates is reported as `NotFound`
/// instead) and carry precision 0.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSystem {
    /// The system's name.
    pub name: String,
    /// The system's id64, where the catalog has one.
    pub id64: Option<u64>,
    /// The system's exact location.
    pub location: Location,
    /// Whether visiting requires a permit.
    pub requires_permit: bool,
    /// The required permit's name, if any.
    pub permit_name: Option<String>,
    /// General information, where the catalog has it.
    pub information: Option<crate::domain::SystemInformation>,
    /// The primary star, where the catalog has it.
    pub primary_star: Option<crate::domain::PrimaryStar>,
}

/// A catalog system found by a neighborhood search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySystem {
    /// The matched system.
    pub system: CatalogSystem,
    /// Distance from the search center in ly, as reported by the catalog.
    pub distance: f64,
    /// Number of known bodies, where the system has been scanned.
    pub body_count: Option<u32>,
}

/// The center of a spherical or cubic neighborhood search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCenter {
    /// Centered on a named system.
    System(String),
    /// Centered on raw coordinates.
    Point { x: f64, y: f64, z: f64 },
}

impl fmt::Display for SearchCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchCenter::System(name) => f.write_str(name),
            SearchCenter::Point { x, y, z } => write!(f, "({x},{y},{z})"),
        }
    }
}

/// A commander as the activity log knows them.
///
/// Individual fields can be withheld by the commander's privacy settings;
/// an entirely hidden profile is an `AccessRestricted` error instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CommanderRecord {
    /// Name of the commander's current system, unless hidden.
    pub system_name: Option<String>,
    /// id64 of the commander's current system, unless hidden.
    pub system_id64: Option<u64>,
    /// The commander's position, unless hidden. Exact when present.
    pub location: Option<Location>,
    /// Whether the commander first discovered their current system.
    pub first_discover: Option<bool>,
    /// Last recorded activity, unless timestamps are hidden.
    pub last_active_at: Option<DateTime<Utc>>,
    /// The commander's profile URL, unless their profile page is hidden.
    pub profile_url: Option<String>,
    /// Whether the commander is docked at a station.
    pub is_docked: Option<bool>,
    /// The station the commander is docked at, if any.
    pub station: Option<String>,
    /// The commander's current ship type.
    pub ship_type: Option<String>,
}

/// A system position computed by the procedural calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProceduralSystem {
    /// The system's name.
    pub name: String,
    /// The computed location; `precision` is the calculator's uncertainty.
    pub location: Location,
}

/// The crowdsourced systems catalog.
pub trait CatalogSystems: Send + Sync {
    /// Find a single system by exact name.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<CatalogSystem, ResolveError>> + Send;

    /// Find a single system by id64.
    fn find_by_id64(
        &self,
        id64: u64,
    ) -> impl Future<Output = Result<CatalogSystem, ResolveError>> + Send;

    /// Find all systems whose name starts with the given prefix.
    fn search_partial(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<CatalogSystem>, ResolveError>> + Send;

    /// Find all systems in a sphere around the center, excluding those
    /// closer than `min_radius`. The radius is bounded by the upstream
    /// service's hard limit.
    fn find_in_sphere(
        &self,
        center: &SearchCenter,
        min_radius: f64,
        radius: f64,
    ) -> impl Future<Output = Result<Vec<NearbySystem>, ResolveError>> + Send;

    /// Find all systems in a cube of the given edge length centered on the
    /// center. The size is bounded by the upstream service's hard limit.
    fn find_in_cube(
        &self,
        center: &SearchCenter,
        size: f64,
    ) -> impl Future<Output = Result<Vec<NearbySystem>, ResolveError>> + Send;
}

/// The player-activity log.
pub trait CatalogActivity: Send + Sync {
    /// Find a commander's last known whereabouts. An API key grants access
    /// to profiles the commander has restricted.
    fn find_commander(
        &self,
        name: &str,
        api_key: Option<&str>,
    ) -> impl Future<Output = Result<CommanderRecord, ResolveError>> + Send;
}

/// The procedural-generation coordinate calculator.
pub trait ProceduralPositions: Send + Sync {
    /// Compute the approximate position encoded in a procedural system
    /// name. Fails with `InvalidKey` if the name does not decode.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<ProceduralSystem, ResolveError>> + Send;
}
