//! Star systems as resolved from the backends.

use super::locatable::Located;
use super::location::Location;

/// A star system with resolved coordinates.
///
/// Created only by the resolver on first successful lookup and shared as
/// `Arc<StarSystem>` for the lifetime of its cache entry; immutable
/// thereafter. Catalog metadata (`information`, `primary_star`, permit
/// fields) is absent for systems located by the procedural calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct StarSystem {
    /// The system's name. Mostly, but not necessarily, unique.
    pub name: String,

    /// The system's id64, which should be unique. Procedurally-located
    /// systems have none.
    pub id64: Option<u64>,

    /// The system's location. Exact for catalog systems, approximate for
    /// procedurally-located ones.
    pub location: Location,

    /// Whether visiting the system requires a permit.
    pub requires_permit: bool,

    /// The name of the required permit, if any.
    pub permit_name: Option<String>,

    /// General information about the system, where the catalog has it.
    pub information: Option<SystemInformation>,

    /// The system's primary star, where the catalog has it.
    pub primary_star: Option<PrimaryStar>,
}

impl Located for StarSystem {
    fn location(&self) -> Option<Location> {
        Some(self.location)
    }
}

/// General information about an inhabited (or formerly inhabited) system.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemInformation {
    /// Allegiance: Federation, Empire, Alliance, Independent or Thargoid.
    pub allegiance: Option<String>,
    /// Government type.
    pub government: Option<String>,
    /// Current controlling faction.
    pub faction: Option<String>,
    /// The controlling faction's state.
    pub faction_state: Option<String>,
    /// Current population.
    pub population: Option<u64>,
    /// Security level.
    pub security: Option<String>,
    /// Primary economy.
    pub economy: Option<String>,
    /// Secondary economy.
    pub second_economy: Option<String>,
    /// Mining reserve level.
    pub reserve: Option<String>,
}

/// The primary star of a system.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryStar {
    /// The star's name.
    pub name: Option<String>,
    /// The star's type, full text (e.g. "G (White-Yellow) Star").
    pub star_type: Option<String>,
    /// Whether the star can be scooped for fuel.
    pub is_scoopable: bool,
}
