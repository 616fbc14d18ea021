//! EDSM API response DTOs.
//!
//! These map directly to the EDSM JSON responses and go no further than
//! the adapter boundary: the clients decode them once and hand out domain
//! records with the nullability already resolved.

use serde::Deserialize;

/// A coordinate triple as EDSM serializes it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ApiCoords {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A system as returned by the systems catalog endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSystem {
    /// The system's name.
    pub name: String,

    /// EDSM's internal ID.
    pub id: Option<u64>,

    /// The system's id64.
    pub id64: Option<u64>,

    /// Coordinates; absent for systems that have not been trilaterated.
    pub coords: Option<ApiCoords>,

    /// Whether the coordinates have been confirmed.
    pub coords_locked: Option<bool>,

    /// Whether visiting requires a permit.
    pub require_permit: Option<bool>,

    /// The required permit's name.
    pub permit_name: Option<String>,

    /// Distance from the search center; only set by the sphere and cube
    /// endpoints.
    pub distance: Option<f64>,

    /// Known body count; only set by the sphere and cube endpoints.
    pub body_count: Option<u32>,

    /// General information about the system.
    pub information: Option<ApiSystemInformation>,

    /// The system's primary star.
    pub primary_star: Option<ApiPrimaryStar>,
}

/// General information about a system.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSystemInformation {
    pub allegiance: Option<String>,
    pub government: Option<String>,
    pub faction: Option<String>,
    pub faction_state: Option<String>,
    pub population: Option<u64>,
    pub security: Option<String>,
    pub economy: Option<String>,
    pub second_economy: Option<String>,
    pub reserve: Option<String>,
}

/// The primary star of a system.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPrimaryStar {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub star_type: Option<String>,
    pub is_scoopable: Option<bool>,
}

/// A commander as returned by the activity log's `get-position` endpoint.
///
/// Heavily nullable: privacy settings hide fields individually, and the
/// same `msgNum` can mean different things depending on which fields are
/// null (see [`super::LogsClient`]).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCmdr {
    /// EDSM's status code for the request.
    pub msg_num: u32,

    /// The status message accompanying `msgNum`.
    pub msg: String,

    /// The commander's current system; null if the flight log is hidden.
    pub system: Option<String>,

    /// Whether the commander first discovered their current system; null
    /// if the flight log is hidden.
    pub first_discover: Option<bool>,

    /// When the commander jumped into the current system; null if flight
    /// log timestamps are hidden.
    pub date: Option<String>,

    /// EDSM's internal ID of the current system.
    pub system_id: Option<u64>,

    /// id64 of the current system.
    pub system_id64: Option<u64>,

    /// Coordinates of the current system; null if hidden.
    pub coordinates: Option<ApiCoords>,

    /// Whether the commander is docked at a station.
    pub is_docked: Option<bool>,

    /// The station the commander is docked at.
    pub station: Option<String>,

    /// EDSM's internal ID of that station.
    pub station_id: Option<u64>,

    /// When the commander docked there.
    pub date_docked: Option<String>,

    /// Slot ID of the commander's current ship.
    pub ship_id: Option<u32>,

    /// Type of the commander's current ship.
    pub ship_type: Option<String>,

    /// Last recorded activity; null if the flight log is hidden.
    pub date_last_activity: Option<String>,

    /// The commander's profile URL; null if the profile page is hidden.
    pub url: Option<String>,
}
