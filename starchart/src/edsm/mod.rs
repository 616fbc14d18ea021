//! EDSM (Elite Dangerous Star Map) HTTP clients.
//!
//! Two endpoints of the same crowdsourced database, with different
//! reliability characteristics:
//! - The **systems catalog** (`api-v1`) — curated, trilaterated positions.
//!   "Not found" is an empty-array body, not an HTTP error.
//! - The **activity log** (`api-logs-v1`) — per-commander positions. One
//!   `msgNum` status field encodes success, "not found" *and* "profile
//!   hidden"; the hidden case is only distinguishable by which companion
//!   fields are simultaneously null.

mod logs;
mod systems;
mod types;

pub use logs::{LogsClient, LogsConfig};
pub use systems::{MAX_CUBE_SIZE_LY, MAX_SPHERE_RADIUS_LY, SystemsClient, SystemsConfig};
pub use types::{ApiCmdr, ApiCoords, ApiPrimaryStar, ApiSystem, ApiSystemInformation};
