//! Commanders (players) as reported by the activity log.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::locatable::Located;
use super::location::Location;
use super::system::StarSystem;

/// A commander's last known whereabouts.
///
/// Constructed once per lookup from the activity-log backend and never
/// cached; immutable. A commander whose profile is entirely hidden is an
/// `AccessRestricted` error instead, but partial privacy settings can
/// withhold individual fields, hence the `Option`s.
#[derive(Debug, Clone)]
pub struct Commander {
    /// The commander's name.
    pub name: String,

    /// The commander's EDSM profile URL, unless their profile page is
    /// hidden.
    pub profile_url: Option<String>,

    /// When the commander was last active, unless their flight log
    /// timestamps are hidden.
    pub last_active_at: Option<DateTime<Utc>>,

    /// Whether the commander was first to discover their current system.
    pub first_discover: Option<bool>,

    /// The commander's current star system, where it could be resolved
    /// against the catalog.
    pub current_system: Option<Arc<StarSystem>>,

    /// The commander's last known position, unless withheld.
    pub location: Option<Location>,

    /// Whether the commander is currently docked at a station.
    pub is_docked: Option<bool>,

    /// The station the commander is docked at, if any.
    pub station: Option<String>,

    /// The commander's current ship type.
    pub ship_type: Option<String>,
}

impl Located for Commander {
    fn location(&self) -> Option<Location> {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commander_distance_to_system() {
        let dromi = Arc::new(StarSystem {
            name: "Dromi".into(),
            id64: Some(1_213_084_977_515),
            location: Location::exact(25.40625, -31.0625, 41.625),
            requires_permit: false,
            permit_name: None,
            information: None,
            primary_star: None,
        });

        let cmdr = Commander {
            name: "IHaveFuelYouDont".into(),
            profile_url: None,
            last_active_at: None,
            first_discover: Some(false),
            current_system: Some(Arc::clone(&dromi)),
            location: Some(Location::exact(25.40625, -31.0625, 41.625)),
            is_docked: Some(true),
            station: None,
            ship_type: Some("Anaconda".into()),
        };

        let distance = cmdr.distance_to(dromi.as_ref()).unwrap();
        assert_eq!(distance.value(), 0.0);
        assert_eq!(distance.precision(), 0);
    }

    #[test]
    fn hidden_position_yields_no_distance() {
        let cmdr = Commander {
            name: "Shy".into(),
            profile_url: None,
            last_active_at: None,
            first_discover: None,
            current_system: None,
            location: None,
            is_docked: None,
            station: None,
            ship_type: None,
        };

        assert!(cmdr.distance_to(&Location::exact(0.0, 0.0, 0.0)).is_none());
    }
}
