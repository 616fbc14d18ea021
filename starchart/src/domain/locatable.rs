//! The "has a last-known location" capability.

use super::location::{Distance, Location};

/// Anything with a (possibly unknown) position in the galaxy.
///
/// Star systems always know where they are; a commander's position can be
/// withheld by their privacy settings, hence the `Option`.
pub trait Located {
    /// The last known location, if any.
    fn location(&self) -> Option<Location>;

    /// The distance to another located entity.
    ///
    /// `None` if either side's position is unknown. Pure delegation to
    /// [`Location::distance_to`]; no partial or zeroed coordinates are ever
    /// substituted.
    fn distance_to(&self, other: &dyn Located) -> Option<Distance> {
        Some(self.location()?.distance_to(&other.location()?))
    }
}

impl Located for Location {
    fn location(&self) -> Option<Location> {
        Some(*self)
    }
}
