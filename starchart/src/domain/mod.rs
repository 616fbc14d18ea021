//! Domain types: locations, distances, star systems, commanders.

mod commander;
mod locatable;
mod location;
mod procgen;
mod system;

pub use commander::Commander;
pub use locatable::Located;
pub use location::{Distance, Location};
pub use procgen::{InvalidProcGenName, ProcGenName};
pub use system::{PrimaryStar, StarSystem, SystemInformation};
