//! Star system resolver for the Elite Dangerous galaxy.
//!
//! Resolves systems by name or id64 to galactic coordinates with an
//! explicit uncertainty radius, reconciling three disagreeing backends:
//! the EDSM systems catalog, the EDSM player-activity log, and the EDTS
//! procedural coordinate calculator.

pub mod backend;
pub mod cache;
pub mod domain;
pub mod edsm;
pub mod edts;
pub mod error;
pub mod resolver;
