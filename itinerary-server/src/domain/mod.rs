//! Domain types for the itinerary planner.
//!
//! These are validated value and entity types: a `Coordinate` is always in
//! range, a `Site` is always a documented catalogue record. Code receiving
//! these types can trust their validity.

mod coordinate;
mod site;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use site::{CategoryFilter, Site, SiteId};
