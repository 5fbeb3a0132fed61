//! Itinerary planning core.
//!
//! A stateless, deterministic pipeline: score candidate sites against an
//! origin, greedily build a time-bounded route, enrich it with advisory
//! information and encode waypoint payloads. Collaborators (site catalogue,
//! service directory, itinerary store) are abstracted behind traits so the
//! core can be tested without a backend.

mod config;
mod enrich;
mod plan;
mod route;
mod score;
mod waypoint;

pub use config::PlanConfig;
pub use enrich::{
    AccessibilityRating, AccessibilitySummary, Enrichment, Lookup, ServiceDirectory,
    ServiceSuggestion,
};
pub use plan::{
    AnchorRequest, Itinerary, ItineraryStore, LookupError, PersonalizedRequest, PlanError,
    PlanOutcome, Planner, Preferences, SiteRepository,
};
pub use route::{ItineraryStop, RouteOutcome, build_route};
pub use score::{ScoredCandidate, estimate_visit_minutes, interest_score};
pub use waypoint::{ItineraryWaypoint, SiteWaypoint, StopRef, itinerary_waypoint, site_waypoint};
