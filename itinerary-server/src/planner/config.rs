//! Planner configuration.

/// Configuration parameters for itinerary planning.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Maximum number of candidates considered per request.
    /// The catalogue search is external and could return an unbounded set,
    /// so the candidate list is truncated to this size before routing.
    pub max_candidates: usize,

    /// Minimum remaining budget (minutes) required to attempt another stop.
    /// Once the remaining budget drops to this value or below, the route is
    /// closed even if a short visit would still fit.
    pub min_remaining_minutes: u32,

    /// Speed used for in-route legs, in km/h.
    /// Legs are always costed at this speed, independently of the transport
    /// mode used to size the search radius.
    pub leg_speed_kmh: f64,

    /// Maximum number of nearby-service suggestions attached to a route.
    pub max_service_suggestions: usize,

    /// How many leading stops get a nearby-service lookup.
    pub service_lookup_stops: usize,

    /// Total duration (minutes) above which a pacing advisory is added.
    pub long_route_minutes: u32,

    /// Base URL for per-site public pages, used in waypoint payloads.
    pub site_url_base: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_candidates: 200,
            min_remaining_minutes: 60,
            leg_speed_kmh: 50.0,
            max_service_suggestions: 3,
            service_lookup_stops: 3,
            long_route_minutes: 240,
            site_url_base: "https://sites.dziriya.example/sites".to_string(),
        }
    }
}
