//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryFilter, Site, SiteId};
use crate::geo::TransportMode;
use crate::planner::{
    AccessibilitySummary, Enrichment, Itinerary, ItineraryStop, ItineraryWaypoint, Lookup,
    PlanOutcome, Preferences, ServiceSuggestion, SiteWaypoint,
};

/// Query for the site search endpoint.
#[derive(Debug, Deserialize)]
pub struct SitesNearQuery {
    pub lat: f64,

    pub lng: f64,

    /// Search radius in kilometres
    pub radius_km: f64,

    /// Category restriction (defaults to no restriction)
    #[serde(default)]
    pub category: CategoryFilter,
}

/// A site in search results.
#[derive(Debug, Serialize)]
pub struct SiteResult {
    pub id: SiteId,

    pub name: String,

    pub lat: f64,

    pub lng: f64,

    pub monument: bool,

    pub vestige: bool,

    /// Number of attached service tags
    pub service_count: u32,

    /// Number of attached media items
    pub media_count: u32,
}

impl SiteResult {
    pub fn from_site(site: &Site) -> Self {
        Self {
            id: site.id,
            name: site.name.clone(),
            lat: site.coordinate.lat(),
            lng: site.coordinate.lng(),
            monument: site.monument,
            vestige: site.vestige,
            service_count: site.service_count,
            media_count: site.media_count,
        }
    }
}

/// Response for the site search endpoint.
#[derive(Debug, Serialize)]
pub struct SitesNearResponse {
    pub sites: Vec<SiteResult>,
}

/// Caller preference flags on plan requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceFlags {
    /// Attach restaurant suggestions to the leading stops
    #[serde(default)]
    pub include_services: bool,

    /// Attach a lodging suggestion near the origin
    #[serde(default)]
    pub include_lodging: bool,

    /// Only consider sites whose services suggest accessibility support
    #[serde(default)]
    pub accessibility_required: bool,

    /// Adds a family pacing advisory
    #[serde(default)]
    pub family_friendly: bool,
}

impl PreferenceFlags {
    pub fn into_preferences(self) -> Preferences {
        Preferences {
            include_services: self.include_services,
            include_lodging: self.include_lodging,
            accessibility_required: self.accessibility_required,
            family_friendly: self.family_friendly,
        }
    }
}

/// Request to plan an itinerary around an anchor point.
#[derive(Debug, Deserialize)]
pub struct PlanAnchorRequest {
    /// Anchor latitude
    pub lat: f64,

    /// Anchor longitude
    pub lng: f64,

    /// Search radius in kilometres
    pub radius_km: f64,

    /// Category restriction (defaults to no restriction)
    #[serde(default)]
    pub category: CategoryFilter,

    /// Maximum number of stops
    pub max_stops: usize,

    /// Time budget in minutes
    pub budget_minutes: u32,

    /// Transport mode (defaults to walking)
    #[serde(default)]
    pub mode: TransportMode,

    #[serde(default)]
    pub preferences: PreferenceFlags,

    /// Caller identity; when present the itinerary is persisted best-effort
    #[serde(default)]
    pub owner: Option<String>,
}

/// Request to plan a personalized itinerary.
#[derive(Debug, Deserialize)]
pub struct PlanPersonalizedRequest {
    /// Origin latitude
    pub lat: f64,

    /// Origin longitude
    pub lng: f64,

    /// Free-text interest tags; empty means no interest filter
    #[serde(default)]
    pub interests: Vec<String>,

    /// Maximum number of stops
    pub max_stops: usize,

    /// Time budget in minutes
    pub budget_minutes: u32,

    /// Transport mode (defaults to walking)
    #[serde(default)]
    pub mode: TransportMode,

    #[serde(default)]
    pub preferences: PreferenceFlags,

    #[serde(default)]
    pub owner: Option<String>,
}

/// A stop in a planned itinerary.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub site_id: SiteId,

    pub name: String,

    pub lat: f64,

    pub lng: f64,

    /// Straight-line distance from the plan origin, in km
    pub distance_km: f64,

    /// Interest score used during selection
    pub score: f64,

    /// Estimated visit duration in minutes
    pub visit_minutes: u32,

    /// Travel time from the previous stop in minutes
    pub travel_minutes: u32,

    /// Cumulative elapsed time when the visit ends, in minutes
    pub elapsed_minutes: u32,

    /// Stop payload for the external code renderer
    pub waypoint: SiteWaypoint,
}

impl StopResult {
    pub fn from_stop(stop: &ItineraryStop) -> Self {
        let site = &stop.candidate.site;
        Self {
            site_id: site.id,
            name: site.name.clone(),
            lat: site.coordinate.lat(),
            lng: site.coordinate.lng(),
            distance_km: stop.candidate.distance_km,
            score: stop.candidate.score,
            visit_minutes: stop.candidate.visit_minutes,
            travel_minutes: stop.travel_minutes,
            elapsed_minutes: stop.elapsed_minutes,
            waypoint: stop.waypoint.clone(),
        }
    }
}

/// A planned itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub origin_lat: f64,

    pub origin_lng: f64,

    pub stops: Vec<StopResult>,

    pub total_distance_km: f64,

    pub total_duration_minutes: u32,

    /// Itinerary-level payload for the external code renderer
    pub waypoint: ItineraryWaypoint,

    /// Generation timestamp, RFC 3339
    pub generated_at: String,
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            origin_lat: itinerary.origin.lat(),
            origin_lng: itinerary.origin.lng(),
            stops: itinerary.stops.iter().map(StopResult::from_stop).collect(),
            total_distance_km: itinerary.total_distance_km,
            total_duration_minutes: itinerary.total_duration_minutes,
            waypoint: itinerary.waypoint.clone(),
            generated_at: itinerary.generated_at.to_rfc3339(),
        }
    }
}

/// A best-effort lookup block: its status plus the value when fetched.
#[derive(Debug, Serialize)]
pub struct LookupResult<T> {
    /// "fetched", "degraded" or "not_requested"
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
}

impl<T> LookupResult<T> {
    pub fn from_lookup(lookup: Lookup<T>) -> Self {
        match lookup {
            Lookup::Fetched(value) => Self {
                status: "fetched",
                value: Some(value),
            },
            Lookup::Degraded => Self {
                status: "degraded",
                value: None,
            },
            Lookup::NotRequested => Self {
                status: "not_requested",
                value: None,
            },
        }
    }
}

/// Advisory block for a planned itinerary.
#[derive(Debug, Serialize)]
pub struct EnrichmentResult {
    pub services: LookupResult<Vec<ServiceSuggestion>>,

    pub lodging: LookupResult<Option<ServiceSuggestion>>,

    pub accessibility: AccessibilitySummary,

    pub advisories: Vec<String>,
}

impl EnrichmentResult {
    pub fn from_enrichment(enrichment: Enrichment) -> Self {
        Self {
            services: LookupResult::from_lookup(enrichment.services),
            lodging: LookupResult::from_lookup(enrichment.lodging),
            accessibility: enrichment.accessibility,
            advisories: enrichment.advisories,
        }
    }
}

/// Response for the plan endpoints.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub itinerary: ItineraryResult,

    pub enrichment: EnrichmentResult,

    /// Stored itinerary id, when persistence was requested and succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_id: Option<u64>,
}

impl PlanResponse {
    pub fn from_outcome(outcome: PlanOutcome) -> Self {
        Self {
            itinerary: ItineraryResult::from_itinerary(&outcome.itinerary),
            enrichment: EnrichmentResult::from_enrichment(outcome.enrichment),
            stored_id: outcome.stored,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
