//! Planning facade.
//!
//! Orchestrates the catalogue search, scoring, route construction,
//! enrichment and waypoint encoding behind the two public operations:
//! anchor-based planning and personalized planning. The facade is stateless;
//! everything it builds lives for the duration of one call.

use chrono::{DateTime, Utc};

use crate::domain::{CategoryFilter, Coordinate, Site};
use crate::geo::{self, TransportMode};

use super::config::PlanConfig;
use super::enrich::{self, Enrichment, ServiceDirectory};
use super::route::{self, ItineraryStop, RouteOutcome};
use super::score::ScoredCandidate;
use super::waypoint::{self, ItineraryWaypoint};

/// Error from a collaborator lookup.
///
/// Collaborator traits surface failures through this single opaque type;
/// the facade decides per collaborator whether a failure is fatal,
/// degrading or merely logged.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct LookupError {
    message: String,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error from itinerary planning.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// The request was rejected before any computation.
    #[error("invalid plan request: {0}")]
    InvalidRequest(String),

    /// The site catalogue could not be queried. Fatal to the request.
    #[error("site catalogue lookup failed: {message}")]
    Repository { message: String },
}

/// Read-only source of candidate sites.
///
/// Implementations must return only documented sites (records carrying at
/// least one detail entry). No ordering is assumed; the planner re-sorts.
pub trait SiteRepository {
    /// Find sites within `radius_km` of `origin`, optionally filtered by
    /// category.
    fn find_near(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: CategoryFilter,
    ) -> impl Future<Output = Result<Vec<Site>, LookupError>> + Send;
}

/// Best-effort persistence for accepted itineraries.
pub trait ItineraryStore {
    /// Persist an itinerary for an owner, returning the stored id.
    fn save(
        &self,
        itinerary: &Itinerary,
        owner: &str,
    ) -> impl Future<Output = Result<u64, LookupError>> + Send;
}

/// Caller preference flags.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    /// Attach restaurant suggestions to the leading stops.
    pub include_services: bool,
    /// Attach a lodging suggestion near the origin.
    pub include_lodging: bool,
    /// Only consider sites whose services suggest accessibility support.
    pub accessibility_required: bool,
    /// Adds a family pacing advisory.
    pub family_friendly: bool,
}

/// Request for an itinerary anchored at a known point (an event venue).
#[derive(Debug, Clone)]
pub struct AnchorRequest {
    pub anchor: Coordinate,
    pub radius_km: f64,
    pub filter: CategoryFilter,
    pub max_stops: usize,
    pub budget_minutes: u32,
    pub mode: TransportMode,
    pub preferences: Preferences,
    /// Caller identity; when present the itinerary is persisted best-effort.
    pub owner: Option<String>,
}

impl AnchorRequest {
    fn validate(&self) -> Result<(), PlanError> {
        if self.budget_minutes == 0 {
            return Err(PlanError::InvalidRequest(
                "time budget must be positive".to_string(),
            ));
        }
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(PlanError::InvalidRequest(
                "search radius must be positive".to_string(),
            ));
        }
        if self.max_stops == 0 {
            return Err(PlanError::InvalidRequest(
                "stop limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request for a personalized itinerary from an arbitrary origin.
///
/// The search radius is derived from the transport mode and time budget
/// rather than supplied by the caller.
#[derive(Debug, Clone)]
pub struct PersonalizedRequest {
    pub origin: Coordinate,
    /// Free-text interest tags; an empty list means no interest filter.
    pub interests: Vec<String>,
    pub max_stops: usize,
    pub budget_minutes: u32,
    pub mode: TransportMode,
    pub preferences: Preferences,
    pub owner: Option<String>,
}

impl PersonalizedRequest {
    fn validate(&self) -> Result<(), PlanError> {
        if self.budget_minutes == 0 {
            return Err(PlanError::InvalidRequest(
                "time budget must be positive".to_string(),
            ));
        }
        if self.max_stops == 0 {
            return Err(PlanError::InvalidRequest(
                "stop limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A completed, time-bounded itinerary.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub origin: Coordinate,
    /// Stops in visit order, each carrying its waypoint payload.
    pub stops: Vec<ItineraryStop>,
    pub total_distance_km: f64,
    pub total_duration_minutes: u32,
    /// Itinerary-level payload for the external code renderer.
    pub waypoint: ItineraryWaypoint,
    pub generated_at: DateTime<Utc>,
}

/// Full planning result: the itinerary plus its advisory block and the
/// outcome of best-effort persistence.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub itinerary: Itinerary,
    pub enrichment: Enrichment,
    /// Stored itinerary id, when persistence was requested and succeeded.
    pub stored: Option<u64>,
}

/// The itinerary planner.
pub struct Planner<'a, R, D, S> {
    repository: &'a R,
    directory: &'a D,
    store: &'a S,
    config: &'a PlanConfig,
}

impl<'a, R, D, S> Planner<'a, R, D, S>
where
    R: SiteRepository,
    D: ServiceDirectory,
    S: ItineraryStore,
{
    /// Create a new planner over its collaborators.
    pub fn new(repository: &'a R, directory: &'a D, store: &'a S, config: &'a PlanConfig) -> Self {
        Self {
            repository,
            directory,
            store,
            config,
        }
    }

    /// Plan an itinerary around an anchor point.
    pub async fn plan_from_anchor(&self, request: &AnchorRequest) -> Result<PlanOutcome, PlanError> {
        request.validate()?;

        let sites = self
            .repository
            .find_near(request.anchor, request.radius_km, request.filter)
            .await
            .map_err(|e| PlanError::Repository {
                message: e.to_string(),
            })?;

        self.run_pipeline(
            request.anchor,
            sites,
            request.max_stops,
            request.budget_minutes,
            request.mode,
            &request.preferences,
            request.owner.as_deref(),
        )
        .await
    }

    /// Plan a personalized itinerary from an arbitrary origin.
    pub async fn plan_personalized(
        &self,
        request: &PersonalizedRequest,
    ) -> Result<PlanOutcome, PlanError> {
        request.validate()?;

        let radius_km = geo::search_radius_km(request.mode, request.budget_minutes);
        let sites = self
            .repository
            .find_near(request.origin, radius_km, CategoryFilter::Any)
            .await
            .map_err(|e| PlanError::Repository {
                message: e.to_string(),
            })?;

        let sites = filter_by_interests(sites, &request.interests);

        self.run_pipeline(
            request.origin,
            sites,
            request.max_stops,
            request.budget_minutes,
            request.mode,
            &request.preferences,
            request.owner.as_deref(),
        )
        .await
    }

    /// Shared score, build, enrich, encode and persist pipeline.
    #[allow(clippy::too_many_arguments)]
    async fn run_pipeline(
        &self,
        origin: Coordinate,
        sites: Vec<Site>,
        max_stops: usize,
        budget_minutes: u32,
        mode: TransportMode,
        preferences: &Preferences,
        owner: Option<&str>,
    ) -> Result<PlanOutcome, PlanError> {
        let sites = apply_preference_filters(sites, preferences);

        let candidates: Vec<ScoredCandidate> = sites
            .into_iter()
            .map(|site| ScoredCandidate::evaluate(site, origin))
            .collect();

        let outcome = route::build_route(origin, candidates, max_stops, budget_minutes, self.config);

        let enrichment =
            enrich::enrich(self.directory, origin, &outcome, mode, preferences, self.config).await;

        let itinerary = assemble_itinerary(origin, outcome);

        let stored = match owner {
            Some(owner) => match self.store.save(&itinerary, owner).await {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(owner, "itinerary persistence failed: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(PlanOutcome {
            itinerary,
            enrichment,
            stored,
        })
    }
}

/// Turn a built route into the final itinerary with its payload.
fn assemble_itinerary(origin: Coordinate, outcome: RouteOutcome) -> Itinerary {
    let waypoint = waypoint::itinerary_waypoint(outcome.stops.iter().map(|s| &s.candidate.site));
    Itinerary {
        origin,
        stops: outcome.stops,
        total_distance_km: outcome.total_distance_km,
        total_duration_minutes: outcome.total_duration_minutes,
        waypoint,
        generated_at: Utc::now(),
    }
}

/// Drop sites excluded by preference flags.
fn apply_preference_filters(sites: Vec<Site>, preferences: &Preferences) -> Vec<Site> {
    if !preferences.accessibility_required {
        return sites;
    }
    sites
        .into_iter()
        .filter(|site| {
            enrich::ACCESSIBILITY_KEYWORDS
                .iter()
                .any(|kw| site.has_service_containing(kw))
        })
        .collect()
}

/// Keep sites matching at least one interest tag.
///
/// A tag matches on the site name, any service name, or the monument /
/// vestige classification keywords. An empty tag list keeps everything.
fn filter_by_interests(sites: Vec<Site>, interests: &[String]) -> Vec<Site> {
    if interests.is_empty() {
        return sites;
    }

    sites
        .into_iter()
        .filter(|site| {
            interests.iter().any(|tag| {
                let tag_lower = tag.to_lowercase();
                site.name.to_lowercase().contains(&tag_lower)
                    || site.has_service_containing(&tag_lower)
                    || (site.monument && tag_lower == "monument")
                    || (site.vestige && tag_lower == "vestige")
            })
        })
        .collect()
}
