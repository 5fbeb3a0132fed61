//! Itinerary enrichment.
//!
//! Attaches advisory, presentational information to a built route: nearby
//! service suggestions, an accessibility summary and transport advisories.
//! Everything here is best-effort; a failed directory lookup downgrades
//! the affected block and never fails the plan.

use serde::Serialize;

use crate::domain::Coordinate;
use crate::geo::TransportMode;

use super::config::PlanConfig;
use super::plan::{LookupError, Preferences};
use super::route::RouteOutcome;

/// Service-name fragments that indicate an accessible site.
pub(crate) const ACCESSIBILITY_KEYWORDS: &[&str] =
    &["accessib", "wheelchair", "ramp", "pmr", "handicap"];

/// A nearby-service suggestion from the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSuggestion {
    pub name: String,
    pub category: String,
    pub coordinate: Coordinate,
}

/// Directory of nearby services (restaurants, lodging, ...).
///
/// Used only for enrichment; failures degrade the affected block.
pub trait ServiceDirectory {
    /// Find up to `limit` services of `category` near a coordinate.
    fn find_nearby_services(
        &self,
        near: Coordinate,
        category: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ServiceSuggestion>, LookupError>> + Send;
}

/// Outcome of a best-effort side lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The lookup ran and produced a value.
    Fetched(T),
    /// The lookup was requested but the collaborator failed.
    Degraded,
    /// The caller did not ask for this block.
    NotRequested,
}

impl<T> Lookup<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Lookup::Fetched(_))
    }
}

/// Accessibility rating buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessibilityRating {
    Excellent,
    Good,
    Limited,
}

/// Fraction of accessible stops and its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccessibilitySummary {
    pub ratio: f64,
    pub rating: AccessibilityRating,
}

/// Advisory block attached to a completed itinerary.
#[derive(Debug, Clone)]
pub struct Enrichment {
    /// Restaurant suggestions keyed to the first stops.
    pub services: Lookup<Vec<ServiceSuggestion>>,
    /// Lodging suggestion keyed to the origin.
    pub lodging: Lookup<Option<ServiceSuggestion>>,
    pub accessibility: AccessibilitySummary,
    pub advisories: Vec<String>,
}

/// Enrich a built route.
pub async fn enrich<D: ServiceDirectory>(
    directory: &D,
    origin: Coordinate,
    route: &RouteOutcome,
    mode: TransportMode,
    preferences: &Preferences,
    config: &PlanConfig,
) -> Enrichment {
    let services = if preferences.include_services {
        fetch_service_suggestions(directory, route, config).await
    } else {
        Lookup::NotRequested
    };

    let lodging = if preferences.include_lodging {
        match directory.find_nearby_services(origin, "lodging", 1).await {
            Ok(found) => Lookup::Fetched(found.into_iter().next()),
            Err(e) => {
                tracing::warn!("lodging lookup failed: {e}");
                Lookup::Degraded
            }
        }
    } else {
        Lookup::NotRequested
    };

    Enrichment {
        services,
        lodging,
        accessibility: accessibility_summary(route),
        advisories: advisories(route, mode, preferences, config),
    }
}

/// One restaurant lookup per leading stop, merged and truncated.
async fn fetch_service_suggestions<D: ServiceDirectory>(
    directory: &D,
    route: &RouteOutcome,
    config: &PlanConfig,
) -> Lookup<Vec<ServiceSuggestion>> {
    let keyed_stops: Vec<_> = route
        .stops
        .iter()
        .take(config.service_lookup_stops)
        .collect();

    if keyed_stops.is_empty() {
        return Lookup::Fetched(Vec::new());
    }

    let lookups = keyed_stops
        .iter()
        .map(|stop| directory.find_nearby_services(stop.candidate.site.coordinate, "restaurant", 1));
    let results = futures::future::join_all(lookups).await;

    let mut suggestions = Vec::new();
    let mut any_ok = false;
    for result in results {
        match result {
            Ok(found) => {
                any_ok = true;
                suggestions.extend(found);
            }
            Err(e) => tracing::warn!("restaurant lookup failed: {e}"),
        }
    }

    if !any_ok {
        return Lookup::Degraded;
    }

    suggestions.truncate(config.max_service_suggestions);
    Lookup::Fetched(suggestions)
}

/// Fraction of stops whose service names suggest accessibility support.
fn accessibility_summary(route: &RouteOutcome) -> AccessibilitySummary {
    let total = route.stops.len();
    let accessible = route
        .stops
        .iter()
        .filter(|stop| {
            ACCESSIBILITY_KEYWORDS
                .iter()
                .any(|kw| stop.candidate.site.has_service_containing(kw))
        })
        .count();

    let ratio = if total == 0 {
        0.0
    } else {
        accessible as f64 / total as f64
    };

    let rating = if ratio > 0.7 {
        AccessibilityRating::Excellent
    } else if ratio > 0.4 {
        AccessibilityRating::Good
    } else {
        AccessibilityRating::Limited
    };

    AccessibilitySummary { ratio, rating }
}

/// Transport and pacing advisory strings.
fn advisories(
    route: &RouteOutcome,
    mode: TransportMode,
    preferences: &Preferences,
    config: &PlanConfig,
) -> Vec<String> {
    let mut notes = Vec::new();

    if mode == TransportMode::Walking {
        notes.push("Walking route: carry water and sun protection.".to_string());
    }

    if route.total_duration_minutes > config.long_route_minutes {
        notes.push(
            "Long itinerary: plan breaks and pace the visits across the day.".to_string(),
        );
    }

    if route.stops.iter().any(|s| s.candidate.site.monument) {
        notes.push(
            "Includes classified monuments: check opening hours before setting out.".to_string(),
        );
    }

    if preferences.family_friendly {
        notes.push("Family outing: shorter visits per site are recommended.".to_string());
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Site, SiteId};
    use crate::planner::route::ItineraryStop;
    use crate::planner::score::ScoredCandidate;

    struct StubDirectory {
        fail: bool,
    }

    impl ServiceDirectory for StubDirectory {
        async fn find_nearby_services(
            &self,
            near: Coordinate,
            category: &str,
            _limit: usize,
        ) -> Result<Vec<ServiceSuggestion>, LookupError> {
            if self.fail {
                return Err(LookupError::new("directory unreachable"));
            }
            Ok(vec![ServiceSuggestion {
                name: format!("{category} near {near}"),
                category: category.to_string(),
                coordinate: near,
            }])
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(36.75, 3.06).unwrap()
    }

    fn stop(id: u64, monument: bool, service_names: Vec<String>) -> ItineraryStop {
        let site = Site {
            id: SiteId(id),
            name: format!("Site {id}"),
            coordinate: origin(),
            monument,
            vestige: false,
            service_count: 0,
            media_count: 0,
            description_len: 0,
            service_names,
        };
        let waypoint = crate::planner::waypoint::site_waypoint(&site, "https://example.com/sites");
        ItineraryStop {
            candidate: ScoredCandidate::evaluate(site, origin()),
            travel_minutes: 0,
            elapsed_minutes: 30,
            waypoint,
        }
    }

    fn route_with(stops: Vec<ItineraryStop>, duration: u32) -> RouteOutcome {
        RouteOutcome {
            stops,
            total_distance_km: 0.0,
            total_duration_minutes: duration,
        }
    }

    fn all_preferences() -> Preferences {
        Preferences {
            include_services: true,
            include_lodging: true,
            ..Preferences::default()
        }
    }

    #[tokio::test]
    async fn suggestions_keyed_to_leading_stops() {
        let directory = StubDirectory { fail: false };
        let route = route_with(
            vec![
                stop(1, false, Vec::new()),
                stop(2, false, Vec::new()),
                stop(3, false, Vec::new()),
                stop(4, false, Vec::new()),
            ],
            120,
        );

        let enrichment = enrich(
            &directory,
            origin(),
            &route,
            TransportMode::Driving,
            &all_preferences(),
            &PlanConfig::default(),
        )
        .await;

        match enrichment.services {
            Lookup::Fetched(suggestions) => assert_eq!(suggestions.len(), 3),
            other => panic!("expected fetched suggestions, got {other:?}"),
        }
        match enrichment.lodging {
            Lookup::Fetched(Some(s)) => assert_eq!(s.category, "lodging"),
            other => panic!("expected lodging suggestion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn directory_failure_degrades_blocks() {
        let directory = StubDirectory { fail: true };
        let route = route_with(vec![stop(1, false, Vec::new())], 90);

        let enrichment = enrich(
            &directory,
            origin(),
            &route,
            TransportMode::Driving,
            &all_preferences(),
            &PlanConfig::default(),
        )
        .await;

        assert_eq!(enrichment.services, Lookup::Degraded);
        assert_eq!(enrichment.lodging, Lookup::Degraded);
        // Advisory and accessibility blocks are computed locally and survive.
        assert_eq!(enrichment.accessibility.rating, AccessibilityRating::Limited);
    }

    #[tokio::test]
    async fn blocks_not_requested_are_skipped() {
        let directory = StubDirectory { fail: true };
        let route = route_with(vec![stop(1, false, Vec::new())], 90);

        let enrichment = enrich(
            &directory,
            origin(),
            &route,
            TransportMode::Driving,
            &Preferences::default(),
            &PlanConfig::default(),
        )
        .await;

        assert_eq!(enrichment.services, Lookup::NotRequested);
        assert_eq!(enrichment.lodging, Lookup::NotRequested);
    }

    #[tokio::test]
    async fn empty_route_gets_empty_suggestions() {
        let directory = StubDirectory { fail: false };
        let route = route_with(Vec::new(), 0);

        let enrichment = enrich(
            &directory,
            origin(),
            &route,
            TransportMode::Driving,
            &all_preferences(),
            &PlanConfig::default(),
        )
        .await;

        assert_eq!(enrichment.services, Lookup::Fetched(Vec::new()));
    }

    #[test]
    fn accessibility_buckets() {
        let accessible = || stop(1, false, vec!["Wheelchair ramp".to_string()]);
        let plain = |id| stop(id, false, Vec::new());

        // 1/1 accessible: excellent.
        let route = route_with(vec![accessible()], 60);
        assert_eq!(
            accessibility_summary(&route).rating,
            AccessibilityRating::Excellent
        );

        // 1/2 accessible: good.
        let route = route_with(vec![accessible(), plain(2)], 60);
        assert_eq!(
            accessibility_summary(&route).rating,
            AccessibilityRating::Good
        );

        // 1/3 accessible: limited.
        let route = route_with(vec![accessible(), plain(2), plain(3)], 60);
        assert_eq!(
            accessibility_summary(&route).rating,
            AccessibilityRating::Limited
        );

        // No stops: limited, ratio zero.
        let route = route_with(Vec::new(), 0);
        let summary = accessibility_summary(&route);
        assert_eq!(summary.ratio, 0.0);
        assert_eq!(summary.rating, AccessibilityRating::Limited);
    }

    #[test]
    fn advisory_selection() {
        let config = PlanConfig::default();

        // Walking mode triggers the hydration note.
        let route = route_with(vec![stop(1, false, Vec::new())], 90);
        let notes = advisories(
            &route,
            TransportMode::Walking,
            &Preferences::default(),
            &config,
        );
        assert!(notes.iter().any(|n| n.contains("water")));

        // Long driving route with a monument: pacing + opening hours.
        let route = route_with(vec![stop(1, true, Vec::new())], 300);
        let notes = advisories(
            &route,
            TransportMode::Driving,
            &Preferences::default(),
            &config,
        );
        assert!(notes.iter().any(|n| n.contains("pace")));
        assert!(notes.iter().any(|n| n.contains("opening hours")));
        assert!(!notes.iter().any(|n| n.contains("water")));

        // Exactly the threshold does not trigger pacing.
        let route = route_with(vec![stop(1, false, Vec::new())], 240);
        let notes = advisories(
            &route,
            TransportMode::Driving,
            &Preferences::default(),
            &config,
        );
        assert!(notes.is_empty());
    }
}
