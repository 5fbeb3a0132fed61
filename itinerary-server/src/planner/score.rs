//! Interest scoring and visit-duration estimation.
//!
//! Turns a raw catalogue site into a scored candidate relative to a
//! reference point. Scores are unitless and may be negative; no clamping
//! is applied anywhere.

use crate::domain::{Coordinate, Site};
use crate::geo;

/// Base interest score before any bonus or penalty.
const BASE_SCORE: f64 = 100.0;

/// Base on-site visit time in minutes.
const BASE_VISIT_MINUTES: u32 = 30;

/// A site scored relative to a reference point.
///
/// Created fresh for every planning request and discarded at its end.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub site: Site,
    /// Distance from the reference point, in km.
    pub distance_km: f64,
    /// Computed interest score. May be negative.
    pub score: f64,
    /// Estimated on-site visit duration, in minutes.
    pub visit_minutes: u32,
}

impl ScoredCandidate {
    /// Score a site relative to `reference`.
    pub fn evaluate(site: Site, reference: Coordinate) -> Self {
        let distance_km = geo::distance_km(reference, site.coordinate);
        let score = interest_score(&site, distance_km);
        let visit_minutes = estimate_visit_minutes(&site);
        Self {
            site,
            distance_km,
            score,
            visit_minutes,
        }
    }
}

/// Interest score of a site at a given distance from the reference point.
///
/// The monument and vestige bonuses stack when a record carries both flags;
/// the catalogue does not prevent that combination and the planner does not
/// correct it.
pub fn interest_score(site: &Site, distance_km: f64) -> f64 {
    let mut score = BASE_SCORE;
    if site.monument {
        score += 30.0;
    }
    if site.vestige {
        score += 25.0;
    }
    score += f64::from(site.service_count) * 5.0;
    score += f64::from(site.media_count) * 10.0;
    score -= distance_km * 2.0;
    score
}

/// Estimated on-site visit duration in minutes.
///
/// Monument and vestige increments stack, matching `interest_score`.
pub fn estimate_visit_minutes(site: &Site) -> u32 {
    let mut minutes = BASE_VISIT_MINUTES;
    if site.monument {
        minutes += 30;
    }
    if site.vestige {
        minutes += 45;
    }
    if site.description_len > 500 {
        minutes += 15;
    }
    if site.has_service_containing("guide") {
        minutes += 30;
    }
    minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SiteId;

    fn base_site() -> Site {
        Site {
            id: SiteId(1),
            name: "Test site".to_string(),
            coordinate: Coordinate::new(36.75, 3.06).unwrap(),
            monument: false,
            vestige: false,
            service_count: 0,
            media_count: 0,
            description_len: 0,
            service_names: Vec::new(),
        }
    }

    #[test]
    fn base_score_at_zero_distance() {
        assert_eq!(interest_score(&base_site(), 0.0), 100.0);
    }

    #[test]
    fn monument_scenario() {
        // Monument, 2 services, 1 media item, 2 km away:
        // 100 + 30 + 10 + 10 - 4 = 146.
        let site = Site {
            monument: true,
            service_count: 2,
            media_count: 1,
            description_len: 600,
            ..base_site()
        };
        assert_eq!(interest_score(&site, 2.0), 146.0);
    }

    #[test]
    fn vestige_bonus() {
        let site = Site {
            vestige: true,
            ..base_site()
        };
        assert_eq!(interest_score(&site, 0.0), 125.0);
    }

    #[test]
    fn both_flags_stack() {
        // A record carrying both flags gets both bonuses.
        let site = Site {
            monument: true,
            vestige: true,
            ..base_site()
        };
        assert_eq!(interest_score(&site, 0.0), 155.0);
        assert_eq!(estimate_visit_minutes(&site), 105);
    }

    #[test]
    fn score_can_go_negative() {
        assert_eq!(interest_score(&base_site(), 60.0), -20.0);
    }

    #[test]
    fn visit_minutes_base() {
        assert_eq!(estimate_visit_minutes(&base_site()), 30);
    }

    #[test]
    fn visit_minutes_monument_scenario() {
        // Monument with a long description: 30 + 30 + 15 = 75.
        let site = Site {
            monument: true,
            description_len: 600,
            ..base_site()
        };
        assert_eq!(estimate_visit_minutes(&site), 75);
    }

    #[test]
    fn visit_minutes_description_boundary() {
        // Exactly 500 characters does not trigger the bonus.
        let site = Site {
            description_len: 500,
            ..base_site()
        };
        assert_eq!(estimate_visit_minutes(&site), 30);

        let site = Site {
            description_len: 501,
            ..base_site()
        };
        assert_eq!(estimate_visit_minutes(&site), 45);
    }

    #[test]
    fn visit_minutes_guide_service() {
        let site = Site {
            service_names: vec!["Visite GUIDÉE avec guide".to_string()],
            ..base_site()
        };
        assert_eq!(estimate_visit_minutes(&site), 60);
    }

    #[test]
    fn evaluate_computes_distance() {
        let reference = Coordinate::new(36.75, 3.06).unwrap();
        let candidate = ScoredCandidate::evaluate(base_site(), reference);
        // The site sits at the reference point in base_site().
        assert!(candidate.distance_km < 1e-9);
        assert_eq!(candidate.score, 100.0);
        assert_eq!(candidate.visit_minutes, 30);
    }
}
