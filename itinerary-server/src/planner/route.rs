//! Greedy route construction.
//!
//! Repeatedly picks the unvisited candidate with the best score per minute
//! of cost (travel + visit) until the stop limit or the time budget is
//! reached. The builder never fails: an empty candidate set or an
//! unsatisfiable budget simply produces an empty route.

use crate::domain::Coordinate;
use crate::geo;

use super::config::PlanConfig;
use super::score::ScoredCandidate;
use super::waypoint::{self, SiteWaypoint};

/// A scored candidate placed into a route.
#[derive(Debug, Clone)]
pub struct ItineraryStop {
    pub candidate: ScoredCandidate,
    /// Travel time from the previous stop (or the origin), in minutes.
    pub travel_minutes: u32,
    /// Cumulative elapsed time when the visit at this stop ends, in minutes.
    pub elapsed_minutes: u32,
    /// Payload for the external code renderer.
    pub waypoint: SiteWaypoint,
}

/// Result of route construction.
#[derive(Debug, Clone, Default)]
pub struct RouteOutcome {
    /// Stops in visit order.
    pub stops: Vec<ItineraryStop>,
    /// Total leg distance travelled, in km.
    pub total_distance_km: f64,
    /// Total travel plus visit time, in minutes.
    pub total_duration_minutes: u32,
}

/// Build a route from scored candidates within a stop and time budget.
///
/// Greedy selection: at each step every remaining candidate is costed from
/// the current position, infeasible ones (cost exceeding the remaining
/// budget) are skipped, and the best score/cost ratio wins. Ratio ties are
/// broken by the lower site id, so identical inputs always produce
/// identical routes.
///
/// Legs are always costed at `config.leg_speed_kmh`; the transport mode
/// only ever influences radius sizing upstream. The loop stops once fewer
/// than `config.min_remaining_minutes` remain, even if a short visit would
/// still fit.
pub fn build_route(
    origin: Coordinate,
    candidates: Vec<ScoredCandidate>,
    max_stops: usize,
    budget_minutes: u32,
    config: &PlanConfig,
) -> RouteOutcome {
    let mut pool = candidates;
    pool.truncate(config.max_candidates);

    let mut current = origin;
    let mut remaining = budget_minutes;
    let mut elapsed: u32 = 0;
    let mut outcome = RouteOutcome::default();

    while outcome.stops.len() < max_stops && remaining > config.min_remaining_minutes {
        let mut best: Option<(usize, u32, f64, f64)> = None;

        for (index, candidate) in pool.iter().enumerate() {
            let leg_km = geo::distance_km(current, candidate.site.coordinate);
            let travel = geo::travel_time_minutes(leg_km, config.leg_speed_kmh);
            let total = travel + candidate.visit_minutes;

            if total > remaining {
                continue;
            }

            // Cost is at least the visit time, which is always positive,
            // so the ratio is well defined.
            let ratio = candidate.score / f64::from(total);

            let better = match best {
                None => true,
                Some((best_index, _, _, best_ratio)) => {
                    if ratio > best_ratio {
                        true
                    } else if ratio < best_ratio {
                        false
                    } else {
                        candidate.site.id < pool[best_index].site.id
                    }
                }
            };

            if better {
                best = Some((index, travel, leg_km, ratio));
            }
        }

        let Some((index, travel, leg_km, _)) = best else {
            break;
        };

        let winner = pool.swap_remove(index);
        let total = travel + winner.visit_minutes;

        current = winner.site.coordinate;
        remaining -= total;
        elapsed += total;
        outcome.total_distance_km += leg_km;
        outcome.total_duration_minutes += total;
        let stop_waypoint = waypoint::site_waypoint(&winner.site, &config.site_url_base);
        outcome.stops.push(ItineraryStop {
            candidate: winner,
            travel_minutes: travel,
            elapsed_minutes: elapsed,
            waypoint: stop_waypoint,
        });
    }

    outcome
}
