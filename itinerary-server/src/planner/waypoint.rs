//! Waypoint payload encoding.
//!
//! Serializes stops and whole itineraries into the structured payloads the
//! external code-rendering service consumes. No image is produced here;
//! rendering happens downstream.

use serde::Serialize;

use crate::domain::{Coordinate, Site, SiteId};

/// Payload describing a single stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteWaypoint {
    #[serde(rename = "type")]
    kind: &'static str,
    pub id: SiteId,
    pub name: String,
    pub coordinate: Coordinate,
    pub external_url: String,
}

/// Short reference to a stop inside an itinerary payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopRef {
    pub id: SiteId,
    pub name: String,
}

/// Payload describing a whole itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryWaypoint {
    #[serde(rename = "type")]
    kind: &'static str,
    pub stops: Vec<StopRef>,
}

/// Encode a site into its stop payload.
pub fn site_waypoint(site: &Site, url_base: &str) -> SiteWaypoint {
    SiteWaypoint {
        kind: "site_waypoint",
        id: site.id,
        name: site.name.clone(),
        coordinate: site.coordinate,
        external_url: format!("{}/{}", url_base.trim_end_matches('/'), site.id),
    }
}

/// Encode the itinerary-level payload from the visited sites, in order.
pub fn itinerary_waypoint<'a, I>(sites: I) -> ItineraryWaypoint
where
    I: IntoIterator<Item = &'a Site>,
{
    ItineraryWaypoint {
        kind: "itinerary",
        stops: sites
            .into_iter()
            .map(|site| StopRef {
                id: site.id,
                name: site.name.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: u64, name: &str) -> Site {
        Site {
            id: SiteId(id),
            name: name.to_string(),
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
    fn stop_payload_shape() {
        let payload = site_waypoint(&site(42, "Casbah"), "https://example.com/sites");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["type"], "site_waypoint");
        assert_eq!(json["id"], 42);
        assert_eq!(json["name"], "Casbah");
        assert_eq!(json["coordinate"]["lat"], 36.75);
        assert_eq!(json["coordinate"]["lng"], 3.06);
        assert_eq!(json["external_url"], "https://example.com/sites/42");
    }

    #[test]
    fn url_base_trailing_slash() {
        let payload = site_waypoint(&site(7, "Tipaza"), "https://example.com/sites/");
        assert_eq!(payload.external_url, "https://example.com/sites/7");
    }

    #[test]
    fn itinerary_payload_preserves_order() {
        let a = site(1, "First");
        let b = site(2, "Second");
        let payload = itinerary_waypoint([&b, &a]);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["type"], "itinerary");
        assert_eq!(json["stops"][0]["id"], 2);
        assert_eq!(json["stops"][0]["name"], "Second");
        assert_eq!(json["stops"][1]["id"], 1);
    }

    #[test]
    fn empty_itinerary_payload() {
        let payload = itinerary_waypoint(std::iter::empty::<&Site>());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["stops"].as_array().unwrap().len(), 0);
    }
}
