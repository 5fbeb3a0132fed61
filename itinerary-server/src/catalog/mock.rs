//! Mock catalogue for testing and offline development.
//!
//! Loads site and service fixtures from JSON files and serves them through
//! the same collaborator traits as the real client.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{CategoryFilter, Coordinate, Site};
use crate::geo;
use crate::planner::{Itinerary, ItineraryStore, LookupError, ServiceDirectory, ServiceSuggestion, SiteRepository};

use super::convert::{convert_nearby_service, convert_sites};
use super::error::CatalogError;
use super::types::{NearbyServicesResponse, SiteSearchResponse};

/// Mock catalogue client backed by fixture data.
///
/// Useful for development without catalogue credentials. Distance filtering
/// runs in-process so planning behaves exactly as it would against the real
/// catalogue.
#[derive(Debug, Clone)]
pub struct MockCatalogClient {
    sites: Arc<Vec<Site>>,
    services: Arc<Vec<ServiceSuggestion>>,
    next_id: Arc<AtomicU64>,
}

impl MockCatalogClient {
    /// Load fixtures from a directory.
    ///
    /// Expects `sites.json` (required) and `services.json` (optional), in
    /// the catalogue API response format.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let data_dir = data_dir.as_ref();

        let sites_path = data_dir.join("sites.json");
        let json = std::fs::read_to_string(&sites_path).map_err(|e| {
            CatalogError::Fixture(format!("failed to read {sites_path:?}: {e}"))
        })?;
        let search: SiteSearchResponse = serde_json::from_str(&json).map_err(|e| {
            CatalogError::Fixture(format!("failed to parse {sites_path:?}: {e}"))
        })?;
        let sites = convert_sites(&search.sites);

        if sites.is_empty() {
            return Err(CatalogError::Fixture(format!(
                "no documented sites in {sites_path:?}"
            )));
        }

        let services_path = data_dir.join("services.json");
        let services = if services_path.is_file() {
            let json = std::fs::read_to_string(&services_path).map_err(|e| {
                CatalogError::Fixture(format!("failed to read {services_path:?}: {e}"))
            })?;
            let nearby: NearbyServicesResponse = serde_json::from_str(&json).map_err(|e| {
                CatalogError::Fixture(format!("failed to parse {services_path:?}: {e}"))
            })?;
            nearby
                .services
                .iter()
                .filter_map(|r| convert_nearby_service(r).ok())
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self::from_parts(sites, services))
    }

    /// Build a mock directly from domain sites.
    pub fn from_sites(sites: Vec<Site>) -> Self {
        Self::from_parts(sites, Vec::new())
    }

    fn from_parts(sites: Vec<Site>, services: Vec<ServiceSuggestion>) -> Self {
        Self {
            sites: Arc::new(sites),
            services: Arc::new(services),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of loaded sites.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}

impl SiteRepository for MockCatalogClient {
    async fn find_near(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: CategoryFilter,
    ) -> Result<Vec<Site>, LookupError> {
        Ok(self
            .sites
            .iter()
            .filter(|site| site.matches_filter(filter))
            .filter(|site| geo::distance_km(origin, site.coordinate) <= radius_km)
            .cloned()
            .collect())
    }
}

impl ServiceDirectory for MockCatalogClient {
    async fn find_nearby_services(
        &self,
        near: Coordinate,
        category: &str,
        limit: usize,
    ) -> Result<Vec<ServiceSuggestion>, LookupError> {
        let category = category.to_lowercase();
        let mut matches: Vec<_> = self
            .services
            .iter()
            .filter(|s| s.category.to_lowercase() == category)
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            let da = geo::distance_km(near, a.coordinate);
            let db = geo::distance_km(near, b.coordinate);
            da.total_cmp(&db)
        });
        matches.truncate(limit);
        Ok(matches)
    }
}

impl ItineraryStore for MockCatalogClient {
    async fn save(&self, _itinerary: &Itinerary, _owner: &str) -> Result<u64, LookupError> {
        Ok(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SiteId;

    fn write_fixtures(dir: &Path) {
        let sites = r#"{
            "sites": [
                {
                    "id": 1,
                    "name": "Casbah d'Alger",
                    "latitude": 36.783,
                    "longitude": 3.06,
                    "isMonument": true,
                    "details": [{"id": 1, "language": "fr"}]
                },
                {
                    "id": 2,
                    "name": "Tipasa",
                    "latitude": 36.589,
                    "longitude": 2.443,
                    "isVestige": true,
                    "details": [{"id": 2, "language": "fr"}]
                },
                {
                    "id": 3,
                    "name": "Undocumented",
                    "latitude": 36.75,
                    "longitude": 3.06,
                    "details": []
                }
            ]
        }"#;
        let services = r#"{
            "services": [
                {"name": "Dar El Kahina", "category": "restaurant", "latitude": 36.78, "longitude": 3.058},
                {"name": "El Aurassi", "category": "lodging", "latitude": 36.77, "longitude": 3.05}
            ]
        }"#;
        std::fs::write(dir.join("sites.json"), sites).unwrap();
        std::fs::write(dir.join("services.json"), services).unwrap();
    }

    #[test]
    fn load_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());

        let client = MockCatalogClient::new(dir.path()).unwrap();
        // The undocumented record is dropped on load.
        assert_eq!(client.site_count(), 2);
    }

    #[test]
    fn missing_sites_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = MockCatalogClient::new(dir.path());
        assert!(matches!(result, Err(CatalogError::Fixture(_))));
    }

    #[tokio::test]
    async fn find_near_filters_by_radius_and_category() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let client = MockCatalogClient::new(dir.path()).unwrap();

        let algiers = Coordinate::new(36.75, 3.06).unwrap();

        // Tipasa is ~60 km away, outside a 10 km radius.
        let near = client
            .find_near(algiers, 10.0, CategoryFilter::Any)
            .await
            .unwrap();
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].id, SiteId(1));

        let vestiges = client
            .find_near(algiers, 100.0, CategoryFilter::Vestige)
            .await
            .unwrap();
        assert_eq!(vestiges.len(), 1);
        assert_eq!(vestiges[0].id, SiteId(2));
    }

    #[tokio::test]
    async fn nearby_services_filter_by_category() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let client = MockCatalogClient::new(dir.path()).unwrap();

        let near = Coordinate::new(36.78, 3.06).unwrap();
        let restaurants = client
            .find_nearby_services(near, "restaurant", 3)
            .await
            .unwrap();
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "Dar El Kahina");

        let none = client.find_nearby_services(near, "museum", 3).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn save_returns_sequential_ids() {
        let site = Site {
            id: SiteId(1),
            name: "Casbah d'Alger".to_string(),
            coordinate: Coordinate::new(36.783, 3.06).unwrap(),
            monument: true,
            vestige: false,
            service_count: 0,
            media_count: 0,
            description_len: 0,
            service_names: vec![],
        };
        let client = MockCatalogClient::from_sites(vec![site]);

        let itinerary = Itinerary {
            origin: Coordinate::new(36.75, 3.06).unwrap(),
            stops: vec![],
            total_distance_km: 0.0,
            total_duration_minutes: 0,
            waypoint: crate::planner::itinerary_waypoint(std::iter::empty::<&Site>()),
            generated_at: chrono::Utc::now(),
        };

        assert_eq!(client.save(&itinerary, "amina").await.unwrap(), 1);
        assert_eq!(client.save(&itinerary, "amina").await.unwrap(), 2);
    }
}
