//! Site-catalogue HTTP client.
//!
//! Async client for the heritage-site catalogue API. Handles Basic
//! authentication, concurrency limiting and conversion to domain types.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::json;
use tokio::sync::Semaphore;

use crate::domain::{CategoryFilter, Coordinate, Site};
use crate::planner::{Itinerary, ItineraryStore, LookupError, ServiceDirectory, ServiceSuggestion, SiteRepository};

use super::convert::{convert_nearby_service, convert_sites};
use super::error::CatalogError;
use super::types::{NearbyServicesResponse, SaveItineraryResponse, SiteSearchResponse};

/// Default base URL for the site catalogue.
const DEFAULT_BASE_URL: &str = "https://catalogue.dziriya.example";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the catalogue client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password
    pub password: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Site-catalogue API client.
///
/// Uses a semaphore to limit concurrent requests against the upstream.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl CatalogClient {
    /// Create a new catalogue client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();

        // The catalogue uses HTTP Basic authentication.
        let token = BASE64.encode(format!("{}:{}", config.username, config.password));
        let mut auth =
            HeaderValue::from_str(&format!("Basic {token}")).map_err(|_| CatalogError::Api {
                status: 0,
                message: "Invalid credential format".to_string(),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    async fn permit(&self) -> Result<tokio::sync::SemaphorePermit<'_>, CatalogError> {
        self.semaphore
            .acquire()
            .await
            .map_err(|_| CatalogError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })
    }

    fn check_status(status: reqwest::StatusCode) -> Result<(), CatalogError> {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }
        Ok(())
    }

    /// Search for documented sites near a coordinate.
    ///
    /// Undocumented records and records with invalid coordinates are
    /// dropped during conversion.
    pub async fn sites_near(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: CategoryFilter,
    ) -> Result<Vec<Site>, CatalogError> {
        let _permit = self.permit().await?;

        let url = format!("{}/api/v1/sites/near", self.base_url);

        let mut query = vec![
            ("lat", origin.lat().to_string()),
            ("lng", origin.lng().to_string()),
            ("radiusKm", radius_km.to_string()),
        ];
        match filter {
            CategoryFilter::Any => {}
            CategoryFilter::Monument => query.push(("category", "monument".to_string())),
            CategoryFilter::Vestige => query.push(("category", "vestige".to_string())),
        }

        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();
        Self::check_status(status)?;

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let search: SiteSearchResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_sites(&search.sites))
    }

    /// Find nearby commercial services of a category.
    pub async fn services_near(
        &self,
        near: Coordinate,
        category: &str,
        limit: usize,
    ) -> Result<Vec<ServiceSuggestion>, CatalogError> {
        let _permit = self.permit().await?;

        let url = format!("{}/api/v1/services/near", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", near.lat().to_string()),
                ("lng", near.lng().to_string()),
                ("category", category.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        Self::check_status(status)?;

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let nearby: NearbyServicesResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        let mut suggestions = Vec::with_capacity(nearby.services.len());
        for record in &nearby.services {
            match convert_nearby_service(record) {
                Ok(s) => suggestions.push(s),
                Err(e) => tracing::warn!("skipping nearby service: {e}"),
            }
        }
        suggestions.truncate(limit);
        Ok(suggestions)
    }

    /// Persist an itinerary for an owner, returning the stored id.
    pub async fn save_itinerary(
        &self,
        itinerary: &Itinerary,
        owner: &str,
    ) -> Result<u64, CatalogError> {
        let _permit = self.permit().await?;

        let url = format!("{}/api/v1/itineraries", self.base_url);

        let stops: Vec<_> = itinerary
            .stops
            .iter()
            .map(|stop| {
                json!({
                    "siteId": stop.candidate.site.id.0,
                    "travelMinutes": stop.travel_minutes,
                    "visitMinutes": stop.candidate.visit_minutes,
                })
            })
            .collect();

        let payload = json!({
            "owner": owner,
            "originLat": itinerary.origin.lat(),
            "originLng": itinerary.origin.lng(),
            "totalDistanceKm": itinerary.total_distance_km,
            "totalDurationMinutes": itinerary.total_duration_minutes,
            "generatedAt": itinerary.generated_at.to_rfc3339(),
            "stops": stops,
        });

        let response = self.http.post(&url).json(&payload).send().await?;

        let status = response.status();
        Self::check_status(status)?;

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let saved: SaveItineraryResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(saved.id)
    }
}

impl SiteRepository for CatalogClient {
    async fn find_near(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: CategoryFilter,
    ) -> Result<Vec<Site>, LookupError> {
        self.sites_near(origin, radius_km, filter)
            .await
            .map_err(|e| LookupError::new(e.to_string()))
    }
}

impl ServiceDirectory for CatalogClient {
    async fn find_nearby_services(
        &self,
        near: Coordinate,
        category: &str,
        limit: usize,
    ) -> Result<Vec<ServiceSuggestion>, LookupError> {
        self.services_near(near, category, limit)
            .await
            .map_err(|e| LookupError::new(e.to_string()))
    }
}

impl ItineraryStore for CatalogClient {
    async fn save(&self, itinerary: &Itinerary, owner: &str) -> Result<u64, LookupError> {
        self.save_itinerary(itinerary, owner)
            .await
            .map_err(|e| LookupError::new(e.to_string()))
    }
}
