//! Caching layer for catalogue site searches.
//!
//! Site search is by far the most expensive upstream call, and nearby
//! requests cover heavily-overlapping areas. Coordinates are snapped to a
//! grid and radii to whole kilometres so that nearby requests share cache
//! entries while cardinality stays bounded.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::catalog::CatalogClient;
use crate::domain::{CategoryFilter, Coordinate, Site};
use crate::planner::{Itinerary, ItineraryStore, LookupError, ServiceDirectory, ServiceSuggestion, SiteRepository};

/// Cache key for site searches: (lat cell, lng cell, radius in whole km, filter).
type SearchKey = (i32, i32, u32, CategoryFilter);

/// Cached site search entry.
type SearchEntry = Arc<Vec<Site>>;

/// Configuration for the site-search cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// Grid resolution: cells per degree of latitude/longitude.
    /// 100 cells per degree is roughly a 1 km grid.
    pub cells_per_degree: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
            cells_per_degree: 100.0,
        }
    }
}

/// Cache for catalogue site searches.
pub struct SearchCache {
    searches: MokaCache<SearchKey, SearchEntry>,
    cells_per_degree: f64,
}

impl SearchCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            searches,
            cells_per_degree: config.cells_per_degree,
        }
    }

    /// Snap a search to its cache key.
    fn search_key(&self, origin: Coordinate, radius_km: f64, filter: CategoryFilter) -> SearchKey {
        let lat_cell = (origin.lat() * self.cells_per_degree).floor() as i32;
        let lng_cell = (origin.lng() * self.cells_per_degree).floor() as i32;
        // Round up so a cached entry always covers at least the asked radius.
        let radius = radius_km.ceil() as u32;
        (lat_cell, lng_cell, radius, filter)
    }

    /// Get a cached search entry.
    pub async fn get(&self, key: &SearchKey) -> Option<SearchEntry> {
        self.searches.get(key).await
    }

    /// Insert a search entry into the cache.
    pub async fn insert(&self, key: SearchKey, entry: SearchEntry) {
        self.searches.insert(key, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.searches.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.searches.invalidate_all();
    }
}

/// Catalogue client with a site-search cache.
///
/// Site searches go through the cache; service lookups and itinerary saves
/// always hit the catalogue directly.
pub struct CachedCatalogClient {
    client: CatalogClient,
    cache: SearchCache,
}

impl CachedCatalogClient {
    /// Create a new cached client.
    pub fn new(client: CatalogClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: SearchCache::new(cache_config),
        }
    }

    /// Search for sites near a coordinate, using cache if available.
    pub async fn sites_near(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: CategoryFilter,
    ) -> Result<Arc<Vec<Site>>, LookupError> {
        let key = self.cache.search_key(origin, radius_km, filter);

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let sites = self
            .client
            .sites_near(origin, key.2 as f64, filter)
            .await
            .map_err(|e| LookupError::new(e.to_string()))?;

        let entry = Arc::new(sites);
        self.cache.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl SiteRepository for CachedCatalogClient {
    async fn find_near(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: CategoryFilter,
    ) -> Result<Vec<Site>, LookupError> {
        let sites = self.sites_near(origin, radius_km, filter).await?;
        Ok(sites.as_ref().clone())
    }
}

impl ServiceDirectory for CachedCatalogClient {
    async fn find_nearby_services(
        &self,
        near: Coordinate,
        category: &str,
        limit: usize,
    ) -> Result<Vec<ServiceSuggestion>, LookupError> {
        self.client.find_nearby_services(near, category, limit).await
    }
}

impl ItineraryStore for CachedCatalogClient {
    async fn save(&self, itinerary: &Itinerary, owner: &str) -> Result<u64, LookupError> {
        self.client.save(itinerary, owner).await
    }
}
