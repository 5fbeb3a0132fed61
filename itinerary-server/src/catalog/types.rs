//! Catalogue API response DTOs.
//!
//! These types map directly to the site-catalogue JSON API. Optional
//! collections are `Option<Vec<..>>` because the API omits empty arrays
//! rather than sending them.

use serde::Deserialize;

/// Response from the site search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSearchResponse {
    pub sites: Vec<SiteRecord>,
}

/// A site as the catalogue reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub id: u64,

    pub name: String,

    pub latitude: f64,

    pub longitude: f64,

    /// Classified-monument flag.
    pub is_monument: Option<bool>,

    /// Archaeological-vestige flag. Nothing upstream prevents a record
    /// from carrying both flags.
    pub is_vestige: Option<bool>,

    /// Site description text.
    pub description: Option<String>,

    /// Documented detail records. Sites without any are undocumented and
    /// excluded from planning.
    pub details: Option<Vec<DetailRecord>>,

    /// Attached service tags.
    pub services: Option<Vec<ServiceTagRecord>>,

    /// Attached media items.
    pub media: Option<Vec<MediaRecord>>,
}

/// A documented detail record attached to a site.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub id: u64,

    /// Language of the detail text.
    pub language: Option<String>,

    /// Detail body text.
    pub body: Option<String>,
}

/// A service tag attached to a site.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTagRecord {
    pub id: Option<u64>,

    pub name: String,
}

/// A media item attached to a site.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub id: Option<u64>,

    pub url: Option<String>,
}

/// Response from the nearby-services endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyServicesResponse {
    pub services: Vec<NearbyServiceRecord>,
}

/// A nearby commercial service (restaurant, lodging, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyServiceRecord {
    pub name: String,

    pub category: Option<String>,

    pub latitude: f64,

    pub longitude: f64,
}

/// Response from the itinerary persistence endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveItineraryResponse {
    pub id: u64,
}
