//! Heritage-site catalogue client.
//!
//! HTTP client for the site catalogue API, which holds the documented
//! heritage sites (monuments, vestiges), their attached services and media,
//! nearby commercial services, and saved itineraries.
//!
//! Key characteristics of the catalogue:
//! - Only **documented** sites (records with at least one detail entry)
//!   are usable for planning; conversion drops the rest
//! - Empty collections are omitted from responses rather than sent as `[]`
//! - A record may carry both the monument and the vestige flag

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{CatalogClient, CatalogConfig};
pub use convert::{ConversionError, convert_nearby_service, convert_site, convert_sites};
pub use error::CatalogError;
pub use mock::MockCatalogClient;
pub use types::{
    DetailRecord, MediaRecord, NearbyServiceRecord, NearbyServicesResponse, SaveItineraryResponse,
    ServiceTagRecord, SiteRecord, SiteSearchResponse,
};
