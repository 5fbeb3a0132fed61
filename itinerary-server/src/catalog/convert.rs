//! Conversion from catalogue DTOs to domain types.
//!
//! Undocumented sites (no detail records) are dropped here: the catalogue
//! search contract only ever hands documented sites to the planner.

use crate::domain::{Coordinate, Site, SiteId};
use crate::planner::ServiceSuggestion;

use super::types::{NearbyServiceRecord, SiteRecord};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Site coordinates are out of range or not finite
    #[error("site {0} has an invalid coordinate")]
    InvalidCoordinate(u64),

    /// Nearby-service coordinates are out of range or not finite
    #[error("service {0:?} has an invalid coordinate")]
    InvalidServiceCoordinate(String),
}

/// Convert a single site record.
///
/// Returns `Ok(None)` for undocumented sites, which are excluded by
/// contract rather than being an error.
pub fn convert_site(record: &SiteRecord) -> Result<Option<Site>, ConversionError> {
    let documented = record
        .details
        .as_ref()
        .is_some_and(|details| !details.is_empty());
    if !documented {
        return Ok(None);
    }

    let coordinate = Coordinate::new(record.latitude, record.longitude)
        .map_err(|_| ConversionError::InvalidCoordinate(record.id))?;

    let services = record.services.as_deref().unwrap_or(&[]);
    let media = record.media.as_deref().unwrap_or(&[]);

    Ok(Some(Site {
        id: SiteId(record.id),
        name: record.name.clone(),
        coordinate,
        monument: record.is_monument.unwrap_or(false),
        vestige: record.is_vestige.unwrap_or(false),
        service_count: services.len() as u32,
        media_count: media.len() as u32,
        description_len: record.description.as_deref().map_or(0, str::len),
        service_names: services.iter().map(|s| s.name.clone()).collect(),
    }))
}

/// Convert a batch of site records, skipping undocumented and invalid ones.
pub fn convert_sites(records: &[SiteRecord]) -> Vec<Site> {
    let mut sites = Vec::with_capacity(records.len());
    for record in records {
        match convert_site(record) {
            Ok(Some(site)) => sites.push(site),
            Ok(None) => {}
            Err(e) => tracing::warn!("skipping site {}: {e}", record.id),
        }
    }
    sites
}

/// Convert a nearby-service record into a suggestion.
pub fn convert_nearby_service(
    record: &NearbyServiceRecord,
) -> Result<ServiceSuggestion, ConversionError> {
    let coordinate = Coordinate::new(record.latitude, record.longitude)
        .map_err(|_| ConversionError::InvalidServiceCoordinate(record.name.clone()))?;
    Ok(ServiceSuggestion {
        name: record.name.clone(),
        category: record.category.clone().unwrap_or_else(|| "service".to_string()),
        coordinate,
    })
}
