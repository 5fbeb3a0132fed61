//! Heritage site (point of interest) types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Identifier of a catalogued site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SiteId(pub u64);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category filter for site searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// No category restriction.
    Any,
    /// Classified monuments only.
    Monument,
    /// Archaeological vestiges only.
    Vestige,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::Any
    }
}

/// A candidate waypoint: a documented site from the catalogue.
///
/// The planner never mutates a `Site`; it only reads its attributes to
/// score and place it. The monument and vestige flags are carried exactly
/// as the catalogue reports them: nothing here prevents a record from
/// having both set, and scoring stacks both bonuses in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub coordinate: Coordinate,
    /// Classified-monument flag.
    pub monument: bool,
    /// Archaeological-vestige flag.
    pub vestige: bool,
    /// Number of service tags attached to the site.
    pub service_count: u32,
    /// Number of media items attached to the site.
    pub media_count: u32,
    /// Length of the site description, in characters.
    pub description_len: usize,
    /// Free-text names of the attached services.
    pub service_names: Vec<String>,
}

impl Site {
    /// Whether the site passes a category filter.
    pub fn matches_filter(&self, filter: CategoryFilter) -> bool {
        match filter {
            CategoryFilter::Any => true,
            CategoryFilter::Monument => self.monument,
            CategoryFilter::Vestige => self.vestige,
        }
    }

    /// Whether any attached service name contains `needle`, ignoring case.
    pub fn has_service_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.service_names
            .iter()
            .any(|s| s.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(monument: bool, vestige: bool) -> Site {
        Site {
            id: SiteId(1),
            name: "Casbah".to_string(),
            coordinate: Coordinate::new(36.78, 3.06).unwrap(),
            monument,
            vestige,
            service_count: 0,
            media_count: 0,
            description_len: 0,
            service_names: vec!["Guided tour".to_string(), "Parking".to_string()],
        }
    }

    #[test]
    fn filter_any_matches_everything() {
        assert!(site(false, false).matches_filter(CategoryFilter::Any));
        assert!(site(true, false).matches_filter(CategoryFilter::Any));
    }

    #[test]
    fn filter_monument() {
        assert!(site(true, false).matches_filter(CategoryFilter::Monument));
        assert!(!site(false, true).matches_filter(CategoryFilter::Monument));
    }

    #[test]
    fn filter_vestige() {
        assert!(site(false, true).matches_filter(CategoryFilter::Vestige));
        assert!(!site(true, false).matches_filter(CategoryFilter::Vestige));
    }

    #[test]
    fn service_name_search_is_case_insensitive() {
        let s = site(false, false);
        assert!(s.has_service_containing("guide"));
        assert!(s.has_service_containing("GUIDE"));
        assert!(s.has_service_containing("parking"));
        assert!(!s.has_service_containing("restaurant"));
    }

    #[test]
    fn site_id_ordering() {
        assert!(SiteId(1) < SiteId(2));
        assert_eq!(SiteId(7), SiteId(7));
    }
}
