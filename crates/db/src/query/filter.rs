//! Listing filter criteria and the staged filter pipeline
//!
//! Provides a builder-pattern ListingFilter and the pure
//! `apply_filters` function that narrows a slice of properties down
//! to the matching set. All criteria combine with AND semantics.

use crate::models::{Property, PropertyStatus};
use crate::query::parse::{AreaBound, parse_area, parse_price_range};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sort order applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep the input order
    #[default]
    None,
    PriceAscending,
    PriceDescending,
}

impl SortKey {
    /// Returns the string representation used in persisted filters
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::PriceAscending => "price_ascending",
            SortKey::PriceDescending => "price_descending",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filter criteria for listing properties
///
/// String criteria hold the user's raw input; parsing happens at apply
/// time so a persisted filter survives round-trips unchanged. Empty or
/// all-whitespace strings count as absent. All criteria combine with
/// AND semantics.
///
/// The filter serializes to a flat JSON object, which is also the
/// format callers persist between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Free-text search over name, developer, and location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Case-insensitive substring match on location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Price range: "min-max" inclusive or "min+" open-ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,

    /// Carpet area: "N" exact or "N+" at-least, in square feet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// Case-insensitive exact match on property type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,

    /// Case-insensitive match on construction status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Sort order applied last
    #[serde(default)]
    pub sort: SortKey,
}

impl ListingFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the location substring
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the price range string
    pub fn with_price_range(mut self, price_range: impl Into<String>) -> Self {
        self.price_range = Some(price_range.into());
        self
    }

    /// Set the area criterion string
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Set the property type to match
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    /// Set the status to match
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the sort order
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Check whether any criterion is active
    pub fn is_empty(&self) -> bool {
        active(&self.query).is_none()
            && active(&self.location).is_none()
            && active(&self.price_range).is_none()
            && active(&self.area).is_none()
            && active(&self.property_type).is_none()
            && active(&self.status).is_none()
            && self.sort == SortKey::None
    }
}

/// Treat empty and all-whitespace criteria as absent
fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Apply all filter criteria to a slice of properties.
///
/// Stages run in a fixed order: text query, location, price range,
/// area, property type, status, then sort. The order is observable in
/// the per-stage debug logs, which is what makes a shrinking result
/// set diagnosable.
///
/// The function is total and pure: the input slice is never mutated,
/// malformed criteria fall back to their parse defaults, and the
/// result is always a fresh vector.
pub fn apply_filters(records: &[Property], filter: &ListingFilter) -> Vec<Property> {
    let mut matched: Vec<Property> = records.to_vec();

    if let Some(query) = active(&filter.query) {
        let needle = query.to_lowercase();
        matched.retain(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.developer.to_lowercase().contains(&needle)
                || p.location.to_lowercase().contains(&needle)
        });
        debug!("text query {:?}: {} listings remain", query, matched.len());
    }

    if let Some(location) = active(&filter.location) {
        let needle = location.to_lowercase();
        matched.retain(|p| p.location.to_lowercase().contains(&needle));
        debug!("location {:?}: {} listings remain", location, matched.len());
    }

    if let Some(range) = active(&filter.price_range) {
        let (min, max) = parse_price_range(range);
        matched.retain(|p| {
            if p.price < min {
                return false;
            }
            match max {
                Some(max) => p.price <= max,
                None => true,
            }
        });
        debug!("price range {:?}: {} listings remain", range, matched.len());
    }

    if let Some(area) = active(&filter.area) {
        let bound = parse_area(area);
        matched.retain(|p| match bound {
            AreaBound::Exact(v) => u64::from(p.carpet_area) == v,
            AreaBound::AtLeast(v) => u64::from(p.carpet_area) >= v,
        });
        debug!("area {:?}: {} listings remain", area, matched.len());
    }

    if let Some(property_type) = active(&filter.property_type) {
        matched.retain(|p| p.property_type.eq_ignore_ascii_case(property_type));
        debug!(
            "property type {:?}: {} listings remain",
            property_type,
            matched.len()
        );
    }

    if let Some(status) = active(&filter.status) {
        match PropertyStatus::parse(status) {
            // Upcoming listings have no construction underway
            Some(PropertyStatus::Upcoming) => {
                matched.retain(|p| p.status == PropertyStatus::Upcoming && p.progress == 0);
            }
            // Any started status implies visible progress
            Some(wanted) => matched.retain(|p| p.status == wanted && p.progress > 0),
            // The status set is closed; a typo matches nothing
            None => matched.clear(),
        }
        debug!("status {:?}: {} listings remain", status, matched.len());
    }

    match filter.sort {
        SortKey::None => {}
        SortKey::PriceAscending => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDescending => matched.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    matched
}
