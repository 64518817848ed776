//! Data models for Veranda property listings
//!
//! Defines Rust types that map to the SurrealDB schema for properties,
//! wishlist entries, bookings, and related enums.

// Allow dead code for types that are defined for future use
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Construction status of a property
///
/// The status set is closed: listings are ready to move into,
/// under construction, or upcoming (not yet started).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Ready,
    UnderConstruction,
    #[default]
    Upcoming,
}

impl PropertyStatus {
    /// Returns the string representation used in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Ready => "ready",
            PropertyStatus::UnderConstruction => "under_construction",
            PropertyStatus::Upcoming => "upcoming",
        }
    }

    /// Returns the human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            PropertyStatus::Ready => "Ready",
            PropertyStatus::UnderConstruction => "Under Construction",
            PropertyStatus::Upcoming => "Upcoming",
        }
    }

    /// Parse a status string, accepting spaced or snake_case forms
    /// case-insensitively. Returns `None` for anything outside the set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ready" => Some(PropertyStatus::Ready),
            "under_construction" | "under construction" => Some(PropertyStatus::UnderConstruction),
            "upcoming" => Some(PropertyStatus::Upcoming),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A property listing
///
/// Properties are flat records: every field except `id` may be missing
/// at the ingestion boundary, in which case the repository layer fills
/// in the defaults (empty strings, zero numerics, upcoming status)
/// before a `Property` is ever constructed. A record is never rejected
/// for missing data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Stable unique identifier, treated as opaque
    pub id: String,

    /// Listing name
    #[serde(default)]
    pub name: String,

    /// Developer or builder name
    #[serde(default)]
    pub developer: String,

    /// Location (locality, city)
    #[serde(default)]
    pub location: String,

    /// Free-form property type ("Apartment", "Villa", "Plot", ...)
    #[serde(default)]
    pub property_type: String,

    /// Asking price in whole currency units
    #[serde(default)]
    pub price: u64,

    /// Carpet area in square feet
    #[serde(default)]
    pub carpet_area: u32,

    /// Free-text configuration such as "3 BHK Apartment"
    #[serde(default)]
    pub configuration: String,

    /// Construction status
    #[serde(default)]
    pub status: PropertyStatus,

    /// Construction progress percentage (0-100)
    #[serde(default)]
    pub progress: u8,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Property {
    /// Create a new property with required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            developer: String::new(),
            location: String::new(),
            property_type: String::new(),
            price: 0,
            carpet_area: 0,
            configuration: String::new(),
            status: PropertyStatus::Upcoming,
            progress: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the developer name
    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = developer.into();
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the property type
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = property_type.into();
        self
    }

    /// Set the price
    pub fn with_price(mut self, price: u64) -> Self {
        self.price = price;
        self
    }

    /// Set the carpet area
    pub fn with_carpet_area(mut self, carpet_area: u32) -> Self {
        self.carpet_area = carpet_area;
        self
    }

    /// Set the configuration text
    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = configuration.into();
        self
    }

    /// Set the construction status
    pub fn with_status(mut self, status: PropertyStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the construction progress percentage
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    /// Number of bedrooms derived from the configuration text.
    ///
    /// The first contiguous run of ASCII digits is taken as the BHK
    /// count ("3 BHK Apartment" -> 3). Text without digits yields 0.
    pub fn bhk(&self) -> u8 {
        let digits: String = self
            .configuration
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.developer == other.developer
            && self.location == other.location
            && self.property_type == other.property_type
            && self.price == other.price
            && self.carpet_area == other.carpet_area
            && self.configuration == other.configuration
            && self.status == other.status
            && self.progress == other.progress
    }
}

impl Eq for Property {}

/// A wishlist entry linking a user handle to a property
///
/// The user is an opaque handle; there is no account system behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// User handle
    pub user: String,

    /// The wishlisted property ID
    pub property_id: String,

    /// When the entry was added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WishlistEntry {
    /// Create a new wishlist entry
    pub fn new(user: impl Into<String>, property_id: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            property_id: property_id.into(),
            added_at: None,
        }
    }
}

/// A booking made against a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The booked property ID
    pub property_id: String,

    /// User handle that made the booking
    pub user: String,

    /// Booking amount in whole currency units
    #[serde(default)]
    pub amount: u64,

    /// Optional free-text note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// When the booking was made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Create a new booking
    pub fn new(property_id: impl Into<String>, user: impl Into<String>, amount: u64) -> Self {
        Self {
            property_id: property_id.into(),
            user: user.into(),
            amount,
            note: None,
            created_at: None,
        }
    }

    /// Attach a note to this booking
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
