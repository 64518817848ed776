//! Property repository for CRUD operations on listings
//!
//! Provides a repository pattern implementation for property
//! operations, encapsulating SurrealDB queries and the row-to-model
//! defaulting boundary.

use crate::error::{DbError, DbResult};
use crate::models::{Property, PropertyStatus};
use crate::query::{ListingFilter, apply_filters};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{debug, trace};

/// Repository for property CRUD operations
///
/// Encapsulates database queries for listings, providing a clean API
/// that hides the underlying SurrealDB implementation details.
pub struct PropertyRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Update structure for partial property updates
#[derive(Debug, Default)]
pub struct PropertyUpdate {
    /// New name (if Some)
    pub name: Option<String>,
    /// New developer (if Some)
    pub developer: Option<String>,
    /// New location (if Some)
    pub location: Option<String>,
    /// New property type (if Some)
    pub property_type: Option<String>,
    /// New price (if Some)
    pub price: Option<u64>,
    /// New carpet area (if Some)
    pub carpet_area: Option<u32>,
    /// New configuration text (if Some)
    pub configuration: Option<String>,
    /// New status (if Some)
    pub status: Option<PropertyStatus>,
    /// New construction progress (if Some)
    pub progress: Option<u8>,
}

impl PropertyUpdate {
    /// Create a new empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new developer
    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }

    /// Set a new location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set a new property type
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    /// Set a new price
    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set a new carpet area
    pub fn with_carpet_area(mut self, carpet_area: u32) -> Self {
        self.carpet_area = Some(carpet_area);
        self
    }

    /// Set a new configuration text
    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Set a new status
    pub fn with_status(mut self, status: PropertyStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set a new construction progress
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Check if any updates are specified
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.developer.is_some()
            || self.location.is_some()
            || self.property_type.is_some()
            || self.price.is_some()
            || self.carpet_area.is_some()
            || self.configuration.is_some()
            || self.status.is_some()
            || self.progress.is_some()
    }
}

/// Minimal row for checking property existence
#[derive(Debug, Deserialize)]
struct IdOnly {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
}

/// Raw storage row with every field optional
///
/// Imported listings can be sparse. The row-to-model conversion fills
/// in the documented defaults (empty strings, zero numerics, upcoming
/// status) so a record is never dropped for missing data.
#[derive(Debug, Deserialize)]
struct PropertyRow {
    id: surrealdb::sql::Thing,
    name: Option<String>,
    developer: Option<String>,
    location: Option<String>,
    property_type: Option<String>,
    price: Option<i64>,
    carpet_area: Option<i64>,
    configuration: Option<String>,
    status: Option<String>,
    progress: Option<i64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl PropertyRow {
    /// Convert a PropertyRow to a Property, defaulting missing fields
    fn into_property(self) -> Property {
        Property {
            id: self.id.id.to_string(),
            name: self.name.unwrap_or_default(),
            developer: self.developer.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            property_type: self.property_type.unwrap_or_default(),
            price: self.price.map_or(0, |p| p.max(0) as u64),
            carpet_area: self
                .carpet_area
                .map_or(0, |a| a.clamp(0, i64::from(u32::MAX)) as u32),
            configuration: self.configuration.unwrap_or_default(),
            status: self
                .status
                .as_deref()
                .and_then(PropertyStatus::parse)
                .unwrap_or_default(),
            progress: self.progress.map_or(0, |p| p.clamp(0, 100) as u8),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Check that an ID is a safe record-id slug
///
/// IDs are interpolated into record positions in queries, so they are
/// restricted to lowercase alphanumerics and underscores.
pub fn valid_property_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl<'a> PropertyRepository<'a> {
    /// Create a new PropertyRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check if a property with the given ID exists.
    ///
    /// # Arguments
    ///
    /// * `id` - The property ID to check
    ///
    /// # Returns
    ///
    /// `true` if the property exists, `false` otherwise.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let property: Option<IdOnly> = self
            .client
            .select(("property", id))
            .await
            .map_err(|e| DbError::Query(Box::new(e)))?;
        Ok(property.is_some())
    }

    /// Create a new property record.
    ///
    /// The record ID comes from `property.id` and must be a valid
    /// slug (lowercase alphanumerics and underscores).
    ///
    /// # Arguments
    ///
    /// * `property` - The property data to create
    ///
    /// # Errors
    ///
    /// Returns `DbError::ValidationError` if the ID is not a valid slug.
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn create(&self, property: &Property) -> DbResult<()> {
        if !valid_property_id(&property.id) {
            return Err(DbError::ValidationError {
                message: format!(
                    "invalid property id '{}': use lowercase letters, digits, and underscores",
                    property.id
                ),
            });
        }

        debug!(
            "Creating property: {} with name: {}",
            property.id, property.name
        );
        trace!("Property data: {:?}", property);

        let query = format!(
            r#"CREATE property:{} SET
                name = $name,
                developer = $developer,
                location = $location,
                property_type = $property_type,
                price = {},
                carpet_area = {},
                configuration = $configuration,
                status = "{}",
                progress = {}"#,
            property.id,
            property.price,
            property.carpet_area,
            property.status.as_str(),
            property.progress
        );

        self.client
            .query(&query)
            .bind(("name", property.name.clone()))
            .bind(("developer", property.developer.clone()))
            .bind(("location", property.location.clone()))
            .bind(("property_type", property.property_type.clone()))
            .bind(("configuration", property.configuration.clone()))
            .await?
            .check()?;
        Ok(())
    }

    /// Get a property by ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The property ID to fetch
    ///
    /// # Returns
    ///
    /// `Some(Property)` if found, `None` otherwise.
    pub async fn get(&self, id: &str) -> DbResult<Option<Property>> {
        debug!("Fetching property: {}", id);
        let row: Option<PropertyRow> = self.client.select(("property", id)).await.map_err(|e| {
            debug!("Failed to fetch property: {}: {}", id, e);
            DbError::Query(Box::new(e))
        })?;
        if row.is_none() {
            debug!("Property not found: {}", id);
        }
        Ok(row.map(PropertyRow::into_property))
    }

    /// Apply partial updates to a property.
    ///
    /// Always touches `updated_at` when any field changes.
    ///
    /// # Arguments
    ///
    /// * `id` - The property ID to update
    /// * `updates` - The updates to apply
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the property does not exist.
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn update(&self, id: &str, updates: &PropertyUpdate) -> DbResult<()> {
        debug!("Updating property: {}", id);
        trace!("Updates: {:?}", updates);

        if !updates.has_updates() {
            debug!("No updates specified for property: {}", id);
            return Ok(());
        }

        if !self.exists(id).await? {
            return Err(DbError::NotFound {
                property_id: id.to_string(),
            });
        }

        let mut field_updates = Vec::new();

        if let Some(name) = &updates.name {
            field_updates.push(format!("name = \"{}\"", name.replace('\"', "\\\"")));
        }

        if let Some(developer) = &updates.developer {
            field_updates.push(format!(
                "developer = \"{}\"",
                developer.replace('\"', "\\\"")
            ));
        }

        if let Some(location) = &updates.location {
            field_updates.push(format!(
                "location = \"{}\"",
                location.replace('\"', "\\\"")
            ));
        }

        if let Some(property_type) = &updates.property_type {
            field_updates.push(format!(
                "property_type = \"{}\"",
                property_type.replace('\"', "\\\"")
            ));
        }

        if let Some(price) = updates.price {
            field_updates.push(format!("price = {}", price));
        }

        if let Some(carpet_area) = updates.carpet_area {
            field_updates.push(format!("carpet_area = {}", carpet_area));
        }

        if let Some(configuration) = &updates.configuration {
            field_updates.push(format!(
                "configuration = \"{}\"",
                configuration.replace('\"', "\\\"")
            ));
        }

        if let Some(status) = &updates.status {
            field_updates.push(format!("status = \"{}\"", status.as_str()));
        }

        if let Some(progress) = updates.progress {
            field_updates.push(format!("progress = {}", progress));
        }

        field_updates.push("updated_at = time::now()".to_string());

        let query = format!(
            "UPDATE property:{} SET {}",
            id,
            field_updates.join(", ")
        );
        self.client.query(&query).await?.check()?;
        Ok(())
    }

    /// Delete a property by ID.
    ///
    /// Wishlist entries and bookings that reference the property are
    /// removed with it, so no orphan interest rows survive.
    ///
    /// # Arguments
    ///
    /// * `id` - The property ID to delete
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the property does not exist.
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        if !self.exists(id).await? {
            return Err(DbError::NotFound {
                property_id: id.to_string(),
            });
        }

        debug!("Deleting property: {}", id);
        let _: Option<PropertyRow> = self
            .client
            .delete(("property", id))
            .await
            .map_err(|e| DbError::Query(Box::new(e)))?;

        self.client
            .query("DELETE wishlist WHERE property_id = $property_id")
            .query("DELETE booking WHERE property_id = $property_id")
            .bind(("property_id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    /// Load every property record.
    ///
    /// Filtering happens in memory afterwards; the database only
    /// supplies the full record set.
    ///
    /// # Returns
    ///
    /// All properties in insertion order, with missing fields defaulted.
    pub async fn list_all(&self) -> DbResult<Vec<Property>> {
        let mut result = self.client.query("SELECT * FROM property").await?;
        let rows: Vec<PropertyRow> = result.take(0)?;
        debug!("Loaded {} properties", rows.len());
        Ok(rows.into_iter().map(PropertyRow::into_property).collect())
    }

    /// List properties matching the given filter.
    ///
    /// Loads the full record set and runs it through the in-memory
    /// filter pipeline, so results are identical to filtering any
    /// other property slice.
    ///
    /// # Arguments
    ///
    /// * `filter` - The filter criteria to apply
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database query fails.
    pub async fn list(&self, filter: &ListingFilter) -> DbResult<Vec<Property>> {
        let all = self.list_all().await?;
        Ok(apply_filters(&all, filter))
    }

    /// Count properties per construction status.
    ///
    /// Every status appears in the result, including zero counts.
    pub async fn count_by_status(&self) -> DbResult<Vec<(PropertyStatus, usize)>> {
        let all = self.list_all().await?;
        let statuses = [
            PropertyStatus::Ready,
            PropertyStatus::UnderConstruction,
            PropertyStatus::Upcoming,
        ];

        Ok(statuses
            .into_iter()
            .map(|status| {
                let count = all.iter().filter(|p| p.status == status).count();
                (status, count)
            })
            .collect())
    }

    /// Count properties per property type, sorted by type name.
    ///
    /// Listings with an empty type are grouped under the empty string.
    pub async fn count_by_type(&self) -> DbResult<Vec<(String, usize)>> {
        let all = self.list_all().await?;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for property in &all {
            *counts.entry(property.property_type.clone()).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }
}
