//! Wishlist repository for per-user saved listings

use crate::error::{DbError, DbResult};
use crate::models::WishlistEntry;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::debug;

/// Repository for wishlist operations
///
/// A wishlist entry ties a user name to a property ID. Each pair is
/// stored at most once.
pub struct WishlistRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Minimal row for existence probes
#[derive(Debug, Deserialize)]
struct IdOnly {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
}

/// Raw wishlist row as stored
#[derive(Debug, Deserialize)]
struct WishlistRow {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
    user: Option<String>,
    property_id: Option<String>,
    added_at: Option<DateTime<Utc>>,
}

impl WishlistRow {
    fn into_entry(self) -> WishlistEntry {
        WishlistEntry {
            user: self.user.unwrap_or_default(),
            property_id: self.property_id.unwrap_or_default(),
            added_at: self.added_at,
        }
    }
}

impl<'a> WishlistRepository<'a> {
    /// Create a new WishlistRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check whether a property is already on a user's wishlist.
    pub async fn is_wishlisted(&self, user: &str, property_id: &str) -> DbResult<bool> {
        let mut result = self
            .client
            .query("SELECT id FROM wishlist WHERE user = $user AND property_id = $property_id")
            .bind(("user", user.to_string()))
            .bind(("property_id", property_id.to_string()))
            .await?;
        let rows: Vec<IdOnly> = result.take(0)?;
        Ok(!rows.is_empty())
    }

    /// Add a property to a user's wishlist.
    ///
    /// # Arguments
    ///
    /// * `user` - The user adding the property
    /// * `property_id` - The property to add
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the property does not exist.
    /// Returns `DbError::AlreadyWishlisted` if the pair already exists.
    pub async fn add(&self, user: &str, property_id: &str) -> DbResult<()> {
        let property: Option<IdOnly> = self
            .client
            .select(("property", property_id))
            .await
            .map_err(|e| DbError::Query(Box::new(e)))?;
        if property.is_none() {
            return Err(DbError::NotFound {
                property_id: property_id.to_string(),
            });
        }

        if self.is_wishlisted(user, property_id).await? {
            return Err(DbError::AlreadyWishlisted {
                property_id: property_id.to_string(),
                user: user.to_string(),
            });
        }

        debug!("Adding property {} to wishlist of {}", property_id, user);
        self.client
            .query("CREATE wishlist SET user = $user, property_id = $property_id")
            .bind(("user", user.to_string()))
            .bind(("property_id", property_id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    /// Remove a property from a user's wishlist.
    ///
    /// Removal is idempotent. The return value reports whether an
    /// entry was actually present.
    pub async fn remove(&self, user: &str, property_id: &str) -> DbResult<bool> {
        let present = self.is_wishlisted(user, property_id).await?;

        debug!("Removing property {} from wishlist of {}", property_id, user);
        self.client
            .query("DELETE wishlist WHERE user = $user AND property_id = $property_id")
            .bind(("user", user.to_string()))
            .bind(("property_id", property_id.to_string()))
            .await?
            .check()?;
        Ok(present)
    }

    /// List a user's wishlist entries, oldest first.
    pub async fn list_for_user(&self, user: &str) -> DbResult<Vec<WishlistEntry>> {
        let mut result = self
            .client
            .query("SELECT * FROM wishlist WHERE user = $user")
            .bind(("user", user.to_string()))
            .await?;
        let rows: Vec<WishlistRow> = result.take(0)?;
        debug!("Found {} wishlist entries for {}", rows.len(), user);

        let mut entries: Vec<WishlistEntry> =
            rows.into_iter().map(WishlistRow::into_entry).collect();
        entries.sort_by(|a, b| a.added_at.cmp(&b.added_at));
        Ok(entries)
    }

    /// List every wishlist entry in the database, oldest first.
    ///
    /// Used by export to produce a full backup.
    pub async fn list_all(&self) -> DbResult<Vec<WishlistEntry>> {
        let mut result = self.client.query("SELECT * FROM wishlist").await?;
        let rows: Vec<WishlistRow> = result.take(0)?;

        let mut entries: Vec<WishlistEntry> =
            rows.into_iter().map(WishlistRow::into_entry).collect();
        entries.sort_by(|a, b| a.added_at.cmp(&b.added_at));
        Ok(entries)
    }
}
