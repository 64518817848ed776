//! Booking repository for site-visit bookings against listings

use crate::error::{DbError, DbResult};
use crate::models::Booking;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::debug;

/// Repository for booking operations
///
/// A booking records a user committing an amount against a property.
/// One booking per user and property pair.
pub struct BookingRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Minimal row for existence probes
#[derive(Debug, Deserialize)]
struct IdOnly {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
}

/// Raw booking row as stored
#[derive(Debug, Deserialize)]
struct BookingRow {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
    property_id: Option<String>,
    user: Option<String>,
    amount: Option<i64>,
    note: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl BookingRow {
    fn into_booking(self) -> Booking {
        Booking {
            property_id: self.property_id.unwrap_or_default(),
            user: self.user.unwrap_or_default(),
            amount: self.amount.map_or(0, |a| a.max(0) as u64),
            note: self.note,
            created_at: self.created_at,
        }
    }
}

impl<'a> BookingRepository<'a> {
    /// Create a new BookingRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check whether a user already holds a booking on a property.
    pub async fn has_booking(&self, user: &str, property_id: &str) -> DbResult<bool> {
        let mut result = self
            .client
            .query("SELECT id FROM booking WHERE user = $user AND property_id = $property_id")
            .bind(("user", user.to_string()))
            .bind(("property_id", property_id.to_string()))
            .await?;
        let rows: Vec<IdOnly> = result.take(0)?;
        Ok(!rows.is_empty())
    }

    /// Record a booking.
    ///
    /// # Arguments
    ///
    /// * `booking` - The booking to record
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the property does not exist.
    /// Returns `DbError::AlreadyBooked` if the user already holds a
    /// booking on this property.
    pub async fn create(&self, booking: &Booking) -> DbResult<()> {
        let property: Option<IdOnly> = self
            .client
            .select(("property", booking.property_id.as_str()))
            .await
            .map_err(|e| DbError::Query(Box::new(e)))?;
        if property.is_none() {
            return Err(DbError::NotFound {
                property_id: booking.property_id.clone(),
            });
        }

        if self.has_booking(&booking.user, &booking.property_id).await? {
            return Err(DbError::AlreadyBooked {
                property_id: booking.property_id.clone(),
                user: booking.user.clone(),
            });
        }

        debug!(
            "Recording booking on {} by {} for {}",
            booking.property_id, booking.user, booking.amount
        );
        let query = format!(
            "CREATE booking SET property_id = $property_id, user = $user, amount = {}, note = $note",
            booking.amount
        );
        self.client
            .query(&query)
            .bind(("property_id", booking.property_id.clone()))
            .bind(("user", booking.user.clone()))
            .bind(("note", booking.note.clone()))
            .await?
            .check()?;
        Ok(())
    }

    /// List a user's bookings, oldest first.
    pub async fn list_for_user(&self, user: &str) -> DbResult<Vec<Booking>> {
        let mut result = self
            .client
            .query("SELECT * FROM booking WHERE user = $user")
            .bind(("user", user.to_string()))
            .await?;
        let rows: Vec<BookingRow> = result.take(0)?;
        debug!("Found {} bookings for {}", rows.len(), user);
        Ok(Self::sorted(rows))
    }

    /// List all bookings against a property, oldest first.
    pub async fn list_for_property(&self, property_id: &str) -> DbResult<Vec<Booking>> {
        let mut result = self
            .client
            .query("SELECT * FROM booking WHERE property_id = $property_id")
            .bind(("property_id", property_id.to_string()))
            .await?;
        let rows: Vec<BookingRow> = result.take(0)?;
        debug!("Found {} bookings on {}", rows.len(), property_id);
        Ok(Self::sorted(rows))
    }

    /// List every booking in the database, oldest first.
    ///
    /// Used by export to produce a full backup.
    pub async fn list_all(&self) -> DbResult<Vec<Booking>> {
        let mut result = self.client.query("SELECT * FROM booking").await?;
        let rows: Vec<BookingRow> = result.take(0)?;
        Ok(Self::sorted(rows))
    }

    fn sorted(rows: Vec<BookingRow>) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = rows.into_iter().map(BookingRow::into_booking).collect();
        bookings.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        bookings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::models::Property;
    use crate::repository::PropertyRepository;
    use std::env;

    /// Helper to create a test database
    async fn setup_test_db() -> (Database, std::path::PathBuf) {
        let temp_dir = env::temp_dir().join(format!(
            "vrd-booking-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::connect(&temp_dir).await.unwrap();
        db.init().await.unwrap();

        (db, temp_dir)
    }

    /// Clean up test database
    fn cleanup(path: &std::path::Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    async fn seed_property(db: &Database, id: &str) {
        let repo = PropertyRepository::new(db.client());
        repo.create(&Property::new(id, "Skyline Towers").with_price(7_200_000))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_list_for_user() {
        let (db, temp_dir) = setup_test_db().await;
        seed_property(&db, "skyline").await;
        let repo = BookingRepository::new(db.client());

        let booking = Booking::new("skyline", "asha", 500_000).with_note("Visit on Saturday");
        repo.create(&booking).await.unwrap();

        let bookings = repo.list_for_user("asha").await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].property_id, "skyline");
        assert_eq!(bookings[0].amount, 500_000);
        assert_eq!(bookings[0].note.as_deref(), Some("Visit on Saturday"));
        assert!(bookings[0].created_at.is_some());

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_create_without_note() {
        let (db, temp_dir) = setup_test_db().await;
        seed_property(&db, "skyline").await;
        let repo = BookingRepository::new(db.client());

        repo.create(&Booking::new("skyline", "asha", 500_000))
            .await
            .unwrap();

        let bookings = repo.list_for_user("asha").await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert!(bookings[0].note.is_none());

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_create_missing_property_is_not_found() {
        let (db, temp_dir) = setup_test_db().await;
        let repo = BookingRepository::new(db.client());

        let result = repo.create(&Booking::new("nope", "asha", 1)).await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_double_booking_is_rejected() {
        let (db, temp_dir) = setup_test_db().await;
        seed_property(&db, "skyline").await;
        let repo = BookingRepository::new(db.client());

        repo.create(&Booking::new("skyline", "asha", 500_000))
            .await
            .unwrap();
        let result = repo.create(&Booking::new("skyline", "asha", 600_000)).await;
        assert!(matches!(result, Err(DbError::AlreadyBooked { .. })));

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_two_users_can_book_same_property() {
        let (db, temp_dir) = setup_test_db().await;
        seed_property(&db, "skyline").await;
        let repo = BookingRepository::new(db.client());

        repo.create(&Booking::new("skyline", "asha", 500_000))
            .await
            .unwrap();
        repo.create(&Booking::new("skyline", "ravi", 450_000))
            .await
            .unwrap();

        let on_property = repo.list_for_property("skyline").await.unwrap();
        assert_eq!(on_property.len(), 2);

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_list_for_property_filters_others() {
        let (db, temp_dir) = setup_test_db().await;
        seed_property(&db, "skyline").await;
        seed_property(&db, "meadow").await;
        let repo = BookingRepository::new(db.client());

        repo.create(&Booking::new("skyline", "asha", 500_000))
            .await
            .unwrap();
        repo.create(&Booking::new("meadow", "asha", 100_000))
            .await
            .unwrap();

        let on_meadow = repo.list_for_property("meadow").await.unwrap();
        assert_eq!(on_meadow.len(), 1);
        assert_eq!(on_meadow[0].amount, 100_000);

        let for_asha = repo.list_for_user("asha").await.unwrap();
        assert_eq!(for_asha.len(), 2);

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_list_all_spans_properties() {
        let (db, temp_dir) = setup_test_db().await;
        seed_property(&db, "skyline").await;
        seed_property(&db, "meadow").await;
        let repo = BookingRepository::new(db.client());

        repo.create(&Booking::new("skyline", "asha", 500_000))
            .await
            .unwrap();
        repo.create(&Booking::new("meadow", "ravi", 100_000))
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);

        cleanup(&temp_dir);
    }
}
