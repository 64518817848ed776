//! Dashboard command for a portfolio overview
//!
//! Implements the `vrd dashboard` command: listing counts broken down
//! by status and type, plus the volume of buyer interest.

use clap::Args;
use veranda_db::{Database, DbError, PropertyStatus};

/// Show an overview of the stored listings
#[derive(Debug, Args)]
pub struct DashboardCommand {}

/// Result of the dashboard command
#[derive(Debug)]
pub struct DashboardResult {
    /// Listing counts per status, fixed order, zeros included
    pub by_status: Vec<(PropertyStatus, usize)>,
    /// Listing counts per property type, alphabetical
    pub by_type: Vec<(String, usize)>,
    /// Total wishlist entries across all users
    pub wishlist_entries: usize,
    /// Total bookings across all users
    pub bookings: usize,
}

impl DashboardResult {
    /// Total number of listings across all statuses
    pub fn total_listings(&self) -> usize {
        self.by_status.iter().map(|(_, count)| count).sum()
    }
}

impl std::fmt::Display for DashboardResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Veranda dashboard")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f)?;
        writeln!(f, "Listings: {}", self.total_listings())?;
        writeln!(f)?;

        writeln!(f, "By status")?;
        writeln!(f, "{}", "-".repeat(40))?;
        let status_width = self
            .by_status
            .iter()
            .map(|(status, _)| status.label().len())
            .max()
            .unwrap_or(0);
        for (status, count) in &self.by_status {
            writeln!(
                f,
                "{:<width$}  {}",
                format!("{}:", status.label()),
                count,
                width = status_width + 1
            )?;
        }
        writeln!(f)?;

        if !self.by_type.is_empty() {
            writeln!(f, "By type")?;
            writeln!(f, "{}", "-".repeat(40))?;
            let type_width = self
                .by_type
                .iter()
                .map(|(property_type, _)| property_type.len())
                .max()
                .unwrap_or(0);
            for (property_type, count) in &self.by_type {
                writeln!(
                    f,
                    "{:<width$}  {}",
                    format!("{}:", property_type),
                    count,
                    width = type_width + 1
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Interest")?;
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "Wishlist entries: {}", self.wishlist_entries)?;
        write!(f, "Bookings:         {}", self.bookings)
    }
}

impl DashboardCommand {
    /// Execute the dashboard command.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database queries fail.
    pub async fn execute(&self, db: &Database) -> Result<DashboardResult, DbError> {
        let by_status = db.properties().count_by_status().await?;
        let by_type = db.properties().count_by_type().await?;
        let wishlist_entries = db.wishlist().list_all().await?.len();
        let bookings = db.bookings().list_all().await?.len();

        Ok(DashboardResult {
            by_status,
            by_type,
            wishlist_entries,
            bookings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use veranda_db::{Booking, Property};

    /// Helper to create a test database
    async fn setup_test_db() -> (Database, std::path::PathBuf) {
        let temp_dir = env::temp_dir().join(format!(
            "vrd-dashboard-test-{}-{:?}-{}",
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

    #[tokio::test]
    async fn test_dashboard_empty_database() {
        let (db, temp_dir) = setup_test_db().await;

        let cmd = DashboardCommand {};
        let result = cmd.execute(&db).await.unwrap();

        assert_eq!(result.total_listings(), 0);
        assert_eq!(result.by_status.len(), 3);
        assert!(result.by_status.iter().all(|(_, count)| *count == 0));
        assert!(result.by_type.is_empty());
        assert_eq!(result.wishlist_entries, 0);
        assert_eq!(result.bookings, 0);

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let (db, temp_dir) = setup_test_db().await;

        let seeds = [
            ("skyline", "Apartment", PropertyStatus::Ready),
            ("bloom", "Apartment", PropertyStatus::UnderConstruction),
            ("meadow", "Plot", PropertyStatus::Upcoming),
        ];
        for (id, property_type, status) in seeds {
            db.properties()
                .create(
                    &Property::new(id, id)
                        .with_property_type(property_type)
                        .with_status(status),
                )
                .await
                .unwrap();
        }
        db.wishlist().add("asha", "skyline").await.unwrap();
        db.bookings()
            .create(&Booking::new("skyline", "asha", 500_000))
            .await
            .unwrap();

        let result = DashboardCommand {}.execute(&db).await.unwrap();

        assert_eq!(result.total_listings(), 3);
        assert!(
            result
                .by_status
                .contains(&(PropertyStatus::Ready, 1))
        );
        assert!(result.by_type.contains(&("Apartment".to_string(), 2)));
        assert!(result.by_type.contains(&("Plot".to_string(), 1)));
        assert_eq!(result.wishlist_entries, 1);
        assert_eq!(result.bookings, 1);

        cleanup(&temp_dir);
    }

    #[test]
    fn test_dashboard_display() {
        let result = DashboardResult {
            by_status: vec![
                (PropertyStatus::Ready, 5),
                (PropertyStatus::UnderConstruction, 4),
                (PropertyStatus::Upcoming, 3),
            ],
            by_type: vec![("Apartment".to_string(), 7), ("Plot".to_string(), 5)],
            wishlist_entries: 9,
            bookings: 4,
        };

        let output = format!("{}", result);
        assert!(output.contains("Veranda dashboard"));
        assert!(output.contains("Listings: 12"));
        assert!(output.contains("Ready:"));
        assert!(output.contains("Under Construction:"));
        assert!(output.contains("Upcoming:"));
        assert!(output.contains("Apartment:"));
        assert!(output.contains("Wishlist entries: 9"));
        assert!(output.contains("Bookings:         4"));
    }

    #[test]
    fn test_dashboard_display_skips_empty_type_section() {
        let result = DashboardResult {
            by_status: vec![
                (PropertyStatus::Ready, 0),
                (PropertyStatus::UnderConstruction, 0),
                (PropertyStatus::Upcoming, 0),
            ],
            by_type: vec![],
            wishlist_entries: 0,
            bookings: 0,
        };

        let output = format!("{}", result);
        assert!(output.contains("Listings: 0"));
        assert!(!output.contains("By type"));
    }
}
