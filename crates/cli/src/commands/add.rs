//! Add command for creating new listings
//!
//! Implements the `vrd add` command to create a property listing with
//! all supported options.

use clap::Args;
use veranda_db::{Database, DbError, Property, PropertyStatus};

/// Maximum number of suffixed IDs to try before giving up
const MAX_ID_ATTEMPTS: u32 = 50;

/// Create a new property listing
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Name of the property project
    #[arg(required = true)]
    pub name: String,

    /// Developer or builder name
    #[arg(short, long)]
    pub developer: Option<String>,

    /// Location, e.g. "Baner, Pune"
    #[arg(short, long)]
    pub location: Option<String>,

    /// Property type (Apartment, Villa, Plot, ...)
    #[arg(short = 't', long = "type")]
    pub property_type: Option<String>,

    /// Asking price in rupees
    #[arg(short, long)]
    pub price: Option<u64>,

    /// Carpet area in square feet
    #[arg(short, long)]
    pub area: Option<u32>,

    /// Configuration, e.g. "3 BHK Apartment"
    #[arg(short, long)]
    pub config: Option<String>,

    /// Construction status (ready, under_construction, upcoming)
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<PropertyStatus>,

    /// Construction progress percent (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub progress: Option<u8>,
}

/// Parse a status string into a PropertyStatus enum
fn parse_status(s: &str) -> Result<PropertyStatus, String> {
    PropertyStatus::parse(s).ok_or_else(|| {
        format!(
            "invalid status '{}'. Valid values: ready, under_construction, upcoming",
            s
        )
    })
}

/// Derive a record ID from a listing name.
///
/// Lowercases, keeps ASCII alphanumerics, and collapses everything
/// else into single underscores. The result satisfies the record ID
/// rules enforced by the repository layer.
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut pending_sep = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            slug.push(c);
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }
    slug
}

impl AddCommand {
    /// Execute the add command.
    ///
    /// Derives a slug ID from the listing name, resolving collisions
    /// with a numeric suffix, and stores the new listing.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - The name is empty or yields no usable ID
    /// - No free ID could be found
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DbError::ValidationError {
                message: "Listing name cannot be empty".to_string(),
            });
        }

        let id = self.generate_unique_id(db).await?;

        let mut property = Property::new(&id, name);

        if let Some(developer) = &self.developer {
            property = property.with_developer(developer.clone());
        }

        if let Some(location) = &self.location {
            property = property.with_location(location.clone());
        }

        if let Some(property_type) = &self.property_type {
            property = property.with_property_type(property_type.clone());
        }

        if let Some(price) = self.price {
            property = property.with_price(price);
        }

        if let Some(area) = self.area {
            property = property.with_carpet_area(area);
        }

        if let Some(config) = &self.config {
            property = property.with_configuration(config.clone());
        }

        if let Some(status) = &self.status {
            property = property.with_status(status.clone());
        }

        if let Some(progress) = self.progress {
            property = property.with_progress(progress);
        }

        db.properties().create(&property).await?;

        Ok(id)
    }

    /// Find an ID that doesn't collide with an existing listing.
    async fn generate_unique_id(&self, db: &Database) -> Result<String, DbError> {
        let base = slugify(&self.name);
        if base.is_empty() {
            return Err(DbError::ValidationError {
                message: format!("cannot derive an ID from name '{}'", self.name),
            });
        }

        let repo = db.properties();
        if !repo.exists(&base).await? {
            return Ok(base);
        }

        for n in 2..=MAX_ID_ATTEMPTS {
            let candidate = format!("{}_{}", base, n);
            if !repo.exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(DbError::ValidationError {
            message: format!("could not find a free ID for '{}'", base),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use veranda_db::valid_property_id;

    /// Helper to create a test database
    async fn setup_test_db() -> (Database, std::path::PathBuf) {
        let temp_dir = env::temp_dir().join(format!(
            "vrd-add-test-{}-{:?}-{}",
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

    /// An AddCommand with only a name set
    fn bare_command(name: &str) -> AddCommand {
        AddCommand {
            name: name.to_string(),
            developer: None,
            location: None,
            property_type: None,
            price: None,
            area: None,
            config: None,
            status: None,
            progress: None,
        }
    }

    // ========================================
    // Slug derivation tests
    // ========================================

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Skyline Towers"), "skyline_towers");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Palm  -  Grove"), "palm_grove");
        assert_eq!(slugify("A.B.C"), "a_b_c");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  (Skyline)  "), "skyline");
        assert_eq!(slugify("...dots..."), "dots");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Tower 21B"), "tower_21b");
    }

    #[test]
    fn test_slugify_symbol_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    // ========================================
    // Status parsing tests
    // ========================================

    #[test]
    fn test_parse_status_valid() {
        assert_eq!(parse_status("ready").unwrap(), PropertyStatus::Ready);
        assert_eq!(
            parse_status("under_construction").unwrap(),
            PropertyStatus::UnderConstruction
        );
        assert_eq!(parse_status("upcoming").unwrap(), PropertyStatus::Upcoming);
    }

    #[test]
    fn test_parse_status_case_insensitive() {
        assert_eq!(parse_status("READY").unwrap(), PropertyStatus::Ready);
        assert_eq!(parse_status("Upcoming").unwrap(), PropertyStatus::Upcoming);
    }

    #[test]
    fn test_parse_status_invalid() {
        let result = parse_status("finished");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid status"));
    }

    // ========================================
    // Execute tests
    // ========================================

    #[tokio::test]
    async fn test_add_simple_listing() {
        let (db, temp_dir) = setup_test_db().await;

        let cmd = bare_command("Skyline Towers");
        let id = cmd.execute(&db).await.expect("Add should succeed");
        assert_eq!(id, "skyline_towers");
        assert!(valid_property_id(&id));

        // Verify the listing was persisted with defaults
        let property = db.properties().get(&id).await.unwrap().unwrap();
        assert_eq!(property.name, "Skyline Towers");
        assert_eq!(property.price, 0);
        assert_eq!(property.carpet_area, 0);
        assert_eq!(property.status, PropertyStatus::Upcoming);
        assert_eq!(property.progress, 0);

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_add_listing_with_all_options() {
        let (db, temp_dir) = setup_test_db().await;

        let cmd = AddCommand {
            name: "Skyline Towers".to_string(),
            developer: Some("Apex Builders".to_string()),
            location: Some("Baner, Pune".to_string()),
            property_type: Some("Apartment".to_string()),
            price: Some(7_200_000),
            area: Some(1100),
            config: Some("2 BHK Apartment".to_string()),
            status: Some(PropertyStatus::Ready),
            progress: Some(100),
        };

        let id = cmd.execute(&db).await.expect("Add should succeed");

        let property = db.properties().get(&id).await.unwrap().unwrap();
        assert_eq!(property.developer, "Apex Builders");
        assert_eq!(property.location, "Baner, Pune");
        assert_eq!(property.property_type, "Apartment");
        assert_eq!(property.price, 7_200_000);
        assert_eq!(property.carpet_area, 1100);
        assert_eq!(property.configuration, "2 BHK Apartment");
        assert_eq!(property.status, PropertyStatus::Ready);
        assert_eq!(property.progress, 100);
        assert_eq!(property.bhk(), 2);

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_add_empty_name_fails() {
        let (db, temp_dir) = setup_test_db().await;

        let result = bare_command("").execute(&db).await;
        assert!(matches!(result, Err(DbError::ValidationError { .. })));

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_add_whitespace_name_fails() {
        let (db, temp_dir) = setup_test_db().await;

        let result = bare_command("   ").execute(&db).await;
        assert!(matches!(result, Err(DbError::ValidationError { .. })));

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_add_symbol_only_name_fails() {
        let (db, temp_dir) = setup_test_db().await;

        let result = bare_command("???").execute(&db).await;
        assert!(matches!(result, Err(DbError::ValidationError { .. })));

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_add_duplicate_names_get_suffixes() {
        let (db, temp_dir) = setup_test_db().await;

        let first = bare_command("Palm Grove").execute(&db).await.unwrap();
        let second = bare_command("Palm Grove").execute(&db).await.unwrap();
        let third = bare_command("Palm Grove").execute(&db).await.unwrap();

        assert_eq!(first, "palm_grove");
        assert_eq!(second, "palm_grove_2");
        assert_eq!(third, "palm_grove_3");

        // All three exist as separate listings
        assert_eq!(db.properties().list_all().await.unwrap().len(), 3);

        cleanup(&temp_dir);
    }
}
