//! Update command for editing existing listings
//!
//! Implements the `vrd update` command to change fields on a stored
//! listing. Only the flags that are passed get written; everything
//! else keeps its value.

use clap::Args;
use veranda_db::{Database, DbError, PropertyStatus, PropertyUpdate};

/// Update fields on an existing listing
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Listing ID to update (case-insensitive)
    #[arg(required = true)]
    pub id: String,

    /// New name for the listing
    #[arg(short, long)]
    pub name: Option<String>,

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

impl UpdateCommand {
    /// Execute the update command.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - No field flags were given
    /// - The listing does not exist
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        let id = self.id.to_lowercase();
        let updates = self.build_updates();

        if !updates.has_updates() {
            return Err(DbError::ValidationError {
                message: "Nothing to update. Pass at least one field flag.".to_string(),
            });
        }

        db.properties().update(&id, &updates).await?;

        Ok(format!("Updated listing '{}'", id))
    }

    /// Collect the passed flags into a partial update.
    fn build_updates(&self) -> PropertyUpdate {
        let mut updates = PropertyUpdate::new();

        if let Some(name) = &self.name {
            updates = updates.with_name(name.clone());
        }

        if let Some(developer) = &self.developer {
            updates = updates.with_developer(developer.clone());
        }

        if let Some(location) = &self.location {
            updates = updates.with_location(location.clone());
        }

        if let Some(property_type) = &self.property_type {
            updates = updates.with_property_type(property_type.clone());
        }

        if let Some(price) = self.price {
            updates = updates.with_price(price);
        }

        if let Some(area) = self.area {
            updates = updates.with_carpet_area(area);
        }

        if let Some(config) = &self.config {
            updates = updates.with_configuration(config.clone());
        }

        if let Some(status) = &self.status {
            updates = updates.with_status(status.clone());
        }

        if let Some(progress) = self.progress {
            updates = updates.with_progress(progress);
        }

        updates
    }
}
