//! Remove command for deleting listings
//!
//! Implements the `vrd remove` command. Deleting a listing also drops
//! the wishlist entries and bookings that pointed at it.

use clap::Args;
use veranda_db::{Database, DbError};

/// Remove a listing and its associated interest
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Listing ID to remove (case-insensitive)
    #[arg(required = true)]
    pub id: String,
}

impl RemoveCommand {
    /// Execute the remove command.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the listing does not exist.
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        let id = self.id.to_lowercase();
        db.properties().delete(&id).await?;
        Ok(format!("Removed listing '{}'", id))
    }
}
