//! Show command for displaying full listing details
//!
//! Implements the `vrd show` command to display complete listing
//! information including buyer interest (wishlists and bookings).

use crate::output::{format_area, format_bhk, format_price};
use chrono::{DateTime, Utc};
use clap::Args;
use veranda_db::{Booking, Database, DbError, Property};

/// Show full details of a listing
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Listing ID to show (case-insensitive)
    #[arg(required = true)]
    pub id: String,
}

/// Detailed view of a listing with buyer interest
#[derive(Debug)]
pub struct PropertyDetail {
    /// The listing itself
    pub property: Property,
    /// Bookings placed against this listing, oldest first
    pub bookings: Vec<Booking>,
    /// How many users have this listing on their wishlist
    pub wishlist_count: usize,
}

impl ShowCommand {
    /// Execute the show command.
    ///
    /// Fetches the listing with the given ID along with its bookings
    /// and wishlist interest.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - The listing with the given ID does not exist
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<PropertyDetail, DbError> {
        // Normalize ID to lowercase; stored IDs are lowercase slugs
        let id = self.id.to_lowercase();

        let property = db
            .properties()
            .get(&id)
            .await?
            .ok_or_else(|| DbError::NotFound {
                property_id: self.id.clone(),
            })?;

        let bookings = db.bookings().list_for_property(&id).await?;
        let wishlist_count = db
            .wishlist()
            .list_all()
            .await?
            .iter()
            .filter(|e| e.property_id == id)
            .count();

        Ok(PropertyDetail {
            property,
            bookings,
            wishlist_count,
        })
    }
}

/// Format a listing detail for display
impl std::fmt::Display for PropertyDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = &self.property;

        // Header with listing ID and name
        writeln!(f, "Listing: {} - {}", p.id, p.name)?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f)?;

        // Details section
        writeln!(f, "Details")?;
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "Developer: {}", or_none(&p.developer))?;
        writeln!(f, "Location:  {}", or_none(&p.location))?;
        writeln!(f, "Type:      {}", or_none(&p.property_type))?;
        if p.configuration.is_empty() {
            writeln!(f, "Config:    (none)")?;
        } else {
            writeln!(f, "Config:    {} ({})", p.configuration, format_bhk(p.bhk()))?;
        }
        writeln!(f, "Price:     {}", format_price(p.price))?;
        writeln!(f, "Area:      {}", format_area(p.carpet_area))?;
        writeln!(f, "Status:    {} ({}% complete)", p.status.label(), p.progress)?;
        writeln!(f)?;

        // Timestamps
        writeln!(f, "Created: {}", format_timestamp(p.created_at))?;
        writeln!(f, "Updated: {}", format_timestamp(p.updated_at))?;

        // Buyer interest section
        if self.wishlist_count > 0 || !self.bookings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Interest")?;
            writeln!(f, "{}", "-".repeat(40))?;

            if self.wishlist_count > 0 {
                writeln!(f, "Wishlisted by {} user(s)", self.wishlist_count)?;
            }

            if !self.bookings.is_empty() {
                writeln!(f, "Bookings:")?;
                for booking in &self.bookings {
                    let note_part = booking
                        .note
                        .as_ref()
                        .map(|n| format!(" ({})", n))
                        .unwrap_or_default();
                    writeln!(
                        f,
                        "  - {}: {}{}",
                        booking.user,
                        format_price(booking.amount),
                        note_part
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Substitute a placeholder for empty string fields
fn or_none(s: &str) -> &str {
    if s.is_empty() { "(none)" } else { s }
}

/// Format a timestamp for readable display
fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}
