//! Book command for placing a booking against a listing
//!
//! Implements the `vrd book` command. Each user can hold at most one
//! booking per listing; the booking amount defaults to the listing's
//! asking price.

use crate::output::format_price;
use clap::Args;
use veranda_db::{Booking, Database, DbError};

/// Book a listing for a user
#[derive(Debug, Args)]
pub struct BookCommand {
    /// Listing ID to book (case-insensitive)
    #[arg(required = true)]
    pub id: String,

    /// User placing the booking
    #[arg(short, long)]
    pub user: String,

    /// Booking amount in rupees (defaults to the listing price)
    #[arg(short, long)]
    pub amount: Option<u64>,

    /// Free-form note to attach to the booking
    #[arg(short, long)]
    pub note: Option<String>,
}

impl BookCommand {
    /// Execute the book command.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - The listing does not exist
    /// - The user already booked this listing
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        let id = self.id.to_lowercase();

        // Fetch the listing up front; its price is the default amount
        let property = db
            .properties()
            .get(&id)
            .await?
            .ok_or_else(|| DbError::NotFound {
                property_id: self.id.clone(),
            })?;

        let amount = self.amount.unwrap_or(property.price);

        let mut booking = Booking::new(&id, &self.user, amount);
        if let Some(note) = &self.note {
            booking = booking.with_note(note.clone());
        }

        db.bookings().create(&booking).await?;

        Ok(format!(
            "Booked '{}' for {} at {}",
            id,
            self.user,
            format_price(amount)
        ))
    }
}
