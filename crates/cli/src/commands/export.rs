//! Export command for exporting database to JSONL format
//!
//! Implements the `vrd export` command to export all listings, wishlist
//! entries, and bookings to a JSONL (JSON Lines) file for backup or
//! migration purposes.

use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use veranda_db::{Booking, Database, DbError, Property, WishlistEntry};

/// Export database to JSONL format
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output file path (defaults to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A record in the export file
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ExportRecord {
    /// A property listing record
    #[serde(rename = "property")]
    Property {
        /// The listing data, including its ID
        #[serde(flatten)]
        property: Box<Property>,
    },
    /// A wishlist entry
    #[serde(rename = "wishlist")]
    Wishlist {
        /// The entry data (user handle and listing ID)
        #[serde(flatten)]
        entry: Box<WishlistEntry>,
    },
    /// A booking
    #[serde(rename = "booking")]
    Booking {
        /// The booking data
        #[serde(flatten)]
        booking: Box<Booking>,
    },
}

/// Result of the export command
pub struct ExportResult {
    /// Number of listings exported
    pub properties: usize,
    /// Number of wishlist entries exported
    pub wishlist_entries: usize,
    /// Number of bookings exported
    pub bookings: usize,
    /// Output destination
    pub destination: String,
}

impl std::fmt::Display for ExportResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Export complete!")?;
        writeln!(f, "  Listings: {}", self.properties)?;
        writeln!(f, "  Wishlist entries: {}", self.wishlist_entries)?;
        writeln!(f, "  Bookings: {}", self.bookings)?;
        write!(f, "  Output: {}", self.destination)
    }
}

impl ExportCommand {
    /// Execute the export command.
    ///
    /// Exports all listings, wishlist entries, and bookings to JSONL
    /// format. Listings come first so an import pass can recreate them
    /// before the rows that reference them.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database queries fail or file I/O fails.
    pub async fn execute(&self, db: &Database) -> Result<ExportResult, DbError> {
        // Collect all records to export
        let mut records: Vec<ExportRecord> = Vec::new();

        let properties = db.properties().list_all().await?;
        let property_count = properties.len();
        for property in properties {
            records.push(ExportRecord::Property {
                property: Box::new(property),
            });
        }

        let wishlist_entries = db.wishlist().list_all().await?;
        let wishlist_count = wishlist_entries.len();
        for entry in wishlist_entries {
            records.push(ExportRecord::Wishlist {
                entry: Box::new(entry),
            });
        }

        let bookings = db.bookings().list_all().await?;
        let booking_count = bookings.len();
        for booking in bookings {
            records.push(ExportRecord::Booking {
                booking: Box::new(booking),
            });
        }

        // Write to output
        let destination = self.write_records(&records)?;

        Ok(ExportResult {
            properties: property_count,
            wishlist_entries: wishlist_count,
            bookings: booking_count,
            destination,
        })
    }

    /// Write records to the output destination
    fn write_records(&self, records: &[ExportRecord]) -> Result<String, DbError> {
        match &self.output {
            Some(path) => {
                let file = std::fs::File::create(path).map_err(|e| DbError::InvalidPath {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                let mut writer = std::io::BufWriter::new(file);

                for record in records {
                    let json = serde_json::to_string(record).map_err(|e| DbError::InvalidPath {
                        path: path.clone(),
                        reason: format!("JSON serialization error: {}", e),
                    })?;
                    writeln!(writer, "{}", json).map_err(|e| DbError::InvalidPath {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                }

                Ok(path.display().to_string())
            }
            None => {
                // Write to stdout
                for record in records {
                    let json = serde_json::to_string(record).map_err(|e| DbError::InvalidPath {
                        path: PathBuf::from("<stdout>"),
                        reason: format!("JSON serialization error: {}", e),
                    })?;
                    println!("{}", json);
                }
                Ok("stdout".to_string())
            }
        }
    }
}
