//! Import command for importing database from JSONL format
//!
//! Implements the `vrd import` command to import listings, wishlist
//! entries, and bookings from a JSONL (JSON Lines) file for restoration
//! or migration purposes.

use clap::Args;
use serde::Deserialize;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use veranda_db::{Booking, Database, DbError, Property, WishlistEntry};

/// Import database from JSONL format
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Input file path (reads from stdin if not specified)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Skip listings that already exist (by ID)
    #[arg(long, default_value = "false")]
    pub skip_existing: bool,
}

/// A record in the import file
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ImportRecord {
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

/// Result of the import command
pub struct ImportResult {
    /// Number of listings imported
    pub properties_imported: usize,
    /// Number of listings skipped (already exist)
    pub properties_skipped: usize,
    /// Number of wishlist entries imported
    pub wishlist_entries: usize,
    /// Number of bookings imported
    pub bookings: usize,
    /// Input source
    pub source: String,
}

impl std::fmt::Display for ImportResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Import complete!")?;
        writeln!(f, "  Listings imported: {}", self.properties_imported)?;
        if self.properties_skipped > 0 {
            writeln!(f, "  Listings skipped: {}", self.properties_skipped)?;
        }
        writeln!(f, "  Wishlist entries: {}", self.wishlist_entries)?;
        writeln!(f, "  Bookings: {}", self.bookings)?;
        write!(f, "  Source: {}", self.source)
    }
}

impl ImportCommand {
    /// Execute the import command.
    ///
    /// Imports listings, wishlist entries, and bookings from JSONL
    /// format. Listings are imported first so that interest rows always
    /// reference records that exist, regardless of line order in the
    /// file. Wishlist entries and bookings already present in the
    /// database are left untouched rather than duplicated.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or file I/O fails.
    pub async fn execute(&self, db: &Database) -> Result<ImportResult, DbError> {
        let (records, source) = self.read_records()?;

        let mut properties_imported = 0;
        let mut properties_skipped = 0;
        let mut wishlist_entries = 0;
        let mut bookings = 0;

        // First pass: import all listings
        for record in &records {
            if let ImportRecord::Property { property } = record {
                if db.properties().exists(&property.id).await? {
                    if self.skip_existing {
                        properties_skipped += 1;
                        continue;
                    }
                    // If not skipping, we'll overwrite - delete first
                    db.properties().delete(&property.id).await?;
                }
                db.properties().create(property.as_ref()).await?;
                properties_imported += 1;
            }
        }

        // Second pass: import interest rows (after all listings exist)
        for record in &records {
            match record {
                ImportRecord::Wishlist { entry } => {
                    if db
                        .wishlist()
                        .is_wishlisted(&entry.user, &entry.property_id)
                        .await?
                    {
                        continue;
                    }
                    db.wishlist().add(&entry.user, &entry.property_id).await?;
                    wishlist_entries += 1;
                }
                ImportRecord::Booking { booking } => {
                    if db
                        .bookings()
                        .has_booking(&booking.user, &booking.property_id)
                        .await?
                    {
                        continue;
                    }
                    db.bookings().create(booking.as_ref()).await?;
                    bookings += 1;
                }
                ImportRecord::Property { .. } => {
                    // Already handled in first pass
                }
            }
        }

        Ok(ImportResult {
            properties_imported,
            properties_skipped,
            wishlist_entries,
            bookings,
            source,
        })
    }

    /// Read records from the input source
    fn read_records(&self) -> Result<(Vec<ImportRecord>, String), DbError> {
        match &self.input {
            Some(path) => {
                let file = std::fs::File::open(path).map_err(|e| DbError::InvalidPath {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                let reader = std::io::BufReader::new(file);
                let records = self.parse_lines(reader, path)?;
                Ok((records, path.display().to_string()))
            }
            None => {
                let stdin = std::io::stdin();
                let reader = stdin.lock();
                let path = PathBuf::from("<stdin>");
                let records = self.parse_lines(reader, &path)?;
                Ok((records, "stdin".to_string()))
            }
        }
    }

    /// Parse lines from a reader into records
    fn parse_lines<R: BufRead>(
        &self,
        reader: R,
        path: &Path,
    ) -> Result<Vec<ImportRecord>, DbError> {
        let mut records = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| DbError::InvalidPath {
                path: path.to_path_buf(),
                reason: format!("Error reading line {}: {}", line_num + 1, e),
            })?;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            let record: ImportRecord =
                serde_json::from_str(&line).map_err(|e| DbError::InvalidPath {
                    path: path.to_path_buf(),
                    reason: format!("Error parsing line {}: {}", line_num + 1, e),
                })?;
            records.push(record);
        }
        Ok(records)
    }
}
