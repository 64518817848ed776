//! Database schema initialization for Veranda
//!
//! Defines the SurrealDB schema for property listings, wishlist
//! entries, and bookings.

use crate::error::DbError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// SQL statements for schema initialization
mod sql {
    /// Define the property table with all fields
    ///
    /// Every field except the record id carries a default, matching
    /// the ingestion rule that missing data never rejects a listing.
    pub const DEFINE_PROPERTY_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS property SCHEMAFULL;

        DEFINE FIELD name ON property TYPE string DEFAULT "";

        DEFINE FIELD developer ON property TYPE string DEFAULT "";

        DEFINE FIELD location ON property TYPE string DEFAULT "";

        DEFINE FIELD property_type ON property TYPE string DEFAULT "";

        DEFINE FIELD price ON property TYPE int DEFAULT 0
            ASSERT $value >= 0;

        DEFINE FIELD carpet_area ON property TYPE int DEFAULT 0
            ASSERT $value >= 0;

        DEFINE FIELD configuration ON property TYPE string DEFAULT "";

        DEFINE FIELD status ON property TYPE string DEFAULT "upcoming"
            ASSERT $value IN ["ready", "under_construction", "upcoming"];

        DEFINE FIELD progress ON property TYPE int DEFAULT 0
            ASSERT $value >= 0 AND $value <= 100;

        DEFINE FIELD created_at ON property TYPE datetime DEFAULT time::now();

        DEFINE FIELD updated_at ON property TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS property_status_idx ON property FIELDS status;

        DEFINE INDEX IF NOT EXISTS property_type_idx ON property FIELDS property_type;
    "#;

    /// Define the wishlist table
    pub const DEFINE_WISHLIST_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS wishlist SCHEMAFULL;

        DEFINE FIELD user ON wishlist TYPE string;

        DEFINE FIELD property_id ON wishlist TYPE string;

        DEFINE FIELD added_at ON wishlist TYPE datetime DEFAULT time::now();
    "#;

    /// Define the booking table
    pub const DEFINE_BOOKING_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS booking SCHEMAFULL;

        DEFINE FIELD property_id ON booking TYPE string;

        DEFINE FIELD user ON booking TYPE string;

        DEFINE FIELD amount ON booking TYPE int DEFAULT 0
            ASSERT $value >= 0;

        DEFINE FIELD note ON booking TYPE option<string>;

        DEFINE FIELD created_at ON booking TYPE datetime DEFAULT time::now();
    "#;
}

/// Initialize the database schema.
///
/// Creates the property, wishlist, and booking tables with all
/// required fields and constraints.
///
/// This function is idempotent - it can be called multiple times safely
/// as it uses `IF NOT EXISTS` clauses.
///
/// # Arguments
///
/// * `client` - Reference to the SurrealDB client
///
/// # Errors
///
/// Returns `DbError::Schema` if any schema definition fails.
pub async fn init_schema(client: &Surreal<Db>) -> Result<(), DbError> {
    // Define the property table
    client
        .query(sql::DEFINE_PROPERTY_TABLE)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    // Define the wishlist table
    client
        .query(sql::DEFINE_WISHLIST_TABLE)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    // Define the booking table
    client
        .query(sql::DEFINE_BOOKING_TABLE)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    Ok(())
}
