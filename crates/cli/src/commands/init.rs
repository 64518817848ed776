//! Init command for setting up a Veranda database
//!
//! Implements the `vrd init` command. Connection and schema setup
//! happen before any command runs, so init's job is to report where
//! the database lives and confirm it is ready.

use clap::Args;
use std::path::PathBuf;
use veranda_db::{Database, DbError};

/// Initialize the listings database
#[derive(Debug, Args)]
pub struct InitCommand {}

/// Result of the init command execution
#[derive(Debug)]
pub struct InitResult {
    /// Path to the database directory
    pub db_path: PathBuf,
    /// Number of listings already stored
    pub listings: usize,
}

impl std::fmt::Display for InitResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Veranda initialized successfully!")?;
        writeln!(f)?;
        writeln!(f, "  Database directory: {}", self.db_path.display())?;
        write!(f, "  Listings in database: {}", self.listings)
    }
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// The database was connected and its schema applied before dispatch,
    /// so this verifies the store answers queries and reports its location.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the listing count query fails.
    pub async fn execute(&self, db: &Database) -> Result<InitResult, DbError> {
        let listings = db.properties().list_all().await?.len();

        Ok(InitResult {
            db_path: db.path().to_path_buf(),
            listings,
        })
    }
}
