//! Database module for Veranda
//!
//! Provides SurrealDB connection management with embedded RocksDB backend,
//! schema initialization, data models for property listings, and the
//! in-memory query engine used to filter and paginate them.

pub mod emi;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod schema;

pub use emi::{EmiBreakdown, emi_breakdown, monthly_payment};
pub use error::{DbError, DbResult};
#[allow(unused_imports)]
pub use models::{Booking, Property, PropertyStatus, WishlistEntry};
pub use query::{ListingFilter, Page, SortKey, apply_filters, paginate};
pub use repository::{
    BookingRepository, PropertyRepository, PropertyUpdate, WishlistRepository, valid_property_id,
};

use std::path::{Path, PathBuf};
use std::process::Command;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Default database path relative to project root or current working directory
pub const DEFAULT_DB_PATH: &str = ".vrd/data";

/// Database wrapper providing connection management for SurrealDB
pub struct Database {
    /// The underlying SurrealDB client
    client: Surreal<Db>,
    /// Path where the database is stored
    path: PathBuf,
}

impl Database {
    /// Connect to a SurrealDB database at the specified path.
    ///
    /// Creates the database directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database directory
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidPath` if the path is invalid.
    /// Returns `DbError::CreateDirectory` if directory creation fails.
    /// Returns `DbError::Connection` if database connection fails.
    pub async fn connect(path: &Path) -> DbResult<Self> {
        // Validate and create the database directory
        let path = Self::prepare_path(path)?;

        // Connect to the database using RocksDB backend
        let client =
            Surreal::new::<RocksDb>(path.clone())
                .await
                .map_err(|e| DbError::Connection {
                    path: path.clone(),
                    source: Box::new(e),
                })?;

        Ok(Self { client, path })
    }

    /// Initialize the database schema.
    ///
    /// Sets up the namespace and database for Veranda operations, then
    /// initializes the property, wishlist, and booking tables.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Schema` if schema initialization fails.
    pub async fn init(&self) -> DbResult<()> {
        // Use namespace and database for Veranda
        self.client
            .use_ns("veranda")
            .use_db("main")
            .await
            .map_err(|e| DbError::Schema(Box::new(e)))?;

        // Initialize the schema (property, wishlist, booking tables)
        schema::init_schema(&self.client).await?;

        Ok(())
    }

    /// Get a reference to the underlying SurrealDB client.
    ///
    /// Use this for executing queries against the database.
    pub fn client(&self) -> &Surreal<Db> {
        &self.client
    }

    /// Get a property repository bound to this connection.
    pub fn properties(&self) -> PropertyRepository<'_> {
        PropertyRepository::new(&self.client)
    }

    /// Get a wishlist repository bound to this connection.
    pub fn wishlist(&self) -> WishlistRepository<'_> {
        WishlistRepository::new(&self.client)
    }

    /// Get a booking repository bound to this connection.
    pub fn bookings(&self) -> BookingRepository<'_> {
        BookingRepository::new(&self.client)
    }

    /// Get the path where the database is stored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the default database path based on project root.
    ///
    /// Uses `git rev-parse --show-toplevel` to find the project root and
    /// returns `<project_root>/.vrd/data`. If not in a git repository,
    /// falls back to `.vrd/data` relative to the current working directory.
    pub fn default_path() -> DbResult<PathBuf> {
        let base_path = find_project_root().unwrap_or_else(|| PathBuf::from("."));
        Ok(base_path.join(DEFAULT_DB_PATH))
    }

    /// Prepare the database path by validating and creating directories.
    fn prepare_path(path: &Path) -> DbResult<PathBuf> {
        let path = path.to_path_buf();

        // Check if parent directory exists or can be created
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| DbError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // Create the database directory itself if it doesn't exist
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| DbError::CreateDirectory {
                path: path.clone(),
                source: e,
            })?;
        }

        Ok(path)
    }
}

// Ensure Database is Send + Sync for async compatibility
static_assertions::assert_impl_all!(Database: Send, Sync);

/// Find the project root by running `git rev-parse --show-toplevel`.
///
/// Returns `Some(PathBuf)` with the absolute path to the git repository root,
/// or `None` if not in a git repository or the command fails.
pub fn find_project_root() -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()?;

    if output.status.success() {
        let path_str = String::from_utf8(output.stdout).ok()?;
        Some(PathBuf::from(path_str.trim()))
    } else {
        None
    }
}
