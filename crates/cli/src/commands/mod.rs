//! CLI command implementations
//!
//! Each submodule implements one `vrd` subcommand as a clap `Args`
//! struct with an async `execute` method. The [`Command`] enum ties
//! them together for the top-level argument parser.

use clap::Subcommand;
use veranda_db::{Database, DbError};

pub mod add;
pub mod book;
pub mod dashboard;
pub mod emi;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod remove;
pub mod show;
pub mod update;
pub mod wishlist;

pub use add::AddCommand;
pub use book::BookCommand;
pub use dashboard::{DashboardCommand, DashboardResult};
pub use emi::{EmiCommand, EmiResult};
pub use export::{ExportCommand, ExportRecord, ExportResult};
pub use import::{ImportCommand, ImportRecord, ImportResult};
pub use init::{InitCommand, InitResult};
pub use list::{ListCommand, ListOutcome};
pub use remove::RemoveCommand;
pub use show::{PropertyDetail, ShowCommand};
pub use update::UpdateCommand;
pub use wishlist::{WishlistAction, WishlistCommand};

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize the database and report its location
    Init(InitCommand),
    /// Add a new property listing
    Add(AddCommand),
    /// List property listings with filters, sorting, and pagination
    List(ListCommand),
    /// Show full details for one listing
    Show(ShowCommand),
    /// Update fields on an existing listing
    Update(UpdateCommand),
    /// Remove a listing and its wishlist/booking rows
    Remove(RemoveCommand),
    /// Manage a user's wishlist
    Wishlist(WishlistCommand),
    /// Book a listing for a user
    Book(BookCommand),
    /// Estimate the monthly EMI for a home loan
    Emi(EmiCommand),
    /// Summarize listings and interest across the database
    Dashboard(DashboardCommand),
    /// Export the database to JSONL
    Export(ExportCommand),
    /// Import listings and interest rows from JSONL
    Import(ImportCommand),
}

impl Command {
    /// Execute the subcommand against the given database.
    ///
    /// Every command renders its outcome as a string for the binary to
    /// print; errors bubble up as `DbError` so `main` can format them
    /// uniformly.
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        match self {
            Command::Init(cmd) => Ok(cmd.execute(db).await?.to_string()),
            Command::Add(cmd) => cmd.execute(db).await,
            Command::List(cmd) => Ok(cmd.execute(db).await?.to_string()),
            Command::Show(cmd) => Ok(cmd.execute(db).await?.to_string()),
            Command::Update(cmd) => cmd.execute(db).await,
            Command::Remove(cmd) => cmd.execute(db).await,
            Command::Wishlist(cmd) => cmd.execute(db).await,
            Command::Book(cmd) => cmd.execute(db).await,
            Command::Emi(cmd) => Ok(cmd.execute(db).await?.to_string()),
            Command::Dashboard(cmd) => Ok(cmd.execute(db).await?.to_string()),
            Command::Export(cmd) => Ok(cmd.execute(db).await?.to_string()),
            Command::Import(cmd) => Ok(cmd.execute(db).await?.to_string()),
        }
    }
}
