//! Wishlist command for managing per-user saved listings
//!
//! Implements the `vrd wishlist` command with add, remove, and list
//! subcommands. Every action is scoped to a user name.

use crate::output::format_property_table;
use clap::{Args, Subcommand};
use veranda_db::{Database, DbError, Property};

/// Manage a user's wishlist
#[derive(Debug, Args)]
pub struct WishlistCommand {
    #[command(subcommand)]
    pub action: WishlistAction,
}

/// Wishlist subcommands
#[derive(Debug, Subcommand)]
pub enum WishlistAction {
    /// Add a listing to a user's wishlist
    Add {
        /// Listing ID to add
        #[arg(required = true)]
        id: String,

        /// User the wishlist belongs to
        #[arg(short, long)]
        user: String,
    },
    /// Remove a listing from a user's wishlist
    Remove {
        /// Listing ID to remove
        #[arg(required = true)]
        id: String,

        /// User the wishlist belongs to
        #[arg(short, long)]
        user: String,
    },
    /// Show a user's wishlist
    List {
        /// User the wishlist belongs to
        #[arg(short, long)]
        user: String,
    },
}

impl WishlistCommand {
    /// Execute the wishlist command.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - The listing does not exist (add)
    /// - The pair already exists (add)
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        match &self.action {
            WishlistAction::Add { id, user } => {
                let id = id.to_lowercase();
                db.wishlist().add(user, &id).await?;
                Ok(format!("Added '{}' to {}'s wishlist", id, user))
            }
            WishlistAction::Remove { id, user } => {
                let id = id.to_lowercase();
                if db.wishlist().remove(user, &id).await? {
                    Ok(format!("Removed '{}' from {}'s wishlist", id, user))
                } else {
                    Ok(format!("'{}' was not on {}'s wishlist", id, user))
                }
            }
            WishlistAction::List { user } => self.render_list(db, user).await,
        }
    }

    /// Render a user's wishlist as a listing table, in added order.
    async fn render_list(&self, db: &Database, user: &str) -> Result<String, DbError> {
        let entries = db.wishlist().list_for_user(user).await?;
        if entries.is_empty() {
            return Ok(format!("No listings on {}'s wishlist.", user));
        }

        let mut properties: Vec<Property> = Vec::with_capacity(entries.len());
        for entry in &entries {
            if let Some(property) = db.properties().get(&entry.property_id).await? {
                properties.push(property);
            }
        }

        Ok(format!(
            "Wishlist for {} ({} listing(s))\n\n{}",
            user,
            properties.len(),
            format_property_table(&properties)
        ))
    }
}
