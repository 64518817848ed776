//! Test infrastructure for integration tests
//!
//! Provides isolated database setup/teardown and CLI command execution helpers.
//! Each test gets its own database instance to ensure no shared state.

use std::path::PathBuf;
use veranda_cli::commands::{
    AddCommand, BookCommand, ExportCommand, ImportCommand, ListCommand, RemoveCommand,
    UpdateCommand, WishlistAction, WishlistCommand,
};
use veranda_db::Database;

/// Test context containing an isolated database and temp directory
///
/// The database lives in a `data/` subdirectory so that the saved-search
/// file the list command writes next to it stays inside the temp dir.
pub struct TestContext {
    pub db: Database,
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an isolated database.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub async fn new() -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "vrd-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::connect(&temp_dir.join("data")).await.unwrap();
        db.init().await.unwrap();

        Self { db, temp_dir }
    }

    /// Create a new test context with a specific suffix for debugging.
    #[allow(dead_code)]
    pub async fn with_name(name: &str) -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "vrd-integration-{}-{}-{:?}-{}",
            name,
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::connect(&temp_dir.join("data")).await.unwrap();
        db.init().await.unwrap();

        Self { db, temp_dir }
    }

    /// Clean up the test database directory.
    #[allow(dead_code)]
    pub fn cleanup(&self) {
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Auto-cleanup on drop
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

/// Create an AddCommand with default optional fields filled in.
pub fn add_cmd(name: &str) -> AddCommand {
    AddCommand {
        name: name.to_string(),
        developer: None,
        location: None,
        property_type: None,
        price: None,
        area: None,
        config: None,
        status: None,
        progress: None,
    }
}

/// Create an AddCommand with location, type, and price set.
pub fn add_cmd_full(name: &str, location: &str, property_type: &str, price: u64) -> AddCommand {
    AddCommand {
        name: name.to_string(),
        developer: None,
        location: Some(location.to_string()),
        property_type: Some(property_type.to_string()),
        price: Some(price),
        area: None,
        config: None,
        status: None,
        progress: None,
    }
}

/// Create a list command with defaults (first page, no filters).
pub fn list_cmd() -> ListCommand {
    ListCommand {
        query: None,
        location: None,
        price: None,
        area: None,
        property_type: None,
        status: None,
        sort: None,
        page: None,
        page_size: 9,
        resume: false,
    }
}

/// Create a list command with a free-text query.
pub fn list_cmd_with_query(query: &str) -> ListCommand {
    ListCommand {
        query: Some(query.to_string()),
        ..list_cmd()
    }
}

/// Create a list command for a specific page.
pub fn list_cmd_page(page: usize, page_size: usize) -> ListCommand {
    ListCommand {
        page: Some(page),
        page_size,
        ..list_cmd()
    }
}

/// Create an update command that only changes the price.
pub fn update_price_cmd(id: &str, price: u64) -> UpdateCommand {
    UpdateCommand {
        id: id.to_string(),
        name: None,
        developer: None,
        location: None,
        property_type: None,
        price: Some(price),
        area: None,
        config: None,
        status: None,
        progress: None,
    }
}

/// Create a remove command.
pub fn remove_cmd(id: &str) -> RemoveCommand {
    RemoveCommand { id: id.to_string() }
}

/// Create a wishlist add command.
pub fn wishlist_add_cmd(id: &str, user: &str) -> WishlistCommand {
    WishlistCommand {
        action: WishlistAction::Add {
            id: id.to_string(),
            user: user.to_string(),
        },
    }
}

/// Create a wishlist remove command.
pub fn wishlist_remove_cmd(id: &str, user: &str) -> WishlistCommand {
    WishlistCommand {
        action: WishlistAction::Remove {
            id: id.to_string(),
            user: user.to_string(),
        },
    }
}

/// Create a wishlist list command.
pub fn wishlist_list_cmd(user: &str) -> WishlistCommand {
    WishlistCommand {
        action: WishlistAction::List {
            user: user.to_string(),
        },
    }
}

/// Create a book command without amount or note.
pub fn book_cmd(id: &str, user: &str) -> BookCommand {
    BookCommand {
        id: id.to_string(),
        user: user.to_string(),
        amount: None,
        note: None,
    }
}

/// Create an export command.
pub fn export_cmd(output: Option<PathBuf>) -> ExportCommand {
    ExportCommand { output }
}

/// Create an import command.
pub fn import_cmd(input: PathBuf, skip_existing: bool) -> ImportCommand {
    ImportCommand {
        input: Some(input),
        skip_existing,
    }
}

// =============================================================================
// Database Setup Helpers
// =============================================================================

/// Helper to create a listing directly in the database for test setup.
pub async fn create_property(db: &Database, id: &str, name: &str, price: u64, status: &str) {
    let query = format!(
        r#"CREATE property:{} SET
            name = "{}",
            price = {},
            status = "{}""#,
        id, name, price, status
    );
    db.client().query(&query).await.unwrap();
}

/// Helper to create a listing with location, type, and progress set.
pub async fn create_property_full(
    db: &Database,
    id: &str,
    name: &str,
    location: &str,
    property_type: &str,
    price: u64,
    status: &str,
    progress: u8,
) {
    let query = format!(
        r#"CREATE property:{} SET
            name = "{}",
            location = "{}",
            property_type = "{}",
            price = {},
            status = "{}",
            progress = {}"#,
        id, name, location, property_type, price, status, progress
    );
    db.client().query(&query).await.unwrap();
}

// =============================================================================
// Query Helpers
// =============================================================================

/// Helper to check if a listing exists.
pub async fn property_exists(db: &Database, id: &str) -> bool {
    db.properties().get(id).await.unwrap().is_some()
}

/// Helper to get a listing's status.
pub async fn get_property_status(db: &Database, id: &str) -> Option<String> {
    db.properties()
        .get(id)
        .await
        .unwrap()
        .map(|p| p.status.as_str().to_string())
}

/// Helper to get a listing's price.
#[allow(dead_code)]
pub async fn get_property_price(db: &Database, id: &str) -> Option<u64> {
    db.properties().get(id).await.unwrap().map(|p| p.price)
}

/// Helper to get number of listings in the database.
pub async fn count_properties(db: &Database) -> usize {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct CountRow {
        count: usize,
    }

    let query = "SELECT count() as count FROM property GROUP ALL";
    let mut result = db.client().query(query).await.unwrap();
    let rows: Vec<CountRow> = result.take(0).unwrap();
    rows.first().map(|r| r.count).unwrap_or(0)
}

/// Helper to get all listing IDs.
pub async fn get_all_property_ids(db: &Database) -> Vec<String> {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct IdRow {
        id: surrealdb::sql::Thing,
    }

    let query = "SELECT id FROM property";
    let mut result = db.client().query(query).await.unwrap();
    let rows: Vec<IdRow> = result.take(0).unwrap();
    rows.into_iter().map(|r| r.id.id.to_string()).collect()
}

/// Helper to check if a wishlist entry exists.
pub async fn is_wishlisted(db: &Database, user: &str, property_id: &str) -> bool {
    db.wishlist()
        .is_wishlisted(user, property_id)
        .await
        .unwrap()
}

/// Helper to check if a booking exists.
pub async fn has_booking(db: &Database, user: &str, property_id: &str) -> bool {
    db.bookings().has_booking(user, property_id).await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_context_creates_isolated_database() {
        let ctx1 = TestContext::new().await;
        let ctx2 = TestContext::new().await;

        // Verify different temp directories
        assert_ne!(
            ctx1.temp_dir, ctx2.temp_dir,
            "Each context should have unique temp dir"
        );

        // Verify both are empty initially
        assert_eq!(count_properties(&ctx1.db).await, 0);
        assert_eq!(count_properties(&ctx2.db).await, 0);

        // Add listing to ctx1
        create_property(&ctx1.db, "skyline", "Skyline Towers", 7_200_000, "ready").await;

        // Verify ctx1 has the listing but ctx2 does not
        assert_eq!(count_properties(&ctx1.db).await, 1);
        assert_eq!(count_properties(&ctx2.db).await, 0);
    }

    #[tokio::test]
    async fn test_context_with_name() {
        let ctx = TestContext::with_name("custom").await;
        assert!(ctx.temp_dir.to_string_lossy().contains("custom"));
    }

    #[tokio::test]
    async fn test_create_property_helper() {
        let ctx = TestContext::new().await;

        create_property(&ctx.db, "meadow", "Meadow View", 3_000_000, "upcoming").await;

        assert!(property_exists(&ctx.db, "meadow").await);
        assert_eq!(
            get_property_status(&ctx.db, "meadow").await,
            Some("upcoming".to_string())
        );
        assert_eq!(get_property_price(&ctx.db, "meadow").await, Some(3_000_000));
    }

    #[tokio::test]
    async fn test_count_and_get_all_helpers() {
        let ctx = TestContext::new().await;

        assert_eq!(count_properties(&ctx.db).await, 0);

        create_property(&ctx.db, "one", "Tower One", 1, "ready").await;
        create_property(&ctx.db, "two", "Tower Two", 2, "ready").await;
        create_property(&ctx.db, "three", "Tower Three", 3, "ready").await;

        assert_eq!(count_properties(&ctx.db).await, 3);

        let ids = get_all_property_ids(&ctx.db).await;
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&"one".to_string()));
        assert!(ids.contains(&"two".to_string()));
        assert!(ids.contains(&"three".to_string()));
    }
}
