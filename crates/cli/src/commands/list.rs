//! List command for browsing listings
//!
//! Implements the `vrd list` command: filter, sort, and paginate the
//! stored listings. The filter and page are persisted after every run
//! so `--resume` (or an unchanged filter) picks up where the last
//! invocation stopped.

use crate::output::format_property_table;
use crate::search_store::{self, SavedSearch};
use clap::Args;
use tracing::warn;
use veranda_db::{Database, DbError, ListingFilter, Page, Property, SortKey, paginate};

/// Listings shown per page unless overridden
const DEFAULT_PAGE_SIZE: usize = 9;

/// Browse property listings
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Free-text search over name, developer, and location
    #[arg(short, long)]
    pub query: Option<String>,

    /// Filter by location (case-insensitive substring)
    #[arg(short, long)]
    pub location: Option<String>,

    /// Price range in rupees, e.g. "5000000-9000000" or "5000000+"
    #[arg(short, long)]
    pub price: Option<String>,

    /// Carpet area in sqft, e.g. "1100" (exact) or "1100+" (at least)
    #[arg(short, long)]
    pub area: Option<String>,

    /// Filter by property type (exact, case-insensitive)
    #[arg(short = 't', long = "type")]
    pub property_type: Option<String>,

    /// Filter by status (ready, under_construction, upcoming)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Sort order (none, price_asc, price_desc)
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortKey>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Listings per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Start from the previous search instead of a fresh one
    #[arg(long)]
    pub resume: bool,
}

/// Parse a sort string into a SortKey enum
fn parse_sort(s: &str) -> Result<SortKey, String> {
    match s.to_lowercase().as_str() {
        "none" => Ok(SortKey::None),
        "price_asc" | "price-asc" | "price_ascending" | "asc" => Ok(SortKey::PriceAscending),
        "price_desc" | "price-desc" | "price_descending" | "desc" => Ok(SortKey::PriceDescending),
        _ => Err(format!(
            "invalid sort '{}'. Valid values: none, price_asc, price_desc",
            s
        )),
    }
}

/// Result of the list command: one page of listings plus its position
#[derive(Debug)]
pub struct ListOutcome {
    /// The visible page and total match count
    pub page: Page<Property>,
    /// 1-based page number that was shown
    pub page_number: usize,
    /// Page size the window was cut with
    pub page_size: usize,
}

impl std::fmt::Display for ListOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.page.total_count == 0 {
            return write!(f, "No listings found.");
        }

        let pages = self.page.page_count(self.page_size);

        if self.page.visible.is_empty() {
            return write!(
                f,
                "No listings on page {}. ({} listing(s) across {} page(s))",
                self.page_number, self.page.total_count, pages
            );
        }

        writeln!(f, "{}", format_property_table(&self.page.visible))?;
        writeln!(f)?;
        write!(
            f,
            "Page {} of {} ({} listing(s))",
            self.page_number, pages, self.page.total_count
        )
    }
}

impl ListCommand {
    /// Execute the list command.
    ///
    /// Builds the filter (optionally resuming the previous one),
    /// resolves which page to show, runs the query, and persists the
    /// search for the next invocation.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail.
    pub async fn execute(&self, db: &Database) -> Result<ListOutcome, DbError> {
        let store = search_store::store_path(db.path());
        let saved = search_store::load(&store);

        let base = if self.resume {
            saved.clone().unwrap_or_default().filter
        } else {
            ListingFilter::default()
        };
        let filter = self.build_filter(base);

        // An explicit --page always wins. Otherwise the previous page
        // carries over only while the filter is unchanged; any filter
        // change starts back at page 1.
        let page_number = match (self.page, &saved) {
            (Some(page), _) => page.max(1),
            (None, Some(saved)) if filter == saved.filter => saved.page,
            _ => 1,
        };

        let matches = db.properties().list(&filter).await?;
        let page = paginate(&matches, page_number, self.page_size);

        let search = SavedSearch {
            filter,
            page: page_number,
        };
        if let Err(e) = search_store::save(&store, &search) {
            warn!("Could not save search state to {}: {}", store.display(), e);
        }

        Ok(ListOutcome {
            page,
            page_number,
            page_size: self.page_size,
        })
    }

    /// Overlay the flags given on this invocation onto a base filter.
    fn build_filter(&self, base: ListingFilter) -> ListingFilter {
        let mut filter = base;

        if let Some(query) = &self.query {
            filter.query = Some(query.clone());
        }

        if let Some(location) = &self.location {
            filter.location = Some(location.clone());
        }

        if let Some(price) = &self.price {
            filter.price_range = Some(price.clone());
        }

        if let Some(area) = &self.area {
            filter.area = Some(area.clone());
        }

        if let Some(property_type) = &self.property_type {
            filter.property_type = Some(property_type.clone());
        }

        if let Some(status) = &self.status {
            filter.status = Some(status.clone());
        }

        if let Some(sort) = self.sort {
            filter.sort = sort;
        }

        filter
    }
}
