//! In-memory listing query engine
//!
//! Filtering, sorting, and pagination over property records. The
//! engine is pure and synchronous: slices in, owned vectors out, no
//! I/O and no interior state. Repositories load the records and the
//! CLI renders the output; everything in between happens here.

mod filter;
mod page;
mod parse;

pub use filter::{ListingFilter, SortKey, apply_filters};
pub use page::{Page, paginate};
pub use parse::{AreaBound, extract_digits, parse_area, parse_price_range};
