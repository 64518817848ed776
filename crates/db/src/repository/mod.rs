//! Repository modules for database operations
//!
//! Provides repository pattern implementations for property, wishlist,
//! and booking operations, encapsulating database queries.

mod booking;
mod property;
mod wishlist;

pub use booking::BookingRepository;
pub use property::{PropertyRepository, PropertyUpdate, valid_property_id};
pub use wishlist::WishlistRepository;
