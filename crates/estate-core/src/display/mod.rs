//! Display formatting wrappers and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds the wrappers that give them context: collections with an
//! empty-state message and create/update/delete headlines.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Collections &   │    │    Markdown     │
//! │ (Property, ...) │───▶│ Result Types    │───▶│ (Terminal/Web)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Addresses, Bookings, ...)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use estate_core::{
//!     display::{DeleteResult, OperationStatus},
//!     models::Address,
//! };
//!
//! let address = Address {
//!     id: 7,
//!     renter_email: "rita@example.com".to_string(),
//!     street: "1 Main St".to_string(),
//!     city: "Springfield".to_string(),
//!     state: "IL".to_string(),
//!     zip: "62701".to_string(),
//!     is_primary: true,
//! };
//!
//! let deleted = DeleteResult::new(address).to_string();
//! assert_eq!(deleted, "Deleted address with ID: 7\n");
//!
//! let status = OperationStatus::success("Logged out");
//! println!("{status}");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Addresses, Bookings, Cards, Neighborhoods, Properties, PropertyMatches};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, Resource, UpdateResult};
pub use status::OperationStatus;
