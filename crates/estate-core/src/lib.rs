//! Core library for the Estate rental marketplace.
//!
//! This crate provides the business logic shared by the `estate` command line
//! and its web front end: renters and agents, renter addresses and credit
//! cards, property listings with type-specific details, neighborhoods,
//! bookings with overlap checks, and the reward program.
//!
//! # Architecture
//!
//! - **Marketplace** ([`market`]): async entry point; enforces the role gate
//!   through an explicit [`Session`] and validates raw input
//! - **Database** ([`db`]): SQLite queries, one connection per operation
//! - **Domain Models** ([`models`]): implement [`std::fmt::Display`] as
//!   markdown
//! - **Display Wrappers** ([`display`]): collections and operation results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use estate_core::{
//!     models::{AgentProfile, Profile, PropertyKind, SearchFilter},
//!     params::{Login, PropertyInput, Register},
//!     MarketplaceBuilder,
//! };
//! use rust_decimal_macros::dec;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let market = MarketplaceBuilder::new()
//!     .with_database_path(Some("estate.db"))
//!     .with_max_daily_price(Some(dec!(5000)))
//!     .build()
//!     .await?;
//!
//! market
//!     .register(&Register {
//!         email: "alex@example.com".to_string(),
//!         name: "Alex".to_string(),
//!         profile: Profile::Agent(AgentProfile::default()),
//!         join_rewards: false,
//!     })
//!     .await?;
//! let agent = market
//!     .login(&Login { email: "alex@example.com".to_string() })
//!     .await?;
//!
//! let property = market
//!     .add_property(
//!         &agent,
//!         &PropertyInput {
//!             street: "12 Elm St".to_string(),
//!             city: "Chicago".to_string(),
//!             state: "IL".to_string(),
//!             zip: "60601".to_string(),
//!             price: dec!(120.00),
//!             available: true,
//!             square_footage: Some(900),
//!             description: None,
//!             neighborhood: None,
//!             kind: PropertyKind::Apartment { rooms: 2, floor: 4 },
//!         },
//!     )
//!     .await?;
//! println!("{property}");
//!
//! // Search is open to everyone
//! let matches = market.search(&SearchFilter::default()).await?;
//! println!("{} properties available", matches.len());
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod market;
pub mod models;
pub mod params;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use db::Database;
pub use display::{CreateResult, DeleteResult, LocalDateTime, OperationStatus, UpdateResult};
pub use error::{MarketError, Result};
pub use market::{Marketplace, MarketplaceBuilder};
pub use models::{Booking, BookingReceipt, Property, PropertyKind, Role, SearchFilter, User};
pub use rust_decimal::Decimal;
pub use session::{Session, SessionStore};
