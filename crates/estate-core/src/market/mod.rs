//! High-level marketplace API.
//!
//! [`Marketplace`] is the entry point shared by the command line and the web
//! front end. Every operation takes the caller's
//! [`Session`](crate::session::Session) where access is restricted, checks
//! the role gate, validates raw input and then runs against a fresh database
//! connection on the blocking thread pool.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / Web      │    │   Marketplace   │    │    Database     │
//! │  front ends     │───▶│ (role gate,     │───▶│   (via db/)     │
//! │                 │    │  validation)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Marketplace`] instances
//! - [`account_ops`]: Registration, login and account lookup
//! - [`address_ops`]: Renter addresses
//! - [`card_ops`]: Renter credit cards
//! - [`property_ops`]: Agent listings and public search
//! - [`neighborhood_ops`]: Neighborhood records
//! - [`booking_ops`]: Booking, listing and cancelling stays
//! - [`reward_ops`]: Reward program enrollment and history
//!
//! # Example
//!
//! ```rust,no_run
//! use estate_core::{
//!     models::{Profile, RenterProfile},
//!     params::{Login, Register},
//!     MarketplaceBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let market = MarketplaceBuilder::new()
//!     .with_database_path(Some("estate.db"))
//!     .build()
//!     .await?;
//!
//! market
//!     .register(&Register {
//!         email: "rita@example.com".to_string(),
//!         name: "Rita".to_string(),
//!         profile: Profile::Renter(RenterProfile::default()),
//!         join_rewards: true,
//!     })
//!     .await?;
//!
//! let session = market
//!     .login(&Login { email: "rita@example.com".to_string() })
//!     .await?;
//! println!("Logged in as {session}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tokio::task;

use crate::{
    db::Database,
    error::{MarketError, Result},
};

pub mod account_ops;
pub mod address_ops;
pub mod booking_ops;
pub mod builder;
pub mod card_ops;
pub mod neighborhood_ops;
pub mod property_ops;
pub mod reward_ops;


pub use builder::MarketplaceBuilder;

/// Main marketplace interface. Cheap to clone; holds the database path and
/// the listing limits it enforces.
#[derive(Debug, Clone)]
pub struct Marketplace {
    pub(crate) db_path: PathBuf,
    pub(crate) max_daily_price: Decimal,
}

impl Marketplace {
    /// Creates a marketplace over the specified database path.
    pub(crate) fn new(db_path: PathBuf, max_daily_price: Decimal) -> Self {
        Self {
            db_path,
            max_daily_price,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Highest daily price a listing may carry.
    pub fn max_daily_price(&self) -> Decimal {
        self.max_daily_price
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| MarketError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
