//! Builder for creating and configuring Marketplace instances.

use std::path::{Path, PathBuf};

use log::debug;
use rust_decimal::Decimal;
use tokio::task;

use super::Marketplace;
use crate::{
    db::Database,
    error::{MarketError, Result},
    validation::{MAX_AMOUNT, MAX_DAILY_PRICE},
};

/// Builder for creating and configuring Marketplace instances.
#[derive(Debug, Clone)]
pub struct MarketplaceBuilder {
    database_path: Option<PathBuf>,
    max_daily_price: Decimal,
}

impl MarketplaceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            max_daily_price: MAX_DAILY_PRICE,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/estate/estate.db` or `~/.local/share/estate/estate.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the highest daily price agents may list a property at.
    ///
    /// Defaults to [`MAX_DAILY_PRICE`]. The ceiling also bounds the total of
    /// a booking, and with it the points a single booking can earn.
    pub fn with_max_daily_price(mut self, price: Option<Decimal>) -> Self {
        if let Some(price) = price {
            self.max_daily_price = price;
        }
        self
    }

    /// Builds the configured marketplace, creating the database and its
    /// schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Configuration` for a negative or oversized
    /// price ceiling, `MarketError::FileSystem` if the database directory
    /// cannot be created and `MarketError::Database` if schema
    /// initialization fails
    pub async fn build(self) -> Result<Marketplace> {
        if self.max_daily_price < Decimal::ZERO || self.max_daily_price > MAX_AMOUNT {
            return Err(MarketError::Configuration {
                message: format!(
                    "max daily price must be between 0 and {MAX_AMOUNT}, got {}",
                    self.max_daily_price
                ),
            });
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MarketError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), MarketError>(())
        })
        .await
        .map_err(|e| MarketError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!(
            "Using database at {} with a daily price ceiling of {}",
            db_path.display(),
            self.max_daily_price
        );

        Ok(Marketplace::new(db_path, self.max_daily_price))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("estate")
            .place_data_file("estate.db")
            .map_err(|e| MarketError::XdgDirectory(e.to_string()))
    }
}

impl Default for MarketplaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
