//! Database operations and SQLite management for the marketplace.
//!
//! This module provides the low-level data access layer. Every query module
//! adds an `impl Database` block for one area of the schema, and every
//! multi-statement mutation runs inside a single transaction so a failed
//! check leaves no partial writes behind.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod address_queries;
pub mod booking_queries;
pub mod card_queries;
pub mod neighborhood_queries;
pub mod property_queries;
pub mod reward_queries;
pub mod schema;
pub mod search_queries;
pub mod user_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
