//! Renter address CRUD.

use log::debug;
use rusqlite::{params, OptionalExtension, Row, Transaction};

use super::utils::id_at;
use crate::{
    error::{DatabaseResultExt, MarketError, Result},
    models::Address,
    params::AddressInput,
};

const ADDRESS_COLUMNS: &str = "id, renter_email, street, city, state, zip, is_primary";
const INSERT_ADDRESS_SQL: &str = "INSERT INTO addresses (renter_email, street, city, state, zip, is_primary) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_ADDRESS_SQL: &str = "UPDATE addresses SET street = ?1, city = ?2, state = ?3, zip = ?4, is_primary = ?5 WHERE id = ?6";
const CLEAR_PRIMARY_SQL: &str = "UPDATE addresses SET is_primary = 0 WHERE renter_email = ?1";
const DELETE_ADDRESS_SQL: &str = "DELETE FROM addresses WHERE id = ?1";
const CHECK_BILLING_REFERENCE_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM credit_cards WHERE billing_address_id = ?1)";
// Bookings do not reference addresses directly, so a booked property at the
// same street address counts as a dependent.
const CHECK_BOOKED_AT_ADDRESS_SQL: &str = "SELECT EXISTS(
    SELECT 1 FROM bookings b
    JOIN properties p ON p.id = b.property_id
    WHERE p.street = ?1 AND p.city = ?2 AND p.state = ?3 AND p.zip = ?4)";

fn address_from_row(row: &Row<'_>) -> rusqlite::Result<Address> {
    Ok(Address {
        id: id_at(row, 0)?,
        renter_email: row.get(1)?,
        street: row.get(2)?,
        city: row.get(3)?,
        state: row.get(4)?,
        zip: row.get(5)?,
        is_primary: row.get(6)?,
    })
}

/// Loads an address inside a transaction, treating addresses owned by other
/// renters as missing.
fn owned_address(tx: &Transaction<'_>, renter_email: &str, id: u64) -> Result<Address> {
    let sql = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?1 AND renter_email = ?2");
    tx.query_row(&sql, params![id as i64, renter_email], address_from_row)
        .optional()
        .db_context("Failed to query address")?
        .ok_or_else(|| MarketError::not_found("Address", id))
}

impl super::Database {
    /// Adds an address for a renter. A primary address demotes the renter's
    /// other addresses in the same transaction.
    pub fn add_address(&mut self, renter_email: &str, input: &AddressInput) -> Result<Address> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if input.is_primary {
            tx.execute(CLEAR_PRIMARY_SQL, params![renter_email])
                .db_context("Failed to clear primary address")?;
        }

        tx.execute(
            INSERT_ADDRESS_SQL,
            params![
                renter_email,
                input.street,
                input.city,
                input.state,
                input.zip,
                input.is_primary
            ],
        )
        .db_context("Failed to insert address")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Added address {id} for {renter_email}");

        Ok(Address {
            id,
            renter_email: renter_email.to_string(),
            street: input.street.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            zip: input.zip.clone(),
            is_primary: input.is_primary,
        })
    }

    /// Lists a renter's addresses, primary first.
    pub fn list_addresses(&self, renter_email: &str) -> Result<Vec<Address>> {
        let sql = format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE renter_email = ?1 ORDER BY is_primary DESC, id"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let addresses = stmt
            .query_map(params![renter_email], address_from_row)
            .db_context("Failed to query addresses")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read address row")?;

        Ok(addresses)
    }

    /// Retrieves an address by ID.
    pub fn get_address(&self, id: u64) -> Result<Option<Address>> {
        let sql = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], address_from_row)
            .optional()
            .db_context("Failed to query address")
    }

    /// Replaces the fields of one of the renter's addresses.
    pub fn update_address(
        &mut self,
        renter_email: &str,
        id: u64,
        input: &AddressInput,
    ) -> Result<Address> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut address = owned_address(&tx, renter_email, id)?;

        if input.is_primary {
            tx.execute(CLEAR_PRIMARY_SQL, params![renter_email])
                .db_context("Failed to clear primary address")?;
        }

        tx.execute(
            UPDATE_ADDRESS_SQL,
            params![
                input.street,
                input.city,
                input.state,
                input.zip,
                input.is_primary,
                id as i64
            ],
        )
        .db_context("Failed to update address")?;

        tx.commit().db_context("Failed to commit transaction")?;

        address.street = input.street.clone();
        address.city = input.city.clone();
        address.state = input.state.clone();
        address.zip = input.zip.clone();
        address.is_primary = input.is_primary;
        Ok(address)
    }

    /// Deletes one of the renter's addresses unless a card bills to it or a
    /// booked property sits at it.
    pub fn delete_address(&mut self, renter_email: &str, id: u64) -> Result<Address> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let address = owned_address(&tx, renter_email, id)?;

        let billed: bool = tx
            .query_row(CHECK_BILLING_REFERENCE_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check billing references")?;
        if billed {
            return Err(MarketError::conflict(
                "address is the billing address of a credit card",
            ));
        }

        let booked: bool = tx
            .query_row(
                CHECK_BOOKED_AT_ADDRESS_SQL,
                params![address.street, address.city, address.state, address.zip],
                |row| row.get(0),
            )
            .db_context("Failed to check booking references")?;
        if booked {
            return Err(MarketError::conflict(
                "address is associated with an existing booking",
            ));
        }

        tx.execute(DELETE_ADDRESS_SQL, params![id as i64])
            .db_context("Failed to delete address")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(address)
    }
}
