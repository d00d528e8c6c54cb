//! Credit card CRUD.

use jiff::civil::Date;
use rusqlite::{params, OptionalExtension, Row, Transaction};

use super::utils::{date_at, id_at};
use crate::{
    error::{DatabaseResultExt, MarketError, Result},
    models::{card::mask_card_number, CreditCard},
};

const CARD_COLUMNS: &str = "renter_email, card_number, cvv, expiry_date, billing_address_id";
const INSERT_CARD_SQL: &str = "INSERT INTO credit_cards (renter_email, card_number, cvv, expiry_date, billing_address_id) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_CARD_SQL: &str = "UPDATE credit_cards SET cvv = ?1, expiry_date = ?2, billing_address_id = ?3 WHERE renter_email = ?4 AND card_number = ?5";
const DELETE_CARD_SQL: &str = "DELETE FROM credit_cards WHERE renter_email = ?1 AND card_number = ?2";
const CHECK_ADDRESS_OWNED_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM addresses WHERE id = ?1 AND renter_email = ?2)";
const CHECK_CARD_BOOKED_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM bookings WHERE renter_email = ?1 AND card_number = ?2)";

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<CreditCard> {
    Ok(CreditCard {
        renter_email: row.get(0)?,
        card_number: row.get(1)?,
        cvv: row.get(2)?,
        expiry_date: date_at(row, 3)?,
        billing_address_id: id_at(row, 4)?,
    })
}

fn find_card(
    tx: &Transaction<'_>,
    renter_email: &str,
    card_number: &str,
) -> Result<Option<CreditCard>> {
    let sql = format!(
        "SELECT {CARD_COLUMNS} FROM credit_cards WHERE renter_email = ?1 AND card_number = ?2"
    );
    tx.query_row(&sql, params![renter_email, card_number], card_from_row)
        .optional()
        .db_context("Failed to query credit card")
}

/// Billing addresses must belong to the card holder.
fn ensure_address_owned(tx: &Transaction<'_>, renter_email: &str, address_id: u64) -> Result<()> {
    let owned: bool = tx
        .query_row(
            CHECK_ADDRESS_OWNED_SQL,
            params![address_id as i64, renter_email],
            |row| row.get(0),
        )
        .db_context("Failed to check billing address")?;
    if owned {
        Ok(())
    } else {
        Err(MarketError::invalid_input("billing_address_id")
            .with_reason(format!("address {address_id} is not one of your addresses")))
    }
}

impl super::Database {
    /// Adds a card for a renter, billed to one of their own addresses.
    pub fn add_card(
        &mut self,
        renter_email: &str,
        card_number: &str,
        cvv: &str,
        expiry_date: Date,
        billing_address_id: u64,
    ) -> Result<CreditCard> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_address_owned(&tx, renter_email, billing_address_id)?;

        if find_card(&tx, renter_email, card_number)?.is_some() {
            return Err(MarketError::conflict("this card is already on your account"));
        }

        tx.execute(
            INSERT_CARD_SQL,
            params![
                renter_email,
                card_number,
                cvv,
                expiry_date.to_string(),
                billing_address_id as i64
            ],
        )
        .db_context("Failed to insert credit card")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(CreditCard {
            renter_email: renter_email.to_string(),
            card_number: card_number.to_string(),
            cvv: cvv.to_string(),
            expiry_date,
            billing_address_id,
        })
    }

    /// Lists a renter's cards.
    pub fn list_cards(&self, renter_email: &str) -> Result<Vec<CreditCard>> {
        let sql = format!(
            "SELECT {CARD_COLUMNS} FROM credit_cards WHERE renter_email = ?1 ORDER BY expiry_date"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let cards = stmt
            .query_map(params![renter_email], card_from_row)
            .db_context("Failed to query credit cards")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read credit card row")?;

        Ok(cards)
    }

    /// Changes the CVV, expiry or billing address of a card. `None` keeps
    /// the current value.
    pub fn update_card(
        &mut self,
        renter_email: &str,
        card_number: &str,
        cvv: Option<&str>,
        expiry_date: Option<Date>,
        billing_address_id: Option<u64>,
    ) -> Result<CreditCard> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut card = find_card(&tx, renter_email, card_number)?
            .ok_or_else(|| MarketError::not_found("Credit card", mask_card_number(card_number)))?;

        if let Some(address_id) = billing_address_id {
            ensure_address_owned(&tx, renter_email, address_id)?;
            card.billing_address_id = address_id;
        }
        if let Some(cvv) = cvv {
            card.cvv = cvv.to_string();
        }
        if let Some(expiry_date) = expiry_date {
            card.expiry_date = expiry_date;
        }

        tx.execute(
            UPDATE_CARD_SQL,
            params![
                card.cvv,
                card.expiry_date.to_string(),
                card.billing_address_id as i64,
                renter_email,
                card_number
            ],
        )
        .db_context("Failed to update credit card")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(card)
    }

    /// Deletes a card unless a booking was paid with it.
    pub fn delete_card(&mut self, renter_email: &str, card_number: &str) -> Result<CreditCard> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let card = find_card(&tx, renter_email, card_number)?
            .ok_or_else(|| MarketError::not_found("Credit card", mask_card_number(card_number)))?;

        let booked: bool = tx
            .query_row(CHECK_CARD_BOOKED_SQL, params![renter_email, card_number], |row| {
                row.get(0)
            })
            .db_context("Failed to check card bookings")?;
        if booked {
            return Err(MarketError::conflict(
                "card is referenced by one or more bookings",
            ));
        }

        tx.execute(DELETE_CARD_SQL, params![renter_email, card_number])
            .db_context("Failed to delete credit card")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(card)
    }
}
