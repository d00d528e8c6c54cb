//! Booking lifecycle: availability, pricing, reward credit and cancellation.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};
use rust_decimal::Decimal;

use super::utils::{conversion_error, date_at, id_at, money_at, timestamp_at, to_cents};
use crate::{
    error::{DatabaseResultExt, MarketError, Result},
    models::{reward_points_for, Booking, BookingReceipt, StayPeriod},
};

const BOOKING_COLUMNS: &str = "b.id, b.property_id, \
     p.street || ', ' || p.city || ', ' || p.state || ' ' || p.zip, \
     b.renter_email, b.card_number, b.start_date, b.end_date, b.total_cost_cents, b.booked_at";
const BOOKING_FROM: &str = "FROM bookings b JOIN properties p ON p.id = b.property_id";

const CHECK_CARD_OWNED_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM credit_cards WHERE renter_email = ?1 AND card_number = ?2)";
const SELECT_PROPERTY_PRICE_SQL: &str = "SELECT price_cents, available FROM properties WHERE id = ?1";
// Half-open ranges [start, end) intersect when each starts before the other
// ends.
const SELECT_OVERLAP_SQL: &str = "SELECT start_date, end_date FROM bookings \
     WHERE property_id = ?1 AND start_date < ?3 AND end_date > ?2 \
     ORDER BY start_date LIMIT 1";
const SELECT_REWARD_POINTS_SQL: &str = "SELECT points FROM reward_accounts WHERE email = ?1";
const INSERT_BOOKING_SQL: &str = "INSERT INTO bookings (property_id, renter_email, card_number, start_date, end_date, total_cost_cents, points_earned, booked_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SET_POINTS_SQL: &str = "UPDATE reward_accounts SET points = ?1 WHERE email = ?2";
const DELETE_CANCELLABLE_SQL: &str = "DELETE FROM bookings WHERE id = ?1 AND id IN \
     (SELECT b.id FROM bookings b JOIN properties p ON p.id = b.property_id \
      WHERE b.renter_email = ?2 OR p.agent_email = ?2)";

pub(crate) fn booking_from_row(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let start = date_at(row, 5)?;
    let end = date_at(row, 6)?;
    let period = StayPeriod::new(start, end)
        .map_err(|e| conversion_error(6, e.to_string()))?;

    Ok(Booking {
        id: id_at(row, 0)?,
        property_id: id_at(row, 1)?,
        property_location: row.get(2)?,
        renter_email: row.get(3)?,
        card_number: row.get(4)?,
        period,
        total_cost: money_at(row, 7)?,
        booked_at: timestamp_at(row, 8)?,
    })
}

impl super::Database {
    /// Books a property for a renter.
    ///
    /// The card check, the overlap check, the insert and the reward credit
    /// run in one `IMMEDIATE` transaction: the write lock is taken before the
    /// overlap check, so two bookers cannot both pass it, and any failure
    /// leaves no rows behind.
    pub fn book_property(
        &mut self,
        renter_email: &str,
        property_id: u64,
        card_number: &str,
        period: StayPeriod,
    ) -> Result<BookingReceipt> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let card_owned: bool = tx
            .query_row(CHECK_CARD_OWNED_SQL, params![renter_email, card_number], |row| {
                row.get(0)
            })
            .db_context("Failed to check credit card")?;
        if !card_owned {
            return Err(MarketError::invalid_input("card_number")
                .with_reason("card is not registered to your account"));
        }

        let (price, available): (Decimal, bool) = tx
            .query_row(SELECT_PROPERTY_PRICE_SQL, params![property_id as i64], |row| {
                Ok((money_at(row, 0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query property")?
            .ok_or_else(|| MarketError::not_found("Property", property_id))?;
        if !available {
            return Err(MarketError::conflict(format!(
                "property {property_id} is not available for booking"
            )));
        }

        let start = period.start().to_string();
        let end = period.end().to_string();

        let overlap: Option<(String, String)> = tx
            .query_row(
                SELECT_OVERLAP_SQL,
                params![property_id as i64, start, end],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .db_context("Failed to check availability")?;
        if let Some((other_start, other_end)) = overlap {
            return Err(MarketError::conflict(format!(
                "property {property_id} is already booked from {other_start} to {other_end}"
            )));
        }

        let total_cost = period
            .cost(price)
            .ok_or_else(|| MarketError::invalid_input("end_date").with_reason("stay is too long"))?;
        let total_cents = to_cents("total_cost", total_cost)?;

        let balance: Option<i64> = tx
            .query_row(SELECT_REWARD_POINTS_SQL, params![renter_email], |row| row.get(0))
            .optional()
            .db_context("Failed to query reward account")?;
        let credit = balance.map(|b| credit_points(b, total_cost)).transpose()?;
        let points_earned = credit.map(|(earned, _)| earned);

        let now = Timestamp::now();
        tx.execute(
            INSERT_BOOKING_SQL,
            params![
                property_id as i64,
                renter_email,
                card_number,
                start,
                end,
                total_cents,
                points_earned.unwrap_or(0),
                now.to_string()
            ],
        )
        .db_context("Failed to insert booking")?;
        let id = tx.last_insert_rowid() as u64;

        if let Some((_, new_balance)) = credit {
            tx.execute(SET_POINTS_SQL, params![new_balance, renter_email])
                .db_context("Failed to credit reward points")?;
        }

        let booking = tx
            .query_row(
                &format!("SELECT {BOOKING_COLUMNS} {BOOKING_FROM} WHERE b.id = ?1"),
                params![id as i64],
                booking_from_row,
            )
            .db_context("Failed to read back booking")?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!(
            "Booked property {property_id} for {renter_email} from {start} to {end} ({} nights, {total_cost:.2})",
            period.nights()
        );

        Ok(BookingReceipt {
            booking,
            points_earned,
            points_balance: credit.map(|(_, new_balance)| new_balance),
        })
    }

    /// Retrieves a booking by ID.
    pub fn get_booking(&self, id: u64) -> Result<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} {BOOKING_FROM} WHERE b.id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], booking_from_row)
            .optional()
            .db_context("Failed to query booking")
    }

    /// Bookings made by a renter, soonest first.
    pub fn list_renter_bookings(&self, renter_email: &str) -> Result<Vec<Booking>> {
        self.query_bookings("b.renter_email = ?1", renter_email)
    }

    /// Bookings on properties an agent owns, soonest first.
    pub fn list_agent_bookings(&self, agent_email: &str) -> Result<Vec<Booking>> {
        self.query_bookings("p.agent_email = ?1", agent_email)
    }

    fn query_bookings(&self, condition: &str, email: &str) -> Result<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} {BOOKING_FROM} WHERE {condition} ORDER BY b.start_date, b.id"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let bookings = stmt
            .query_map(params![email], booking_from_row)
            .db_context("Failed to query bookings")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read booking row")?;

        Ok(bookings)
    }

    /// Cancels a booking if the caller made it or owns the booked property.
    ///
    /// Returns `false` when nothing was cancelled, without telling a missing
    /// booking apart from someone else's. Points already credited stay with
    /// the renter.
    pub fn cancel_booking(&mut self, caller_email: &str, id: u64) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_CANCELLABLE_SQL, params![id as i64, caller_email])
            .db_context("Failed to delete booking")?;

        if deleted > 0 {
            debug!("Booking {id} cancelled by {caller_email}");
        }
        Ok(deleted > 0)
    }
}

/// Points earned for `total_cost` and the balance after crediting them.
fn credit_points(balance: i64, total_cost: Decimal) -> Result<(i64, i64)> {
    let overflow = || MarketError::conflict("reward balance cannot hold any more points");
    let earned = reward_points_for(total_cost).ok_or_else(overflow)?;
    let new_balance = balance.checked_add(earned).ok_or_else(overflow)?;
    Ok((earned, new_balance))
}
