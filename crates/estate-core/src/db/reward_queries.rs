//! Reward program enrollment, balances and history.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{date_at, id_at, money_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, MarketError, Result},
    models::{RewardAccount, RewardEntry},
};

const SELECT_ACCOUNT_SQL: &str =
    "SELECT email, points, enrolled_at FROM reward_accounts WHERE email = ?1";
const INSERT_ACCOUNT_SQL: &str =
    "INSERT INTO reward_accounts (email, points, enrolled_at) VALUES (?1, 0, ?2)";
const SELECT_HISTORY_SQL: &str = "SELECT b.id, \
     p.street || ', ' || p.city || ', ' || p.state || ' ' || p.zip, \
     b.start_date, b.end_date, b.total_cost_cents, b.points_earned \
     FROM bookings b JOIN properties p ON p.id = b.property_id \
     WHERE b.renter_email = ?1 ORDER BY b.id";

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<RewardAccount> {
    Ok(RewardAccount {
        email: row.get(0)?,
        points: row.get(1)?,
        enrolled_at: timestamp_at(row, 2)?,
    })
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<RewardEntry> {
    let start_date = date_at(row, 2)?;
    let end_date = date_at(row, 3)?;
    Ok(RewardEntry {
        booking_id: id_at(row, 0)?,
        property_location: row.get(1)?,
        start_date,
        end_date,
        nights: i64::from((end_date - start_date).get_days()),
        total_cost: money_at(row, 4)?,
        points_earned: row.get(5)?,
    })
}

impl super::Database {
    /// Enrolls a renter in the reward program with a zero balance.
    pub fn enroll_rewards(&mut self, renter_email: &str) -> Result<RewardAccount> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let existing = tx
            .query_row(SELECT_ACCOUNT_SQL, params![renter_email], account_from_row)
            .optional()
            .db_context("Failed to query reward account")?;
        if existing.is_some() {
            return Err(MarketError::conflict(
                "already enrolled in the reward program",
            ));
        }

        let now = Timestamp::now();
        tx.execute(INSERT_ACCOUNT_SQL, params![renter_email, now.to_string()])
            .db_context("Failed to enroll in reward program")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(RewardAccount {
            email: renter_email.to_string(),
            points: 0,
            enrolled_at: now,
        })
    }

    /// The renter's reward account, or `None` when not enrolled.
    pub fn get_reward_account(&self, renter_email: &str) -> Result<Option<RewardAccount>> {
        self.connection
            .query_row(SELECT_ACCOUNT_SQL, params![renter_email], account_from_row)
            .optional()
            .db_context("Failed to query reward account")
    }

    /// Every booking the renter made with the points it earned, oldest first.
    pub fn list_reward_entries(&self, renter_email: &str) -> Result<Vec<RewardEntry>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(params![renter_email], entry_from_row)
            .db_context("Failed to query reward history")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read reward history row")?;

        Ok(entries)
    }
}
