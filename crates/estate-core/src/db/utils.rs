//! Row conversion helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::error::{MarketError, Result};

/// Wraps a parse failure of column `idx` as a rusqlite conversion error.
pub(crate) fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            message,
        )),
    )
}

pub(crate) fn id_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

pub(crate) fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn optional_date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Date>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(value) => value
            .parse::<Date>()
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        None => Ok(None),
    }
}

/// Parses a text column through the type's `FromStr` implementation.
pub(crate) fn parsed_at<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    row.get::<_, String>(idx)?
        .parse::<T>()
        .map_err(|e| conversion_error(idx, e))
}

/// Reads an amount stored as whole cents.
pub(crate) fn money_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    Ok(Decimal::new(row.get::<_, i64>(idx)?, 2))
}

pub(crate) fn optional_money_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    Ok(row
        .get::<_, Option<i64>>(idx)?
        .map(|cents| Decimal::new(cents, 2)))
}

/// Converts an amount to whole cents for storage or comparison.
pub(crate) fn to_cents(field: &str, amount: Decimal) -> Result<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .filter(|cents| cents.fract().is_zero())
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| {
            MarketError::invalid_input(field)
                .with_reason(format!("{amount} cannot be stored in whole cents"))
        })
}
