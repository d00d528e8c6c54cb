//! Reward program balances and history.

use jiff::{civil::Date, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An enrolled renter's balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardAccount {
    pub email: String,
    pub points: i64,
    pub enrolled_at: Timestamp,
}

/// Points earned by one booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardEntry {
    pub booking_id: u64,
    pub property_location: String,
    pub start_date: Date,
    pub end_date: Date,
    pub nights: i64,
    pub total_cost: Decimal,
    pub points_earned: i64,
}

/// A renter's balance together with the bookings that earned it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardHistory {
    pub account: RewardAccount,
    pub entries: Vec<RewardEntry>,
}
