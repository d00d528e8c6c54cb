//! Bookings and the date arithmetic behind them.

use jiff::{civil::Date, Timestamp};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

/// A stay covering the half-open day range `[start, end)`.
///
/// The end date is the checkout day and is free for the next guest, so a
/// stay from the 1st to the 4th is three nights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StayPeriod {
    start: Date,
    end: Date,
}

impl StayPeriod {
    /// Builds a period, rejecting empty or reversed ranges.
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if end <= start {
            return Err(MarketError::invalid_input("end_date")
                .with_reason(format!("must be after the start date {start}")));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of nights in the stay. Always at least one.
    pub fn nights(&self) -> i64 {
        i64::from((self.end - self.start).get_days())
    }

    /// Total price for the stay at the given daily rate, or `None` if it
    /// does not fit a `Decimal`.
    pub fn cost(&self, daily_price: Decimal) -> Option<Decimal> {
        Decimal::from(self.nights()).checked_mul(daily_price)
    }
}

/// Reward points credited for a booking: one per whole currency unit spent.
pub fn reward_points_for(total_cost: Decimal) -> Option<i64> {
    total_cost.floor().to_i64()
}

/// A booking row joined with the address of the booked property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: u64,
    pub property_id: u64,
    pub property_location: String,
    pub renter_email: String,
    pub card_number: String,
    pub period: StayPeriod,
    pub total_cost: Decimal,
    pub booked_at: Timestamp,
}

/// Outcome of a successful booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingReceipt {
    pub booking: Booking,
    /// Points credited by this booking; `None` when not enrolled
    pub points_earned: Option<i64>,
    /// Reward balance after the credit; `None` when not enrolled
    pub points_balance: Option<i64>,
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_period_rejects_empty_range() {
        let day = date(2025, 3, 1);
        assert!(StayPeriod::new(day, day).is_err());
        assert!(StayPeriod::new(date(2025, 3, 2), day).is_err());
    }

    #[test]
    fn test_nights_and_cost() {
        let period = StayPeriod::new(date(2025, 3, 1), date(2025, 3, 4)).unwrap();
        assert_eq!(period.nights(), 3);
        assert_eq!(period.cost(dec!(100)), Some(dec!(300)));

        let across_months = StayPeriod::new(date(2025, 1, 30), date(2025, 2, 2)).unwrap();
        assert_eq!(across_months.nights(), 3);
    }

    #[test]
    fn test_reward_points_floor() {
        assert_eq!(reward_points_for(dec!(300)), Some(300));
        assert_eq!(reward_points_for(dec!(149.99)), Some(149));
        assert_eq!(reward_points_for(dec!(0.5)), Some(0));
    }

    #[test]
    fn test_cost_has_no_rounding_drift() {
        let hundred_nights = StayPeriod::new(date(2030, 1, 1), date(2030, 4, 11)).unwrap();
        assert_eq!(hundred_nights.nights(), 100);

        let total = hundred_nights.cost(dec!(19.99)).unwrap();
        assert_eq!(total, dec!(1999.00));
        assert_eq!(reward_points_for(total), Some(1999));
    }
}
