//! Renter payment cards.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A credit card keyed by (renter, number) and billed to one of the
/// renter's own addresses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreditCard {
    pub renter_email: String,
    pub card_number: String,
    pub cvv: String,
    pub expiry_date: Date,
    pub billing_address_id: u64,
}

impl CreditCard {
    /// Card number with everything but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        mask_card_number(&self.card_number)
    }
}

pub(crate) fn mask_card_number(number: &str) -> String {
    let tail: String = number
        .chars()
        .skip(number.chars().count().saturating_sub(4))
        .collect();
    format!("**** {tail}")
}
