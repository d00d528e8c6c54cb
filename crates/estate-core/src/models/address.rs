//! Renter-owned postal addresses.

use serde::{Deserialize, Serialize};

/// A renter's address. At most one per renter is primary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub id: u64,
    pub renter_email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub is_primary: bool,
}
