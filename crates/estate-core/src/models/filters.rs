//! Filter types for property search.

use std::str::FromStr;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Property, PropertyType};

/// Bedroom bounds used when a property has no bedroom count.
pub const DEFAULT_MIN_BEDROOMS: u32 = 0;
pub const DEFAULT_MAX_BEDROOMS: u32 = 100;

/// Column search results are ordered by. Always ascending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Price,
    Bedrooms,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortBy::Price),
            "bedrooms" | "rooms" => Ok(SortBy::Bedrooms),
            _ => Err(format!("Invalid sort column: {s}")),
        }
    }
}

/// Filter options for searching available properties.
///
/// Every field is optional; an empty filter matches all available
/// properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFilter {
    /// Exact city match
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_bedrooms: Option<u32>,
    pub max_bedrooms: Option<u32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Exclude properties with a booking covering this day
    pub available_on: Option<Date>,
    pub sort_by: Option<SortBy>,
}

/// A search hit with its neighborhood statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyMatch {
    pub property: Property,
    pub crime_rate: Option<f64>,
    pub nearby_schools: Option<u32>,
}
