//! Neighborhoods that properties can reference by name.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Neighborhood {
    pub name: String,
    pub crime_rate: f64,
    pub nearby_schools: u32,
}
