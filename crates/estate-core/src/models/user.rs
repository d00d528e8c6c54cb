//! User accounts and their role-specific profiles.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RewardAccount;

/// The single role a user holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Searches and books properties
    Renter,
    /// Lists and manages properties
    Agent,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "renter" => Ok(Role::Renter),
            "agent" => Ok(Role::Agent),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

impl Role {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Renter => "renter",
            Role::Agent => "agent",
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: Timestamp,
}

/// Extra details recorded for renters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RenterProfile {
    pub budget: Option<Decimal>,
    pub preferred_location: Option<String>,
    pub move_in_date: Option<Date>,
}

/// Extra details recorded for agents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentProfile {
    pub job_title: Option<String>,
    pub agency: Option<String>,
    pub contact_info: Option<String>,
}

/// Role-specific profile attached to a user at registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Renter(RenterProfile),
    Agent(AgentProfile),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Renter(_) => Role::Renter,
            Profile::Agent(_) => Role::Agent,
        }
    }
}

/// A user together with their profile and, for enrolled renters, their
/// reward balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub user: User,
    pub profile: Option<Profile>,
    pub rewards: Option<RewardAccount>,
}
