//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create, update,
//! and delete operations with consistent messaging and resource display.

use std::fmt;

use crate::models::{Address, CreditCard, Neighborhood, Property, User};

/// A resource that result wrappers can name in their headline.
pub trait Resource: fmt::Display {
    /// Lowercase noun, e.g. `address`
    const NOUN: &'static str;

    /// Identifying key shown to the user.
    fn key(&self) -> String;
}

impl Resource for Address {
    const NOUN: &'static str = "address";

    fn key(&self) -> String {
        format!("ID: {}", self.id)
    }
}

impl Resource for CreditCard {
    const NOUN: &'static str = "credit card";

    fn key(&self) -> String {
        format!("number: {}", self.masked_number())
    }
}

impl Resource for Property {
    const NOUN: &'static str = "property";

    fn key(&self) -> String {
        format!("ID: {}", self.id)
    }
}

impl Resource for Neighborhood {
    const NOUN: &'static str = "neighborhood";

    fn key(&self) -> String {
        format!("name: {}", self.name)
    }
}

impl Resource for User {
    const NOUN: &'static str = "account";

    fn key(&self) -> String {
        format!("email: {}", self.email)
    }
}

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use estate_core::{display::CreateResult, models::Neighborhood};
///
/// let neighborhood = Neighborhood {
///     name: "Riverside".to_string(),
///     crime_rate: 1.5,
///     nearby_schools: 3,
/// };
///
/// let output = CreateResult::new(neighborhood).to_string();
/// assert!(output.contains("Created neighborhood with name: Riverside"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with {}", T::NOUN, self.resource.key())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The wrapper can track and display specific changes made during the update,
/// providing users with clear feedback about what was modified.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with {}", T::NOUN, self.resource.key())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for DeleteResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted {} with {}", T::NOUN, self.resource.key())
    }
}
