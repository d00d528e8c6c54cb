//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{Address, Booking, CreditCard, Neighborhood, Property, PropertyMatch};

/// Declares a newtype over `Vec<$item>` with slice-like accessors and a
/// Display that prints `$empty` for an empty collection.
macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Get the number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the item at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Get an iterator over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    writeln!(f, $empty)
                } else {
                    for item in &self.0 {
                        write!(f, "{}", item)?;
                    }
                    Ok(())
                }
            }
        }
    };
}

collection!(
    /// A renter's addresses.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use estate_core::display::Addresses;
    ///
    /// let addresses = Addresses(vec![]);
    /// assert_eq!(format!("{addresses}"), "No addresses found.\n");
    /// ```
    Addresses,
    Address,
    "No addresses found."
);

collection!(
    /// A renter's credit cards, shown with masked numbers.
    Cards,
    CreditCard,
    "No credit cards found."
);

collection!(
    /// An agent's listings.
    Properties,
    Property,
    "No properties found."
);

collection!(
    /// Search results with neighborhood statistics.
    PropertyMatches,
    PropertyMatch,
    "No properties match your search."
);

collection!(Bookings, Booking, "No bookings found.");

collection!(Neighborhoods, Neighborhood, "No neighborhoods found.");
