//! Filtered, sorted search over available properties.

use rusqlite::Row;

use super::{
    property_queries::{property_from_row, PROPERTY_COLUMNS, PROPERTY_FROM},
    utils::to_cents,
};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{
        filters::{DEFAULT_MAX_BEDROOMS, DEFAULT_MIN_BEDROOMS},
        PropertyMatch, SearchFilter, SortBy,
    },
};

const NEIGHBORHOOD_JOIN: &str = "LEFT JOIN neighborhoods n ON n.name = p.neighborhood";

/// Bedroom count across the subtype tables that carry one, with `default`
/// for types that have none.
fn rooms_expr(default: u32) -> String {
    format!("COALESCE(h.rooms, a.rooms, v.rooms, {default})")
}

fn match_from_row(row: &Row<'_>) -> rusqlite::Result<PropertyMatch> {
    Ok(PropertyMatch {
        property: property_from_row(row)?,
        crime_rate: row.get(20)?,
        nearby_schools: row.get(21)?,
    })
}

impl super::Database {
    /// Searches available properties. Unset filter fields do not constrain
    /// the result; results are sorted ascending by the chosen column.
    pub fn search_properties(&self, filter: &SearchFilter) -> Result<Vec<PropertyMatch>> {
        let mut query = format!(
            "SELECT {PROPERTY_COLUMNS}, n.crime_rate, n.nearby_schools {PROPERTY_FROM} {NEIGHBORHOOD_JOIN}"
        );

        let mut conditions = vec!["p.available = 1".to_string()];
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref city) = filter.city {
            conditions.push("p.city = ? COLLATE NOCASE".to_string());
            params_vec.push(Box::new(city.clone()));
        }

        if let Some(property_type) = filter.property_type {
            conditions.push("p.property_type = ?".to_string());
            params_vec.push(Box::new(property_type.as_str()));
        }

        if let Some(min) = filter.min_bedrooms {
            conditions.push(format!("{} >= ?", rooms_expr(DEFAULT_MIN_BEDROOMS)));
            params_vec.push(Box::new(min));
        }

        if let Some(max) = filter.max_bedrooms {
            conditions.push(format!("{} <= ?", rooms_expr(DEFAULT_MAX_BEDROOMS)));
            params_vec.push(Box::new(max));
        }

        if let Some(min) = filter.min_price {
            conditions.push("p.price_cents >= ?".to_string());
            params_vec.push(Box::new(to_cents("min_price", min)?));
        }

        if let Some(max) = filter.max_price {
            conditions.push("p.price_cents <= ?".to_string());
            params_vec.push(Box::new(to_cents("max_price", max)?));
        }

        if let Some(day) = filter.available_on {
            conditions.push(
                "NOT EXISTS (SELECT 1 FROM bookings b WHERE b.property_id = p.id \
                 AND b.start_date <= ? AND b.end_date > ?)"
                    .to_string(),
            );
            params_vec.push(Box::new(day.to_string()));
            params_vec.push(Box::new(day.to_string()));
        }

        query.push_str(" WHERE ");
        query.push_str(&conditions.join(" AND "));

        match filter.sort_by {
            Some(SortBy::Price) => query.push_str(" ORDER BY p.price_cents ASC, p.id ASC"),
            Some(SortBy::Bedrooms) => {
                query.push_str(&format!(
                    " ORDER BY {} ASC, p.id ASC",
                    rooms_expr(DEFAULT_MIN_BEDROOMS)
                ));
            }
            None => query.push_str(" ORDER BY p.id ASC"),
        }

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let matches = stmt
            .query_map(&params_refs[..], match_from_row)
            .db_context("Failed to search properties")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read property row")?;

        Ok(matches)
    }
}
