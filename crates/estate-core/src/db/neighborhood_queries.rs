//! Neighborhood CRUD.

use rusqlite::{params, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, MarketError, Result},
    models::Neighborhood,
};

const INSERT_NEIGHBORHOOD_SQL: &str =
    "INSERT INTO neighborhoods (name, crime_rate, nearby_schools) VALUES (?1, ?2, ?3)";
const UPDATE_NEIGHBORHOOD_SQL: &str =
    "UPDATE neighborhoods SET crime_rate = ?1, nearby_schools = ?2 WHERE name = ?3";
const SELECT_NEIGHBORHOOD_SQL: &str =
    "SELECT name, crime_rate, nearby_schools FROM neighborhoods WHERE name = ?1";
const SELECT_NEIGHBORHOODS_SQL: &str =
    "SELECT name, crime_rate, nearby_schools FROM neighborhoods ORDER BY name";

fn neighborhood_from_row(row: &Row<'_>) -> rusqlite::Result<Neighborhood> {
    Ok(Neighborhood {
        name: row.get(0)?,
        crime_rate: row.get(1)?,
        nearby_schools: row.get(2)?,
    })
}

impl super::Database {
    /// Adds a neighborhood. Names are unique.
    pub fn add_neighborhood(&mut self, neighborhood: &Neighborhood) -> Result<Neighborhood> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let existing = tx
            .query_row(
                SELECT_NEIGHBORHOOD_SQL,
                params![neighborhood.name],
                neighborhood_from_row,
            )
            .optional()
            .db_context("Failed to query neighborhood")?;
        if existing.is_some() {
            return Err(MarketError::conflict(format!(
                "neighborhood '{}' already exists",
                neighborhood.name
            )));
        }

        tx.execute(
            INSERT_NEIGHBORHOOD_SQL,
            params![
                neighborhood.name,
                neighborhood.crime_rate,
                neighborhood.nearby_schools
            ],
        )
        .db_context("Failed to insert neighborhood")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(neighborhood.clone())
    }

    /// Updates the statistics of an existing neighborhood.
    pub fn update_neighborhood(&mut self, neighborhood: &Neighborhood) -> Result<Neighborhood> {
        let changed = self
            .connection
            .execute(
                UPDATE_NEIGHBORHOOD_SQL,
                params![
                    neighborhood.crime_rate,
                    neighborhood.nearby_schools,
                    neighborhood.name
                ],
            )
            .db_context("Failed to update neighborhood")?;

        if changed == 0 {
            return Err(MarketError::not_found("Neighborhood", &neighborhood.name));
        }
        Ok(neighborhood.clone())
    }

    pub fn get_neighborhood(&self, name: &str) -> Result<Option<Neighborhood>> {
        self.connection
            .query_row(SELECT_NEIGHBORHOOD_SQL, params![name], neighborhood_from_row)
            .optional()
            .db_context("Failed to query neighborhood")
    }

    pub fn list_neighborhoods(&self) -> Result<Vec<Neighborhood>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_NEIGHBORHOODS_SQL)
            .db_context("Failed to prepare query")?;

        let neighborhoods = stmt
            .query_map([], neighborhood_from_row)
            .db_context("Failed to query neighborhoods")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read neighborhood row")?;

        Ok(neighborhoods)
    }
}
