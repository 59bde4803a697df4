use const_format::concatcp;
use sqlx::{query, query_scalar};

use crate::DataManagerError;

use super::{constants::*, db::CarpoolDatabase};

/// `state,city` rows, header first.
const US_CITIES_CSV: &str = include_str!("../../assets/us_cities.csv");

impl CarpoolDatabase {
    /// Fills the states and cities reference tables, once.
    pub(crate) async fn seed_locations(&self) -> Result<(), DataManagerError> {
        let existing = query_scalar::<_, i64>(concatcp!("SELECT COUNT(*) FROM ", STATES_TABLE_NAME))
            .fetch_one(self.pool()).await
            .map_err(|err| DataManagerError::Database(format!("Failed to count states: {err}")))?;

        if existing > 0 {
            return Ok(());
        }

        let mut tx = self.pool().begin().await
            .map_err(|err| DataManagerError::Database(format!("Failed to begin seeding: {err}")))?;

        let mut cities = 0;
        for (state, city) in parse_locations(US_CITIES_CSV) {
            query(concatcp!("INSERT OR IGNORE INTO ", STATES_TABLE_NAME, "(", NAME, ") VALUES (?1)"))
                .bind(state)
                .execute(&mut *tx).await
                .map_err(|err| DataManagerError::Database(format!("Failed to seed state {state}: {err}")))?;

            query(concatcp!("
                INSERT OR IGNORE INTO ", CITIES_TABLE_NAME, "(", STATE_ID, ", ", NAME, ")
                SELECT ", STATE_ID, ", ?2 FROM ", STATES_TABLE_NAME, " WHERE ", NAME, " = ?1"))
                .bind(state)
                .bind(city)
                .execute(&mut *tx).await
                .map_err(|err| DataManagerError::Database(format!("Failed to seed city {city}: {err}")))?;
            cities += 1;
        }

        tx.commit().await
            .map_err(|err| DataManagerError::Database(format!("Failed to commit seeding: {err}")))?;

        tracing::info!("Seeded {cities} US cities");
        Ok(())
    }
}

fn parse_locations(csv: &str) -> impl Iterator<Item = (&str, &str)> {
    csv.lines()
        .skip(1)
        .filter_map(|line| line.split_once(','))
        .map(|(state, city)| (state.trim(), city.trim()))
        .filter(|(state, city)| !state.is_empty() && !city.is_empty())
}
