use std::{path::Path, str::FromStr};

use carpool_lib::{
    location::{UsCity, UsState},
    message::Message,
    trip::{NewTrip, SeatToggle, Trip},
    user::{User, UserSummary},
};
use chrono::{DateTime, NaiveDate, Utc};
use const_format::concatcp;
use sqlx::{
    query, query_as, query_scalar, sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Executor, Pool, QueryBuilder, Sqlite, SqlitePool,
};

use crate::{search::TripFilter, DataManagerError};

use super::constants::*;

/// Trips joined with driver, origin and destination. Seats left are derived from the live roster.
const TRIP_SELECT: &str = concatcp!("
    SELECT t.trip_id, t.driver_id, u.username AS driver_name,
        t.origin_id, oc.name AS origin_city, os.name AS origin_state,
        t.destination_id, dc.name AS destination_city, ds.name AS destination_state,
        t.date, t.time, t.est_minutes, t.car_size, t.seats,
        t.seats - (SELECT COUNT(*) FROM ", PASSENGERS_TABLE_NAME, " p WHERE p.trip_id = t.trip_id) AS available_seats
    FROM ", TRIPS_TABLE_NAME, " t
    JOIN ", USERS_TABLE_NAME, " u ON u.user_id = t.driver_id
    JOIN ", CITIES_TABLE_NAME, " oc ON oc.city_id = t.origin_id
    JOIN ", STATES_TABLE_NAME, " os ON os.state_id = oc.state_id
    JOIN ", CITIES_TABLE_NAME, " dc ON dc.city_id = t.destination_id
    JOIN ", STATES_TABLE_NAME, " ds ON ds.state_id = dc.state_id");

const MESSAGE_SELECT: &str = concatcp!("
    SELECT m.message_id, m.author_id, a.username AS author_name,
        m.receiver_id, r.username AS receiver_name, m.content, m.read, m.timestamp
    FROM ", MESSAGES_TABLE_NAME, " m
    JOIN ", USERS_TABLE_NAME, " a ON a.user_id = m.author_id
    JOIN ", USERS_TABLE_NAME, " r ON r.user_id = m.receiver_id");

#[derive(Clone)]
pub struct CarpoolDatabase {
    pool: Pool<Sqlite>,
}

impl CarpoolDatabase {
    pub async fn connect(path: &Path) -> Result<Self, DataManagerError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await
            .map_err(|err| DataManagerError::Database(format!("Failed to connect to database: {err}")))?;

        Self::from_pool(pool).await
    }

    /// A private database living as long as the returned handle. Used by tests.
    pub async fn in_memory() -> Result<Self, DataManagerError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|err| DataManagerError::Database(format!("Invalid database url: {err}")))?
            .foreign_keys(true);

        // Every connection to :memory: is its own database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options).await
            .map_err(|err| DataManagerError::Database(format!("Failed to open in-memory database: {err}")))?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, DataManagerError> {
        let db = Self { pool };

        db.init().await?;
        db.seed_locations().await?;

        Ok(db)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn init(&self) -> Result<(), DataManagerError> {
        self.pool.execute(concatcp!("
            CREATE TABLE IF NOT EXISTS ", USERS_TABLE_NAME, "(",
                USER_ID,       " INTEGER PRIMARY KEY AUTOINCREMENT,",
                USERNAME,      " TEXT NOT NULL UNIQUE,",
                EMAIL,         " TEXT NOT NULL,",
                PASSWORD_HASH, " TEXT NOT NULL,",
                JOIN_DATE,     " TIMESTAMP NOT NULL);

            CREATE TABLE IF NOT EXISTS ", SESSIONS_TABLE_NAME, "(",
                TOKEN,   " TEXT PRIMARY KEY,",
                USER_ID, " INTEGER NOT NULL,",
                CREATED, " TIMESTAMP NOT NULL,
                FOREIGN KEY(", USER_ID, ") REFERENCES ", USERS_TABLE_NAME, "(", USER_ID, ") ON DELETE CASCADE);

            CREATE TABLE IF NOT EXISTS ", STATES_TABLE_NAME, "(",
                STATE_ID, " INTEGER PRIMARY KEY AUTOINCREMENT,",
                NAME,     " TEXT NOT NULL UNIQUE);

            CREATE TABLE IF NOT EXISTS ", CITIES_TABLE_NAME, "(",
                CITY_ID,  " INTEGER PRIMARY KEY AUTOINCREMENT,",
                STATE_ID, " INTEGER NOT NULL,",
                NAME,     " TEXT NOT NULL,
                UNIQUE(", STATE_ID, ", ", NAME, "),
                FOREIGN KEY(", STATE_ID, ") REFERENCES ", STATES_TABLE_NAME, "(", STATE_ID, ") ON DELETE CASCADE);

            CREATE TABLE IF NOT EXISTS ", TRIPS_TABLE_NAME, "(",
                TRIP_ID,        " INTEGER PRIMARY KEY AUTOINCREMENT,",
                DRIVER_ID,      " INTEGER NOT NULL,",
                ORIGIN_ID,      " INTEGER NOT NULL,",
                DESTINATION_ID, " INTEGER NOT NULL,",
                DATE,           " DATE NOT NULL,",
                TIME,           " TIME NOT NULL,",
                EST_MINUTES,    " INTEGER NOT NULL,",
                CAR_SIZE,       " TEXT NOT NULL,",
                SEATS,          " INTEGER NOT NULL CHECK(", SEATS, " >= 0),
                FOREIGN KEY(", DRIVER_ID, ") REFERENCES ", USERS_TABLE_NAME, "(", USER_ID, ") ON DELETE CASCADE,
                FOREIGN KEY(", ORIGIN_ID, ") REFERENCES ", CITIES_TABLE_NAME, "(", CITY_ID, "),
                FOREIGN KEY(", DESTINATION_ID, ") REFERENCES ", CITIES_TABLE_NAME, "(", CITY_ID, "));

            CREATE TABLE IF NOT EXISTS ", PASSENGERS_TABLE_NAME, "(",
                TRIP_ID, " INTEGER NOT NULL,",
                USER_ID, " INTEGER NOT NULL,
                PRIMARY KEY(", TRIP_ID, ", ", USER_ID, "),
                FOREIGN KEY(", TRIP_ID, ") REFERENCES ", TRIPS_TABLE_NAME, "(", TRIP_ID, ") ON DELETE CASCADE,
                FOREIGN KEY(", USER_ID, ") REFERENCES ", USERS_TABLE_NAME, "(", USER_ID, ") ON DELETE CASCADE);

            CREATE TABLE IF NOT EXISTS ", MESSAGES_TABLE_NAME, "(",
                MESSAGE_ID,  " INTEGER PRIMARY KEY AUTOINCREMENT,",
                AUTHOR_ID,   " INTEGER NOT NULL,",
                RECEIVER_ID, " INTEGER NOT NULL,",
                CONTENT,     " TEXT NOT NULL,",
                READ,        " BOOLEAN NOT NULL DEFAULT 0,",
                TIMESTAMP,   " TIMESTAMP NOT NULL,
                FOREIGN KEY(", AUTHOR_ID, ") REFERENCES ", USERS_TABLE_NAME, "(", USER_ID, ") ON DELETE CASCADE,
                FOREIGN KEY(", RECEIVER_ID, ") REFERENCES ", USERS_TABLE_NAME, "(", USER_ID, ") ON DELETE CASCADE
            )")).await
            .map_err(|err| DataManagerError::Database(format!("Failed to create tables: {err}")))
            .map(|_| ())
    }

    // Users

    pub async fn insert_user(&self, username: &str, email: &str, password_hash: &str, join_date: DateTime<Utc>) -> Result<User, DataManagerError> {
        let user_id = query_scalar::<_, i64>(concatcp!("
            INSERT INTO ", USERS_TABLE_NAME, "(",
            USER_ID, ", ", USERNAME, ", ", EMAIL, ", ", PASSWORD_HASH, ", ", JOIN_DATE, ")
            VALUES (NULL, ?1, ?2, ?3, ?4) RETURNING ", USER_ID))
                .bind(username)
                .bind(email)
                .bind(password_hash)
                .bind(join_date)
                .fetch_one(&self.pool).await
                .map_err(|err| match err {
                    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DataManagerError::UniqueViolation("Username"),
                    err => DataManagerError::Database(format!("Failed to insert user: {err}")),
                })?;

        Ok(User {
            user_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            join_date,
        })
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, DataManagerError> {
        query_as::<_, User>(concatcp!("SELECT * FROM ", USERS_TABLE_NAME, " WHERE ", USER_ID, " = ?1"))
            .bind(user_id)
            .fetch_optional(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get user: {err}")))?
            .ok_or(DataManagerError::NotFound("User"))
    }

    pub async fn get_user_by_name(&self, username: &str) -> Result<Option<User>, DataManagerError> {
        query_as::<_, User>(concatcp!("SELECT * FROM ", USERS_TABLE_NAME, " WHERE ", USERNAME, " = ?1"))
            .bind(username)
            .fetch_optional(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get user by name: {err}")))
    }

    pub async fn get_users(&self) -> Result<Vec<UserSummary>, DataManagerError> {
        query_as::<_, UserSummary>(concatcp!("SELECT ", USER_ID, ", ", USERNAME, " FROM ", USERS_TABLE_NAME, " ORDER BY ", USERNAME))
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get users: {err}")))
    }

    pub async fn count_users(&self) -> Result<i64, DataManagerError> {
        query_scalar::<_, i64>(concatcp!("SELECT COUNT(*) FROM ", USERS_TABLE_NAME))
            .fetch_one(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to count users: {err}")))
    }

    // Sessions

    pub async fn insert_session(&self, token: &str, user_id: i64, created: DateTime<Utc>) -> Result<(), DataManagerError> {
        query(concatcp!("INSERT INTO ", SESSIONS_TABLE_NAME, "(", TOKEN, ", ", USER_ID, ", ", CREATED, ") VALUES (?1, ?2, ?3)"))
            .bind(token)
            .bind(user_id)
            .bind(created)
            .execute(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to insert session: {err}")))
            .map(|_| ())
    }

    /// The user behind `token`, if the session was opened after `not_before`.
    pub async fn get_session_user(&self, token: &str, not_before: DateTime<Utc>) -> Result<Option<User>, DataManagerError> {
        query_as::<_, User>(concatcp!("
            SELECT u.* FROM ", USERS_TABLE_NAME, " u
            JOIN ", SESSIONS_TABLE_NAME, " s ON s.", USER_ID, " = u.", USER_ID, "
            WHERE s.", TOKEN, " = ?1 AND julianday(s.", CREATED, ") > julianday(?2)"))
            .bind(token)
            .bind(not_before)
            .fetch_optional(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get session user: {err}")))
    }

    pub async fn delete_sessions_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DataManagerError> {
        query(concatcp!("DELETE FROM ", SESSIONS_TABLE_NAME, " WHERE julianday(", CREATED, ") <= julianday(?1)"))
            .bind(cutoff)
            .execute(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to delete expired sessions: {err}")))
            .map(|result| result.rows_affected())
    }

    pub async fn delete_session(&self, token: &str) -> Result<(), DataManagerError> {
        query(concatcp!("DELETE FROM ", SESSIONS_TABLE_NAME, " WHERE ", TOKEN, " = ?1"))
            .bind(token)
            .execute(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to delete session: {err}")))
            .map(|_| ())
    }

    // States and cities

    pub async fn get_states(&self) -> Result<Vec<UsState>, DataManagerError> {
        query_as::<_, UsState>(concatcp!("SELECT * FROM ", STATES_TABLE_NAME, " ORDER BY ", NAME))
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get states: {err}")))
    }

    pub async fn get_state(&self, state_id: i64) -> Result<UsState, DataManagerError> {
        query_as::<_, UsState>(concatcp!("SELECT * FROM ", STATES_TABLE_NAME, " WHERE ", STATE_ID, " = ?1"))
            .bind(state_id)
            .fetch_optional(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get state: {err}")))?
            .ok_or(DataManagerError::NotFound("State"))
    }

    pub async fn get_cities(&self, state_id: i64) -> Result<Vec<UsCity>, DataManagerError> {
        query_as::<_, UsCity>(concatcp!("SELECT * FROM ", CITIES_TABLE_NAME, " WHERE ", STATE_ID, " = ?1 ORDER BY ", NAME))
            .bind(state_id)
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get cities: {err}")))
    }

    pub async fn find_city(&self, state_id: i64, name: &str) -> Result<Option<UsCity>, DataManagerError> {
        query_as::<_, UsCity>(concatcp!("SELECT * FROM ", CITIES_TABLE_NAME, " WHERE ", STATE_ID, " = ?1 AND ", NAME, " = ?2"))
            .bind(state_id)
            .bind(name)
            .fetch_optional(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to find city: {err}")))
    }

    // Trips

    pub async fn insert_trip(&self, trip: &NewTrip) -> Result<i64, DataManagerError> {
        query_scalar::<_, i64>(concatcp!("
            INSERT INTO ", TRIPS_TABLE_NAME, "(",
            TRIP_ID, ", ", DRIVER_ID, ", ", ORIGIN_ID, ", ", DESTINATION_ID, ", ", DATE, ", ", TIME, ", ", EST_MINUTES, ", ", CAR_SIZE, ", ", SEATS, ")
            VALUES (NULL, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING ", TRIP_ID))
                .bind(trip.driver_id)
                .bind(trip.origin_id)
                .bind(trip.destination_id)
                .bind(trip.date)
                .bind(trip.time)
                .bind(trip.est_minutes)
                .bind(&trip.car_size)
                .bind(trip.seats)
                .fetch_one(&self.pool).await
                .map_err(|err| DataManagerError::Database(format!("Failed to insert trip: {err}")))
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, DataManagerError> {
        query_as::<_, Trip>(concatcp!(TRIP_SELECT, " WHERE t.trip_id = ?1"))
            .bind(trip_id)
            .fetch_optional(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get trip: {err}")))?
            .ok_or(DataManagerError::NotFound("Trip"))
    }

    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), DataManagerError> {
        let deleted = query(concatcp!("DELETE FROM ", TRIPS_TABLE_NAME, " WHERE ", TRIP_ID, " = ?1"))
            .bind(trip_id)
            .execute(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to delete trip: {err}")))?
            .rows_affected();

        if deleted == 0 {
            return Err(DataManagerError::NotFound("Trip"));
        }
        Ok(())
    }

    /// Trips on or after `today`, earliest first.
    pub async fn get_upcoming_trips(&self, today: NaiveDate) -> Result<Vec<Trip>, DataManagerError> {
        query_as::<_, Trip>(concatcp!(TRIP_SELECT, " WHERE t.date >= ?1 ORDER BY t.date, t.time, t.trip_id"))
            .bind(today)
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get upcoming trips: {err}")))
    }

    pub async fn get_driver_trips(&self, driver_id: i64, today: NaiveDate) -> Result<Vec<Trip>, DataManagerError> {
        query_as::<_, Trip>(concatcp!(TRIP_SELECT, " WHERE t.driver_id = ?1 AND t.date >= ?2 ORDER BY t.trip_id DESC"))
            .bind(driver_id)
            .bind(today)
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get driver trips: {err}")))
    }

    pub async fn get_passenger_trips(&self, user_id: i64, today: NaiveDate) -> Result<Vec<Trip>, DataManagerError> {
        query_as::<_, Trip>(concatcp!(TRIP_SELECT, "
            JOIN ", PASSENGERS_TABLE_NAME, " tp ON tp.trip_id = t.trip_id
            WHERE tp.user_id = ?1 AND t.date >= ?2 ORDER BY t.trip_id DESC"))
            .bind(user_id)
            .bind(today)
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get passenger trips: {err}")))
    }

    /// All trips matching every active filter, newest first. No date restriction.
    pub async fn search_trips(&self, filter: &TripFilter) -> Result<Vec<Trip>, DataManagerError> {
        let mut builder = QueryBuilder::<Sqlite>::new(concatcp!(TRIP_SELECT, " WHERE 1 = 1"));

        for (column, needle) in filter.active_filters() {
            builder
                .push(" AND instr(LOWER(")
                .push(column)
                .push("), LOWER(")
                .push_bind(needle.to_string())
                .push(")) > 0");
        }
        builder.push(" ORDER BY t.trip_id DESC");

        builder
            .build_query_as::<Trip>()
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to search trips: {err}")))
    }

    pub async fn get_passengers(&self, trip_id: i64) -> Result<Vec<UserSummary>, DataManagerError> {
        query_as::<_, UserSummary>(concatcp!("
            SELECT u.", USER_ID, ", u.", USERNAME, " FROM ", USERS_TABLE_NAME, " u
            JOIN ", PASSENGERS_TABLE_NAME, " tp ON tp.", USER_ID, " = u.", USER_ID, "
            WHERE tp.", TRIP_ID, " = ?1 ORDER BY u.", USERNAME))
            .bind(trip_id)
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get passengers: {err}")))
    }

    pub async fn count_passengers(&self, trip_id: i64) -> Result<i64, DataManagerError> {
        query_scalar::<_, i64>(concatcp!("SELECT COUNT(*) FROM ", PASSENGERS_TABLE_NAME, " WHERE ", TRIP_ID, " = ?1"))
            .bind(trip_id)
            .fetch_one(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to count passengers: {err}")))
    }

    pub async fn is_passenger(&self, trip_id: i64, user_id: i64) -> Result<bool, DataManagerError> {
        query_scalar::<_, i64>(concatcp!("
            SELECT COUNT(*) FROM ", PASSENGERS_TABLE_NAME, " WHERE ", TRIP_ID, " = ?1 AND ", USER_ID, " = ?2"))
            .bind(trip_id)
            .bind(user_id)
            .fetch_one(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to check passenger: {err}")))
            .map(|count| count > 0)
    }

    /// Leaves the trip if `user_id` is on the roster, otherwise joins it if a seat is left.
    ///
    /// Runs in one transaction that opens with a write, so concurrent toggles are serialised
    /// by the database lock. The join is a single conditional insert and never overbooks.
    pub async fn toggle_passenger(&self, trip_id: i64, user_id: i64) -> Result<SeatToggle, DataManagerError> {
        let mut tx = self.pool.begin().await
            .map_err(|err| DataManagerError::Database(format!("Failed to begin transaction: {err}")))?;

        let left = query(concatcp!("DELETE FROM ", PASSENGERS_TABLE_NAME, " WHERE ", TRIP_ID, " = ?1 AND ", USER_ID, " = ?2"))
            .bind(trip_id)
            .bind(user_id)
            .execute(&mut *tx).await
            .map_err(|err| DataManagerError::Database(format!("Failed to remove passenger: {err}")))?
            .rows_affected();

        let outcome = if left > 0 {
            SeatToggle::Left
        } else {
            let joined = query(concatcp!("
                INSERT INTO ", PASSENGERS_TABLE_NAME, "(", TRIP_ID, ", ", USER_ID, ")
                SELECT t.", TRIP_ID, ", ?2 FROM ", TRIPS_TABLE_NAME, " t
                WHERE t.", TRIP_ID, " = ?1
                AND t.", SEATS, " > (SELECT COUNT(*) FROM ", PASSENGERS_TABLE_NAME, " WHERE ", TRIP_ID, " = ?1)"))
                .bind(trip_id)
                .bind(user_id)
                .execute(&mut *tx).await
                .map_err(|err| DataManagerError::Database(format!("Failed to add passenger: {err}")))?
                .rows_affected();

            if joined > 0 { SeatToggle::Joined } else { SeatToggle::NoSeats }
        };

        tx.commit().await
            .map_err(|err| DataManagerError::Database(format!("Failed to commit seat toggle: {err}")))?;

        Ok(outcome)
    }

    // Messages

    pub async fn insert_message(&self, author_id: i64, receiver_id: i64, content: &str, timestamp: DateTime<Utc>) -> Result<i64, DataManagerError> {
        query_scalar::<_, i64>(concatcp!("
            INSERT INTO ", MESSAGES_TABLE_NAME, "(",
            MESSAGE_ID, ", ", AUTHOR_ID, ", ", RECEIVER_ID, ", ", CONTENT, ", ", READ, ", ", TIMESTAMP, ")
            VALUES (NULL, ?1, ?2, ?3, FALSE, ?4) RETURNING ", MESSAGE_ID))
                .bind(author_id)
                .bind(receiver_id)
                .bind(content)
                .bind(timestamp)
                .fetch_one(&self.pool).await
                .map_err(|err| DataManagerError::Database(format!("Failed to insert message: {err}")))
    }

    pub async fn get_message(&self, message_id: i64) -> Result<Message, DataManagerError> {
        query_as::<_, Message>(concatcp!(MESSAGE_SELECT, " WHERE m.message_id = ?1"))
            .bind(message_id)
            .fetch_optional(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get message: {err}")))?
            .ok_or(DataManagerError::NotFound("Message"))
    }

    pub async fn get_received_messages(&self, receiver_id: i64, limit: i64) -> Result<Vec<Message>, DataManagerError> {
        query_as::<_, Message>(concatcp!(MESSAGE_SELECT, " WHERE m.receiver_id = ?1 ORDER BY m.message_id DESC LIMIT ?2"))
            .bind(receiver_id)
            .bind(limit)
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get received messages: {err}")))
    }

    pub async fn get_sent_messages(&self, author_id: i64, limit: i64) -> Result<Vec<Message>, DataManagerError> {
        query_as::<_, Message>(concatcp!(MESSAGE_SELECT, " WHERE m.author_id = ?1 ORDER BY m.message_id DESC LIMIT ?2"))
            .bind(author_id)
            .bind(limit)
            .fetch_all(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to get sent messages: {err}")))
    }

    pub async fn set_message_read(&self, message_id: i64) -> Result<(), DataManagerError> {
        query(concatcp!("UPDATE ", MESSAGES_TABLE_NAME, " SET ", READ, " = TRUE WHERE ", MESSAGE_ID, " = ?1"))
            .bind(message_id)
            .execute(&self.pool).await
            .map_err(|err| DataManagerError::Database(format!("Failed to mark message read: {err}")))
            .map(|_| ())
    }
}
