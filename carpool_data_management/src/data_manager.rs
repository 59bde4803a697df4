use std::path::{Path, PathBuf};

use carpool_lib::{
    location::{UsCity, UsState},
    message::Message,
    trip::{NewTrip, SeatToggle, Trip},
    user::{User, UserSummary},
};
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{database::db::CarpoolDatabase, search::TripFilter, DataManagerError, DATABASE_PATH, MESSAGE_PAGE_SIZE, SESSION_LIFETIME_HOURS};

#[derive(Clone)]
pub struct DataManager {
    pub(crate) database: CarpoolDatabase,
}

/// The public interface for all carpool data management.
impl DataManager {
    pub async fn start(database_path: &Path) -> Result<Self, DataManagerError> {
        // Create data dir if it doesn't exist
        if let Some(data_dir) = database_path.parent() {
            if !data_dir.as_os_str().is_empty() && !data_dir.exists() {
                std::fs::create_dir_all(data_dir)
                    .map_err(|_| DataManagerError::Database(format!("Failed to create data directory: {:?}", data_dir)))?;
            }
        }

        let database = CarpoolDatabase::connect(database_path).await?;
        tracing::info!("Opened database at {}", database_path.display());

        Ok(DataManager { database })
    }

    pub async fn in_memory() -> Result<Self, DataManagerError> {
        Ok(DataManager {
            database: CarpoolDatabase::in_memory().await?,
        })
    }

    /// Closes the connection pool. Later calls fail with `DataManagerError::Database`.
    pub async fn close(&self) {
        self.database.close().await;
    }

    /// `data/database.db` under the project root, or the working directory if there is none.
    pub fn default_database_path() -> PathBuf {
        let root: PathBuf = project_root::get_project_root().unwrap_or_else(|_| PathBuf::from("."));
        root.join(DATABASE_PATH)
    }

    // Users and sessions

    pub async fn register_user(&self, username: &str, email: &str, password_hash: &str) -> Result<User, DataManagerError> {
        self.database.insert_user(username, email, password_hash, Utc::now()).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, DataManagerError> {
        self.database.get_user(user_id).await
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, DataManagerError> {
        self.database.get_user_by_name(username).await
    }

    pub async fn get_users(&self) -> Result<Vec<UserSummary>, DataManagerError> {
        self.database.get_users().await
    }

    pub async fn count_users(&self) -> Result<i64, DataManagerError> {
        self.database.count_users().await
    }

    /// Opens a session and sweeps the ones that have expired.
    pub async fn open_session(&self, token: &str, user_id: i64) -> Result<(), DataManagerError> {
        let now = Utc::now();
        let expired = self.database.delete_sessions_before(session_cutoff(now)).await?;
        if expired > 0 {
            tracing::debug!("Removed {} expired sessions", expired);
        }

        self.database.insert_session(token, user_id, now).await
    }

    /// The user behind a session token. Expired sessions resolve to nobody.
    pub async fn session_user(&self, token: &str) -> Result<Option<User>, DataManagerError> {
        self.database.get_session_user(token, session_cutoff(Utc::now())).await
    }

    pub async fn close_session(&self, token: &str) -> Result<(), DataManagerError> {
        self.database.delete_session(token).await
    }

    // Locations

    pub async fn get_states(&self) -> Result<Vec<UsState>, DataManagerError> {
        self.database.get_states().await
    }

    /// Cities of a state. Unknown states are a `NotFound` rather than an empty list.
    pub async fn get_cities(&self, state_id: i64) -> Result<Vec<UsCity>, DataManagerError> {
        self.database.get_state(state_id).await?;
        self.database.get_cities(state_id).await
    }

    pub async fn find_city(&self, state_id: i64, name: &str) -> Result<Option<UsCity>, DataManagerError> {
        self.database.find_city(state_id, name).await
    }

    // Trips

    pub async fn register_new_trip(&self, trip: NewTrip) -> Result<Trip, DataManagerError> {
        let trip_id = self.database.insert_trip(&trip).await?;
        self.database.get_trip(trip_id).await
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, DataManagerError> {
        self.database.get_trip(trip_id).await
    }

    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), DataManagerError> {
        self.database.delete_trip(trip_id).await
    }

    pub async fn get_upcoming_trips(&self, today: NaiveDate) -> Result<Vec<Trip>, DataManagerError> {
        self.database.get_upcoming_trips(today).await
    }

    pub async fn search_trips(&self, filter: &TripFilter) -> Result<Vec<Trip>, DataManagerError> {
        self.database.search_trips(filter).await
    }

    /// Upcoming trips of a user, as (passenger, driver).
    pub async fn get_user_trips(&self, user_id: i64, today: NaiveDate) -> Result<(Vec<Trip>, Vec<Trip>), DataManagerError> {
        let passenger_trips = self.database.get_passenger_trips(user_id, today).await?;
        let driver_trips = self.database.get_driver_trips(user_id, today).await?;
        Ok((passenger_trips, driver_trips))
    }

    pub async fn get_passengers(&self, trip_id: i64) -> Result<Vec<UserSummary>, DataManagerError> {
        self.database.get_passengers(trip_id).await
    }

    pub async fn count_passengers(&self, trip_id: i64) -> Result<i64, DataManagerError> {
        self.database.get_trip(trip_id).await?;
        self.database.count_passengers(trip_id).await
    }

    pub async fn is_passenger(&self, trip_id: i64, user_id: i64) -> Result<bool, DataManagerError> {
        self.database.is_passenger(trip_id, user_id).await
    }

    pub async fn toggle_passenger(&self, trip_id: i64, user_id: i64) -> Result<SeatToggle, DataManagerError> {
        self.database.toggle_passenger(trip_id, user_id).await
    }

    // Messages

    pub async fn send_message(&self, author_id: i64, receiver_id: i64, content: &str) -> Result<Message, DataManagerError> {
        self.database.get_user(receiver_id).await?;
        let message_id = self.database.insert_message(author_id, receiver_id, content, Utc::now()).await?;
        self.database.get_message(message_id).await
    }

    pub async fn get_message(&self, message_id: i64) -> Result<Message, DataManagerError> {
        self.database.get_message(message_id).await
    }

    /// The latest received and sent messages of a user, newest first.
    pub async fn get_inbox(&self, user_id: i64) -> Result<(Vec<Message>, Vec<Message>), DataManagerError> {
        let received = self.database.get_received_messages(user_id, MESSAGE_PAGE_SIZE).await?;
        let sent = self.database.get_sent_messages(user_id, MESSAGE_PAGE_SIZE).await?;
        Ok((received, sent))
    }

    pub async fn mark_message_read(&self, message_id: i64) -> Result<(), DataManagerError> {
        self.database.set_message_read(message_id).await
    }
}

fn session_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(SESSION_LIFETIME_HOURS)
}
