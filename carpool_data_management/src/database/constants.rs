#![allow(dead_code)]

pub const USERS_TABLE_NAME: &str = "Users";
pub const USER_ID: &str = "user_id";
pub const USERNAME: &str = "username";
pub const EMAIL: &str = "email";
pub const PASSWORD_HASH: &str = "password_hash";
pub const JOIN_DATE: &str = "join_date";

pub const SESSIONS_TABLE_NAME: &str = "Sessions";
pub const TOKEN: &str = "token";
// User id
pub const CREATED: &str = "created";

pub const STATES_TABLE_NAME: &str = "UsStates";
pub const STATE_ID: &str = "state_id";
pub const NAME: &str = "name";

pub const CITIES_TABLE_NAME: &str = "UsCities";
pub const CITY_ID: &str = "city_id";
// State id, name

pub const TRIPS_TABLE_NAME: &str = "Trips";
pub const TRIP_ID: &str = "trip_id";
pub const DRIVER_ID: &str = "driver_id";
pub const ORIGIN_ID: &str = "origin_id";
pub const DESTINATION_ID: &str = "destination_id";
pub const DATE: &str = "date";
pub const TIME: &str = "time";
pub const EST_MINUTES: &str = "est_minutes";
pub const CAR_SIZE: &str = "car_size";
pub const SEATS: &str = "seats";

pub const PASSENGERS_TABLE_NAME: &str = "TripPassengers";
// Trip id, user id

pub const MESSAGES_TABLE_NAME: &str = "Messages";
pub const MESSAGE_ID: &str = "message_id";
pub const AUTHOR_ID: &str = "author_id";
pub const RECEIVER_ID: &str = "receiver_id";
pub const CONTENT: &str = "content";
pub const READ: &str = "read";
pub const TIMESTAMP: &str = "timestamp";
