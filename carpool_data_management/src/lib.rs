use const_format::concatcp;
use thiserror::Error;

pub mod database;
mod data_manager;
mod search;

pub use data_manager::*;
pub use search::TripFilter;

pub const DATA_DIR: &str = "data/";
pub const DATABASE_PATH: &str = concatcp!(DATA_DIR, "database.db");

/// Number of messages listed per direction on the messages page.
pub const MESSAGE_PAGE_SIZE: i64 = 20;

/// Sessions older than this no longer identify anyone.
pub const SESSION_LIFETIME_HOURS: i64 = 24 * 14;

#[derive(Debug, Error)]
pub enum DataManagerError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    UniqueViolation(&'static str),
}
