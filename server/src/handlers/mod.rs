pub mod account;
pub mod messages;
pub mod trips;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound("Page")
}
