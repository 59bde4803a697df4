use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carpool_data_management::DataManagerError;
use thiserror::Error;

use crate::views::View;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("This trip has no seats available.")]
    NoSeats,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DataManagerError> for AppError {
    fn from(err: DataManagerError) -> Self {
        match err {
            DataManagerError::NotFound(what) => AppError::NotFound(what),
            DataManagerError::UniqueViolation(_) => AppError::BadRequest(err.to_string()),
            DataManagerError::Database(message) => AppError::Internal(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) | AppError::NoSeats => StatusCode::FORBIDDEN,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match self {
            // Read by the seat toggle script as plain text.
            AppError::NoSeats => (status, self.to_string()).into_response(),
            AppError::Internal(message) => {
                tracing::error!("{message}");
                let view = View::Error { message: "Something went wrong on our side.".to_string() };
                (status, view).into_response()
            }
            _ => (status, View::Error { message: self.to_string() }).into_response(),
        }
    }
}
