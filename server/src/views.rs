//! Pages returned by the handlers. Each is a JSON object whose `view` field
//! names the page, alongside the data the page shows.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use carpool_lib::{
    location::UsState,
    message::Message,
    trip::Trip,
    user::UserSummary,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Index {
        user: Option<UserSummary>,
    },
    Login {
        message: Option<String>,
    },
    Register {
        message: Option<String>,
    },
    Messages {
        users: Vec<UserSummary>,
        received_messages: Vec<Message>,
        sent_messages: Vec<Message>,
    },
    Trips {
        #[serde(skip_serializing_if = "Option::is_none")]
        states: Option<Vec<UsState>>,
        trips: Vec<Trip>,
    },
    UserTrips {
        p_trips: Vec<Trip>,
        d_trips: Vec<Trip>,
    },
    Trip {
        trip: Trip,
        is_full: bool,
        access: TripAccess,
    },
    CreateTrip {
        states: Vec<UsState>,
    },
    Success {
        message: String,
    },
    Error {
        message: String,
    },
}

/// How much of a trip the requester gets to see.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum TripAccess {
    /// The requester drives this trip and sees the roster.
    Driver { passengers: Vec<UserSummary> },
    Passenger,
    Public,
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
