use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Path, Query, State},
};
use carpool_data_management::TripFilter;
use carpool_lib::{
    location::UsCity,
    trip::{NewTrip, SeatToggle, Trip},
    user::User,
};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::{
    auth::{CurrentUser, MaybeUser},
    error::AppError,
    server_state::ServerState,
    views::{TripAccess, View},
};

/// The trip creation form. `o_` fields describe the origin, `d_` fields the destination.
#[derive(Deserialize)]
pub struct TripForm {
    pub o_state: i64,
    pub o_city: String,
    pub d_state: i64,
    pub d_city: String,
    pub date_picker: NaiveDate,
    pub time_picker: String,
    pub est_time: i64,
    pub car_size: String,
    pub seats: i64,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn trips(State(state): State<Arc<ServerState>>) -> Result<View, AppError> {
    Ok(View::Trips {
        states: Some(state.data_manager.get_states().await?),
        trips: state.data_manager.get_upcoming_trips(today()).await?,
    })
}

pub async fn search_trip(State(state): State<Arc<ServerState>>, Query(filter): Query<TripFilter>) -> Result<View, AppError> {
    Ok(View::Trips {
        states: None,
        trips: state.data_manager.search_trips(&filter).await?,
    })
}

pub async fn user_trips(State(state): State<Arc<ServerState>>, CurrentUser(user): CurrentUser) -> Result<View, AppError> {
    let (p_trips, d_trips) = state.data_manager.get_user_trips(user.user_id, today()).await?;
    Ok(View::UserTrips { p_trips, d_trips })
}

pub async fn trip(
    State(state): State<Arc<ServerState>>,
    MaybeUser(user): MaybeUser,
    Path(trip_id): Path<i64>,
) -> Result<View, AppError> {
    let trip = state.data_manager.get_trip(trip_id).await?;
    let access = trip_access(&state, &trip, user.as_ref()).await?;
    Ok(View::Trip { is_full: trip.is_full(), trip, access })
}

async fn trip_access(state: &ServerState, trip: &Trip, user: Option<&User>) -> Result<TripAccess, AppError> {
    let Some(user) = user else {
        return Ok(TripAccess::Public);
    };

    if trip.is_driver(user.user_id) {
        let passengers = state.data_manager.get_passengers(trip.trip_id).await?;
        Ok(TripAccess::Driver { passengers })
    } else if state.data_manager.is_passenger(trip.trip_id, user.user_id).await? {
        Ok(TripAccess::Passenger)
    } else {
        Ok(TripAccess::Public)
    }
}

pub async fn get_cities(State(state): State<Arc<ServerState>>, Path(state_id): Path<i64>) -> Result<Json<Vec<UsCity>>, AppError> {
    Ok(Json(state.data_manager.get_cities(state_id).await?))
}

pub async fn create_trip_page(State(state): State<Arc<ServerState>>, CurrentUser(_): CurrentUser) -> Result<View, AppError> {
    Ok(View::CreateTrip {
        states: state.data_manager.get_states().await?,
    })
}

pub async fn create_trip(
    State(state): State<Arc<ServerState>>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<TripForm>,
) -> Result<View, AppError> {
    let new_trip = validate_trip(&state, &user, form).await?;
    let trip = state.data_manager.register_new_trip(new_trip).await?;

    tracing::info!("User {} created trip {}: {}", user.username, trip.trip_id, trip);

    Ok(View::Success { message: trip.to_string() })
}

async fn validate_trip(state: &ServerState, driver: &User, form: TripForm) -> Result<NewTrip, AppError> {
    if form.seats < 1 {
        return Err(AppError::BadRequest("A trip needs at least one seat.".to_string()));
    }
    if form.est_time < 0 {
        return Err(AppError::BadRequest("The estimated duration cannot be negative.".to_string()));
    }

    let car_size = form.car_size.trim();
    if car_size.is_empty() {
        return Err(AppError::BadRequest("Please choose a car size.".to_string()));
    }

    let time = parse_time(&form.time_picker)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid departure time: {}", form.time_picker)))?;

    let origin = state.data_manager.find_city(form.o_state, form.o_city.trim()).await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown origin city: {}", form.o_city)))?;
    let destination = state.data_manager.find_city(form.d_state, form.d_city.trim()).await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown destination city: {}", form.d_city)))?;

    Ok(NewTrip {
        driver_id: driver.user_id,
        origin_id: origin.city_id,
        destination_id: destination.city_id,
        date: form.date_picker,
        time,
        est_minutes: form.est_time,
        car_size: car_size.to_string(),
        seats: form.seats,
    })
}

/// Time pickers send `HH:MM`, some browsers add seconds.
fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub async fn delete_trip(
    State(state): State<Arc<ServerState>>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<i64>,
) -> Result<View, AppError> {
    let trip = state.data_manager.get_trip(trip_id).await?;

    if !trip.is_driver(user.user_id) {
        tracing::warn!("User {} tried to delete trip {}", user.user_id, trip_id);
        return Err(AppError::Forbidden("You cannot delete someone else's trip.".to_string()));
    }

    state.data_manager.delete_trip(trip_id).await?;
    tracing::info!("User {} deleted trip {}", user.username, trip_id);

    Ok(View::Success { message: "You have successfully deleted the trip.".to_string() })
}

/// Joins the trip, or leaves it if already on the roster.
pub async fn add_passenger(
    State(state): State<Arc<ServerState>>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<i64>,
) -> Result<&'static str, AppError> {
    let trip = state.data_manager.get_trip(trip_id).await?;

    if trip.is_driver(user.user_id) {
        return Err(AppError::Forbidden("You cannot ride along on your own trip.".to_string()));
    }

    match state.data_manager.toggle_passenger(trip_id, user.user_id).await? {
        SeatToggle::Joined => Ok("You have successfully registered for the trip."),
        SeatToggle::Left => Ok("You have successfully unlisted from the trip."),
        SeatToggle::NoSeats => Err(AppError::NoSeats),
    }
}

pub async fn get_passengers(State(state): State<Arc<ServerState>>, Path(trip_id): Path<i64>) -> Result<String, AppError> {
    Ok(state.data_manager.count_passengers(trip_id).await?.to_string())
}

pub async fn get_seats(State(state): State<Arc<ServerState>>, Path(trip_id): Path<i64>) -> Result<String, AppError> {
    Ok(state.data_manager.get_trip(trip_id).await?.available_seats.to_string())
}

pub async fn full_trip() -> View {
    View::Error { message: "This trip has no seats available".to_string() }
}
