use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server_state;
pub mod views;

use handlers::{account, messages, trips};
use server_state::ServerState;

pub fn app(server_state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(account::index))
        .route("/login", get(account::login_page).post(account::login))
        .route("/logout", get(account::logout))
        .route("/register", get(account::register_page).post(account::register))
        .route("/messages", get(messages::messages))
        .route("/messages/send", get(messages::send_message_with_get).post(messages::send_message))
        .route("/messages/{message_id}/read", post(messages::read_message))
        .route("/trips", get(trips::trips))
        .route("/trips/search", get(trips::search_trip))
        .route("/trips/mine", get(trips::user_trips))
        .route("/trips/full", get(trips::full_trip))
        .route("/trips/new", get(trips::create_trip_page).post(trips::create_trip))
        .route("/trips/{trip_id}", get(trips::trip))
        .route("/trips/{trip_id}/delete", post(trips::delete_trip))
        .route("/trips/{trip_id}/toggle-passenger", post(trips::add_passenger))
        .route("/trips/{trip_id}/passengers", get(trips::get_passengers))
        .route("/trips/{trip_id}/seats", get(trips::get_seats))
        .route("/states/{state_id}/cities", get(trips::get_cities))
        .fallback(handlers::not_found)
        .with_state(server_state.clone())
        .layer(from_fn_with_state(server_state, auth::resolve_session))
        .layer(TraceLayer::new_for_http())
}
