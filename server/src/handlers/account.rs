use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use carpool_data_management::DataManagerError;
use carpool_lib::user::UserSummary;
use serde::Deserialize;

use crate::{
    auth::{self, MaybeUser},
    error::AppError,
    server_state::ServerState,
    views::View,
};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

pub async fn index(MaybeUser(user): MaybeUser) -> View {
    View::Index {
        user: user.as_ref().map(UserSummary::from),
    }
}

pub async fn login_page() -> View {
    View::Login { message: None }
}

pub async fn login(State(state): State<Arc<ServerState>>, jar: CookieJar, Form(form): Form<LoginForm>) -> Result<Response, AppError> {
    match auth::authenticate(&state.data_manager, &form.username, &form.password).await? {
        Some(user) => {
            let jar = auth::login(&state, jar, &user).await?;
            Ok((jar, Redirect::to("/")).into_response())
        }
        None => {
            tracing::debug!("Failed login for {}", form.username);
            Ok(View::Login { message: Some("Invalid username and/or password.".to_string()) }.into_response())
        }
    }
}

pub async fn logout(State(state): State<Arc<ServerState>>, jar: CookieJar) -> Result<(CookieJar, Redirect), AppError> {
    let jar = auth::logout(&state, jar).await?;
    Ok((jar, Redirect::to("/")))
}

pub async fn register_page() -> View {
    View::Register { message: None }
}

pub async fn register(State(state): State<Arc<ServerState>>, jar: CookieJar, Form(form): Form<RegisterForm>) -> Result<Response, AppError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Ok(register_message("Username and password are required."));
    }

    if form.password != form.confirmation {
        return Ok(register_message("Passwords must match."));
    }

    let password_hash = auth::hash_password(&form.password).await?;
    let user = match state.data_manager.register_user(username, form.email.trim(), &password_hash).await {
        Ok(user) => user,
        Err(DataManagerError::UniqueViolation(_)) => return Ok(register_message("Username already taken.")),
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Registered user {} ({})", user.username, user.user_id);

    let jar = auth::login(&state, jar, &user).await?;
    Ok((jar, Redirect::to("/")).into_response())
}

fn register_message(message: &str) -> Response {
    View::Register { message: Some(message.to_string()) }.into_response()
}
