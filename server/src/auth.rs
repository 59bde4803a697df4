//! Identity: password hashing, cookie sessions and the extractors handing
//! the caller's identity to handlers.

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use carpool_data_management::DataManager;
use carpool_lib::user::User;

use crate::{error::AppError, server_state::ServerState};

pub const SESSION_COOKIE: &str = "carpool_session";
pub const LOGIN_PATH: &str = "/login";

const SALT_SIZE: usize = 16;
const TOKEN_SIZE: usize = 32;

/// Hashes on the blocking pool so Argon2 never stalls a runtime worker.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    let salt: [u8; SALT_SIZE] = rand::random();

    tokio::task::spawn_blocking(move || argon2::hash_encoded(password.as_bytes(), &salt, &argon2::Config::default()))
        .await
        .map_err(|err| AppError::Internal(format!("Password hashing task failed: {err}")))?
        .map_err(|err| AppError::Internal(format!("Password hashing failed: {err}")))
}

pub async fn verify_password(password_hash: &str, password: &str) -> Result<bool, AppError> {
    let password_hash = password_hash.to_string();
    let password = password.to_string();

    tokio::task::spawn_blocking(move || argon2::verify_encoded(&password_hash, password.as_bytes()).unwrap_or(false))
        .await
        .map_err(|err| AppError::Internal(format!("Password verification task failed: {err}")))
}

/// The user owning these credentials. Unknown users and wrong passwords look the same.
pub async fn authenticate(data_manager: &DataManager, username: &str, password: &str) -> Result<Option<User>, AppError> {
    let Some(user) = data_manager.find_user(username).await? else {
        return Ok(None);
    };

    Ok(verify_password(&user.password_hash, password).await?.then_some(user))
}

/// Opens a session for `user` and hands its token to the client.
pub async fn login(state: &ServerState, jar: CookieJar, user: &User) -> Result<CookieJar, AppError> {
    let token = hex::encode(rand::random::<[u8; TOKEN_SIZE]>());
    state.data_manager.open_session(&token, user.user_id).await?;

    tracing::info!("User {} logged in", user.username);

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.secure_cookies);

    Ok(jar.add(cookie))
}

pub async fn logout(state: &ServerState, jar: CookieJar) -> Result<CookieJar, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.data_manager.close_session(cookie.value()).await?;
    }

    Ok(jar.remove(Cookie::build(SESSION_COOKIE).path("/")))
}

/// Resolves the session cookie into a `User` request extension.
///
/// A store failure ends the request with a 500 instead of serving it anonymously.
pub async fn resolve_session(State(state): State<Arc<ServerState>>, jar: CookieJar, mut req: Request<Body>, next: Next) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match state.data_manager.session_user(cookie.value()).await {
            Ok(Some(user)) => {
                if let Some(addr) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
                    tracing::debug!("{} {} from {} as {}", req.method(), req.uri().path(), addr.ip(), user.username);
                }
                req.extensions_mut().insert(user);
            }
            Ok(None) => tracing::debug!("Ignoring unknown or expired session token"),
            Err(err) => return AppError::Internal(format!("Failed to resolve session: {err}")).into_response(),
        }
    }

    next.run(req).await
}

/// The logged-in caller. Anonymous requests are sent to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

/// The caller, if logged in.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<User>().cloned()))
    }
}
