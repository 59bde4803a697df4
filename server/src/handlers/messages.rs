use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::{auth::CurrentUser, error::AppError, server_state::ServerState, views::View};

#[derive(Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub content: String,
    pub receiver: Option<String>,
}

pub async fn messages(State(state): State<Arc<ServerState>>, CurrentUser(user): CurrentUser) -> Result<View, AppError> {
    let users = state.data_manager.get_users().await?;
    let (received_messages, sent_messages) = state.data_manager.get_inbox(user.user_id).await?;

    Ok(View::Messages {
        users,
        received_messages,
        sent_messages,
    })
}

pub async fn send_message(
    State(state): State<Arc<ServerState>>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<MessageForm>,
) -> Result<Redirect, AppError> {
    let content = form.content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("A message needs some content.".to_string()));
    }

    let receiver_id = form.receiver
        .as_deref()
        .and_then(|receiver| receiver.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest("A message needs a receiver.".to_string()))?;

    let message = state.data_manager.send_message(user.user_id, receiver_id, content).await?;
    tracing::debug!("Message {} from {} to {}", message.message_id, message.author_name, message.receiver_name);

    Ok(Redirect::to("/messages"))
}

pub async fn send_message_with_get() -> AppError {
    AppError::MethodNotAllowed("You cannot send messages with a get request".to_string())
}

pub async fn read_message(
    State(state): State<Arc<ServerState>>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<i64>,
) -> Result<Json<bool>, AppError> {
    let message = state.data_manager.get_message(message_id).await?;

    if message.receiver_id != user.user_id {
        tracing::warn!("User {} tried to read message {}", user.user_id, message_id);
        return Err(AppError::Forbidden("You cannot read someone else's message.".to_string()));
    }

    state.data_manager.mark_message_read(message_id).await?;
    Ok(Json(true))
}
