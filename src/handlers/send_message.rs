// POST /send-message handler

use std::convert::Infallible;

use super::error::{respond, ApiError};
use crate::assistant::{AssistantError, SessionId, DEFAULT_SESSION};
use crate::models::{MessageRequest, MessageResponse};
use crate::state::{AppState, SharedState};

pub async fn send_message_handler(
    session: Option<SessionId>,
    state: SharedState,
    request: MessageRequest,
) -> Result<impl warp::Reply, Infallible> {
    Ok(respond(
        send_message(&state, session.unwrap_or(DEFAULT_SESSION), request).await,
    ))
}

pub async fn send_message(
    state: &AppState,
    session: SessionId,
    request: MessageRequest,
) -> Result<MessageResponse, ApiError> {
    request.validate()?;
    tracing::info!(session = %session, "POST /send-message");

    let response = state
        .assistant
        .send(
            session,
            &request.message,
            request.temperature(),
            request.max_tokens(),
        )
        .await
        .map_err(|e| match e {
            AssistantError::Generation(e) => {
                tracing::error!(session = %session, error = %e, "assistant turn failed");
                ApiError::bad_gateway("The assistant is unavailable.")
            }
            AssistantError::EmptyReply => {
                ApiError::internal("The assistant did not produce a reply.")
            }
        })?;

    Ok(MessageResponse { response })
}
