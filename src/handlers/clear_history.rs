// POST /clear-history handler

use std::convert::Infallible;

use crate::assistant::{SessionId, DEFAULT_SESSION};
use crate::models::StatusMessage;
use crate::state::SharedState;

pub async fn clear_history_handler(
    session: Option<SessionId>,
    state: SharedState,
) -> Result<impl warp::Reply, Infallible> {
    let session = session.unwrap_or(DEFAULT_SESSION);
    tracing::info!(session = %session, "POST /clear-history");

    state.assistant.clear(session).await;

    Ok(warp::reply::json(&StatusMessage {
        message: "Conversation history cleared.".to_string(),
    }))
}
