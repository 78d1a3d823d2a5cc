// GET /sessions/{sessionId}/history handler

use std::convert::Infallible;

use crate::assistant::SessionId;
use crate::models::HistoryResponse;
use crate::state::SharedState;

pub async fn get_history_handler(
    session_id: SessionId,
    state: SharedState,
) -> Result<impl warp::Reply, Infallible> {
    tracing::info!(session = %session_id, "GET /sessions/{}/history", session_id);

    let messages = state.assistant.history(session_id).await;

    Ok(warp::reply::json(&HistoryResponse {
        session_id,
        messages,
    }))
}
