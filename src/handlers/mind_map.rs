// POST /generate-mind-map handler

use serde_json::{Map, Value};
use std::convert::Infallible;

use super::error::{respond, ApiError};
use crate::models::MindMapRequest;
use crate::state::{AppState, SharedState};

pub async fn generate_mind_map_handler(
    state: SharedState,
    request: MindMapRequest,
) -> Result<impl warp::Reply, Infallible> {
    Ok(respond(generate_mind_map(&state, request).await))
}

pub async fn generate_mind_map(
    state: &AppState,
    request: MindMapRequest,
) -> Result<Map<String, Value>, ApiError> {
    request.validate()?;
    tracing::info!(subject = %request.subject, "POST /generate-mind-map");

    state
        .mind_map
        .generate(request.subject.trim())
        .await
        .map_err(|e| ApiError::from_generator(e, "Could not generate the mind map."))
}
