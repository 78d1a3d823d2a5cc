// POST /generate-flashcards handler

use serde_json::{Map, Value};
use std::convert::Infallible;

use super::error::{respond, ApiError};
use crate::models::FlashcardRequest;
use crate::state::{AppState, SharedState};

pub async fn generate_flashcards_handler(
    state: SharedState,
    request: FlashcardRequest,
) -> Result<impl warp::Reply, Infallible> {
    Ok(respond(generate_flashcards(&state, request).await))
}

pub async fn generate_flashcards(
    state: &AppState,
    request: FlashcardRequest,
) -> Result<Map<String, Value>, ApiError> {
    request.validate()?;
    tracing::info!(
        subject = %request.subject,
        count = request.num_flashcards,
        "POST /generate-flashcards"
    );

    state
        .flashcards
        .generate(request.subject.trim(), request.num_flashcards)
        .await
        .map_err(|e| ApiError::from_generator(e, "Could not generate the flashcards."))
}
