// POST /generate-word-search handler

use std::convert::Infallible;

use super::error::{respond, ApiError};
use crate::models::{WordSearchRequest, WordSearchResponse};
use crate::state::{AppState, SharedState};

pub async fn generate_word_search_handler(
    state: SharedState,
    request: WordSearchRequest,
) -> Result<impl warp::Reply, Infallible> {
    Ok(respond(generate_word_search(&state, request).await))
}

pub async fn generate_word_search(
    state: &AppState,
    request: WordSearchRequest,
) -> Result<WordSearchResponse, ApiError> {
    request.validate()?;
    tracing::info!(topic = %request.topic, "POST /generate-word-search");

    let search = state
        .word_search
        .generate(request.topic.trim())
        .await
        .map_err(|e| ApiError::from_generator(e, "Could not generate the word search."))?;

    Ok(search.into())
}
