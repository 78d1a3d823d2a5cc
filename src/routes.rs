// Route definitions

use std::convert::Infallible;
use uuid::Uuid;
use warp::Filter;

use crate::assistant::SessionId;
use crate::handlers;
use crate::state::SharedState;

/// Header that selects the conversation for assistant routes
pub const SESSION_HEADER: &str = "x-session-id";

fn with_state(state: SharedState) -> impl Filter<Extract = (SharedState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn with_session() -> impl Filter<Extract = (Option<SessionId>,), Error = warp::Rejection> + Clone {
    warp::header::optional::<Uuid>(SESSION_HEADER)
}

pub fn configure_routes(
    state: SharedState,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    // GET /
    let root = warp::path::end()
        .and(warp::get())
        .and_then(handlers::root_handler);

    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // POST /generate-word-search
    let word_search = warp::path("generate-word-search")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handlers::generate_word_search_handler);

    // POST /generate-mind-map
    let mind_map = warp::path("generate-mind-map")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handlers::generate_mind_map_handler);

    // POST /generate-flashcards
    let flashcards = warp::path("generate-flashcards")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handlers::generate_flashcards_handler);

    // POST /send-message
    let send_message = warp::path("send-message")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_session())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handlers::send_message_handler);

    // POST /clear-history
    let clear_history = warp::path("clear-history")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_session())
        .and(with_state(state.clone()))
        .and_then(handlers::clear_history_handler);

    // GET /sessions/{sessionId}/history
    let history = warp::path("sessions")
        .and(warp::path::param::<Uuid>())
        .and(warp::path("history"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::get_history_handler);

    root.or(health)
        .or(word_search)
        .or(mind_map)
        .or(flashcards)
        .or(send_message)
        .or(clear_history)
        .or(history)
        .recover(handlers::handle_rejection)
}
