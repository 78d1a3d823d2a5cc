// Handlers module

pub mod clear_history;
pub mod error;
pub mod flashcards;
pub mod get_history;
pub mod health;
pub mod mind_map;
pub mod rejection;
pub mod send_message;
pub mod word_search;

pub use clear_history::clear_history_handler;
pub use error::ApiError;
pub use flashcards::generate_flashcards_handler;
pub use get_history::get_history_handler;
pub use health::{health_handler, root_handler};
pub use mind_map::generate_mind_map_handler;
pub use rejection::handle_rejection;
pub use send_message::send_message_handler;
pub use word_search::generate_word_search_handler;
