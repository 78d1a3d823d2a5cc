//! Structured learning content generated by the model
//!
//! Each generator builds a prompt, runs it through the completion client and
//! decodes the reply with the repair/parse/validate pipeline in `decoder`.

pub mod decoder;
pub mod error;
pub mod flashcards;
pub mod grid;
pub mod mind_map;
pub mod repair;
pub mod word_search;

pub use decoder::{generate_structured, Decoder, RetryPolicy};
pub use error::{FormatError, GeneratorError};
pub use flashcards::{FlashcardGenerator, DEFAULT_FLASHCARD_COUNT};
pub use grid::{Direction, Grid, GridPlacer, Placement, WordSearch, GRID_SIZE};
pub use mind_map::MindMapGenerator;
pub use repair::Repair;
pub use word_search::{WordSearchGenerator, WORD_COUNT};
