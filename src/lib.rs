// HTTP Server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

// Learning content and tutoring
pub mod assistant;
pub mod content;

// LLM abstraction layer
pub mod llm;
