//! Language-model backed content generation: exercise sets and slide decks.

pub mod client;
pub mod error;
pub mod exercises;
pub mod slides;

pub use client::{ChatClient, ChatMessage, HttpChatClient, LlmSettings};
pub use error::AiError;
