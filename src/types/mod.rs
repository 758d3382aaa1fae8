//! Core data types

pub mod conversation;
pub mod document;
pub mod response;

pub use conversation::{ConversationState, Turn};
pub use document::{Chunk, Document};
pub use response::{ChatResponse, Provenance};
