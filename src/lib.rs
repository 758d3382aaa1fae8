//! docent: chat with your documents
//!
//! A retrieval-augmented conversational assistant over a locally ingested
//! document collection. Queries are answered from retrieved context when
//! the collection has something relevant, and fall back to the language
//! model's own knowledge (clearly disclosed) when it does not. A response
//! is always produced: retrieval and generation failures degrade through
//! a recovery path instead of surfacing as errors.

pub mod chat;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod types;

pub use config::DocentConfig;
pub use engine::QueryEngine;
pub use error::{Error, Result};
pub use types::{ChatResponse, Provenance};
