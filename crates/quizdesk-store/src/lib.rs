//! quizdesk-store: Configuration and storage backends.
//!
//! Implements the `QuizStore` trait with an in-memory backend and a
//! JSON-file backend, and loads the `quizdesk.toml` configuration that
//! selects between them.

pub mod config;
pub mod error;
pub mod json;
pub mod memory;
mod state;

pub use config::{create_store, load_config, QuizdeskConfig, StoreConfig};
pub use error::StoreError;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
