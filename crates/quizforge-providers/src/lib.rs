//! quizforge-providers: external service integrations.
//!
//! Implements the `LlmProvider` trait for OpenAI-compatible chat APIs and
//! the `Archiver` trait for the HTTP archive endpoint, and loads the
//! service configuration.

pub mod archive;
pub mod config;
pub mod mock;
pub mod openai;

pub use archive::{create_archiver, HttpArchiver};
pub use config::{create_provider, load_config, load_config_from, QuizforgeConfig};
pub use openai::OpenAiProvider;
