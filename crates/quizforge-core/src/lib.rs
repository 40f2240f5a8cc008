//! quizforge-core: Quiz model, reply parsing, and the generation engine.
//!
//! This crate defines the data model, the collaborator traits, and the
//! parser that turns a language model's free-text reply into quiz questions.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod traits;
