//! Collaborator traits consumed by the generation engine.
//!
//! The language model, the database, the report files and the archive are
//! all reached through these traits so each one can be swapped out in tests.
//! Implementations live in `quizforge-providers`, `quizforge-store` and
//! `quizforge-report`.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ParsedResult, QuizForm, StoredResult};

// ---------------------------------------------------------------------------
// LLM Provider trait
// ---------------------------------------------------------------------------

/// Trait for chat-completion backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send a single user message and return the model's reply.
    async fn complete(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse>;
}

/// A single-turn chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g. "gpt-3.5-turbo").
    pub model: String,
    /// The user message.
    pub prompt: String,
    /// Optional system message.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Reply to a [`ChatRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The raw reply text.
    pub content: String,
    /// Model that actually answered.
    pub model: String,
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Relational store for submitted forms and generated results.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Record a submitted form, returning its id.
    async fn save_form(&self, form: &QuizForm) -> anyhow::Result<Uuid>;

    /// Record a generated result for a previously saved form.
    async fn save_result(&self, form_id: Uuid, result: &ParsedResult) -> anyhow::Result<Uuid>;

    /// Fetch a stored result by id.
    async fn load_result(&self, id: Uuid) -> anyhow::Result<Option<StoredResult>>;
}

// ---------------------------------------------------------------------------
// Output sinks
// ---------------------------------------------------------------------------

/// Writes a result to local report files.
pub trait ReportSink: Send + Sync {
    /// Write the result, returning the paths written.
    fn write(&self, result: &ParsedResult) -> anyhow::Result<Vec<PathBuf>>;
}

/// Forwards a finished result to an external archive.
#[async_trait]
pub trait Archiver: Send + Sync {
    async fn archive(&self, result: &ParsedResult) -> anyhow::Result<()>;
}

/// Archiver used when no archive endpoint is configured.
pub struct NoopArchiver;

#[async_trait]
impl Archiver for NoopArchiver {
    async fn archive(&self, _: &ParsedResult) -> anyhow::Result<()> {
        tracing::debug!("no archive endpoint configured, skipping");
        Ok(())
    }
}
