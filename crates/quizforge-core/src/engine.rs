//! Quiz generation engine.
//!
//! Runs one request through every stage in order: record the form, ask the
//! model, parse the reply, record the result, write the report files, and
//! hand the result to the archive.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProviderError, QuizError};
use crate::model::{ParsedResult, QuizForm};
use crate::parser::{parse_response, ShuffleSource};
use crate::prompt::build_prompt;
use crate::traits::{Archiver, ChatRequest, ChatResponse, LlmProvider, QuizStore, ReportSink};

/// Upper bound for the exponential retry backoff.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Model identifier sent to the provider.
    pub model: String,
    /// Optional system message.
    pub system_prompt: Option<String>,
    /// Max tokens for the reply.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Retries on transient provider errors.
    pub max_retries: u32,
    /// Initial delay between retries; doubles on each retry.
    pub retry_delay: Duration,
    /// Fixed seed for the answer shuffle. `None` seeds from entropy per request.
    pub shuffle_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: None,
            max_tokens: 2048,
            temperature: 1.0,
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            shuffle_seed: None,
        }
    }
}

/// The outcome of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedQuiz {
    pub form_id: Uuid,
    pub result_id: Uuid,
    pub result: ParsedResult,
    /// Report files written for this result.
    pub files: Vec<PathBuf>,
}

/// Orchestrates quiz generation across the injected collaborators.
pub struct QuizEngine {
    provider: Option<Arc<dyn LlmProvider>>,
    store: Arc<dyn QuizStore>,
    sink: Arc<dyn ReportSink>,
    archiver: Arc<dyn Archiver>,
    config: EngineConfig,
}

impl QuizEngine {
    /// `provider` is `None` when no API key is configured; requests are then
    /// rejected with [`QuizError::NotConfigured`] after the form is recorded.
    pub fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        store: Arc<dyn QuizStore>,
        sink: Arc<dyn ReportSink>,
        archiver: Arc<dyn Archiver>,
        config: EngineConfig,
    ) -> Self {
        Self {
            provider,
            store,
            sink,
            archiver,
            config,
        }
    }

    pub fn store(&self) -> &Arc<dyn QuizStore> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate a quiz using the configured shuffle seed, or a fresh
    /// entropy-seeded generator when none is set.
    pub async fn generate(&self, form: &QuizForm) -> Result<GeneratedQuiz, QuizError> {
        let mut rng = match self.config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with_rng(form, &mut rng).await
    }

    /// Generate a quiz, shuffling answers with the given random source.
    #[instrument(skip(self, form, rng), fields(subject = %form.subject, amount = form.amount_of_questions))]
    pub async fn generate_with_rng<S>(
        &self,
        form: &QuizForm,
        rng: &mut S,
    ) -> Result<GeneratedQuiz, QuizError>
    where
        S: ShuffleSource + Send + ?Sized,
    {
        let start = Instant::now();
        form.validate().map_err(QuizError::InvalidForm)?;

        let form_id = self
            .store
            .save_form(form)
            .await
            .map_err(QuizError::Storage)?;
        tracing::info!(%form_id, "saved quiz form");

        let Some(provider) = &self.provider else {
            tracing::error!("no language model API key configured");
            return Err(QuizError::NotConfigured);
        };

        let prompt = build_prompt(form);
        tracing::debug!(%prompt, "sending prompt");
        let request = ChatRequest {
            model: self.config.model.clone(),
            prompt: prompt.clone(),
            system_prompt: self.config.system_prompt.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let response = self
            .complete_with_retries(provider.as_ref(), &request)
            .await
            .map_err(QuizError::Provider)?;
        tracing::info!(
            provider = provider.name(),
            model = %response.model,
            latency_ms = response.latency_ms,
            total_tokens = response.token_usage.total_tokens,
            "got model reply"
        );
        tracing::debug!(reply = %response.content, "raw reply");

        let questions = parse_response(&response.content, rng);
        if questions.is_empty() {
            tracing::warn!("model reply contained no question lines");
        } else if questions.len() != form.amount_of_questions as usize {
            tracing::warn!(
                requested = form.amount_of_questions,
                parsed = questions.len(),
                "question count differs from request"
            );
        }
        let result = ParsedResult {
            questions,
            request_message: prompt,
            response_message: response.content,
        };

        let result_id = self
            .store
            .save_result(form_id, &result)
            .await
            .map_err(QuizError::Storage)?;
        tracing::info!(%result_id, questions = result.questions.len(), "saved quiz result");

        let sink = Arc::clone(&self.sink);
        let to_write = result.clone();
        let files = tokio::task::spawn_blocking(move || sink.write(&to_write))
            .await
            .map_err(|e| QuizError::Report(anyhow::anyhow!("report task failed: {e}")))?
            .map_err(QuizError::Report)?;
        for file in &files {
            tracing::info!("wrote {}", file.display());
        }

        if let Err(e) = self.archiver.archive(&result).await {
            tracing::warn!("archiving result {result_id} failed: {e:#}");
        }

        tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "quiz generated");
        Ok(GeneratedQuiz {
            form_id,
            result_id,
            result,
            files,
        })
    }

    /// Call the provider, retrying transient errors with exponential backoff.
    async fn complete_with_retries(
        &self,
        provider: &dyn LlmProvider,
        request: &ChatRequest,
    ) -> anyhow::Result<ChatResponse> {
        let mut last_error = None;
        let mut retry_delay = self.config.retry_delay;
        for retry in 0..=self.config.max_retries {
            if retry > 0 {
                tracing::warn!(
                    retry,
                    delay_ms = retry_delay.as_millis() as u64,
                    "retrying model request"
                );
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }
            match provider.complete(request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if let Some(provider_error) = e.downcast_ref::<ProviderError>() {
                        if provider_error.is_permanent() {
                            return Err(e);
                        }
                        if let Some(ms) = provider_error.retry_after_ms() {
                            retry_delay = Duration::from_millis(ms);
                        }
                    }
                    tracing::warn!("model request failed: {e:#}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown error")))
    }
}
