pub mod generate;
pub mod init;
pub mod serve;

use std::sync::Arc;

use anyhow::{Context, Result};

use quizforge_core::engine::QuizEngine;
use quizforge_providers::{create_archiver, create_provider, QuizforgeConfig};
use quizforge_report::FileReportSink;
use quizforge_store::SqlQuizStore;

/// Wire the engine's collaborators from a loaded configuration.
pub async fn build_engine(config: &QuizforgeConfig) -> Result<QuizEngine> {
    let provider = create_provider(&config.openai)?;
    if provider.is_none() {
        tracing::warn!("no OpenAI API key configured; generation requests will be rejected");
    }
    let store = SqlQuizStore::connect(&config.database_url).await?;
    let mut sink = FileReportSink::new(&config.output_dir);
    if let Some(font) = &config.pdf_font {
        let bytes = std::fs::read(font)
            .with_context(|| format!("failed to read PDF font {}", font.display()))?;
        sink = sink.with_font(bytes);
    }
    let archiver = create_archiver(&config.archive)?;

    Ok(QuizEngine::new(
        provider,
        Arc::new(store),
        Arc::new(sink),
        archiver,
        config.engine_config(),
    ))
}
