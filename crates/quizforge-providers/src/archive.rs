//! HTTP archive client.
//!
//! Finished results are POSTed as JSON to an external archive endpoint.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::instrument;

use quizforge_core::model::ParsedResult;
use quizforge_core::traits::{Archiver, NoopArchiver};

use crate::config::ArchiveConfig;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sends results to an archive endpoint over HTTP.
pub struct HttpArchiver {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpArchiver {
    pub fn new(url: &str, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            url: url.to_string(),
            token,
            client,
        })
    }
}

#[async_trait]
impl Archiver for HttpArchiver {
    #[instrument(skip(self, result), fields(url = %self.url, questions = result.questions.len()))]
    async fn archive(&self, result: &ParsedResult) -> Result<()> {
        let mut req = self.client.post(&self.url).json(result);
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let response = req
            .send()
            .await
            .with_context(|| format!("failed to reach archive at {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("archive rejected result (HTTP {}): {}", status.as_u16(), body);
        }

        tracing::info!("result archived");
        Ok(())
    }
}

/// Build the archiver for a configuration: HTTP when a URL is set, no-op otherwise.
pub fn create_archiver(config: &ArchiveConfig) -> Result<Arc<dyn Archiver>> {
    match config.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => Ok(Arc::new(HttpArchiver::new(url, config.token.clone())?)),
        _ => Ok(Arc::new(NoopArchiver)),
    }
}
