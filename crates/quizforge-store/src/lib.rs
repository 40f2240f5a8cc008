//! quizforge-store: SQL persistence for quiz forms and results.
//!
//! Uses the sqlx `Any` driver, so the database is chosen by the connection
//! URL: `sqlite://quizforge.db?mode=rwc` for local use, `postgres://…` for a
//! shared server.

mod schema;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use uuid::Uuid;

use quizforge_core::model::{ParsedResult, Question, QuizForm, StoredResult};
use quizforge_core::traits::QuizStore;

const MAX_CONNECTIONS: u32 = 25;

/// `QuizStore` backed by a SQL database.
#[derive(Clone)]
pub struct SqlQuizStore {
    pool: AnyPool,
}

#[derive(sqlx::FromRow)]
struct ResultRow {
    id: String,
    form_id: String,
    questions: String,
    request_message: String,
    response_message: String,
    created_at: String,
}

impl SqlQuizStore {
    /// Connect to `url` and create the tables if they don't exist yet.
    pub async fn connect(url: &str) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(url)
            .await
            .with_context(|| format!("cannot connect to database {}", redact_url(url)))?;
        tracing::info!("connected to database {}", redact_url(url));

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    /// Create the tables if they don't exist yet.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(schema::CREATE_FORMS)
            .execute(&self.pool)
            .await
            .context("failed to create quiz_forms table")?;
        sqlx::query(schema::CREATE_RESULTS)
            .execute(&self.pool)
            .await
            .context("failed to create quiz_results table")?;
        Ok(())
    }

    /// Number of forms recorded so far.
    pub async fn form_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_forms")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl QuizStore for SqlQuizStore {
    async fn save_form(&self, form: &QuizForm) -> Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(schema::INSERT_FORM)
            .bind(id.to_string())
            .bind(form.subject.clone())
            .bind(i64::from(form.amount_of_questions))
            .bind(form.language.name.clone())
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .context("failed to insert quiz form")?;
        Ok(id)
    }

    async fn save_result(&self, form_id: Uuid, result: &ParsedResult) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let questions =
            serde_json::to_string(&result.questions).context("failed to serialize questions")?;
        sqlx::query(schema::INSERT_RESULT)
            .bind(id.to_string())
            .bind(form_id.to_string())
            .bind(questions)
            .bind(result.request_message.clone())
            .bind(result.response_message.clone())
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .context("failed to insert quiz result")?;
        Ok(id)
    }

    async fn load_result(&self, id: Uuid) -> Result<Option<StoredResult>> {
        let row = sqlx::query_as::<_, ResultRow>(schema::SELECT_RESULT)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("failed to query quiz result")?;

        row.map(StoredResult::try_from).transpose()
    }
}

impl TryFrom<ResultRow> for StoredResult {
    type Error = anyhow::Error;

    fn try_from(row: ResultRow) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(&row.questions)
            .with_context(|| format!("corrupt questions column for result {}", row.id))?;
        Ok(StoredResult {
            id: Uuid::parse_str(&row.id).context("invalid result id")?,
            form_id: Uuid::parse_str(&row.form_id).context("invalid form id")?,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .context("invalid created_at")?
                .with_timezone(&Utc),
            result: ParsedResult {
                questions,
                request_message: row.request_message,
                response_message: row.response_message,
            },
        })
    }
}

/// Hide the password part of a connection URL for logging.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((userinfo, host)) => {
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***@{host}")
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (tempfile::TempDir, SqlQuizStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("quiz.db").display());
        let store = SqlQuizStore::connect(&url).await.unwrap();
        (dir, store)
    }

    fn sample_result() -> ParsedResult {
        ParsedResult {
            questions: vec![
                Question {
                    question: "Capital of France?".into(),
                    answers: vec!["Berlin".into(), "Paris".into(), "Madrid".into()],
                    correct_answer_positions: vec![1],
                },
                Question {
                    question: "Pick two".into(),
                    answers: vec!["A".into(), "B".into()],
                    correct_answer_positions: vec![0, 1],
                },
            ],
            request_message: "I want to make a quiz about geography.".into(),
            response_message: "$1. Capital of France?|Paris#|Berlin|Madrid".into(),
        }
    }

    #[tokio::test]
    async fn save_and_load_result() {
        let (_dir, store) = temp_store().await;
        let form_id = store
            .save_form(&QuizForm::new("geography", 2, "English - English"))
            .await
            .unwrap();
        let result_id = store.save_result(form_id, &sample_result()).await.unwrap();

        let stored = store.load_result(result_id).await.unwrap().unwrap();
        assert_eq!(stored.id, result_id);
        assert_eq!(stored.form_id, form_id);
        assert_eq!(stored.result, sample_result());
        assert_eq!(store.form_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_result_is_none() {
        let (_dir, store) = temp_store().await;
        assert!(store.load_result(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let (_dir, store) = temp_store().await;
        store.init().await.unwrap();
        store
            .save_form(&QuizForm::new("history", 3, "German - Deutsch"))
            .await
            .unwrap();
        store.init().await.unwrap();
        assert_eq!(store.form_count().await.unwrap(), 1);
    }

    #[test]
    fn redacts_passwords() {
        assert_eq!(
            redact_url("postgres://quiz:hunter2@db:5432/quiz"),
            "postgres://quiz:***@db:5432/quiz"
        );
        assert_eq!(
            redact_url("postgres://quiz:p@ss@db:5432/quiz"),
            "postgres://quiz:***@db:5432/quiz"
        );
        assert_eq!(
            redact_url("sqlite://quizforge.db?mode=rwc"),
            "sqlite://quizforge.db?mode=rwc"
        );
    }
}
