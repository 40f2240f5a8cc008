//! HTTP API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use quizforge_core::engine::QuizEngine;
use quizforge_core::error::QuizError;
use quizforge_core::model::{ParsedResult, QuizForm, StoredResult};

pub fn router(engine: Arc<QuizEngine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/questions", post(create_questions))
        .route("/api/results/:id", get(get_result))
        .with_state(engine)
}

/// An error rendered as `{"error": "..."}` with a matching status code.
#[derive(Debug)]
pub enum ApiError {
    Quiz(QuizError),
    /// The request body could not be read as a quiz form.
    BadRequest(String),
    NotFound(Uuid),
    Internal(anyhow::Error),
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        ApiError::Quiz(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Quiz(err) => {
                let status = match &err {
                    QuizError::InvalidForm(_) => StatusCode::BAD_REQUEST,
                    QuizError::Provider(_) => StatusCode::BAD_GATEWAY,
                    QuizError::NotConfigured
                    | QuizError::Storage(_)
                    | QuizError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            ApiError::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                format!("invalid quiz form: {reason}"),
            ),
            ApiError::NotFound(id) => (StatusCode::NOT_FOUND, format!("result {id} not found")),
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")),
        };
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{message}");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn create_questions(
    State(engine): State<Arc<QuizEngine>>,
    payload: Result<Json<QuizForm>, JsonRejection>,
) -> Result<Json<ParsedResult>, ApiError> {
    let Json(form) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    tracing::info!(
        subject = %form.subject,
        amount = form.amount_of_questions,
        language = %form.language.name,
        "quiz requested"
    );
    let quiz = engine.generate(&form).await?;
    tracing::info!(result_id = %quiz.result_id, questions = quiz.result.questions.len(), "quiz generated");
    Ok(Json(quiz.result))
}

async fn get_result(
    State(engine): State<Arc<QuizEngine>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoredResult>, ApiError> {
    match engine.store().load_result(id).await {
        Ok(Some(stored)) => Ok(Json(stored)),
        Ok(None) => Err(ApiError::NotFound(id)),
        Err(e) => Err(ApiError::Internal(e)),
    }
}
