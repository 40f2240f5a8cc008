//! Core data model types for quizforge.
//!
//! The wire shapes here mirror the JSON exchanged with the web front end,
//! which uses camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Most questions a single form may request.
pub const MAX_QUESTIONS: u32 = 50;

/// A quiz-generation request submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizForm {
    /// What the quiz is about.
    pub subject: String,
    /// How many questions to ask the model for.
    pub amount_of_questions: u32,
    /// Language the questions should be written in.
    pub language: LanguageOption,
}

/// A selectable quiz language.
///
/// Names follow the `"<English name> - <native name>"` convention used by
/// the language picker, e.g. `"French - Français"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub name: String,
}

impl LanguageOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The part of the name before `" - "`, which is what the model is told.
    pub fn display_name(&self) -> &str {
        self.name
            .split(" - ")
            .next()
            .unwrap_or(&self.name)
            .trim()
    }
}

impl QuizForm {
    pub fn new(subject: impl Into<String>, amount_of_questions: u32, language: &str) -> Self {
        Self {
            subject: subject.into(),
            amount_of_questions,
            language: LanguageOption::new(language),
        }
    }

    /// Check the form for values the prompt cannot sensibly carry.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.subject.trim().is_empty() {
            return Err("subject must not be empty".into());
        }
        if self.amount_of_questions == 0 || self.amount_of_questions > MAX_QUESTIONS {
            return Err(format!(
                "amountOfQuestions must be between 1 and {MAX_QUESTIONS}, got {}",
                self.amount_of_questions
            ));
        }
        if self.language.display_name().is_empty() {
            return Err("language name must not be empty".into());
        }
        Ok(())
    }
}

/// A single parsed quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Question text with the number prefix removed.
    pub question: String,
    /// Answers in their final (shuffled) order, without `#` markers.
    pub answers: Vec<String>,
    /// Indices into `answers` of the answers marked correct.
    pub correct_answer_positions: Vec<usize>,
}

impl Question {
    /// The answer texts at the correct positions.
    pub fn correct_answers(&self) -> Vec<&str> {
        self.correct_answer_positions
            .iter()
            .filter_map(|&pos| self.answers.get(pos).map(String::as_str))
            .collect()
    }
}

/// Everything produced by one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    pub questions: Vec<Question>,
    /// The prompt sent to the model.
    pub request_message: String,
    /// The model's raw reply.
    pub response_message: String,
}

/// A result as read back from persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub id: Uuid,
    pub form_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: ParsedResult,
}
