//! Plain-text quiz report.

use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::model::{ParsedResult, Question};

/// The three report lines for a question, numbered from 1.
pub(crate) fn question_lines(number: usize, question: &Question) -> [String; 3] {
    [
        format!("Question {number}: {}", question.question),
        format!("Options: {}", question.answers.join(", ")),
        format!("Correct Answers: {}", question.correct_answers().join(", ")),
    ]
}

/// Render every question as a three-line block, blocks separated by a blank line.
pub fn generate_text(result: &ParsedResult) -> String {
    result
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let [question, options, correct] = question_lines(i + 1, q);
            format!("{question}\n{options}\n{correct}\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write the text report to `path`.
pub fn write_text_report(result: &ParsedResult, path: &Path) -> Result<()> {
    crate::write_atomic(path, generate_text(result).as_bytes())
        .with_context(|| format!("failed to write text report to {}", path.display()))
}
