//! The `quizforge generate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use quizforge_core::model::{ParsedResult, QuizForm};
use quizforge_providers::load_config_from;

pub async fn execute(
    subject: String,
    amount: u32,
    language: String,
    seed: Option<u64>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(seed) = seed {
        config.shuffle_seed = Some(seed);
    }
    if let Some(output) = output {
        config.output_dir = output;
    }

    let form = QuizForm::new(subject, amount, &language);
    // Reject bad input before touching the database.
    form.validate().map_err(|e| anyhow::anyhow!("invalid quiz form: {e}"))?;

    let engine = super::build_engine(&config).await?;
    let quiz = engine.generate(&form).await?;

    println!("{}", question_table(&quiz.result));
    println!("Result id: {}", quiz.result_id);
    for file in &quiz.files {
        println!("Wrote {}", file.display());
    }
    Ok(())
}

fn question_table(result: &ParsedResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Question", "Options", "Correct"]);
    for (i, q) in result.questions.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            q.question.clone(),
            q.answers.join("\n"),
            q.correct_answers().join("\n"),
        ]);
    }
    table
}
