//! The `quizforge init` command.

use std::path::Path;

use anyhow::Result;

const CONFIG_FILE: &str = "quizforge.toml";

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }
    std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)?;
    println!("Created {CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Export OPENAI_API_KEY or edit {CONFIG_FILE}");
    println!("  2. Run: quizforge generate --subject \"World capitals\" --amount 5");
    println!("  3. Run: quizforge serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

database_url = "sqlite://quizforge.db?mode=rwc"
output_dir = "."
# pdf_font = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
listen = "127.0.0.1:3000"
max_retries = 3
retry_delay_ms = 1000

[openai]
api_key = "${OPENAI_API_KEY}"
model = "gpt-3.5-turbo"
temperature = 1.0
max_tokens = 2048

[archive]
# url = "https://storage.example.com/quizzes"
# token = "${QUIZFORGE_ARCHIVE_TOKEN}"
"#;
