//! quizforge: quiz generation server and command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Generate multiple-choice quizzes with an LLM")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long)]
        listen: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate a single quiz from the terminal
    Generate {
        /// What the quiz is about
        #[arg(long)]
        subject: String,

        /// Number of questions
        #[arg(long, default_value = "5")]
        amount: u32,

        /// Quiz language, e.g. "English" or "French - Français"
        #[arg(long, default_value = "English")]
        language: String,

        /// Seed for the answer shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for questions.txt and questions.pdf
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizforge=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { listen, config } => commands::serve::execute(listen, config).await,
        Commands::Generate {
            subject,
            amount,
            language,
            seed,
            output,
            config,
        } => commands::generate::execute(subject, amount, language, seed, output, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
