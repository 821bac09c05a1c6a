//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quizforge_core::Difficulty;

mod commands;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Generate multiple-choice questions with an LLM and build tests from them"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate MCQs about a topic
    Generate {
        /// Topic to write questions about
        #[arg(long)]
        topic: String,

        /// Number of questions to request (default from config)
        #[arg(long)]
        count: Option<u32>,

        /// Model to use, optionally as "provider/model" (e.g. "openai/gpt-4.1")
        #[arg(long)]
        model: Option<String>,

        /// Generation temperature (default from config)
        #[arg(long)]
        temperature: Option<f64>,

        /// 1-based positions of questions to select for review (e.g. "1,3,4")
        #[arg(long)]
        select: Option<String>,

        /// Difficulty attached to selected questions
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Write the questions (or the review list with --select) to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse a saved model response offline
    Parse {
        /// Response file, or "-" for stdin (default)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Configure reviewed questions into a test and save it
    CreateTest {
        /// JSON file with review questions (or raw MCQs)
        #[arg(long)]
        questions: PathBuf,

        /// Class the test is assigned to
        #[arg(long)]
        class_id: String,

        /// Test duration in minutes (default from config)
        #[arg(long)]
        total_time: Option<u32>,

        /// Difficulty for questions that carry none (raw MCQ input)
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Directory to save the test in (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List saved tests
    ListTests {
        /// Directory holding saved tests (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value = "3000")]
        port: u16,

        /// Keep saved tests in memory instead of the tests directory
        #[arg(long)]
        in_memory: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and a sample model response
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            topic,
            count,
            model,
            temperature,
            select,
            difficulty,
            output,
            json,
            config,
        } => {
            commands::generate::execute(commands::generate::GenerateArgs {
                topic,
                count,
                model,
                temperature,
                select,
                difficulty,
                output,
                json,
                config,
            })
            .await
        }
        Commands::Parse { input, json } => commands::parse::execute(input, json),
        Commands::CreateTest {
            questions,
            class_id,
            total_time,
            difficulty,
            output,
            config,
        } => commands::create_test::execute(
            questions, class_id, total_time, difficulty, output, config,
        ),
        Commands::ListTests { output, config } => commands::list_tests::execute(output, config),
        Commands::Serve {
            host,
            port,
            in_memory,
            config,
        } => commands::serve::execute(host, port, in_memory, config).await,
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
