//! The `quizforge generate` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizforge_core::generator::{GenerationRequest, McqGenerator};
use quizforge_core::selection::QuestionSelection;
use quizforge_core::Difficulty;
use quizforge_providers::load_config_from;

use super::{print_json, print_mcq_table, write_json};

pub struct GenerateArgs {
    pub topic: String,
    pub count: Option<u32>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub select: Option<String>,
    pub difficulty: Difficulty,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub config: Option<PathBuf>,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    if let Some(t) = args.temperature {
        anyhow::ensure!(
            (0.0..=2.0).contains(&t),
            "temperature must be between 0.0 and 2.0"
        );
    }
    let indices = args.select.as_deref().map(parse_indices).transpose()?;

    let config = load_config_from(args.config.as_deref())?;
    let spec = config.model_spec(args.model.as_deref())?;
    let provider = config.build_provider(&spec.provider)?;
    let generator = McqGenerator::new(
        Arc::from(provider),
        config.generator_config(&spec.model, args.temperature),
    );

    let count = args.count.unwrap_or(config.default_question_count);
    let request = GenerationRequest::new(args.topic).with_count(count);
    eprintln!(
        "Requesting {count} questions from {}/{}",
        spec.provider, spec.model
    );

    let outcome = generator.generate(&request).await?;

    if outcome.is_empty() {
        if args.json {
            print_json(&outcome.mcqs)?;
            eprintln!("No questions produced");
        } else {
            println!("No questions produced");
        }
        if let Some(path) = &args.output {
            write_json(path, &outcome.mcqs)?;
            eprintln!("Empty question list written to {}", path.display());
        }
        return Ok(());
    }

    if args.json {
        print_json(&outcome.mcqs)?;
    } else {
        print_mcq_table(&outcome.mcqs);
    }
    eprintln!(
        "Parsed {} questions ({} lines skipped) in {}ms, {} tokens",
        outcome.mcqs.len(),
        outcome.skipped_lines,
        outcome.latency_ms,
        outcome.token_usage.total_tokens,
    );

    match indices {
        Some(indices) => {
            let mut selection = QuestionSelection::new();
            selection.toggle_indices(&outcome.mcqs, &indices)?;
            let review = selection.into_review(args.difficulty)?;
            match &args.output {
                Some(path) => {
                    write_json(path, &review)?;
                    eprintln!(
                        "Review list of {} questions written to {}",
                        review.len(),
                        path.display()
                    );
                }
                None => print_json(&review)?,
            }
        }
        None => {
            if let Some(path) = &args.output {
                write_json(path, &outcome.mcqs)?;
                eprintln!("Questions written to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Parse a comma-separated list of 1-based question positions.
fn parse_indices(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("invalid question number: '{part}'"))
        })
        .collect()
}
