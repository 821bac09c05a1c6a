//! The `quizforge parse` command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_core::parser::parse_mcq_batch;

use super::{print_json, print_mcq_table};

pub fn execute(input: Option<PathBuf>, json: bool) -> Result<()> {
    let raw = match input.filter(|p| p.as_os_str() != "-") {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let batch = parse_mcq_batch(&raw);

    if json {
        print_json(&batch.mcqs)?;
        if batch.mcqs.is_empty() {
            eprintln!("No questions produced");
        }
    } else if batch.mcqs.is_empty() {
        println!("No questions produced");
    } else {
        print_mcq_table(&batch.mcqs);
    }
    eprintln!(
        "Parsed {} of {} lines ({} skipped)",
        batch.mcqs.len(),
        batch.total_lines,
        batch.skipped_lines
    );

    Ok(())
}
