//! Subcommand implementations.

pub mod generate;
pub mod init;
pub mod list_models;
pub mod parse;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde::Serialize;

use quizforge_core::Mcq;

/// Print questions as a numbered table, one row per question.
pub(crate) fn print_mcq_table(mcqs: &[Mcq]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "A", "B", "C", "D", "Answer"]);

    for (i, mcq) in mcqs.iter().enumerate() {
        let mut row = vec![Cell::new(i + 1), Cell::new(&mcq.question)];
        row.extend(mcq.options.iter().map(|(_, text)| Cell::new(text)));
        row.push(Cell::new(mcq.answer));
        table.add_row(row);
    }

    println!("{table}");
}

/// Pretty-print `value` as JSON to stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write `value` as pretty JSON to `path`.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
