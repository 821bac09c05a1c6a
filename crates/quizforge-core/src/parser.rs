//! Best-effort parser for line-delimited MCQ model output.
//!
//! The model is asked to emit one question per line in the form
//!
//! ```text
//! <question>_<optionA>_<optionB>_<optionC>_<optionD>_<A|B|C|D>
//! ```
//!
//! Nothing guarantees the model follows that convention, so the parser keeps
//! every line that fits and drops every line that does not. It never fails.
//!
//! # Known limitation: delimiter collision
//!
//! Fields are split on a bare `_` with no escaping. A question or option that
//! itself contains `_` (identifiers such as `snake_case`, blanks written as
//! `___`) produces more than six fields, so the whole line is dropped. If the
//! extra underscores happen to offset a missing field the line still splits
//! into six, and the text lands in the wrong fields. Callers that need such
//! content must change the prompt convention; this parser does not guess.

use crate::model::{Mcq, McqOptions, OptionKey};

/// Field separator inside a single MCQ line.
pub const FIELD_DELIMITER: char = '_';

/// Number of fields in a well-formed line: question, four options, answer.
pub const FIELD_COUNT: usize = 6;

/// Result of parsing a whole response, with bookkeeping for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBatch {
    /// Valid questions, in input order.
    pub mcqs: Vec<Mcq>,
    /// Number of `\n`-separated segments seen, including empty ones.
    pub total_lines: usize,
    /// Number of segments that did not produce a question.
    pub skipped_lines: usize,
}

/// Parse a raw model response into MCQs, dropping malformed lines.
pub fn parse_mcq_text(raw: &str) -> Vec<Mcq> {
    parse_mcq_batch(raw).mcqs
}

/// Like [`parse_mcq_text`], but also reports how many lines were discarded.
///
/// An empty input is one empty segment: `total_lines == 1`, nothing parsed.
pub fn parse_mcq_batch(raw: &str) -> ParsedBatch {
    let mut batch = ParsedBatch::default();

    // Split on '\n' only; a '\r' stays in the answer field and fails it.
    for line in raw.split('\n') {
        batch.total_lines += 1;
        match parse_mcq_line(line) {
            Some(mcq) => batch.mcqs.push(mcq),
            None => batch.skipped_lines += 1,
        }
    }

    batch
}

/// Parse one line. Returns `None` unless it has exactly six `_`-separated
/// fields and the last one is exactly `A`, `B`, `C` or `D`.
pub fn parse_mcq_line(line: &str) -> Option<Mcq> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return None;
    }

    let answer: OptionKey = fields[5].parse().ok()?;

    Some(Mcq {
        question: fields[0].to_string(),
        options: McqOptions {
            a: fields[1].to_string(),
            b: fields[2].to_string(),
            c: fields[3].to_string(),
            d: fields[4].to_string(),
        },
        answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq(question: &str, opts: [&str; 4], answer: OptionKey) -> Mcq {
        Mcq {
            question: question.into(),
            options: McqOptions {
                a: opts[0].into(),
                b: opts[1].into(),
                c: opts[2].into(),
                d: opts[3].into(),
            },
            answer,
        }
    }

    #[test]
    fn parse_single_well_formed_line() {
        let parsed = parse_mcq_text("Q_a_b_c_d_D");
        assert_eq!(parsed, vec![mcq("Q", ["a", "b", "c", "d"], OptionKey::D)]);
    }

    #[test]
    fn every_answer_letter_is_accepted() {
        for key in OptionKey::ALL {
            let line = format!("Q_1_2_3_4_{key}");
            let parsed = parse_mcq_line(&line).expect("line should parse");
            assert_eq!(parsed.answer, key);
        }
    }

    #[test]
    fn mixed_response_keeps_valid_lines_in_order() {
        let input = "What is 2+2?_1_2_3_4_C\n\
                     broken line without delimiters\n\
                     Capital of France?_London_Paris_Berlin_Madrid_B";
        let parsed = parse_mcq_text(input);
        assert_eq!(
            parsed,
            vec![
                mcq("What is 2+2?", ["1", "2", "3", "4"], OptionKey::C),
                mcq(
                    "Capital of France?",
                    ["London", "Paris", "Berlin", "Madrid"],
                    OptionKey::B
                ),
            ]
        );
    }

    #[test]
    fn wrong_field_count_is_dropped() {
        assert!(parse_mcq_line("Q_a_b_c_A").is_none());
        assert!(parse_mcq_line("Q_a_b_c_d_e_A").is_none());
        assert!(parse_mcq_line("no delimiters at all").is_none());
        assert!(parse_mcq_line("").is_none());
    }

    #[test]
    fn bad_answer_field_is_dropped() {
        assert!(parse_mcq_line("Q_a_b_c_d_a").is_none());
        assert!(parse_mcq_line("Q_a_b_c_d_E").is_none());
        assert!(parse_mcq_line("Q_a_b_c_d_").is_none());
        assert!(parse_mcq_line("Q_a_b_c_d_ A").is_none());
        assert!(parse_mcq_line("Q_a_b_c_d_AB").is_none());
    }

    #[test]
    fn crlf_line_endings_are_not_normalized() {
        let parsed = parse_mcq_text("Q1_a_b_c_d_A\r\nQ2_a_b_c_d_B");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].question, "Q2");
    }

    #[test]
    fn fields_are_not_trimmed() {
        let parsed = parse_mcq_line(" Q _ a_b _c_d_A").unwrap();
        assert_eq!(parsed.question, " Q ");
        assert_eq!(parsed.options.a, " a");
        assert_eq!(parsed.options.b, "b ");
    }

    #[test]
    fn empty_fields_are_kept() {
        let parsed = parse_mcq_line("_____B").unwrap();
        assert_eq!(parsed.question, "");
        assert_eq!(parsed.options.d, "");
        assert_eq!(parsed.answer, OptionKey::B);
    }

    #[test]
    fn underscore_in_question_drops_the_line() {
        assert!(parse_mcq_line("What does snake_case mean?_a_b_c_d_A").is_none());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_mcq_text("").is_empty());
        let batch = parse_mcq_batch("");
        assert_eq!(batch.total_lines, 1);
        assert_eq!(batch.skipped_lines, 1);
    }

    #[test]
    fn batch_counts_skipped_lines() {
        let batch = parse_mcq_batch("Q_a_b_c_d_A\n\nnoise\nQ2_a_b_c_d_C\n");
        assert_eq!(batch.mcqs.len(), 2);
        assert_eq!(batch.total_lines, 5);
        assert_eq!(batch.skipped_lines, 3);
    }

    #[test]
    fn markdown_fences_around_output_are_ignored() {
        let input = "```\nQ_a_b_c_d_A\n```";
        let parsed = parse_mcq_text(input);
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn parsing_is_repeatable() {
        let input = "Q_a_b_c_d_A\nbad\nQ2_w_x_y_z_D";
        assert_eq!(parse_mcq_text(input), parse_mcq_text(input));
    }
}
