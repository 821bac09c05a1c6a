//! Prompt text sent to the model.

/// Number of questions requested when the caller does not say.
pub const DEFAULT_QUESTION_COUNT: u32 = 30;

/// System prompt for MCQ generation providers.
pub const MCQ_SYSTEM_PROMPT: &str = "You write multiple-choice questions for teachers. Respond ONLY with question lines in the requested format, one question per line. Do not number the lines, add headings, or explain the answers.";

/// The one-line format the parser expects back.
pub const MCQ_FORMAT_LINE: &str =
    "[Full Question Text]_[Option A]_[Option B]_[Option C]_[Option D]_[A/B/C/D]";

/// Build the user prompt asking for `count` questions about `topic`.
pub fn build_mcq_prompt(topic: &str, count: u32) -> String {
    format!(
        "Generate {count} multiple-choice questions about {topic}.\n\
         Provide output in this EXACT format:\n\
         {MCQ_FORMAT_LINE}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_topic_count_and_format() {
        let prompt = build_mcq_prompt("photosynthesis", 12);
        assert!(prompt.starts_with("Generate 12 multiple-choice questions about photosynthesis."));
        assert!(prompt.ends_with(MCQ_FORMAT_LINE));
        assert_eq!(prompt.lines().count(), 3);
    }
}
