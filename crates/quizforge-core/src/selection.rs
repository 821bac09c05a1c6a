//! Question selection for the generate → select → review steps.
//!
//! Selection is keyed by question text, so two generated questions with the
//! same wording toggle together.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::model::{Difficulty, Mcq, ReviewQuestion};

/// The current pick of generated questions, in the order picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSelection {
    selected: Vec<Mcq>,
}

impl QuestionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `mcq` if no selected question has its text, otherwise remove it.
    /// Returns `true` if the question is selected afterwards.
    pub fn toggle(&mut self, mcq: &Mcq) -> bool {
        if let Some(pos) = self.position(&mcq.question) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(mcq.clone());
            true
        }
    }

    /// Toggle questions by 1-based position in `generated`.
    ///
    /// All indices are checked before anything is toggled. A position listed
    /// more than once is toggled once.
    pub fn toggle_indices(&mut self, generated: &[Mcq], indices: &[usize]) -> Result<(), WizardError> {
        if let Some(&bad) = indices.iter().find(|&&i| i == 0 || i > generated.len()) {
            return Err(WizardError::IndexOutOfRange {
                index: bad,
                len: generated.len(),
            });
        }
        let mut seen = Vec::with_capacity(indices.len());
        for &i in indices {
            if seen.contains(&i) {
                continue;
            }
            seen.push(i);
            self.toggle(&generated[i - 1]);
        }
        Ok(())
    }

    pub fn is_selected(&self, question: &str) -> bool {
        self.position(question).is_some()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop every selection, as after a fresh generation.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &[Mcq] {
        &self.selected
    }

    /// Move on to review, tagging every question with `difficulty`.
    pub fn into_review(self, difficulty: Difficulty) -> Result<Vec<ReviewQuestion>, WizardError> {
        if self.selected.is_empty() {
            return Err(WizardError::NoQuestionsSelected);
        }
        Ok(self
            .selected
            .iter()
            .map(|mcq| ReviewQuestion::from_mcq(mcq, difficulty))
            .collect())
    }

    fn position(&self, question: &str) -> Option<usize> {
        self.selected.iter().position(|m| m.question == question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_mcq_text;

    fn generated() -> Vec<Mcq> {
        parse_mcq_text("Q1_a_b_c_d_A\nQ2_a_b_c_d_B\nQ3_a_b_c_d_C")
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mcqs = generated();
        let mut sel = QuestionSelection::new();
        assert!(sel.toggle(&mcqs[0]));
        assert!(sel.is_selected("Q1"));
        assert!(!sel.toggle(&mcqs[0]));
        assert!(sel.is_empty());
    }

    #[test]
    fn selection_keeps_pick_order() {
        let mcqs = generated();
        let mut sel = QuestionSelection::new();
        sel.toggle_indices(&mcqs, &[3, 1]).unwrap();
        let texts: Vec<&str> = sel.selected().iter().map(|m| m.question.as_str()).collect();
        assert_eq!(texts, vec!["Q3", "Q1"]);
    }

    #[test]
    fn out_of_range_index_changes_nothing() {
        let mcqs = generated();
        let mut sel = QuestionSelection::new();
        let err = sel.toggle_indices(&mcqs, &[1, 4]).unwrap_err();
        assert_eq!(err, WizardError::IndexOutOfRange { index: 4, len: 3 });
        assert!(sel.is_empty());
        assert!(sel.toggle_indices(&mcqs, &[0]).is_err());
    }

    #[test]
    fn repeated_index_selects_once() {
        let mcqs = generated();
        let mut sel = QuestionSelection::new();
        sel.toggle_indices(&mcqs, &[1, 1, 2, 1]).unwrap();
        let texts: Vec<&str> = sel.selected().iter().map(|m| m.question.as_str()).collect();
        assert_eq!(texts, vec!["Q1", "Q2"]);
    }

    #[test]
    fn same_text_toggles_together() {
        let mcqs = parse_mcq_text("Same?_a_b_c_d_A\nSame?_w_x_y_z_D");
        let mut sel = QuestionSelection::new();
        sel.toggle(&mcqs[0]);
        assert!(!sel.toggle(&mcqs[1]));
        assert!(sel.is_empty());
    }

    #[test]
    fn review_requires_a_selection() {
        let err = QuestionSelection::new()
            .into_review(Difficulty::Medium)
            .unwrap_err();
        assert_eq!(err, WizardError::NoQuestionsSelected);
    }

    #[test]
    fn review_carries_answer_index_and_difficulty() {
        let mcqs = generated();
        let mut sel = QuestionSelection::new();
        sel.toggle(&mcqs[2]);
        let review = sel.into_review(Difficulty::Difficult).unwrap();
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].text, "Q3");
        assert_eq!(review[0].correct_index, 2);
        assert_eq!(review[0].difficulty, Difficulty::Difficult);
    }

    #[test]
    fn clear_empties_selection() {
        let mcqs = generated();
        let mut sel = QuestionSelection::new();
        sel.toggle_indices(&mcqs, &[1, 2]).unwrap();
        assert_eq!(sel.len(), 2);
        sel.clear();
        assert!(sel.is_empty());
    }
}
