//! Configuring reviewed questions into a test ready to save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WizardError;
use crate::model::{Difficulty, OptionKey, ReviewQuestion};

/// Default test duration in minutes.
pub const DEFAULT_TOTAL_TIME_MINUTES: u32 = 30;

/// A finished test, as handed to the persistence layer.
///
/// Field names are camelCase on the wire. The summary counts may be omitted
/// on input; [`TestPayload::normalized`] recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPayload {
    #[serde(default)]
    pub class_id: String,
    #[serde(default)]
    pub total_questions: usize,
    #[serde(default)]
    pub easy: usize,
    #[serde(default)]
    pub medium: usize,
    #[serde(default)]
    pub difficult: usize,
    /// Minutes.
    #[serde(default = "default_total_time")]
    pub total_time: u32,
    #[serde(default)]
    pub questions: Vec<ReviewQuestion>,
}

fn default_total_time() -> u32 {
    DEFAULT_TOTAL_TIME_MINUTES
}

impl TestPayload {
    /// Re-check a payload that arrived from outside (e.g. over HTTP) and
    /// recompute its summary counts from the questions.
    pub fn normalized(self, allowed_classes: &[String]) -> Result<TestPayload, WizardError> {
        TestBuilder::new(self.questions)
            .class_id(self.class_id)
            .total_time(self.total_time)
            .build(allowed_classes)
    }
}

/// A payload that has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTest {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub test: TestPayload,
}

impl SavedTest {
    pub fn new(test: TestPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            test,
        }
    }
}

/// Count questions whose difficulty matches `difficulty`.
pub fn count_by_difficulty(questions: &[ReviewQuestion], difficulty: Difficulty) -> usize {
    questions.iter().filter(|q| q.difficulty == difficulty).count()
}

/// The configure step: class, duration, and the reviewed questions.
#[derive(Debug, Clone)]
pub struct TestBuilder {
    class_id: String,
    total_time_minutes: u32,
    questions: Vec<ReviewQuestion>,
}

impl TestBuilder {
    pub fn new(questions: Vec<ReviewQuestion>) -> Self {
        Self {
            class_id: String::new(),
            total_time_minutes: DEFAULT_TOTAL_TIME_MINUTES,
            questions,
        }
    }

    pub fn class_id(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = class_id.into();
        self
    }

    pub fn total_time(mut self, minutes: u32) -> Self {
        self.total_time_minutes = minutes;
        self
    }

    pub fn questions(&self) -> &[ReviewQuestion] {
        &self.questions
    }

    /// Validate and produce the payload. An empty `allowed_classes` accepts
    /// any non-empty class ID.
    pub fn build(self, allowed_classes: &[String]) -> Result<TestPayload, WizardError> {
        let class_id = self.class_id.trim().to_string();
        if class_id.is_empty() {
            return Err(WizardError::MissingClassId);
        }
        if !allowed_classes.is_empty() && !allowed_classes.iter().any(|c| *c == class_id) {
            return Err(WizardError::UnknownClass {
                class_id,
                allowed: allowed_classes.join(", "),
            });
        }
        if self.total_time_minutes == 0 {
            return Err(WizardError::InvalidTotalTime);
        }
        if self.questions.is_empty() {
            return Err(WizardError::NoQuestionsSelected);
        }
        for (i, question) in self.questions.iter().enumerate() {
            check_question(question).map_err(|reason| WizardError::InvalidQuestion {
                index: i + 1,
                reason,
            })?;
        }

        Ok(TestPayload {
            class_id,
            total_questions: self.questions.len(),
            easy: count_by_difficulty(&self.questions, Difficulty::Easy),
            medium: count_by_difficulty(&self.questions, Difficulty::Medium),
            difficult: count_by_difficulty(&self.questions, Difficulty::Difficult),
            total_time: self.total_time_minutes,
            questions: self.questions,
        })
    }
}

fn check_question(question: &ReviewQuestion) -> Result<(), String> {
    if question.options.len() != OptionKey::ALL.len() {
        return Err(format!(
            "expected {} options, found {}",
            OptionKey::ALL.len(),
            question.options.len()
        ));
    }
    if question.answer().is_none() {
        return Err(format!(
            "answer index {} does not match an option",
            question.correct_index
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, difficulty: Difficulty) -> ReviewQuestion {
        ReviewQuestion {
            text: text.into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: 0,
            difficulty,
        }
    }

    fn classes() -> Vec<String> {
        vec!["ClassA".into(), "ClassB".into()]
    }

    #[test]
    fn build_counts_difficulties() {
        let payload = TestBuilder::new(vec![
            question("q1", Difficulty::Easy),
            question("q2", Difficulty::Medium),
            question("q3", Difficulty::Medium),
            question("q4", Difficulty::Difficult),
        ])
        .class_id("ClassA")
        .total_time(45)
        .build(&classes())
        .unwrap();

        assert_eq!(payload.total_questions, 4);
        assert_eq!(payload.easy, 1);
        assert_eq!(payload.medium, 2);
        assert_eq!(payload.difficult, 1);
        assert_eq!(payload.total_time, 45);
    }

    #[test]
    fn missing_class_is_rejected() {
        let err = TestBuilder::new(vec![question("q", Difficulty::Easy)])
            .class_id("  ")
            .build(&classes())
            .unwrap_err();
        assert_eq!(err, WizardError::MissingClassId);
    }

    #[test]
    fn unknown_class_is_rejected_only_with_a_class_list() {
        let builder = TestBuilder::new(vec![question("q", Difficulty::Easy)]).class_id("ClassZ");
        assert!(matches!(
            builder.clone().build(&classes()),
            Err(WizardError::UnknownClass { .. })
        ));
        assert!(builder.build(&[]).is_ok());
    }

    #[test]
    fn zero_time_and_no_questions_are_rejected() {
        let err = TestBuilder::new(vec![question("q", Difficulty::Easy)])
            .class_id("ClassA")
            .total_time(0)
            .build(&classes())
            .unwrap_err();
        assert_eq!(err, WizardError::InvalidTotalTime);

        let err = TestBuilder::new(vec![])
            .class_id("ClassA")
            .build(&classes())
            .unwrap_err();
        assert_eq!(err, WizardError::NoQuestionsSelected);
    }

    #[test]
    fn malformed_questions_are_rejected() {
        let mut short = question("q2", Difficulty::Easy);
        short.options.truncate(2);
        let err = TestBuilder::new(vec![question("q1", Difficulty::Easy), short])
            .class_id("ClassA")
            .build(&classes())
            .unwrap_err();
        assert!(matches!(err, WizardError::InvalidQuestion { index: 2, .. }));
        assert!(err.to_string().contains("expected 4 options, found 2"));

        let mut dangling = question("q", Difficulty::Medium);
        dangling.correct_index = 4;
        let err = TestBuilder::new(vec![dangling])
            .class_id("ClassA")
            .build(&classes())
            .unwrap_err();
        assert!(matches!(err, WizardError::InvalidQuestion { index: 1, .. }));
        assert!(err.to_string().contains("answer index 4"));
    }

    #[test]
    fn default_time_is_thirty_minutes() {
        let payload = TestBuilder::new(vec![question("q", Difficulty::Medium)])
            .class_id("ClassB")
            .build(&classes())
            .unwrap();
        assert_eq!(payload.total_time, DEFAULT_TOTAL_TIME_MINUTES);
    }

    #[test]
    fn payload_uses_camel_case() {
        let payload = TestBuilder::new(vec![question("q", Difficulty::Easy)])
            .class_id("ClassA")
            .build(&classes())
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["classId"], "ClassA");
        assert_eq!(json["totalQuestions"], 1);
        assert_eq!(json["totalTime"], 30);
        assert_eq!(json["questions"][0]["correctIndex"], 0);
    }

    #[test]
    fn normalized_recomputes_counts() {
        let tampered = TestPayload {
            class_id: "ClassA".into(),
            total_questions: 99,
            easy: 99,
            medium: 0,
            difficult: 0,
            total_time: 20,
            questions: vec![question("q", Difficulty::Difficult)],
        };
        let fixed = tampered.normalized(&classes()).unwrap();
        assert_eq!(fixed.total_questions, 1);
        assert_eq!(fixed.easy, 0);
        assert_eq!(fixed.difficult, 1);
    }

    #[test]
    fn minimal_payload_deserializes_with_defaults() {
        let payload: TestPayload = serde_json::from_value(serde_json::json!({
            "classId": "ClassA",
            "questions": [{
                "text": "q",
                "options": ["a", "b", "c", "d"],
                "correctIndex": 2,
                "difficulty": "Easy"
            }]
        }))
        .unwrap();
        assert_eq!(payload.total_time, DEFAULT_TOTAL_TIME_MINUTES);
        assert_eq!(payload.total_questions, 0);

        let fixed = payload.normalized(&classes()).unwrap();
        assert_eq!(fixed.total_questions, 1);
        assert_eq!(fixed.easy, 1);
    }
}
