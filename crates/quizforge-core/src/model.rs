//! Core data model types for quizforge.
//!
//! These are the records that flow from a parsed model response through
//! selection, review, and finally into a saved test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The label of one of the four answer choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    /// All keys in display order.
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    /// Zero-based position of this key (A = 0 .. D = 3).
    pub fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }

    /// The key at a zero-based position, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact match only: `"a"`, `" A"` and `"A\r"` are all rejected.
impl FromStr for OptionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionKey::A),
            "B" => Ok(OptionKey::B),
            "C" => Ok(OptionKey::C),
            "D" => Ok(OptionKey::D),
            other => Err(format!("not an option key: {other:?}")),
        }
    }
}

/// The four answer choices of an MCQ, keyed `A` through `D`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl McqOptions {
    pub fn get(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }

    /// Iterate options in A-D order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// The option texts in A-D order.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(|(_, text)| text.to_string()).collect()
    }
}

/// A single parsed multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    /// Full question text.
    pub question: String,
    /// The four answer choices.
    pub options: McqOptions,
    /// Key of the correct option.
    pub answer: OptionKey,
}

impl Mcq {
    /// Text of the correct option.
    pub fn answer_text(&self) -> &str {
        self.options.get(self.answer)
    }
}

/// Difficulty label attached to a question during review.
///
/// Deserializes case-insensitively, serializes as `"Easy"`, `"Medium"` or
/// `"Difficult"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Difficult,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Difficult => write!(f, "Difficult"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "difficult" | "hard" => Ok(Difficulty::Difficult),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.to_string()
    }
}

/// A selected question as shown on the review step and stored in a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuestion {
    /// Question text.
    pub text: String,
    /// Option texts in A-D order.
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub correct_index: usize,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl ReviewQuestion {
    pub fn from_mcq(mcq: &Mcq, difficulty: Difficulty) -> Self {
        Self {
            text: mcq.question.clone(),
            options: mcq.options.to_vec(),
            correct_index: mcq.answer.index(),
            difficulty,
        }
    }

    /// Key of the correct option, if `correct_index` is in range.
    pub fn answer(&self) -> Option<OptionKey> {
        if self.correct_index < self.options.len() {
            OptionKey::from_index(self.correct_index)
        } else {
            None
        }
    }
}
