//! quizforge-core — MCQ parsing, generation, and test building.
//!
//! This crate defines the question data model, the best-effort parser for
//! model output, the provider trait the generator calls through, and the
//! selection/review/test-building steps that follow generation.

pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod selection;
pub mod store;
pub mod test_paper;
pub mod traits;

pub use error::{GenerationError, ProviderError, WizardError};
pub use model::{Difficulty, Mcq, McqOptions, OptionKey, ReviewQuestion};
pub use parser::parse_mcq_text;
