//! Provider error types.
//!
//! Re-exported from `quizforge-core` so the generator can downcast them.

pub use quizforge_core::error::ProviderError;
