//! The generation boundary: prompt the model, then parse what comes back.
//!
//! Provider failures and empty parses are kept apart. A failed call is a
//! [`GenerationError::Failed`]; a call that succeeds but yields no usable
//! lines is an `Ok` outcome with no questions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::GenerationError;
use crate::model::Mcq;
use crate::parser::parse_mcq_batch;
use crate::prompt::{build_mcq_prompt, DEFAULT_QUESTION_COUNT, MCQ_SYSTEM_PROMPT};
use crate::traits::{GenerateRequest, LlmProvider, TokenUsage};

/// Settings applied to every generation call.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Max tokens for generation.
    pub max_tokens: u32,
    /// Optional system prompt override.
    pub system_prompt_override: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash-latest".into(),
            temperature: 0.7,
            max_tokens: 8192,
            system_prompt_override: None,
        }
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            count: DEFAULT_QUESTION_COUNT,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// A successful generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Parsed questions, in response order. May be empty.
    pub mcqs: Vec<Mcq>,
    /// Model that produced the response.
    pub model: String,
    pub token_usage: TokenUsage,
    pub latency_ms: u64,
    /// Response lines that did not parse.
    pub skipped_lines: usize,
}

impl GenerationOutcome {
    /// True when the call succeeded but produced no usable questions.
    pub fn is_empty(&self) -> bool {
        self.mcqs.is_empty()
    }
}

/// Turns a topic into parsed MCQs through an [`LlmProvider`].
pub struct McqGenerator {
    provider: Arc<dyn LlmProvider>,
    config: GeneratorConfig,
}

impl McqGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, config: GeneratorConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Make one provider call for `request` and parse the response.
    #[instrument(skip(self, request), fields(provider = %self.provider.name(), topic = %request.topic))]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(GenerationError::InvalidRequest("topic is empty".into()));
        }
        if request.count == 0 {
            return Err(GenerationError::InvalidRequest(
                "question count must be at least 1".into(),
            ));
        }

        let llm_request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: build_mcq_prompt(topic, request.count),
            system_prompt: Some(
                self.config
                    .system_prompt_override
                    .clone()
                    .unwrap_or_else(|| MCQ_SYSTEM_PROMPT.to_string()),
            ),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stop_sequences: vec![],
        };

        let response = self
            .provider
            .generate(&llm_request)
            .await
            .map_err(|e| {
                tracing::error!("generation call failed: {e:#}");
                GenerationError::Failed(e)
            })?;

        let batch = parse_mcq_batch(&response.content);
        tracing::debug!(
            parsed = batch.mcqs.len(),
            skipped = batch.skipped_lines,
            "parsed model response"
        );
        if batch.mcqs.is_empty() {
            tracing::warn!(
                "model response contained no usable questions ({} lines skipped)",
                batch.skipped_lines
            );
        } else if batch.mcqs.len() < request.count as usize {
            tracing::info!(
                "received {} of {} requested questions",
                batch.mcqs.len(),
                request.count
            );
        }

        Ok(GenerationOutcome {
            mcqs: batch.mcqs,
            model: response.model,
            token_usage: response.token_usage,
            latency_ms: response.latency_ms,
            skipped_lines: batch.skipped_lines,
        })
    }
}
