//! Configuration loading and provider factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::generator::GeneratorConfig;
use quizforge_core::prompt::DEFAULT_QUESTION_COUNT;
use quizforge_core::test_paper::DEFAULT_TOTAL_TIME_MINUTES;
use quizforge_core::traits::LlmProvider;

use crate::gemini::GeminiProvider;
use crate::ollama::OllamaProvider;
use crate::openai::OpenAiProvider;

/// Configuration for a single LLM provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAI {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Ollama { base_url } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Provider used when a model is given without a `provider/` prefix.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
    /// Questions requested when the caller does not say.
    #[serde(default = "default_question_count")]
    pub default_question_count: u32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Directory holding saved tests.
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,
    /// Class IDs a test may be assigned to. Empty accepts any non-blank ID.
    #[serde(default = "default_classes")]
    pub classes: Vec<String>,
    #[serde(default = "default_total_time")]
    pub default_total_time_minutes: u32,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_question_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}
fn default_max_tokens() -> u32 {
    8192
}
fn default_tests_dir() -> PathBuf {
    PathBuf::from("./quizforge-tests")
}
fn default_classes() -> Vec<String> {
    ["ClassA", "ClassB", "ClassC", "ClassD"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_total_time() -> u32 {
    DEFAULT_TOTAL_TIME_MINUTES
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_question_count: default_question_count(),
            max_tokens: default_max_tokens(),
            tests_dir: default_tests_dir(),
            classes: default_classes(),
            default_total_time_minutes: default_total_time(),
        }
    }
}

/// A provider name paired with one of its models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub provider: String,
    pub model: String,
}

impl QuizforgeConfig {
    /// Split `provider/model`, falling back to the configured defaults.
    /// Both halves of `provider/model` must be non-empty.
    pub fn model_spec(&self, spec: Option<&str>) -> Result<ModelSpec> {
        let spec = match spec.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => match s.split_once('/') {
                Some((provider, model)) => {
                    let (provider, model) = (provider.trim(), model.trim());
                    anyhow::ensure!(
                        !provider.is_empty() && !model.is_empty(),
                        "invalid model '{s}', expected 'provider/model'"
                    );
                    ModelSpec {
                        provider: provider.to_string(),
                        model: model.to_string(),
                    }
                }
                None => ModelSpec {
                    provider: self.default_provider.clone(),
                    model: s.to_string(),
                },
            },
            None => ModelSpec {
                provider: self.default_provider.clone(),
                model: self.default_model.clone(),
            },
        };
        Ok(spec)
    }

    /// Generation settings for `model`, with an optional temperature override.
    pub fn generator_config(&self, model: &str, temperature: Option<f64>) -> GeneratorConfig {
        GeneratorConfig {
            model: model.to_string(),
            temperature: temperature.unwrap_or(self.default_temperature),
            max_tokens: self.max_tokens,
            system_prompt_override: None,
        }
    }

    /// Build the named provider from its configuration.
    ///
    /// An unconfigured `ollama` falls back to the local default URL; every
    /// other unconfigured name is an error.
    pub fn build_provider(&self, name: &str) -> Result<Box<dyn LlmProvider>> {
        match self.providers.get(name) {
            Some(config) => create_provider(name, config),
            None if name == "ollama" => create_provider(
                name,
                &ProviderConfig::Ollama {
                    base_url: default_ollama_url(),
                },
            ),
            None => {
                let mut available: Vec<&String> = self.providers.keys().collect();
                available.sort();
                anyhow::bail!("provider '{name}' not found in config. Available: {available:?}")
            }
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// An unset variable is an error naming it.
pub fn resolve_env_vars(s: &str) -> Result<String> {
    resolve_with(s, |name| std::env::var(name).ok())
}

fn resolve_with(s: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        let value = lookup(var_name)
            .with_context(|| format!("environment variable '{var_name}' is not set"))?;
        result.push_str(&rest[..start]);
        result.push_str(&value);
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}

fn resolve_provider_config(name: &str, config: &ProviderConfig) -> Result<ProviderConfig> {
    let resolve = |s: &str| {
        resolve_env_vars(s).with_context(|| format!("failed to resolve config for provider '{name}'"))
    };
    let resolve_opt = |s: &Option<String>| s.as_deref().map(resolve).transpose();

    Ok(match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve(api_key)?,
            base_url: resolve_opt(base_url)?,
        },
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve(api_key)?,
            base_url: resolve_opt(base_url)?,
            org_id: resolve_opt(org_id)?,
        },
        ProviderConfig::Ollama { base_url } => ProviderConfig::Ollama {
            base_url: resolve(base_url)?,
        },
    })
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable overrides: `QUIZFORGE_GEMINI_KEY`, `QUIZFORGE_OPENAI_KEY`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuizforgeConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

fn apply_env_overrides(config: &mut QuizforgeConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup("QUIZFORGE_GEMINI_KEY") {
        let entry = config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
            });
        if let ProviderConfig::Gemini { api_key, .. } = entry {
            *api_key = key;
        }
    }

    if let Some(key) = lookup("QUIZFORGE_OPENAI_KEY") {
        let entry = config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let ProviderConfig::OpenAI { api_key, .. } = entry {
            *api_key = key;
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}

/// Create a provider instance from its configuration.
///
/// `${VAR}` references are resolved here, so an unset variable or an empty
/// key fails before any request is made.
pub fn create_provider(name: &str, config: &ProviderConfig) -> Result<Box<dyn LlmProvider>> {
    let provider: Box<dyn LlmProvider> = match resolve_provider_config(name, config)? {
        ProviderConfig::Gemini { api_key, base_url } => {
            Box::new(GeminiProvider::new(&api_key, base_url)?)
        }
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Box::new(OpenAiProvider::new(&api_key, base_url, org_id)?),
        ProviderConfig::Ollama { base_url } => Box::new(OllamaProvider::new(&base_url)?),
    };
    tracing::debug!(provider = name, "created provider");
    Ok(provider)
}
